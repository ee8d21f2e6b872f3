//! Integration test for pool spawn/unspawn lifecycle.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use uzu_core::{
    EntityFactory, EntityHandle, FactoryError, GameObjectPool, PoolConfig, PooledEntity, UzuError,
};
use uzu_shared::{Quaternion, Transform, Vec3};

/// Minimal scene object: identity, placement and visibility.
#[derive(Debug)]
struct Bullet {
    serial: u32,
    transform: Transform,
    visible: bool,
    spawns: u32,
}

impl PooledEntity for Bullet {
    fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }

    fn set_active(&mut self, active: bool) {
        self.visible = active;
    }

    fn on_spawn(&mut self) {
        self.spawns += 1;
    }
}

struct BulletFactory {
    built: AtomicU32,
}

impl EntityFactory<Bullet> for BulletFactory {
    fn instantiate(&self, _prototype: &str) -> Result<Bullet, FactoryError> {
        Ok(Bullet {
            serial: self.built.fetch_add(1, Ordering::Relaxed),
            transform: Transform::IDENTITY,
            visible: true,
            spawns: 0,
        })
    }

    fn validate(&self, prototype: &str) -> Result<(), FactoryError> {
        if prototype == "bullet" {
            Ok(())
        } else {
            Err(FactoryError::MissingPrototype)
        }
    }

    fn default_rotation(&self, _prototype: &str) -> Quaternion {
        Quaternion::from_yaw(std::f32::consts::FRAC_PI_2)
    }
}

fn bullet_pool(config: PoolConfig) -> GameObjectPool<Bullet> {
    let factory = Arc::new(BulletFactory {
        built: AtomicU32::new(0),
    });
    GameObjectPool::new(config, factory).unwrap()
}

fn serial(pool: &GameObjectPool<Bullet>, handle: EntityHandle) -> u32 {
    pool.get(handle).unwrap().serial
}

#[test]
fn test_capacity_three_scenario() {
    let mut pool = bullet_pool(PoolConfig::new("bullet", 3));

    let handles: Vec<_> = (0..3)
        .map(|i| pool.spawn_at(Vec3::new(i as f32, 0.0, 0.0)).unwrap())
        .collect();
    assert_eq!(pool.active_count(), 3);

    assert!(matches!(
        pool.spawn_at(Vec3::ZERO),
        Err(UzuError::PoolExhausted { capacity: 3, .. })
    ));
    assert_eq!(pool.active_count(), 3);
    assert_eq!(pool.live_count(), 3);

    let released = handles[1];
    let released_serial = serial(&pool, released);
    pool.unspawn(released).unwrap();
    assert_eq!(pool.active_count(), 2);
    assert_eq!(pool.available_count(), 1);

    let reused = pool.spawn_at(Vec3::ZERO).unwrap();
    assert_eq!(serial(&pool, reused), released_serial);
    assert_eq!(pool.active_count(), 3);
    assert!(pool.check_invariants());
}

#[test]
fn test_spawn_unspawn_round_trip() {
    let mut pool = bullet_pool(PoolConfig::new("bullet", 4).with_prewarm(2));
    let before = pool.available_count();

    let h = pool.spawn_at(Vec3::ZERO).unwrap();
    pool.unspawn(h).unwrap();

    assert_eq!(pool.available_count(), before);
    assert_eq!(pool.live_count(), 2);
}

#[test]
fn test_spawn_applies_transform_and_visibility() {
    let mut pool = bullet_pool(PoolConfig::new("bullet", 2));
    let target = Vec3::new(4.0, 5.0, 6.0);

    let h = pool.spawn_at(target).unwrap();
    let bullet = pool.get(h).unwrap();
    assert_eq!(bullet.transform.position, target);
    assert_eq!(bullet.transform.rotation, Quaternion::from_yaw(std::f32::consts::FRAC_PI_2));
    assert!(bullet.visible);
    assert_eq!(bullet.spawns, 1);

    let facing = Quaternion::from_yaw(1.0);
    pool.unspawn(h).unwrap();
    let h = pool.spawn(Vec3::ZERO, facing).unwrap();
    let bullet = pool.get(h).unwrap();
    assert_eq!(bullet.transform, Transform::new(Vec3::ZERO, facing));
    assert_eq!(bullet.spawns, 2);
}

#[test]
fn test_unspawned_entity_is_hidden() {
    let mut pool = bullet_pool(PoolConfig::new("bullet", 2));
    let a = pool.spawn_at(Vec3::ZERO).unwrap();
    let b = pool.spawn_at(Vec3::ZERO).unwrap();

    pool.unspawn(a).unwrap();
    assert!(!pool.is_active(a));
    assert!(pool.is_active(b));
    assert_eq!(pool.active_entities().count(), 1);
    assert!(pool.active_entities().all(|(_, bullet)| bullet.visible));
}

#[test]
fn test_lifo_reuse_order() {
    let mut pool = bullet_pool(PoolConfig::new("bullet", 2));
    let a = pool.spawn_at(Vec3::ZERO).unwrap();
    let b = pool.spawn_at(Vec3::ZERO).unwrap();
    let (a_serial, b_serial) = (serial(&pool, a), serial(&pool, b));

    pool.unspawn(a).unwrap();
    pool.unspawn(b).unwrap();

    let first = pool.spawn_at(Vec3::ZERO).unwrap();
    let second = pool.spawn_at(Vec3::ZERO).unwrap();
    assert_eq!(serial(&pool, first), b_serial);
    assert_eq!(serial(&pool, second), a_serial);
}

#[test]
fn test_destroy_all_then_capacity_one() {
    let mut pool = bullet_pool(PoolConfig::new("bullet", 1));
    pool.spawn_at(Vec3::ZERO).unwrap();

    pool.destroy_all();
    assert_eq!(pool.active_count(), 0);
    assert_eq!(pool.available_count(), 0);

    assert!(pool.spawn_at(Vec3::ZERO).is_ok());
    assert!(matches!(
        pool.spawn_at(Vec3::ZERO),
        Err(UzuError::PoolExhausted { .. })
    ));
}

#[test]
fn test_invariants_hold_through_random_walk() {
    let mut pool = bullet_pool(PoolConfig::new("bullet", 8));
    let mut active: Vec<EntityHandle> = Vec::new();

    // Deterministic pseudo-random sequence of spawns and unspawns
    let mut state: u32 = 0x1234_5678;
    for _ in 0..500 {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;

        if state % 3 == 0 && !active.is_empty() {
            let h = active.swap_remove(state as usize % active.len());
            assert!(pool.unspawn(h).unwrap());
        } else {
            match pool.spawn_at(Vec3::ZERO) {
                Ok(h) => active.push(h),
                Err(e) => {
                    assert!(matches!(e, UzuError::PoolExhausted { .. }));
                    assert_eq!(active.len(), 8);
                }
            }
        }

        assert!(pool.live_count() <= pool.capacity());
        assert_eq!(pool.active_count(), active.len());
        assert!(pool.check_invariants());
    }
}

#[test]
fn test_unknown_prototype_fails_at_construction() {
    let factory = Arc::new(BulletFactory {
        built: AtomicU32::new(0),
    });
    let err = GameObjectPool::<Bullet>::new(PoolConfig::new("rocket", 4), factory).unwrap_err();
    assert_eq!(
        err,
        UzuError::Factory {
            prototype: "rocket".into(),
            reason: "unknown prototype".into(),
        }
    );
}
