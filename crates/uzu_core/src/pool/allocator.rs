//! # Game Object Pool
//!
//! Free-list allocator for entities that are spawned and unspawned at high
//! frequency (bullets, particles, list items).
//!
//! ## Entity States
//!
//! ```text
//!  factory ──> Active ⇄ Available ──> dropped
//!               (spawn / unspawn)     (destroy_all, pool drop)
//! ```

use std::sync::Arc;

use uzu_shared::{Quaternion, Transform, Vec3};

use super::config::PoolConfig;
use super::entity::{EntityHandle, PoolId, PooledEntity};
use super::factory::EntityFactory;
use crate::container::FixedList;
use crate::error::{UzuError, UzuResult};

/// One entity plus the pool's bookkeeping for it.
struct Slot<E> {
    entity: E,
    /// Generation of the current (or last) activation.
    generation: u32,
    active: bool,
}

/// A pool of reusable entities built from one prototype.
///
/// Entities are created on demand up to the capacity and are never dropped
/// until [`GameObjectPool::destroy_all`] or the pool itself goes away.
/// Released entities are reused most-recent-first.
///
/// # Thread Safety
///
/// This pool is NOT thread-safe. Use one pool per thread or wrap it in a
/// [`super::SharedPool`].
///
/// # Example
///
/// ```rust,ignore
/// let factory: Arc<dyn EntityFactory<Bullet>> = Arc::new(BulletFactory);
/// let mut pool = GameObjectPool::new(PoolConfig::new("bullet", 64), factory)?;
///
/// let bullet = pool.spawn_at(Vec3::new(0.0, 1.0, 0.0))?;
/// pool.unspawn(bullet)?;
/// ```
pub struct GameObjectPool<E: PooledEntity> {
    id: PoolId,
    config: PoolConfig,
    factory: Arc<dyn EntityFactory<E>>,
    /// Orientation for spawns that do not give one.
    default_rotation: Quaternion,
    /// Every entity created by this pool, in creation order.
    live: FixedList<Slot<E>>,
    /// Indices into `live` of inactive entities. Used as a stack.
    available: FixedList<u32>,
    /// Last generation handed out.
    generation: u32,
}

impl<E: PooledEntity> GameObjectPool<E> {
    /// Builds a pool and creates its prewarmed entities.
    ///
    /// Each prewarmed entity is spawned once at the origin and then released
    /// with [`GameObjectPool::unspawn_all`], so its spawn and unspawn hooks
    /// have run before the host first sees it. The last one created is the
    /// first one reused.
    ///
    /// # Errors
    ///
    /// - [`UzuError::InvalidConfig`] if `config` does not validate
    /// - [`UzuError::Factory`] if the factory rejects the prototype or fails
    ///   to build a prewarmed entity
    pub fn new(config: PoolConfig, factory: Arc<dyn EntityFactory<E>>) -> UzuResult<Self> {
        config.validate()?;
        factory
            .validate(&config.prototype)
            .map_err(|e| e.for_prototype(&config.prototype))?;

        let default_rotation = factory.default_rotation(&config.prototype);
        let mut pool = Self {
            id: PoolId::next(),
            live: FixedList::new(config.capacity),
            available: FixedList::new(config.capacity),
            config,
            factory,
            default_rotation,
            generation: 0,
        };

        for _ in 0..pool.config.prewarm {
            pool.spawn_at(Vec3::ZERO)?;
        }
        pool.unspawn_all();

        tracing::debug!(
            "Pool {} created for [{}]: capacity {}, prewarmed {}",
            pool.id,
            pool.config.prototype,
            pool.config.capacity,
            pool.config.prewarm
        );
        Ok(pool)
    }

    /// Returns this pool's id.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> PoolId {
        self.id
    }

    /// Returns the prototype new entities are built from.
    #[inline]
    #[must_use]
    pub fn prototype(&self) -> &str {
        &self.config.prototype
    }

    /// Returns the current capacity. Only changes if growth is allowed.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.live.capacity()
    }

    /// Returns true if the pool grows instead of failing when exhausted.
    #[inline]
    #[must_use]
    pub const fn growth_allowed(&self) -> bool {
        self.config.growth_allowed
    }

    /// Returns the number of entities created so far.
    #[inline]
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Returns the number of inactive, reusable entities.
    #[inline]
    #[must_use]
    pub fn available_count(&self) -> usize {
        self.available.len()
    }

    /// Returns the number of active entities.
    #[inline]
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.live.len() - self.available.len()
    }

    /// Spawns an entity at `position` with the prototype's default rotation.
    ///
    /// # Errors
    ///
    /// See [`GameObjectPool::spawn`].
    pub fn spawn_at(&mut self, position: Vec3) -> UzuResult<EntityHandle> {
        self.spawn(position, self.default_rotation)
    }

    /// Spawns an entity at `position` facing `rotation`.
    ///
    /// Reuses the most recently released entity if there is one, otherwise
    /// builds a new one. The entity is placed, then activated, then its
    /// `on_spawn` hook runs.
    ///
    /// # Errors
    ///
    /// - [`UzuError::PoolExhausted`] if every entity is active and the pool
    ///   may not grow. Nothing is modified.
    /// - [`UzuError::Factory`] if building a new entity fails.
    pub fn spawn(&mut self, position: Vec3, rotation: Quaternion) -> UzuResult<EntityHandle> {
        let index = match self.available.pop() {
            Some(index) => index,
            None => self.create_entity()?,
        };

        self.generation = self.generation.wrapping_add(1);
        let generation = self.generation;

        let slot = self.live.get_mut(index as usize)?;
        slot.entity.set_transform(Transform::new(position, rotation));
        slot.entity.set_active(true);
        slot.active = true;
        slot.generation = generation;
        slot.entity.on_spawn();

        debug_assert!(self.check_invariants());
        Ok(EntityHandle::new(self.id, index, generation))
    }

    /// Returns an active entity to the pool.
    ///
    /// Runs `on_unspawn` while the entity is still active, then hides it and
    /// pushes it on top of the reuse stack.
    ///
    /// Returns `Ok(false)` if the entity was already available, so releasing
    /// twice is harmless.
    ///
    /// # Errors
    ///
    /// - [`UzuError::ForeignEntity`] if another pool issued the handle
    /// - [`UzuError::StaleHandle`] if the entity was destroyed, or was
    ///   released and spawned again since this handle was issued
    pub fn unspawn(&mut self, handle: EntityHandle) -> UzuResult<bool> {
        let slot = self.slot(handle)?;
        if !slot.active {
            return Ok(false);
        }
        if slot.generation != handle.generation() {
            tracing::warn!(
                "Pool {}: unspawn through a stale handle (entity {})",
                self.id,
                handle.index()
            );
            return Err(UzuError::StaleHandle);
        }

        self.release(handle.index())?;
        debug_assert!(self.check_invariants());
        Ok(true)
    }

    /// Releases every active entity, in creation order.
    ///
    /// Returns the number of entities released.
    pub fn unspawn_all(&mut self) -> usize {
        let mut released = 0;
        for index in 0..self.live.len() {
            let Ok(raw) = u32::try_from(index) else {
                break;
            };
            let active = self.live.get(index).is_ok_and(|slot| slot.active);
            if active && self.release(raw).is_ok() {
                released += 1;
            }
        }
        debug_assert!(self.check_invariants());
        released
    }

    /// Destroys every entity, active or available.
    ///
    /// Each entity's `on_destroy` hook runs before it is dropped. The pool
    /// stays usable with the same capacity; all outstanding handles turn
    /// stale.
    pub fn destroy_all(&mut self) {
        let destroyed = self.live.len();
        for slot in self.live.iter_mut() {
            slot.entity.on_destroy();
        }
        self.live.clear();
        self.available.clear();

        tracing::debug!(
            "Pool {} [{}]: destroyed {} entities",
            self.id,
            self.config.prototype,
            destroyed
        );
    }

    /// Returns true if `handle` refers to a currently active entity here.
    #[must_use]
    pub fn is_active(&self, handle: EntityHandle) -> bool {
        self.slot(handle)
            .is_ok_and(|slot| slot.active && slot.generation == handle.generation())
    }

    /// Returns true if this pool issued `handle`.
    #[inline]
    #[must_use]
    pub fn owns(&self, handle: EntityHandle) -> bool {
        handle.pool() == self.id
    }

    /// Gets the active entity behind `handle`.
    ///
    /// # Errors
    ///
    /// [`UzuError::ForeignEntity`] or [`UzuError::StaleHandle`].
    pub fn get(&self, handle: EntityHandle) -> UzuResult<&E> {
        let slot = self.slot(handle)?;
        if slot.active && slot.generation == handle.generation() {
            Ok(&slot.entity)
        } else {
            Err(UzuError::StaleHandle)
        }
    }

    /// Gets the active entity behind `handle` mutably.
    ///
    /// # Errors
    ///
    /// [`UzuError::ForeignEntity`] or [`UzuError::StaleHandle`].
    pub fn get_mut(&mut self, handle: EntityHandle) -> UzuResult<&mut E> {
        self.get(handle)?;
        let slot = self.live.get_mut(handle.index() as usize)?;
        Ok(&mut slot.entity)
    }

    /// Iterates over handles of active entities in creation order.
    pub fn active_handles(&self) -> impl Iterator<Item = EntityHandle> + '_ {
        self.active_entities().map(|(handle, _)| handle)
    }

    /// Iterates over active entities in creation order.
    pub fn active_entities(&self) -> impl Iterator<Item = (EntityHandle, &E)> + '_ {
        let id = self.id;
        (0u32..)
            .zip(self.live.iter())
            .filter(|(_, slot)| slot.active)
            .map(move |(index, slot)| (EntityHandle::new(id, index, slot.generation), &slot.entity))
    }

    /// Checks the pool's bookkeeping:
    ///
    /// - no more entities than capacity
    /// - every available index points at an inactive entity, exactly once
    /// - every inactive entity is available
    #[must_use]
    pub fn check_invariants(&self) -> bool {
        if self.live.len() > self.live.capacity() {
            return false;
        }

        let mut seen = vec![false; self.live.len()];
        for &index in &self.available {
            let index = index as usize;
            match self.live.get(index) {
                Ok(slot) if !slot.active && !seen[index] => seen[index] = true,
                _ => return false,
            }
        }

        let inactive = self.live.iter().filter(|slot| !slot.active).count();
        inactive == self.available.len()
    }

    /// Builds a new inactive entity, growing the pool if allowed.
    ///
    /// The entity is recorded in `live` but NOT pushed onto `available`.
    fn create_entity(&mut self) -> UzuResult<u32> {
        if self.live.is_full() {
            if !self.config.growth_allowed {
                tracing::warn!(
                    "Pool {} [{}] exhausted: all {} entities are active",
                    self.id,
                    self.config.prototype,
                    self.live.capacity()
                );
                return Err(UzuError::PoolExhausted {
                    pool: self.id.raw(),
                    capacity: self.live.capacity(),
                });
            }
            let additional = self.live.capacity().max(1);
            self.live.grow(additional);
            self.available.grow(additional);
            tracing::debug!(
                "Pool {} [{}] grew to {} entities",
                self.id,
                self.config.prototype,
                self.live.capacity()
            );
        }

        let mut entity = self.factory.instantiate(&self.config.prototype).map_err(|e| {
            tracing::error!(
                "Pool {}: factory failed for [{}]: {}",
                self.id,
                self.config.prototype,
                e
            );
            e.for_prototype(&self.config.prototype)
        })?;
        entity.set_active(false);

        let index = u32::try_from(self.live.len())
            .map_err(|_| UzuError::InvalidConfig("pool index exceeds u32::MAX".into()))?;
        self.live.push(Slot {
            entity,
            generation: 0,
            active: false,
        })?;
        Ok(index)
    }

    /// Deactivates the entity at `index` and pushes it onto the reuse stack.
    fn release(&mut self, index: u32) -> UzuResult<()> {
        let slot = self.live.get_mut(index as usize)?;
        slot.entity.on_unspawn();
        slot.entity.set_active(false);
        slot.active = false;
        self.available.push(index)
    }

    /// Resolves a handle to its slot without checking the generation.
    fn slot(&self, handle: EntityHandle) -> UzuResult<&Slot<E>> {
        if !self.owns(handle) {
            tracing::warn!(
                "Pool {}: entity {} belongs to pool {}",
                self.id,
                handle.index(),
                handle.pool()
            );
            return Err(UzuError::ForeignEntity {
                pool: self.id.raw(),
            });
        }
        self.live
            .get(handle.index() as usize)
            .map_err(|_| UzuError::StaleHandle)
    }
}

impl<E: PooledEntity> Drop for GameObjectPool<E> {
    fn drop(&mut self) {
        for slot in self.live.iter_mut() {
            slot.entity.on_destroy();
        }
    }
}

impl<E: PooledEntity> std::fmt::Debug for GameObjectPool<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameObjectPool")
            .field("id", &self.id)
            .field("prototype", &self.config.prototype)
            .field("capacity", &self.live.capacity())
            .field("live", &self.live.len())
            .field("available", &self.available.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::factory::FactoryError;

    /// Records every call the pool makes on it.
    #[derive(Debug, Default)]
    struct Tracker {
        serial: usize,
        position: Vec3,
        active: bool,
        calls: Vec<&'static str>,
    }

    impl PooledEntity for Tracker {
        fn set_transform(&mut self, transform: Transform) {
            self.position = transform.position;
            self.calls.push("transform");
        }

        fn set_active(&mut self, active: bool) {
            self.active = active;
            self.calls.push(if active { "enable" } else { "disable" });
        }

        fn on_spawn(&mut self) {
            assert!(self.active, "on_spawn must run after activation");
            self.calls.push("spawn");
        }

        fn on_unspawn(&mut self) {
            assert!(self.active, "on_unspawn must run before deactivation");
            self.calls.push("unspawn");
        }
    }

    fn tracker_factory() -> Arc<dyn EntityFactory<Tracker>> {
        let counter = std::sync::atomic::AtomicUsize::new(0);
        Arc::new(move |_: &str| -> Result<Tracker, FactoryError> {
            let serial = counter.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
            Ok(Tracker {
                serial,
                ..Tracker::default()
            })
        })
    }

    fn pool(capacity: usize) -> GameObjectPool<Tracker> {
        GameObjectPool::new(PoolConfig::new("tracker", capacity), tracker_factory()).unwrap()
    }

    fn serial(pool: &GameObjectPool<Tracker>, handle: EntityHandle) -> usize {
        pool.get(handle).unwrap().serial
    }

    #[test]
    fn test_spawn_places_then_activates() {
        let mut pool = pool(2);
        let h = pool.spawn_at(Vec3::new(1.0, 2.0, 3.0)).unwrap();

        let tracker = pool.get(h).unwrap();
        assert_eq!(tracker.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(tracker.calls, ["disable", "transform", "enable", "spawn"]);
        assert_eq!(pool.active_count(), 1);
    }

    #[test]
    fn test_unspawn_hook_order() {
        let mut pool = pool(1);
        let h = pool.spawn_at(Vec3::ZERO).unwrap();
        assert!(pool.unspawn(h).unwrap());

        let h2 = pool.spawn_at(Vec3::ZERO).unwrap();
        let calls = &pool.get(h2).unwrap().calls;
        assert_eq!(&calls[4..6], ["unspawn", "disable"]);
    }

    #[test]
    fn test_exhaustion_does_not_mutate() {
        let mut pool = pool(2);
        pool.spawn_at(Vec3::ZERO).unwrap();
        pool.spawn_at(Vec3::ZERO).unwrap();

        let err = pool.spawn_at(Vec3::ZERO).unwrap_err();
        assert_eq!(
            err,
            UzuError::PoolExhausted {
                pool: pool.id().raw(),
                capacity: 2
            }
        );
        assert_eq!(pool.live_count(), 2);
        assert_eq!(pool.active_count(), 2);
        assert!(pool.check_invariants());
    }

    #[test]
    fn test_lifo_reuse() {
        let mut pool = pool(2);
        let a = pool.spawn_at(Vec3::ZERO).unwrap();
        let b = pool.spawn_at(Vec3::ZERO).unwrap();
        let b_serial = serial(&pool, b);

        pool.unspawn(a).unwrap();
        pool.unspawn(b).unwrap();

        let next = pool.spawn_at(Vec3::ZERO).unwrap();
        assert_eq!(serial(&pool, next), b_serial);
        assert_eq!(next.index(), b.index());
    }

    #[test]
    fn test_double_unspawn_is_noop() {
        let mut pool = pool(2);
        let h = pool.spawn_at(Vec3::ZERO).unwrap();

        assert!(pool.unspawn(h).unwrap());
        assert!(!pool.unspawn(h).unwrap());
        assert_eq!(pool.available_count(), 1);
        assert!(pool.check_invariants());
    }

    #[test]
    fn test_stale_handle_rejected_after_reuse() {
        let mut pool = pool(1);
        let old = pool.spawn_at(Vec3::ZERO).unwrap();
        pool.unspawn(old).unwrap();
        let new = pool.spawn_at(Vec3::ZERO).unwrap();

        assert_eq!(old.index(), new.index());
        assert_eq!(pool.get(old).unwrap_err(), UzuError::StaleHandle);
        assert_eq!(pool.unspawn(old), Err(UzuError::StaleHandle));
        assert!(pool.is_active(new));
        assert_eq!(pool.active_count(), 1);
    }

    #[test]
    fn test_foreign_handle_rejected() {
        let mut first = pool(1);
        let mut second = pool(1);
        let h = first.spawn_at(Vec3::ZERO).unwrap();

        assert_eq!(
            second.unspawn(h),
            Err(UzuError::ForeignEntity {
                pool: second.id().raw()
            })
        );
        assert!(first.is_active(h));
        assert!(!second.owns(h));
    }

    #[test]
    fn test_growth_doubles_capacity() {
        let mut pool = GameObjectPool::new(
            PoolConfig::new("tracker", 2).with_growth(true),
            tracker_factory(),
        )
        .unwrap();

        for _ in 0..3 {
            pool.spawn_at(Vec3::ZERO).unwrap();
        }
        assert_eq!(pool.capacity(), 4);
        assert_eq!(pool.active_count(), 3);
        assert!(pool.check_invariants());
    }

    #[test]
    fn test_prewarm_reuses_last_created_first() {
        let mut pool = GameObjectPool::new(
            PoolConfig::new("tracker", 4).with_prewarm(3),
            tracker_factory(),
        )
        .unwrap();
        assert_eq!(pool.live_count(), 3);
        assert_eq!(pool.available_count(), 3);
        assert_eq!(pool.active_count(), 0);
        assert!(pool.check_invariants());

        let h = pool.spawn_at(Vec3::ZERO).unwrap();
        assert_eq!(serial(&pool, h), 2);

        // Prewarm spawned and released it once already
        let calls = &pool.get(h).unwrap().calls;
        assert_eq!(&calls[1..4], ["transform", "enable", "spawn"]);
        assert_eq!(&calls[4..6], ["unspawn", "disable"]);
        assert_eq!(calls.len(), 9);
    }

    #[test]
    fn test_unspawn_all_in_creation_order() {
        let mut pool = pool(3);
        let handles: Vec<_> = (0..3).map(|_| pool.spawn_at(Vec3::ZERO).unwrap()).collect();
        pool.unspawn(handles[1]).unwrap();

        assert_eq!(pool.unspawn_all(), 2);
        assert_eq!(pool.active_count(), 0);
        assert_eq!(pool.available.as_slice(), &[1, 0, 2]);
    }

    #[test]
    fn test_destroy_all_resets() {
        let mut pool = pool(1);
        let h = pool.spawn_at(Vec3::ZERO).unwrap();
        pool.destroy_all();

        assert_eq!(pool.active_count(), 0);
        assert_eq!(pool.available_count(), 0);
        assert_eq!(pool.capacity(), 1);
        assert_eq!(pool.get(h).unwrap_err(), UzuError::StaleHandle);

        pool.spawn_at(Vec3::ZERO).unwrap();
        assert!(matches!(
            pool.spawn_at(Vec3::ZERO),
            Err(UzuError::PoolExhausted { .. })
        ));
    }

    #[test]
    fn test_missing_prototype_fails_construction() {
        struct Strict;
        impl EntityFactory<Tracker> for Strict {
            fn instantiate(&self, _: &str) -> Result<Tracker, FactoryError> {
                Ok(Tracker::default())
            }
            fn validate(&self, _: &str) -> Result<(), FactoryError> {
                Err(FactoryError::MissingPrototype)
            }
        }

        let err = GameObjectPool::<Tracker>::new(PoolConfig::new("ghost", 1), Arc::new(Strict))
            .unwrap_err();
        assert!(matches!(err, UzuError::Factory { ref prototype, .. } if prototype == "ghost"));
    }

    #[test]
    fn test_active_entities_view() {
        let mut pool = pool(3);
        let a = pool.spawn_at(Vec3::ZERO).unwrap();
        let b = pool.spawn_at(Vec3::ZERO).unwrap();
        let c = pool.spawn_at(Vec3::ZERO).unwrap();
        pool.unspawn(b).unwrap();

        let active: Vec<_> = pool.active_handles().collect();
        assert_eq!(active, vec![a, c]);
    }
}
