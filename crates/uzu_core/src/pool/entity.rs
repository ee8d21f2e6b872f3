//! # Pooled Entities
//!
//! Handles are lightweight identifiers consisting of:
//! - The id of the owning pool
//! - An index into that pool's live entities
//! - A generation counter for detecting use after release

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use uzu_shared::Transform;

/// Source of unique pool ids for the whole process.
static NEXT_POOL_ID: AtomicU32 = AtomicU32::new(0);

/// Identifier of one pool.
///
/// Ids are never reused within a process, so a handle can always be traced
/// back to the pool that issued it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct PoolId(u32);

impl PoolId {
    /// Allocates a fresh pool id.
    #[must_use]
    pub fn next() -> Self {
        Self(NEXT_POOL_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw id.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for PoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Non-owning reference to an active pooled entity.
///
/// A handle is valid from the `spawn` that returned it until the entity is
/// unspawned or destroyed. After that every lookup through it fails with
/// [`crate::UzuError::StaleHandle`], even once the entity is reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EntityHandle {
    pool: PoolId,
    index: u32,
    generation: u32,
}

impl EntityHandle {
    #[inline]
    pub(crate) const fn new(pool: PoolId, index: u32, generation: u32) -> Self {
        Self {
            pool,
            index,
            generation,
        }
    }

    /// Returns the id of the pool that owns the entity.
    #[inline]
    #[must_use]
    pub const fn pool(self) -> PoolId {
        self.pool
    }

    /// Returns the entity's position in its pool's creation order.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.index
    }

    /// Returns the activation this handle was issued for.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

/// Contract between a pool and the entities it manages.
///
/// The host implements this for whatever its scene object is. The pool
/// calls the methods in a fixed order:
///
/// - spawn: `set_transform`, `set_active(true)`, `on_spawn`
/// - unspawn: `on_unspawn`, `set_active(false)`
/// - teardown: `on_destroy`, then the value is dropped
pub trait PooledEntity {
    /// Places the entity. Called before activation.
    fn set_transform(&mut self, transform: Transform);

    /// Shows or hides the entity in the simulation.
    fn set_active(&mut self, active: bool);

    /// Runs after the entity became active.
    fn on_spawn(&mut self) {}

    /// Runs while the entity is still active, right before it is hidden.
    fn on_unspawn(&mut self) {}

    /// Runs once before the pool drops the entity for good.
    fn on_destroy(&mut self) {}
}
