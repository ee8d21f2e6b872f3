//! # Shared Pool
//!
//! A pool behind a `parking_lot::Mutex` for hosts that spawn from more than
//! one thread (e.g. a server simulation with worker threads).
//!
//! Each call locks for exactly one pool operation. Pool operations never
//! block or do I/O, so the critical section is always bounded.

use std::sync::Arc;

use parking_lot::Mutex;
use uzu_shared::{Quaternion, Vec3};

use super::allocator::GameObjectPool;
use super::entity::{EntityHandle, PoolId, PooledEntity};
use crate::error::UzuResult;

/// Cloneable, thread-safe handle to one pool.
pub struct SharedPool<E: PooledEntity> {
    id: PoolId,
    inner: Arc<Mutex<GameObjectPool<E>>>,
}

impl<E: PooledEntity> Clone for SharedPool<E> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<E: PooledEntity> SharedPool<E> {
    /// Wraps a pool for shared use.
    #[must_use]
    pub fn new(pool: GameObjectPool<E>) -> Self {
        Self {
            id: pool.id(),
            inner: Arc::new(Mutex::new(pool)),
        }
    }

    /// Returns the wrapped pool's id without locking.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> PoolId {
        self.id
    }

    /// See [`GameObjectPool::spawn`].
    ///
    /// # Errors
    ///
    /// Same as [`GameObjectPool::spawn`].
    pub fn spawn(&self, position: Vec3, rotation: Quaternion) -> UzuResult<EntityHandle> {
        self.inner.lock().spawn(position, rotation)
    }

    /// See [`GameObjectPool::spawn_at`].
    ///
    /// # Errors
    ///
    /// Same as [`GameObjectPool::spawn`].
    pub fn spawn_at(&self, position: Vec3) -> UzuResult<EntityHandle> {
        self.inner.lock().spawn_at(position)
    }

    /// See [`GameObjectPool::unspawn`].
    ///
    /// # Errors
    ///
    /// Same as [`GameObjectPool::unspawn`].
    pub fn unspawn(&self, handle: EntityHandle) -> UzuResult<bool> {
        self.inner.lock().unspawn(handle)
    }

    /// See [`GameObjectPool::unspawn_all`].
    pub fn unspawn_all(&self) -> usize {
        self.inner.lock().unspawn_all()
    }

    /// See [`GameObjectPool::destroy_all`].
    pub fn destroy_all(&self) {
        self.inner.lock().destroy_all();
    }

    /// Returns the number of active entities.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.inner.lock().active_count()
    }

    /// Runs `f` with the pool locked, for reads or batched edits.
    ///
    /// Keep `f` short; every other user of this pool waits for it.
    pub fn with<R>(&self, f: impl FnOnce(&mut GameObjectPool<E>) -> R) -> R {
        f(&mut self.inner.lock())
    }
}
