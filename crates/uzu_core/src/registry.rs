//! # Pool Registry
//!
//! Name-to-pool directory so distant call sites can spawn by name without
//! holding the pool itself.
//!
//! The registry is an ordinary value owned by whatever sets up the
//! simulation. Create one per scene (or per test) and drop or
//! [`PoolRegistry::clear`] it on teardown; there is no global instance.

use std::collections::HashMap;
use std::sync::Arc;

use uzu_shared::{Quaternion, Vec3};

use crate::error::{UzuError, UzuResult};
use crate::pool::{
    EntityFactory, EntityHandle, GameObjectPool, PoolConfig, PoolId, PooledEntity,
    RegistryConfig,
};

/// Directory of named pools holding one entity type.
pub struct PoolRegistry<E: PooledEntity> {
    /// Pools by registry name.
    pools: HashMap<String, GameObjectPool<E>>,
    /// Reverse lookup so handles can find their pool.
    names: HashMap<PoolId, String>,
}

impl<E: PooledEntity> Default for PoolRegistry<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: PooledEntity> PoolRegistry<E> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pools: HashMap::new(),
            names: HashMap::new(),
        }
    }

    /// Builds every pool listed in `config` with a shared factory.
    ///
    /// Bad entries are logged and skipped so one broken pool does not take
    /// the rest down. The skipped entries' errors are returned.
    pub fn load(
        &mut self,
        config: &RegistryConfig,
        factory: &Arc<dyn EntityFactory<E>>,
    ) -> Vec<UzuError> {
        let mut errors = Vec::new();
        for entry in &config.pools {
            if let Err(e) = self.create(&entry.name, entry.pool.clone(), Arc::clone(factory)) {
                tracing::error!("Skipping pool [{}]: {}", entry.name, e);
                errors.push(e);
            }
        }
        tracing::debug!(
            "Loaded {} of {} configured pools",
            config.pools.len() - errors.len(),
            config.pools.len()
        );
        errors
    }

    /// Builds a pool and registers it under `name`.
    ///
    /// # Errors
    ///
    /// - [`UzuError::InvalidConfig`] for an empty name
    /// - [`UzuError::DuplicateName`] if `name` is taken
    /// - any error from [`GameObjectPool::new`]
    ///
    /// The name is checked first; a rejected name builds nothing.
    pub fn create(
        &mut self,
        name: &str,
        config: PoolConfig,
        factory: Arc<dyn EntityFactory<E>>,
    ) -> UzuResult<PoolId> {
        self.check_name(name)?;
        let pool = GameObjectPool::new(config, factory)?;
        let id = pool.id();
        self.register(name, pool)?;
        Ok(id)
    }

    /// Registers an existing pool under `name`.
    ///
    /// # Errors
    ///
    /// - [`UzuError::InvalidConfig`] for an empty name
    /// - [`UzuError::DuplicateName`] if `name` is taken. The already
    ///   registered pool stays; the rejected one is dropped.
    pub fn register(&mut self, name: &str, pool: GameObjectPool<E>) -> UzuResult<()> {
        self.check_name(name)?;
        self.names.insert(pool.id(), name.to_owned());
        self.pools.insert(name.to_owned(), pool);
        Ok(())
    }

    /// Removes the pool registered under `name` and hands it back.
    ///
    /// Returns `None` if there was no such pool.
    pub fn unregister(&mut self, name: &str) -> Option<GameObjectPool<E>> {
        let pool = self.pools.remove(name)?;
        self.names.remove(&pool.id());
        Some(pool)
    }

    /// Returns the pool registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&GameObjectPool<E>> {
        self.pools.get(name)
    }

    /// Returns the pool registered under `name` mutably.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut GameObjectPool<E>> {
        self.pools.get_mut(name)
    }

    /// Returns true if a pool is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.pools.contains_key(name)
    }

    /// Returns the number of registered pools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pools.len()
    }

    /// Returns true if no pool is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    /// Iterates over registered names in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.pools.keys().map(String::as_str)
    }

    /// Returns the registry name of the pool that issued `handle`.
    #[must_use]
    pub fn name_of(&self, handle: EntityHandle) -> Option<&str> {
        self.names.get(&handle.pool()).map(String::as_str)
    }

    /// Spawns from the pool named `name` with its default rotation.
    ///
    /// # Errors
    ///
    /// [`UzuError::UnknownPool`], or anything [`GameObjectPool::spawn`] returns.
    pub fn spawn_from(&mut self, name: &str, position: Vec3) -> UzuResult<EntityHandle> {
        self.pool_for_spawn(name)?.spawn_at(position)
    }

    /// Spawns from the pool named `name` with an explicit rotation.
    ///
    /// # Errors
    ///
    /// [`UzuError::UnknownPool`], or anything [`GameObjectPool::spawn`] returns.
    pub fn spawn_from_with(
        &mut self,
        name: &str,
        position: Vec3,
        rotation: Quaternion,
    ) -> UzuResult<EntityHandle> {
        self.pool_for_spawn(name)?.spawn(position, rotation)
    }

    /// Returns an entity to whichever registered pool issued it.
    ///
    /// # Errors
    ///
    /// [`UzuError::UnknownPool`] if its pool is not registered here, or
    /// anything [`GameObjectPool::unspawn`] returns.
    pub fn unspawn(&mut self, handle: EntityHandle) -> UzuResult<bool> {
        let pool = self
            .names
            .get(&handle.pool())
            .and_then(|name| self.pools.get_mut(name));
        match pool {
            Some(pool) => pool.unspawn(handle),
            None => {
                tracing::warn!("Unspawn for unregistered pool {}", handle.pool());
                Err(UzuError::UnknownPool(handle.pool().to_string()))
            }
        }
    }

    /// Releases every active entity in every pool.
    pub fn unspawn_all(&mut self) -> usize {
        self.pools.values_mut().map(GameObjectPool::unspawn_all).sum()
    }

    /// Returns the number of active entities across all pools.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.pools.values().map(GameObjectPool::active_count).sum()
    }

    /// Destroys every pooled entity and forgets every pool.
    ///
    /// Use on scene transitions or between tests.
    pub fn clear(&mut self) {
        for pool in self.pools.values_mut() {
            pool.destroy_all();
        }
        tracing::debug!("Pool registry cleared ({} pools)", self.pools.len());
        self.pools.clear();
        self.names.clear();
    }

    /// Rejects names that cannot be registered.
    fn check_name(&self, name: &str) -> UzuResult<()> {
        if name.is_empty() {
            tracing::error!("Pool name is empty.");
            return Err(UzuError::InvalidConfig("pool name is empty".into()));
        }
        if self.pools.contains_key(name) {
            tracing::error!("Pool [{}] already exists.", name);
            return Err(UzuError::DuplicateName(name.to_owned()));
        }
        Ok(())
    }

    fn pool_for_spawn(&mut self, name: &str) -> UzuResult<&mut GameObjectPool<E>> {
        self.pools.get_mut(name).ok_or_else(|| {
            tracing::error!("Pool [{}] does not exist.", name);
            UzuError::UnknownPool(name.to_owned())
        })
    }
}

impl<E: PooledEntity> std::fmt::Debug for PoolRegistry<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.pools.iter()).finish()
    }
}
