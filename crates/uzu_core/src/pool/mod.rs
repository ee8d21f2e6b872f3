//! # Object Pooling
//!
//! Reusable entities handed out by handle.
//!
//! ## Design Philosophy
//!
//! A pool creates entities through an [`EntityFactory`] only when it has no
//! released entity to reuse. During steady-state play spawn and unspawn
//! just move indices between two pre-allocated lists:
//! - No heap allocations
//! - No entity construction
//! - Stale handles are detected by generation, never dereferenced

mod allocator;
mod config;
mod entity;
mod factory;
mod shared;

pub use allocator::GameObjectPool;
pub use config::{PoolConfig, PoolEntry, RegistryConfig};
pub use entity::{EntityHandle, PoolId, PooledEntity};
pub use factory::{EntityFactory, FactoryError};
pub use shared::SharedPool;
