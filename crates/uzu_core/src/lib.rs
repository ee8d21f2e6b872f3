//! # Uzu Core
//!
//! Engine-agnostic game toolkit:
//! - Object pools with LIFO reuse and generational handles
//! - A name-based pool registry owned by the composition root
//! - Explicit tick-driven updaters, timers, regulators and a scheduler
//! - A keyed game-state machine
//! - A type-keyed messenger
//!
//! ## Architecture Rules
//!
//! 1. **No hidden globals** - registries are values the host creates and drops
//! 2. **No engine callbacks** - the host loop calls `tick`, spawn and unspawn
//! 3. **No allocation in spawn/unspawn** - pools pre-allocate their lists
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use uzu_core::{EntityFactory, FactoryError, PoolConfig, PoolRegistry, PooledEntity};
//! use uzu_shared::{Transform, Vec3};
//!
//! #[derive(Default)]
//! struct Bullet { position: Vec3, visible: bool }
//!
//! impl PooledEntity for Bullet {
//!     fn set_transform(&mut self, transform: Transform) { self.position = transform.position; }
//!     fn set_active(&mut self, active: bool) { self.visible = active; }
//! }
//!
//! let factory: Arc<dyn EntityFactory<Bullet>> =
//!     Arc::new(|_: &str| -> Result<Bullet, FactoryError> { Ok(Bullet::default()) });
//!
//! let mut pools = PoolRegistry::new();
//! pools.create("bullets", PoolConfig::new("bullet", 3), factory)?;
//!
//! let bullet = pools.spawn_from("bullets", Vec3::new(0.0, 1.0, 0.0))?;
//! assert!(pools.get("bullets").unwrap().get(bullet)?.visible);
//! pools.unspawn(bullet)?;
//! # Ok::<(), uzu_core::UzuError>(())
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod container;
pub mod error;
pub mod messaging;
pub mod pool;
pub mod registry;
pub mod tick;

pub use container::FixedList;
pub use error::{UzuError, UzuResult};
pub use messaging::{Message, Messenger, SubscriberId};
pub use pool::{
    EntityFactory, EntityHandle, FactoryError, GameObjectPool, PoolConfig, PoolEntry, PoolId,
    PooledEntity, RegistryConfig, SharedPool,
};
pub use registry::PoolRegistry;
pub use tick::{
    GameState, GameStateMachine, RangedRegulator, Regulator, Scheduler, ScopedTimer, SystemTimer,
    Timer, UpdateId, UpdateRegistry, Updateable,
};
