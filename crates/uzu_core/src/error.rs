//! # Error Types
//!
//! Every error in this crate is recoverable. Operations report through
//! `tracing` and hand the error back; none of them abort the tick.

use thiserror::Error;

/// Errors that can occur in the pooling, ticking and messaging layers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UzuError {
    /// Tried to add to a full fixed-capacity container.
    #[error("capacity exceeded: container holds at most {capacity} items")]
    CapacityExceeded {
        /// The container's fixed capacity.
        capacity: usize,
    },

    /// Index outside the logical size of a container.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The logical length at the time of the call.
        len: usize,
    },

    /// Every entity of a non-growing pool is active.
    #[error("pool {pool} exhausted: all {capacity} entities are active")]
    PoolExhausted {
        /// Raw id of the exhausted pool.
        pool: u32,
        /// Its capacity.
        capacity: usize,
    },

    /// Handle was issued by a different pool.
    #[error("entity does not belong to pool {pool}")]
    ForeignEntity {
        /// Raw id of the pool the handle was presented to.
        pool: u32,
    },

    /// Handle refers to an earlier activation of a reused entity.
    #[error("stale entity handle: entity was released or destroyed")]
    StaleHandle,

    /// A pool with this name is already registered.
    #[error("pool [{0}] already exists")]
    DuplicateName(String),

    /// No pool registered under this name.
    #[error("pool [{0}] does not exist")]
    UnknownPool(String),

    /// The entity construction backend failed.
    #[error("failed to build entity from prototype [{prototype}]: {reason}")]
    Factory {
        /// The prototype that could not be built.
        prototype: String,
        /// Backend-supplied reason.
        reason: String,
    },

    /// Invalid pool or registry configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A message that requires a receiver reached no subscriber.
    #[error("message of type [{0}] requires a receiver")]
    NoReceiver(&'static str),

    /// No game state registered under this key.
    #[error("invalid state [{0}]")]
    UnknownState(String),

    /// A game state is already registered under this key.
    #[error("state [{0}] already exists")]
    DuplicateState(String),

    /// Work was scheduled with a delay that is not in the future.
    #[error("work must be scheduled for sometime in the future")]
    InvalidDelay,
}

/// Result type for toolkit operations.
pub type UzuResult<T> = Result<T, UzuError>;
