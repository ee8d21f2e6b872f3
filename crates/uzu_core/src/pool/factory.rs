//! # Entity Factory
//!
//! The construction backend a pool calls when it must create a new entity.
//!
//! ```text
//! Host implements:          Pool calls:
//! ┌──────────────────┐      ┌─────────────────────────────┐
//! │ impl EntityFactory│ ←── │ validate()  at construction │
//! └──────────────────┘      │ instantiate() on growth     │
//!                           └─────────────────────────────┘
//! ```

use thiserror::Error;
use uzu_shared::Quaternion;

use crate::error::UzuError;

/// Failures reported by an entity construction backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FactoryError {
    /// The backend has no template under this id.
    #[error("unknown prototype")]
    MissingPrototype,

    /// The backend failed for its own reasons.
    #[error("{0}")]
    Backend(String),
}

impl FactoryError {
    /// Wraps this failure with the prototype it concerned.
    #[must_use]
    pub fn for_prototype(self, prototype: &str) -> UzuError {
        UzuError::Factory {
            prototype: prototype.to_owned(),
            reason: self.to_string(),
        }
    }
}

/// Builds entities from prototype ids.
///
/// One factory is usually shared by every pool of a host, so it is handed to
/// pools behind an `Arc`.
pub trait EntityFactory<E>: Send + Sync {
    /// Creates a new, not yet placed entity from `prototype`.
    ///
    /// # Errors
    ///
    /// Any [`FactoryError`] the backend reports.
    fn instantiate(&self, prototype: &str) -> Result<E, FactoryError>;

    /// Checks that `prototype` can be built. Called once when a pool is
    /// constructed so a bad id fails there and not on a later spawn.
    ///
    /// # Errors
    ///
    /// [`FactoryError::MissingPrototype`] or a backend failure.
    fn validate(&self, prototype: &str) -> Result<(), FactoryError> {
        let _ = prototype;
        Ok(())
    }

    /// Orientation used when a spawn does not specify one.
    fn default_rotation(&self, prototype: &str) -> Quaternion {
        let _ = prototype;
        Quaternion::IDENTITY
    }
}

impl<E, F> EntityFactory<E> for F
where
    F: Fn(&str) -> Result<E, FactoryError> + Send + Sync,
{
    fn instantiate(&self, prototype: &str) -> Result<E, FactoryError> {
        self(prototype)
    }
}
