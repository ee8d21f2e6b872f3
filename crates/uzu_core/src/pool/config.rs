//! # Pool Configuration
//!
//! Pool sizes are balance data, so they live in TOML next to the rest of a
//! game's data files:
//!
//! ```toml
//! [[pools]]
//! name = "bullets"
//! prototype = "prefabs/bullet"
//! capacity = 256
//! prewarm = 64
//!
//! [[pools]]
//! name = "sparks"
//! prototype = "prefabs/spark"
//! capacity = 32
//! growth_allowed = true
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{UzuError, UzuResult};

/// Settings for one pool, fixed at construction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Template the factory builds new entities from.
    pub prototype: String,
    /// Maximum number of entities.
    pub capacity: usize,
    /// Double the capacity instead of failing when exhausted.
    #[serde(default)]
    pub growth_allowed: bool,
    /// Entities created inactive when the pool is built.
    #[serde(default)]
    pub prewarm: usize,
}

impl PoolConfig {
    /// Creates a fixed-size pool config with no prewarm.
    #[must_use]
    pub fn new(prototype: impl Into<String>, capacity: usize) -> Self {
        Self {
            prototype: prototype.into(),
            capacity,
            growth_allowed: false,
            prewarm: 0,
        }
    }

    /// Enables or disables growth.
    #[must_use]
    pub fn with_growth(mut self, growth_allowed: bool) -> Self {
        self.growth_allowed = growth_allowed;
        self
    }

    /// Sets how many entities are created up front.
    #[must_use]
    pub fn with_prewarm(mut self, prewarm: usize) -> Self {
        self.prewarm = prewarm;
        self
    }

    /// Checks the settings for consistency.
    ///
    /// # Errors
    ///
    /// [`UzuError::InvalidConfig`] for an empty prototype, a zero capacity,
    /// or a prewarm count above the capacity.
    pub fn validate(&self) -> UzuResult<()> {
        if self.prototype.is_empty() {
            return Err(UzuError::InvalidConfig("pool prototype is empty".into()));
        }
        if self.capacity == 0 {
            return Err(UzuError::InvalidConfig(format!(
                "pool [{}] has zero capacity",
                self.prototype
            )));
        }
        if self.prewarm > self.capacity {
            return Err(UzuError::InvalidConfig(format!(
                "pool [{}] prewarms {} entities but holds only {}",
                self.prototype, self.prewarm, self.capacity
            )));
        }
        Ok(())
    }
}

/// A named pool entry in a registry config.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolEntry {
    /// Registry name of the pool.
    pub name: String,
    /// The pool's own settings.
    #[serde(flatten)]
    pub pool: PoolConfig,
}

/// Every pool a registry should build at startup.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Pool entries in declaration order.
    #[serde(default)]
    pub pools: Vec<PoolEntry>,
}

impl RegistryConfig {
    /// Parses a registry config from TOML text.
    ///
    /// # Errors
    ///
    /// [`UzuError::InvalidConfig`] if the text is not a valid config.
    pub fn from_toml_str(text: &str) -> UzuResult<Self> {
        toml::from_str(text).map_err(|e| UzuError::InvalidConfig(e.to_string()))
    }

    /// Reads and parses a registry config file.
    ///
    /// # Errors
    ///
    /// [`UzuError::InvalidConfig`] if the file cannot be read or parsed.
    pub fn from_toml_file(path: impl AsRef<Path>) -> UzuResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            UzuError::InvalidConfig(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&text)
    }
}
