//! Access-control configuration with validation.
//!
//! Loaded from JSON or built from defaults. Every batch-capable contract
//! carries one of these and consults it before touching state.

use crate::errors::{AccessError, ConfigError};
use serde::{Deserialize, Serialize};

/// Canonical upper bound on entries per batch call.
pub const DEFAULT_MAX_BATCH_SIZE: usize = 256;

/// Module-wide access-control settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessConfig {
    /// Maximum number of entries a single batch call may carry.
    pub max_batch_size: usize,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
        }
    }
}

impl AccessConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_batch_size == 0 {
            return Err(ConfigError::InvalidBatchSize(self.max_batch_size));
        }
        Ok(())
    }

    /// Parses and validates a JSON configuration document.
    ///
    /// Missing fields fall back to their defaults.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects a batch of `count` entries if it exceeds the bound.
    ///
    /// Callers run this before any mutation so an oversized batch is a no-op.
    pub fn check_batch(&self, count: usize) -> Result<(), AccessError> {
        if count > self.max_batch_size {
            return Err(AccessError::BatchTooLarge {
                count,
                max: self.max_batch_size,
            });
        }
        Ok(())
    }
}
