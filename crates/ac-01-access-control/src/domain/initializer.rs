//! # One-time Initializer
//!
//! A contract composed of several components runs ONE guarded `initialize`
//! that calls each component's setup directly. The guard cannot be entered
//! again from inside the setup closure (it is mutably borrowed), so nested
//! initialization collapses to a single entry by construction.

use crate::errors::AccessError;
use serde::{Deserialize, Serialize};

/// Per-instance "initialized" flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Initializer {
    initialized: bool,
}

impl Initializer {
    /// A fresh, uninitialized guard.
    #[must_use]
    pub const fn new() -> Self {
        Self { initialized: false }
    }

    /// Returns true once a setup has completed.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Runs `setup` if this instance was never initialized.
    ///
    /// The flag is set only when `setup` succeeds, matching a reverted
    /// transaction that leaves no trace.
    pub fn run<T, F>(&mut self, setup: F) -> Result<T, AccessError>
    where
        F: FnOnce() -> Result<T, AccessError>,
    {
        if self.initialized {
            return Err(AccessError::AlreadyInitialized);
        }
        let out = setup()?;
        self.initialized = true;
        Ok(out)
    }
}
