//! # Routers
//!
//! Relay contracts that drive several registries in one transaction.

pub mod initialize;
pub mod onboard;

pub use initialize::*;
pub use onboard::*;
