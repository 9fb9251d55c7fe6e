//! # Ports Layer
//!
//! Traits implemented by business logic hosted behind a proxy.

pub mod outbound;

pub use outbound::*;
