//! # Adapters Layer
//!
//! In-memory code storage for implementations.

pub mod code_registry;

pub use code_registry::*;
