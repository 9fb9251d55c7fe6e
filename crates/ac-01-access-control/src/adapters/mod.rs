//! # Adapters Layer (Outer Hexagon)
//!
//! In-memory host for the access-control domain.
//!
//! - [`ledger::Ledger`] implements `RegistryDirectory` and `CodeInspector`
//! - Transactions snapshot and restore the whole ledger

pub mod ledger;

pub use ledger::*;
