//! # Domain Layer
//!
//! Pure access-control logic: role sets, registries, pointers, gates and the
//! behavioral mixins built on them. No I/O; registries are reached through
//! the [`crate::ports`] traits.

pub mod authority;
pub mod client;
pub mod freezable;
pub mod gates;
pub mod initializer;
pub mod invariants;
pub mod operatorable;
pub mod pausable;
pub mod roles;
pub mod satellites;
pub mod trading_pairs;
pub mod whitelist;

pub use authority::*;
pub use client::*;
pub use freezable::*;
pub use gates::*;
pub use initializer::*;
pub use invariants::*;
pub use operatorable::*;
pub use pausable::*;
pub use roles::*;
pub use satellites::*;
pub use trading_pairs::*;
pub use whitelist::*;
