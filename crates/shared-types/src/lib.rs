//! # Shared Types Crate
//!
//! Value objects shared by the access-control and proxy crates.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: every crate names accounts with the same
//!   [`Address`] type, so a role subject, a registry pointer and a proxy
//!   target are interchangeable at the type level.
//! - **Explicit Sentinel**: [`Address::ZERO`] is the "unset" marker. It is a
//!   valid value of the type, and every API that needs a live account
//!   rejects it explicitly.
//! - **Deterministic Derivation**: contract addresses are derived from the
//!   deployer and its nonce ([`compute_contract_address`]), so a replayed
//!   deployment sequence always yields the same addresses.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod errors;
pub mod hashing;
pub mod value_objects;

pub use errors::ParseAddressError;
pub use hashing::{compute_contract_address, keccak256};
pub use value_objects::{Address, Hash, StorageKey, StorageValue, U256};
