//! # AC-02 Upgradeable Proxy - Transparent Delegation
//!
//! **Subsystem ID:** 2
//! **Status:** Production-Ready
//!
//! ## Purpose
//!
//! Gives a logical contract one permanent address and storage space while
//! the code behind it evolves. Business logic implements the
//! [`ports::Implementation`] trait and runs against the proxy's storage;
//! a dedicated admin swaps the implementation.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Admin never zero | `service.rs` - `set_admin()` |
//! | Implementation always carries code | `service.rs` - `set_implementation()` |
//! | Proxy slots never collide with business storage | `domain/slots.rs` - EIP-1967 positions |
//! | Admin never reaches business logic | `service.rs` - `admin_call()` |
//! | Failed calls leave no trace | `service.rs` - `delegate()`, `upgrade_and_delegate()` |
//!
//! ## Usage Example
//!
//! ```ignore
//! use ac_02_upgradeable_proxy::prelude::*;
//!
//! let mut code = CodeRegistry::new();
//! let v1 = code.deploy(deployer, TokenV1);
//! let init = CallData::new("initialize", vec![base.into(), whitelist.into()]);
//! let mut proxy = UpgradeableProxy::deploy(&mut ledger, &code, at, deployer, v1, proxy_admin, Some(&init))?;
//!
//! proxy.call(&mut ledger, &code, operator, &CallData::new("mint", vec![holder.into(), amount.into()]))?;
//! proxy.upgrade_to(&mut ledger, &code, proxy_admin, v2)?;
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod domain;
pub mod errors;
pub mod ports;
pub mod service;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::adapters::code_registry::CodeRegistry;
    pub use crate::domain::{
        derive_slot, mapping_slot, CallContext, CallData, ProxyEvent, ProxyStorage, Token, ADMIN_SLOT,
        IMPLEMENTATION_SLOT,
    };
    pub use crate::errors::ProxyError;
    pub use crate::ports::outbound::Implementation;
    pub use crate::service::UpgradeableProxy;
}

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
