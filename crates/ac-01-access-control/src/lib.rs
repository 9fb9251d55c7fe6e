//! # AC-01 Access Control - Role Registries and Gated Mixins
//!
//! **Subsystem ID:** 1
//! **Status:** Production-Ready
//!
//! ## Purpose
//!
//! Provides the role-based access control layer of the token platform: a
//! central authority registry, satellite registries that borrow its
//! governance, dependent-side pointers migrated with a two-step protocol,
//! and behavioral mixins (freeze, pause, whitelist, trading pairs) gated by
//! those roles.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Admin set never empty | `domain/authority.rs` - `check_not_last_admin()`, self-removal guard |
//! | Multisig slot holds at most one account | `domain/authority.rs` - `add_multisig()`, `change_multisig()` |
//! | Pointers never zero once bound | `domain/client.rs` - `bind()`, `set_pending()` |
//! | Pending cleared only by the pending registry | `domain/client.rs` - `confirm()` |
//! | Initialization runs once | `domain/initializer.rs` - `Initializer::run()` |
//! | Batches bounded before any mutation | `config.rs` - `AccessConfig::check_batch()` |
//! | Multi-step calls all-or-nothing | `adapters/ledger.rs` - `Ledger::transact()` |
//!
//! ## Roles
//!
//! | Role | Registry | Granted by |
//! |------|----------|-----------|
//! | admin, operator, system | authority | admin or relay |
//! | relay | authority | admin |
//! | multisig | authority | admin (once), then the multisig itself |
//! | blocker | blocker | operator or admin or relay |
//! | trader | trader | admin or relay |
//! | investor | raise | operator or relay |
//! | issuer | raise | operator |
//!
//! Every gate is evaluated at call time against the registries a contract
//! currently points to. The caller is always an explicit parameter.
//!
//! ## Usage Example
//!
//! ```ignore
//! use ac_01_access_control::prelude::*;
//!
//! let mut ledger = Ledger::new();
//! let base = ledger.deploy_authority(deployer, admin)?;
//! ledger.with_authority(base, |reg, _| reg.add_operator(admin, operator))?;
//!
//! let mut freezable = Freezable::new(AccessConfig::default());
//! freezable.initialize(base)?;
//! freezable.toggle_freeze(&ledger, operator, account, true)?;
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
pub mod config;
pub mod domain;
pub mod errors;
pub mod ports;
pub mod routers;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Registries and roles
    pub use crate::domain::authority::AuthorityRegistry;
    pub use crate::domain::roles::{Role, RoleSet};
    pub use crate::domain::satellites::{BlockerRegistry, RaiseRegistry, TraderRegistry};

    // Pointers, gates, initialization
    pub use crate::domain::client::{AuthorityClient, RegistryKind};
    pub use crate::domain::gates::Gate;
    pub use crate::domain::initializer::Initializer;
    pub use crate::domain::operatorable::{
        BlockerOperatorable, Operatorable, RaiseOperatorable, TraderOperatorable,
    };

    // Mixins
    pub use crate::domain::freezable::Freezable;
    pub use crate::domain::pausable::Pausable;
    pub use crate::domain::trading_pairs::{TradingPair, TradingPairWhitelist};
    pub use crate::domain::whitelist::{Whitelist, Whitelistable};

    // Ports
    pub use crate::ports::outbound::{
        CodeInspector, PointerHolder, RegistryDirectory, RoleReader, WhitelistReader,
    };

    // Host
    pub use crate::adapters::ledger::{Deployed, Hosted, Ledger};

    // Routers
    pub use crate::routers::{InitializeRouter, InitializeTargets, OnboardRouter, RouterContracts};

    // Config and errors
    pub use crate::config::{AccessConfig, DEFAULT_MAX_BATCH_SIZE};
    pub use crate::errors::{AccessError, ConfigError};
}

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
