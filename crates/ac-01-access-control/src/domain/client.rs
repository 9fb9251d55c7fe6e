//! # Authority Client
//!
//! A dependent contract's pointer to an external registry, with the two-step
//! replacement protocol.
//!
//! ```text
//! Uninitialized ──bind──▶ Bound(current) ──set_pending──▶ Bound(current) + Pending(p)
//!                              ▲                                  │  ▲
//!                              └──────── confirm (caller == p) ───┘  └─ set_pending (last writer wins)
//! ```
//!
//! ## Invariants
//! - `current` is never the zero address once bound.
//! - `pending` becomes set only through `set_pending` (the caller checks
//!   admin rights in `current` first) and clears only through `confirm`
//!   whose caller IS the pending contract.

use crate::errors::AccessError;
use crate::ports::outbound::{RegistryDirectory, RoleReader, WhitelistReader};
use serde::{Deserialize, Serialize};
use shared_types::Address;
use std::fmt;
use tracing::{debug, info};

// =============================================================================
// REGISTRY KIND
// =============================================================================

/// Which kind of contract a pointer targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistryKind {
    /// The base authority registry.
    Authority,
    /// Blocker satellite.
    Blocker,
    /// Trader satellite.
    Trader,
    /// Raise (investor/issuer) satellite.
    Raise,
    /// Whitelist contract.
    Whitelist,
}

impl fmt::Display for RegistryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RegistryKind::Authority => "authority",
            RegistryKind::Blocker => "blocker",
            RegistryKind::Trader => "trader",
            RegistryKind::Raise => "raise",
            RegistryKind::Whitelist => "whitelist",
        })
    }
}

// =============================================================================
// CLIENT
// =============================================================================

/// Live and pending pointer to one registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorityClient {
    kind: RegistryKind,
    current: Option<Address>,
    pending: Option<Address>,
}

impl AuthorityClient {
    /// An unbound pointer to a registry of `kind`.
    #[must_use]
    pub const fn new(kind: RegistryKind) -> Self {
        Self {
            kind,
            current: None,
            pending: None,
        }
    }

    /// The registry kind this pointer targets.
    #[must_use]
    pub fn kind(&self) -> RegistryKind {
        self.kind
    }

    /// Binds the initial registry. Callable once.
    pub fn bind(&mut self, registry: Address) -> Result<(), AccessError> {
        if registry.is_zero() {
            return Err(AccessError::ZeroAddress);
        }
        if self.current.is_some() {
            return Err(AccessError::AlreadyInitialized);
        }
        self.current = Some(registry);
        debug!(kind = %self.kind, registry = %registry, "Pointer bound");
        Ok(())
    }

    /// Returns true once bound.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.current.is_some()
    }

    /// The live registry address, or the zero address when unbound.
    #[must_use]
    pub fn contract(&self) -> Address {
        self.current.unwrap_or(Address::ZERO)
    }

    /// The pending registry address, or the zero address when none.
    #[must_use]
    pub fn pending(&self) -> Address {
        self.pending.unwrap_or(Address::ZERO)
    }

    /// The live registry address.
    pub fn current(&self) -> Result<Address, AccessError> {
        self.current.ok_or(AccessError::NotInitialized(self.kind))
    }

    /// Records `registry` as the migration target.
    ///
    /// Overwrites any earlier pending value. Admin rights in the current
    /// registry must be checked by the caller.
    pub fn set_pending(&mut self, registry: Address) -> Result<(), AccessError> {
        self.current()?;
        if registry.is_zero() {
            return Err(AccessError::ZeroAddress);
        }
        if let Some(previous) = self.pending.replace(registry) {
            debug!(kind = %self.kind, superseded = %previous, "Pending pointer superseded");
        }
        info!(kind = %self.kind, pending = %registry, "Pending pointer set");
        Ok(())
    }

    /// Completes the migration. `caller` must be the pending registry.
    ///
    /// Returns the new live address.
    pub fn confirm(&mut self, caller: Address) -> Result<Address, AccessError> {
        let pending = self.pending.ok_or(AccessError::PendingIsZero(self.kind))?;
        if caller != pending {
            return Err(AccessError::PendingMismatch {
                kind: self.kind,
                caller,
                pending,
            });
        }
        let previous = self.current.replace(pending);
        self.pending = None;
        info!(
            kind = %self.kind,
            previous = %previous.unwrap_or(Address::ZERO),
            current = %pending,
            "Pointer confirmed"
        );
        Ok(pending)
    }

    /// Resolves the live registry's role surface.
    pub fn roles<'a>(&self, dir: &'a dyn RegistryDirectory) -> Result<&'a dyn RoleReader, AccessError> {
        let at = self.current()?;
        dir.roles(self.kind, at).ok_or(AccessError::RegistryNotFound {
            kind: self.kind,
            address: at,
        })
    }

    /// Resolves the live whitelist.
    pub fn whitelist<'a>(
        &self,
        dir: &'a dyn RegistryDirectory,
    ) -> Result<&'a dyn WhitelistReader, AccessError> {
        let at = self.current()?;
        dir.whitelist(at).ok_or(AccessError::RegistryNotFound {
            kind: self.kind,
            address: at,
        })
    }
}
