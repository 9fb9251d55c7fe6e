//! # Roles
//!
//! The fixed role vocabulary and the set-membership primitive every registry
//! is built from.

use crate::errors::AccessError;
use serde::{Deserialize, Serialize};
use shared_types::Address;
use std::collections::BTreeSet;
use std::fmt;

// =============================================================================
// ROLE
// =============================================================================

/// A privilege tag. Each role lives in exactly one registry kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Highest standing role of an authority registry.
    Admin,
    /// Day-to-day business operations.
    Operator,
    /// Automated backend callers.
    System,
    /// Trusted contracts acting for an off-chain orchestrator.
    Relay,
    /// Single self-transferable contract slot.
    Multisig,
    /// Blocker satellite role.
    Blocker,
    /// Trader satellite role.
    Trader,
    /// Raise satellite role: investors.
    Investor,
    /// Raise satellite role: issuers.
    Issuer,
}

impl Role {
    /// Every role, in declaration order.
    pub const ALL: [Role; 9] = [
        Role::Admin,
        Role::Operator,
        Role::System,
        Role::Relay,
        Role::Multisig,
        Role::Blocker,
        Role::Trader,
        Role::Investor,
        Role::Issuer,
    ];

    /// Lower-case name used in messages and serialized form.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Operator => "operator",
            Role::System => "system",
            Role::Relay => "relay",
            Role::Multisig => "multisig",
            Role::Blocker => "blocker",
            Role::Trader => "trader",
            Role::Investor => "investor",
            Role::Issuer => "issuer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// ROLE SET
// =============================================================================

/// Membership set for one role inside one registry.
///
/// ## Invariants
/// - The zero address is never a member.
/// - Adding a member twice and removing a non-member are errors, not no-ops.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleSet {
    role: Role,
    members: BTreeSet<Address>,
}

impl RoleSet {
    /// Creates an empty set for `role`.
    #[must_use]
    pub fn new(role: Role) -> Self {
        Self {
            role,
            members: BTreeSet::new(),
        }
    }

    /// The role this set tracks.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Validates an `add` without applying it.
    pub fn check_add(&self, account: Address) -> Result<(), AccessError> {
        if account.is_zero() {
            return Err(AccessError::ZeroAddress);
        }
        if self.members.contains(&account) {
            return Err(AccessError::AlreadyHasRole {
                role: self.role,
                account,
            });
        }
        Ok(())
    }

    /// Validates a `remove` without applying it.
    pub fn check_remove(&self, account: Address) -> Result<(), AccessError> {
        if account.is_zero() {
            return Err(AccessError::ZeroAddress);
        }
        if !self.members.contains(&account) {
            return Err(AccessError::DoesNotHaveRole {
                role: self.role,
                account,
            });
        }
        Ok(())
    }

    /// Grants the role to `account`.
    pub fn add(&mut self, account: Address) -> Result<(), AccessError> {
        self.check_add(account)?;
        self.members.insert(account);
        Ok(())
    }

    /// Revokes the role from `account`.
    pub fn remove(&mut self, account: Address) -> Result<(), AccessError> {
        self.check_remove(account)?;
        self.members.remove(&account);
        Ok(())
    }

    /// Returns true if `account` holds the role.
    #[must_use]
    pub fn has(&self, account: Address) -> bool {
        self.members.contains(&account)
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns true if nobody holds the role.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Members in ascending address order.
    #[must_use]
    pub fn members(&self) -> Vec<Address> {
        self.members.iter().copied().collect()
    }

    /// The sole member, if exactly one exists.
    #[must_use]
    pub fn single(&self) -> Option<Address> {
        if self.members.len() == 1 {
            self.members.first().copied()
        } else {
            None
        }
    }
}
