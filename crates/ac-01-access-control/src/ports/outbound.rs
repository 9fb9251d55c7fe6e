//! # Driven Ports (SPI - Outbound)
//!
//! Interfaces the domain depends on. The host ledger implements the lookup
//! traits; registries and mixins implement the reader and holder traits.
//!
//! Dependents consume a registry ONLY through these read surfaces plus the
//! pointer-confirm entry point. No dependent ever writes to a registry.

use crate::domain::client::{AuthorityClient, RegistryKind};
use crate::domain::roles::Role;
use crate::errors::AccessError;
use shared_types::Address;

// =============================================================================
// READ SURFACES
// =============================================================================

/// Role-membership queries answered by a registry.
///
/// A registry answers `false` for every role it does not own.
pub trait RoleReader {
    /// Returns true if `account` holds `role` in this registry.
    fn has_role(&self, role: Role, account: Address) -> bool;
}

/// Whitelist membership queries.
pub trait WhitelistReader {
    /// Returns true if `account` is whitelisted.
    fn is_whitelisted(&self, account: Address) -> bool;
}

// =============================================================================
// HOST LOOKUPS
// =============================================================================

/// Resolves registry addresses to deployed registries.
pub trait RegistryDirectory {
    /// The role registry of `kind` deployed at `at`, if any.
    fn roles(&self, kind: RegistryKind, at: Address) -> Option<&dyn RoleReader>;

    /// The whitelist deployed at `at`, if any.
    fn whitelist(&self, at: Address) -> Option<&dyn WhitelistReader>;
}

/// Code-existence check used wherever a target must be a contract.
pub trait CodeInspector {
    /// Returns true if `at` carries contract code.
    fn is_contract(&self, at: Address) -> bool;
}

// =============================================================================
// POINTER CONFIRMATION
// =============================================================================

/// A contract holding one or more registry pointers.
///
/// A registry calls [`PointerHolder::confirm_pointer`] on a dependent to
/// complete a migration, passing its own address as the caller.
pub trait PointerHolder {
    /// The pointer of `kind`, if this contract holds one.
    fn pointer_mut(&mut self, kind: RegistryKind) -> Option<&mut AuthorityClient>;

    /// Confirms the pending pointer of `kind` on behalf of `caller`.
    ///
    /// Returns the newly live registry address.
    fn confirm_pointer(&mut self, kind: RegistryKind, caller: Address) -> Result<Address, AccessError> {
        self.pointer_mut(kind)
            .ok_or(AccessError::UnsupportedPointer(kind))?
            .confirm(caller)
    }
}
