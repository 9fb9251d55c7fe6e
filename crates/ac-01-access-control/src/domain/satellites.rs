//! # Satellite Registries
//!
//! Domain-specific role registries that borrow their governance from a bound
//! authority registry. None of them defines its own super-user.
//!
//! | Registry | Operation | Gate (in the authority registry) |
//! |----------|-----------|----------------------------------|
//! | Blocker | add/remove blocker | operator or admin or relay |
//! | Trader | add/remove trader | admin or relay |
//! | Raise | add/remove investor | operator or relay |
//! | Raise | add/remove issuer | operator |
//!
//! Each registry is initialized once with its authority registry and can
//! migrate to another one through the [`Operatorable`] pointer protocol.

use crate::domain::client::{AuthorityClient, RegistryKind};
use crate::domain::gates::Gate;
use crate::domain::initializer::Initializer;
use crate::domain::operatorable::Operatorable;
use crate::domain::roles::{Role, RoleSet};
use crate::errors::AccessError;
use crate::ports::outbound::{PointerHolder, RegistryDirectory, RoleReader};
use serde::{Deserialize, Serialize};
use shared_types::Address;
use tracing::info;

// =============================================================================
// BLOCKER REGISTRY
// =============================================================================

/// Registry of blocker accounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockerRegistry {
    address: Address,
    initializer: Initializer,
    authority: AuthorityClient,
    blockers: RoleSet,
}

impl BlockerRegistry {
    /// An uninitialized registry deployed at `address`.
    #[must_use]
    pub fn new(address: Address) -> Self {
        Self {
            address,
            initializer: Initializer::new(),
            authority: AuthorityClient::new(RegistryKind::Authority),
            blockers: RoleSet::new(Role::Blocker),
        }
    }

    /// The registry's own address.
    #[must_use]
    pub fn address(&self) -> Address {
        self.address
    }

    /// Binds the authority registry. Callable once.
    pub fn initialize(&mut self, base: Address) -> Result<(), AccessError> {
        let authority = &mut self.authority;
        self.initializer.run(|| authority.bind(base))?;
        info!(registry = %self.address, base = %base, "Blocker registry initialized");
        Ok(())
    }

    /// Returns true once initialized.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initializer.is_initialized()
    }

    /// Grants blocker to `account`.
    pub fn add_blocker(
        &mut self,
        dir: &dyn RegistryDirectory,
        caller: Address,
        account: Address,
    ) -> Result<(), AccessError> {
        self.require_base(dir, caller, Gate::OPERATOR_OR_ADMIN_OR_RELAY)?;
        self.blockers.add(account)?;
        info!(caller = %caller, account = %account, role = %Role::Blocker, "Role granted");
        Ok(())
    }

    /// Revokes blocker from `account`.
    pub fn remove_blocker(
        &mut self,
        dir: &dyn RegistryDirectory,
        caller: Address,
        account: Address,
    ) -> Result<(), AccessError> {
        self.require_base(dir, caller, Gate::OPERATOR_OR_ADMIN_OR_RELAY)?;
        self.blockers.remove(account)?;
        info!(caller = %caller, account = %account, role = %Role::Blocker, "Role revoked");
        Ok(())
    }

    /// Returns true if `account` is a blocker.
    #[must_use]
    pub fn is_blocker(&self, account: Address) -> bool {
        self.blockers.has(account)
    }
}

impl Operatorable for BlockerRegistry {
    fn authority(&self) -> &AuthorityClient {
        &self.authority
    }

    fn authority_mut(&mut self) -> &mut AuthorityClient {
        &mut self.authority
    }
}

impl PointerHolder for BlockerRegistry {
    fn pointer_mut(&mut self, kind: RegistryKind) -> Option<&mut AuthorityClient> {
        (kind == RegistryKind::Authority).then_some(&mut self.authority)
    }
}

impl RoleReader for BlockerRegistry {
    fn has_role(&self, role: Role, account: Address) -> bool {
        role == Role::Blocker && self.blockers.has(account)
    }
}

// =============================================================================
// TRADER REGISTRY
// =============================================================================

/// Registry of trader accounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraderRegistry {
    address: Address,
    initializer: Initializer,
    authority: AuthorityClient,
    traders: RoleSet,
}

impl TraderRegistry {
    /// An uninitialized registry deployed at `address`.
    #[must_use]
    pub fn new(address: Address) -> Self {
        Self {
            address,
            initializer: Initializer::new(),
            authority: AuthorityClient::new(RegistryKind::Authority),
            traders: RoleSet::new(Role::Trader),
        }
    }

    /// The registry's own address.
    #[must_use]
    pub fn address(&self) -> Address {
        self.address
    }

    /// Binds the authority registry. Callable once.
    pub fn initialize(&mut self, base: Address) -> Result<(), AccessError> {
        let authority = &mut self.authority;
        self.initializer.run(|| authority.bind(base))?;
        info!(registry = %self.address, base = %base, "Trader registry initialized");
        Ok(())
    }

    /// Returns true once initialized.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initializer.is_initialized()
    }

    /// Grants trader to `account`.
    pub fn add_trader(
        &mut self,
        dir: &dyn RegistryDirectory,
        caller: Address,
        account: Address,
    ) -> Result<(), AccessError> {
        self.require_admin_or_relay(dir, caller)?;
        self.traders.add(account)?;
        info!(caller = %caller, account = %account, role = %Role::Trader, "Role granted");
        Ok(())
    }

    /// Revokes trader from `account`.
    pub fn remove_trader(
        &mut self,
        dir: &dyn RegistryDirectory,
        caller: Address,
        account: Address,
    ) -> Result<(), AccessError> {
        self.require_admin_or_relay(dir, caller)?;
        self.traders.remove(account)?;
        info!(caller = %caller, account = %account, role = %Role::Trader, "Role revoked");
        Ok(())
    }

    /// Returns true if `account` is a trader.
    #[must_use]
    pub fn is_trader(&self, account: Address) -> bool {
        self.traders.has(account)
    }
}

impl Operatorable for TraderRegistry {
    fn authority(&self) -> &AuthorityClient {
        &self.authority
    }

    fn authority_mut(&mut self) -> &mut AuthorityClient {
        &mut self.authority
    }
}

impl PointerHolder for TraderRegistry {
    fn pointer_mut(&mut self, kind: RegistryKind) -> Option<&mut AuthorityClient> {
        (kind == RegistryKind::Authority).then_some(&mut self.authority)
    }
}

impl RoleReader for TraderRegistry {
    fn has_role(&self, role: Role, account: Address) -> bool {
        role == Role::Trader && self.traders.has(account)
    }
}

// =============================================================================
// RAISE REGISTRY
// =============================================================================

/// Registry of investors and issuers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaiseRegistry {
    address: Address,
    initializer: Initializer,
    authority: AuthorityClient,
    investors: RoleSet,
    issuers: RoleSet,
}

impl RaiseRegistry {
    /// An uninitialized registry deployed at `address`.
    #[must_use]
    pub fn new(address: Address) -> Self {
        Self {
            address,
            initializer: Initializer::new(),
            authority: AuthorityClient::new(RegistryKind::Authority),
            investors: RoleSet::new(Role::Investor),
            issuers: RoleSet::new(Role::Issuer),
        }
    }

    /// The registry's own address.
    #[must_use]
    pub fn address(&self) -> Address {
        self.address
    }

    /// Binds the authority registry. Callable once.
    pub fn initialize(&mut self, base: Address) -> Result<(), AccessError> {
        let authority = &mut self.authority;
        self.initializer.run(|| authority.bind(base))?;
        info!(registry = %self.address, base = %base, "Raise registry initialized");
        Ok(())
    }

    /// Returns true once initialized.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initializer.is_initialized()
    }

    /// Grants investor to `account`.
    pub fn add_investor(
        &mut self,
        dir: &dyn RegistryDirectory,
        caller: Address,
        account: Address,
    ) -> Result<(), AccessError> {
        self.require_operator_or_relay(dir, caller)?;
        self.investors.add(account)?;
        info!(caller = %caller, account = %account, role = %Role::Investor, "Role granted");
        Ok(())
    }

    /// Revokes investor from `account`.
    pub fn remove_investor(
        &mut self,
        dir: &dyn RegistryDirectory,
        caller: Address,
        account: Address,
    ) -> Result<(), AccessError> {
        self.require_operator_or_relay(dir, caller)?;
        self.investors.remove(account)?;
        info!(caller = %caller, account = %account, role = %Role::Investor, "Role revoked");
        Ok(())
    }

    /// Grants issuer to `account`.
    pub fn add_issuer(
        &mut self,
        dir: &dyn RegistryDirectory,
        caller: Address,
        account: Address,
    ) -> Result<(), AccessError> {
        self.require_operator(dir, caller)?;
        self.issuers.add(account)?;
        info!(caller = %caller, account = %account, role = %Role::Issuer, "Role granted");
        Ok(())
    }

    /// Revokes issuer from `account`.
    pub fn remove_issuer(
        &mut self,
        dir: &dyn RegistryDirectory,
        caller: Address,
        account: Address,
    ) -> Result<(), AccessError> {
        self.require_operator(dir, caller)?;
        self.issuers.remove(account)?;
        info!(caller = %caller, account = %account, role = %Role::Issuer, "Role revoked");
        Ok(())
    }

    /// Returns true if `account` is an investor.
    #[must_use]
    pub fn is_investor(&self, account: Address) -> bool {
        self.investors.has(account)
    }

    /// Returns true if `account` is an issuer.
    #[must_use]
    pub fn is_issuer(&self, account: Address) -> bool {
        self.issuers.has(account)
    }
}

impl Operatorable for RaiseRegistry {
    fn authority(&self) -> &AuthorityClient {
        &self.authority
    }

    fn authority_mut(&mut self) -> &mut AuthorityClient {
        &mut self.authority
    }
}

impl PointerHolder for RaiseRegistry {
    fn pointer_mut(&mut self, kind: RegistryKind) -> Option<&mut AuthorityClient> {
        (kind == RegistryKind::Authority).then_some(&mut self.authority)
    }
}

impl RoleReader for RaiseRegistry {
    fn has_role(&self, role: Role, account: Address) -> bool {
        match role {
            Role::Investor => self.investors.has(account),
            Role::Issuer => self.issuers.has(account),
            _ => false,
        }
    }
}
