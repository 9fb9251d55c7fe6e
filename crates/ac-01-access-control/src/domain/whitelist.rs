//! # Whitelist
//!
//! [`Whitelist`] is a standalone contract holding whitelisted accounts,
//! governed by its bound authority registry. [`Whitelistable`] gives a
//! dependent a second pointer to such a contract, migrated with the same
//! two-step protocol as the authority pointer.

use crate::config::AccessConfig;
use crate::domain::client::{AuthorityClient, RegistryKind};
use crate::domain::initializer::Initializer;
use crate::domain::operatorable::Operatorable;
use crate::errors::AccessError;
use crate::ports::outbound::{PointerHolder, RegistryDirectory, WhitelistReader};
use serde::{Deserialize, Serialize};
use shared_types::Address;
use std::collections::BTreeSet;
use tracing::info;

// =============================================================================
// WHITELIST CONTRACT
// =============================================================================

/// Whitelisted-account set.
///
/// Toggling is gated by operator or system or relay in the authority registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Whitelist {
    address: Address,
    initializer: Initializer,
    authority: AuthorityClient,
    listed: BTreeSet<Address>,
    config: AccessConfig,
}

impl Whitelist {
    /// An uninitialized whitelist deployed at `address`.
    #[must_use]
    pub fn new(address: Address, config: AccessConfig) -> Self {
        Self {
            address,
            initializer: Initializer::new(),
            authority: AuthorityClient::new(RegistryKind::Authority),
            listed: BTreeSet::new(),
            config,
        }
    }

    /// The contract's own address.
    #[must_use]
    pub fn address(&self) -> Address {
        self.address
    }

    /// Binds the authority registry. Callable once.
    pub fn initialize(&mut self, base: Address) -> Result<(), AccessError> {
        let authority = &mut self.authority;
        self.initializer.run(|| authority.bind(base))?;
        info!(whitelist = %self.address, base = %base, "Whitelist initialized");
        Ok(())
    }

    /// Returns true once initialized.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initializer.is_initialized()
    }

    /// Sets the whitelist status of `account`.
    pub fn toggle_whitelist(
        &mut self,
        dir: &dyn RegistryDirectory,
        caller: Address,
        account: Address,
        whitelisted: bool,
    ) -> Result<(), AccessError> {
        self.require_operator_or_system_or_relay(dir, caller)?;
        if account.is_zero() {
            return Err(AccessError::ZeroAddress);
        }
        self.apply(account, whitelisted);
        Ok(())
    }

    /// Sets the whitelist status of every account in `accounts`.
    ///
    /// Bound and addresses are validated before any entry changes.
    pub fn batch_toggle_whitelist(
        &mut self,
        dir: &dyn RegistryDirectory,
        caller: Address,
        accounts: &[Address],
        whitelisted: bool,
    ) -> Result<(), AccessError> {
        self.require_operator_or_system_or_relay(dir, caller)?;
        self.config.check_batch(accounts.len())?;
        if accounts.iter().any(Address::is_zero) {
            return Err(AccessError::ZeroAddress);
        }
        for account in accounts {
            self.apply(*account, whitelisted);
        }
        Ok(())
    }

    fn apply(&mut self, account: Address, whitelisted: bool) {
        if whitelisted {
            self.listed.insert(account);
        } else {
            self.listed.remove(&account);
        }
        info!(whitelist = %self.address, account = %account, whitelisted, "Whitelist toggled");
    }

    /// Returns true if `account` is whitelisted.
    #[must_use]
    pub fn is_whitelisted(&self, account: Address) -> bool {
        self.listed.contains(&account)
    }
}

impl Operatorable for Whitelist {
    fn authority(&self) -> &AuthorityClient {
        &self.authority
    }

    fn authority_mut(&mut self) -> &mut AuthorityClient {
        &mut self.authority
    }
}

impl PointerHolder for Whitelist {
    fn pointer_mut(&mut self, kind: RegistryKind) -> Option<&mut AuthorityClient> {
        (kind == RegistryKind::Authority).then_some(&mut self.authority)
    }
}

impl WhitelistReader for Whitelist {
    fn is_whitelisted(&self, account: Address) -> bool {
        self.listed.contains(&account)
    }
}

// =============================================================================
// WHITELISTABLE MIXIN
// =============================================================================

/// A contract gated by a whitelist contract.
pub trait Whitelistable: Operatorable {
    /// The whitelist pointer.
    fn whitelist(&self) -> &AuthorityClient;

    /// The whitelist pointer, mutably.
    fn whitelist_mut(&mut self) -> &mut AuthorityClient;

    /// Live whitelist address.
    fn whitelist_contract(&self) -> Address {
        self.whitelist().contract()
    }

    /// Pending whitelist address.
    fn whitelist_pending(&self) -> Address {
        self.whitelist().pending()
    }

    /// Proposes a new whitelist contract. Admin only.
    fn set_whitelist_contract(
        &mut self,
        dir: &dyn RegistryDirectory,
        caller: Address,
        whitelist: Address,
    ) -> Result<(), AccessError> {
        self.require_admin(dir, caller)?;
        self.whitelist_mut().set_pending(whitelist)
    }

    /// Completes the whitelist migration.
    fn confirm_whitelist_contract(&mut self, caller: Address) -> Result<Address, AccessError> {
        self.whitelist_mut().confirm(caller)
    }

    /// Pass-through `is_whitelisted`.
    fn is_whitelisted(&self, dir: &dyn RegistryDirectory, account: Address) -> Result<bool, AccessError> {
        Ok(self.whitelist().whitelist(dir)?.is_whitelisted(account))
    }

    /// Fails with [`AccessError::NotWhitelisted`] unless `account` is whitelisted.
    fn require_whitelisted(&self, dir: &dyn RegistryDirectory, account: Address) -> Result<(), AccessError> {
        if self.is_whitelisted(dir, account)? {
            Ok(())
        } else {
            Err(AccessError::NotWhitelisted(account))
        }
    }
}
