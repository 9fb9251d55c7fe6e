//! # Freezable
//!
//! Per-account freeze flags, toggled by operators of the bound authority
//! registry. Business entry points use the guards to refuse frozen accounts.

use crate::config::AccessConfig;
use crate::domain::client::{AuthorityClient, RegistryKind};
use crate::domain::initializer::Initializer;
use crate::domain::operatorable::Operatorable;
use crate::errors::AccessError;
use crate::ports::outbound::{PointerHolder, RegistryDirectory};
use serde::{Deserialize, Serialize};
use shared_types::Address;
use std::collections::BTreeSet;
use tracing::info;

/// Freeze mixin state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Freezable {
    initializer: Initializer,
    authority: AuthorityClient,
    frozen: BTreeSet<Address>,
    config: AccessConfig,
}

impl Freezable {
    /// An uninitialized mixin.
    #[must_use]
    pub fn new(config: AccessConfig) -> Self {
        Self {
            initializer: Initializer::new(),
            authority: AuthorityClient::new(RegistryKind::Authority),
            frozen: BTreeSet::new(),
            config,
        }
    }

    /// Binds the authority registry. Callable once.
    pub fn initialize(&mut self, base: Address) -> Result<(), AccessError> {
        let authority = &mut self.authority;
        self.initializer.run(|| authority.bind(base))
    }

    /// Returns true once initialized.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initializer.is_initialized()
    }

    /// Freezes or unfreezes `account`. Operator only.
    pub fn toggle_freeze(
        &mut self,
        dir: &dyn RegistryDirectory,
        caller: Address,
        account: Address,
        freeze: bool,
    ) -> Result<(), AccessError> {
        self.require_operator(dir, caller)?;
        if account.is_zero() {
            return Err(AccessError::ZeroAddress);
        }
        self.apply(account, freeze);
        Ok(())
    }

    /// Freezes or unfreezes every account in `accounts`. Operator only.
    ///
    /// An oversized batch or a zero entry fails before any flag changes.
    pub fn batch_toggle_freeze(
        &mut self,
        dir: &dyn RegistryDirectory,
        caller: Address,
        accounts: &[Address],
        freeze: bool,
    ) -> Result<(), AccessError> {
        self.require_operator(dir, caller)?;
        self.config.check_batch(accounts.len())?;
        if accounts.iter().any(Address::is_zero) {
            return Err(AccessError::ZeroAddress);
        }
        for account in accounts {
            self.apply(*account, freeze);
        }
        Ok(())
    }

    fn apply(&mut self, account: Address, freeze: bool) {
        if freeze {
            self.frozen.insert(account);
        } else {
            self.frozen.remove(&account);
        }
        info!(account = %account, frozen = freeze, "Freeze toggled");
    }

    /// Returns true if `account` is frozen.
    #[must_use]
    pub fn is_frozen(&self, account: Address) -> bool {
        self.frozen.contains(&account)
    }

    /// Fails with [`AccessError::AccountNotFrozen`] unless `account` is frozen.
    pub fn require_frozen(&self, account: Address) -> Result<(), AccessError> {
        if self.is_frozen(account) {
            Ok(())
        } else {
            Err(AccessError::AccountNotFrozen(account))
        }
    }

    /// Fails with [`AccessError::AccountFrozen`] if `account` is frozen.
    pub fn require_not_frozen(&self, account: Address) -> Result<(), AccessError> {
        if self.is_frozen(account) {
            Err(AccessError::AccountFrozen(account))
        } else {
            Ok(())
        }
    }
}

impl Operatorable for Freezable {
    fn authority(&self) -> &AuthorityClient {
        &self.authority
    }

    fn authority_mut(&mut self) -> &mut AuthorityClient {
        &mut self.authority
    }
}

impl PointerHolder for Freezable {
    fn pointer_mut(&mut self, kind: RegistryKind) -> Option<&mut AuthorityClient> {
        (kind == RegistryKind::Authority).then_some(&mut self.authority)
    }
}
