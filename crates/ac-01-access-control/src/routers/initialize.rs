//! # Initialize Router
//!
//! Admin helper that initializes a freshly deployed set of satellite
//! registries and whitelists against one authority registry in a single
//! transaction.

use crate::adapters::ledger::Ledger;
use crate::domain::client::{AuthorityClient, RegistryKind};
use crate::domain::initializer::Initializer;
use crate::domain::operatorable::Operatorable;
use crate::errors::AccessError;
use crate::ports::outbound::PointerHolder;
use serde::{Deserialize, Serialize};
use shared_types::Address;
use tracing::info;

/// Contracts to initialize.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InitializeTargets {
    /// Authority registry to bind; zero selects the router's own.
    pub base: Address,
    /// Raise registry.
    pub raise: Address,
    /// Trader registry.
    pub trader: Address,
    /// Blocker registry.
    pub blocker: Address,
    /// Whitelists.
    pub whitelists: Vec<Address>,
}

impl InitializeTargets {
    fn any_zero(&self) -> bool {
        [self.raise, self.trader, self.blocker]
            .iter()
            .chain(&self.whitelists)
            .any(Address::is_zero)
    }
}

/// Batch initializer for registries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitializeRouter {
    address: Address,
    initializer: Initializer,
    authority: AuthorityClient,
}

impl InitializeRouter {
    /// An uninitialized router deployed at `address`.
    #[must_use]
    pub fn new(address: Address) -> Self {
        Self {
            address,
            initializer: Initializer::new(),
            authority: AuthorityClient::new(RegistryKind::Authority),
        }
    }

    /// The router's own address.
    #[must_use]
    pub fn address(&self) -> Address {
        self.address
    }

    /// Binds the router's authority registry. Callable once.
    pub fn initialize(&mut self, base: Address) -> Result<(), AccessError> {
        let authority = &mut self.authority;
        self.initializer.run(|| authority.bind(base))
    }

    /// Returns true once initialized.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initializer.is_initialized()
    }

    /// Initializes every target against `targets.base` (or the router's own
    /// authority registry when zero). Admin only. All or nothing.
    pub fn initialize_contracts(
        &self,
        ledger: &mut Ledger,
        caller: Address,
        targets: &InitializeTargets,
    ) -> Result<(), AccessError> {
        self.require_admin(&*ledger, caller)?;
        if targets.any_zero() {
            return Err(AccessError::ZeroAddress);
        }
        let base = if targets.base.is_zero() {
            self.authority.current()?
        } else {
            targets.base
        };

        ledger.transact(|ledger| {
            ledger.with_raise(targets.raise, |reg, _| reg.initialize(base))?;
            ledger.with_trader(targets.trader, |reg, _| reg.initialize(base))?;
            ledger.with_blocker(targets.blocker, |reg, _| reg.initialize(base))?;
            for whitelist in &targets.whitelists {
                ledger.with_whitelist(*whitelist, |list, _| list.initialize(base))?;
            }
            Ok(())
        })?;
        info!(router = %self.address, caller = %caller, base = %base, "Contracts initialized");
        Ok(())
    }
}

impl Operatorable for InitializeRouter {
    fn authority(&self) -> &AuthorityClient {
        &self.authority
    }

    fn authority_mut(&mut self) -> &mut AuthorityClient {
        &mut self.authority
    }
}

impl PointerHolder for InitializeRouter {
    fn pointer_mut(&mut self, kind: RegistryKind) -> Option<&mut AuthorityClient> {
        (kind == RegistryKind::Authority).then_some(&mut self.authority)
    }
}
