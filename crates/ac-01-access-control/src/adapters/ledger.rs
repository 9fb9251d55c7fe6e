//! # Ledger Adapter
//!
//! In-memory host for deployed registries. Implements the domain's lookup
//! ports and provides the transaction boundary.
//!
//! A hosted contract is checked out of the ledger for the duration of a
//! `with_*` call, so the rest of the ledger stays readable while it mutates
//! and it can never read its own entry through a pointer.

use crate::config::AccessConfig;
use crate::domain::authority::AuthorityRegistry;
use crate::domain::client::RegistryKind;
use crate::domain::gates::Gate;
use crate::domain::operatorable::Operatorable;
use crate::domain::satellites::{BlockerRegistry, RaiseRegistry, TraderRegistry};
use crate::domain::whitelist::Whitelist;
use crate::errors::AccessError;
use crate::ports::outbound::{CodeInspector, PointerHolder, RegistryDirectory, RoleReader, WhitelistReader};
use shared_types::{compute_contract_address, Address};
use std::collections::HashMap;
use tracing::{debug, info};

// =============================================================================
// HOSTED CONTRACTS
// =============================================================================

/// A contract account living in the ledger.
#[derive(Debug, Clone)]
pub enum Deployed {
    /// Base authority registry.
    Authority(AuthorityRegistry),
    /// Blocker satellite.
    Blocker(BlockerRegistry),
    /// Trader satellite.
    Trader(TraderRegistry),
    /// Raise satellite.
    Raise(RaiseRegistry),
    /// Whitelist contract.
    Whitelist(Whitelist),
    /// Opaque contract code (multisig wallets, routers, proxies).
    Code,
}

impl Deployed {
    /// The registry kind hosted here, if any.
    #[must_use]
    pub fn kind(&self) -> Option<RegistryKind> {
        match self {
            Deployed::Authority(_) => Some(RegistryKind::Authority),
            Deployed::Blocker(_) => Some(RegistryKind::Blocker),
            Deployed::Trader(_) => Some(RegistryKind::Trader),
            Deployed::Raise(_) => Some(RegistryKind::Raise),
            Deployed::Whitelist(_) => Some(RegistryKind::Whitelist),
            Deployed::Code => None,
        }
    }

    fn as_holder_mut(&mut self) -> Option<&mut dyn PointerHolder> {
        match self {
            Deployed::Blocker(reg) => Some(reg),
            Deployed::Trader(reg) => Some(reg),
            Deployed::Raise(reg) => Some(reg),
            Deployed::Whitelist(list) => Some(list),
            Deployed::Authority(_) | Deployed::Code => None,
        }
    }
}

/// A contract type the ledger can check out for mutation.
pub trait Hosted: Sized {
    /// Registry kind reported when the lookup fails.
    const KIND: RegistryKind;

    /// Wraps the contract for storage.
    fn into_deployed(self) -> Deployed;

    /// Unwraps the contract, handing back the entry if it is another kind.
    fn from_deployed(deployed: Deployed) -> Result<Self, Deployed>;

    /// Borrows the contract if the entry is of this kind.
    fn view(deployed: &Deployed) -> Option<&Self>;
}

macro_rules! hosted {
    ($ty:ty, $variant:ident) => {
        impl Hosted for $ty {
            const KIND: RegistryKind = RegistryKind::$variant;

            fn into_deployed(self) -> Deployed {
                Deployed::$variant(self)
            }

            fn from_deployed(deployed: Deployed) -> Result<Self, Deployed> {
                match deployed {
                    Deployed::$variant(contract) => Ok(contract),
                    other => Err(other),
                }
            }

            fn view(deployed: &Deployed) -> Option<&Self> {
                match deployed {
                    Deployed::$variant(contract) => Some(contract),
                    _ => None,
                }
            }
        }
    };
}

hosted!(AuthorityRegistry, Authority);
hosted!(BlockerRegistry, Blocker);
hosted!(TraderRegistry, Trader);
hosted!(RaiseRegistry, Raise);
hosted!(Whitelist, Whitelist);

// =============================================================================
// LEDGER
// =============================================================================

/// In-memory ledger hosting registries and contract accounts.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    contracts: HashMap<Address, Deployed>,
    nonces: HashMap<Address, u64>,
    config: AccessConfig,
    checked_out: Option<Address>,
}

impl Ledger {
    /// An empty ledger with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty ledger whose batch-capable contracts use `config`.
    #[must_use]
    pub fn with_config(config: AccessConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Configuration handed to newly deployed contracts.
    #[must_use]
    pub fn config(&self) -> &AccessConfig {
        &self.config
    }

    /// Number of contract accounts.
    #[must_use]
    pub fn contract_count(&self) -> usize {
        self.contracts.len()
    }

    /// The entry at `at`, if any.
    #[must_use]
    pub fn deployed(&self, at: Address) -> Option<&Deployed> {
        self.contracts.get(&at)
    }

    fn next_address(&self, deployer: Address) -> Address {
        let nonce = self.nonces.get(&deployer).copied().unwrap_or(0);
        compute_contract_address(deployer, nonce)
    }

    fn commit(&mut self, deployer: Address, address: Address, contract: Deployed) {
        *self.nonces.entry(deployer).or_insert(0) += 1;
        self.contracts.insert(address, contract);
    }

    // -------------------------------------------------------------------------
    // Deployment
    // -------------------------------------------------------------------------

    /// Deploys an authority registry with `admin` as its first admin.
    pub fn deploy_authority(&mut self, deployer: Address, admin: Address) -> Result<Address, AccessError> {
        let address = self.next_address(deployer);
        let registry = AuthorityRegistry::new(address, admin)?;
        self.commit(deployer, address, Deployed::Authority(registry));
        Ok(address)
    }

    /// Deploys an uninitialized blocker registry.
    pub fn deploy_blocker(&mut self, deployer: Address) -> Address {
        let address = self.next_address(deployer);
        self.commit(deployer, address, Deployed::Blocker(BlockerRegistry::new(address)));
        info!(registry = %address, "Blocker registry deployed");
        address
    }

    /// Deploys an uninitialized trader registry.
    pub fn deploy_trader(&mut self, deployer: Address) -> Address {
        let address = self.next_address(deployer);
        self.commit(deployer, address, Deployed::Trader(TraderRegistry::new(address)));
        info!(registry = %address, "Trader registry deployed");
        address
    }

    /// Deploys an uninitialized raise registry.
    pub fn deploy_raise(&mut self, deployer: Address) -> Address {
        let address = self.next_address(deployer);
        self.commit(deployer, address, Deployed::Raise(RaiseRegistry::new(address)));
        info!(registry = %address, "Raise registry deployed");
        address
    }

    /// Deploys an uninitialized whitelist.
    pub fn deploy_whitelist(&mut self, deployer: Address) -> Address {
        let address = self.next_address(deployer);
        let list = Whitelist::new(address, self.config);
        self.commit(deployer, address, Deployed::Whitelist(list));
        info!(whitelist = %address, "Whitelist deployed");
        address
    }

    /// Registers an opaque contract account.
    pub fn deploy_code(&mut self, deployer: Address) -> Address {
        let address = self.next_address(deployer);
        self.commit(deployer, address, Deployed::Code);
        debug!(contract = %address, "Contract code deployed");
        address
    }

    // -------------------------------------------------------------------------
    // Lookup
    // -------------------------------------------------------------------------

    /// Borrows the hosted contract of type `T` at `at`.
    pub fn contract_at<T: Hosted>(&self, at: Address) -> Result<&T, AccessError> {
        self.contracts
            .get(&at)
            .and_then(T::view)
            .ok_or(AccessError::RegistryNotFound {
                kind: T::KIND,
                address: at,
            })
    }

    /// Authority registry at `at`.
    pub fn authority_at(&self, at: Address) -> Result<&AuthorityRegistry, AccessError> {
        self.contract_at(at)
    }

    /// Blocker registry at `at`.
    pub fn blocker_at(&self, at: Address) -> Result<&BlockerRegistry, AccessError> {
        self.contract_at(at)
    }

    /// Trader registry at `at`.
    pub fn trader_at(&self, at: Address) -> Result<&TraderRegistry, AccessError> {
        self.contract_at(at)
    }

    /// Raise registry at `at`.
    pub fn raise_at(&self, at: Address) -> Result<&RaiseRegistry, AccessError> {
        self.contract_at(at)
    }

    /// Whitelist at `at`.
    pub fn whitelist_at(&self, at: Address) -> Result<&Whitelist, AccessError> {
        self.contract_at(at)
    }

    // -------------------------------------------------------------------------
    // Mutation
    // -------------------------------------------------------------------------

    /// Runs `f` against the hosted contract of type `T` at `at`.
    ///
    /// The contract is checked out while `f` runs; `f` sees the rest of the
    /// ledger read-only. Its roles are not readable from inside `f`, but its
    /// address still counts as a contract. The contract is put back whatever
    /// `f` returns.
    pub fn with_contract<T, R, F>(&mut self, at: Address, f: F) -> Result<R, AccessError>
    where
        T: Hosted,
        F: FnOnce(&mut T, &Ledger) -> Result<R, AccessError>,
    {
        let not_found = AccessError::RegistryNotFound {
            kind: T::KIND,
            address: at,
        };
        let deployed = self.contracts.remove(&at).ok_or_else(|| not_found.clone())?;
        let mut contract = match T::from_deployed(deployed) {
            Ok(contract) => contract,
            Err(other) => {
                self.contracts.insert(at, other);
                return Err(not_found);
            }
        };
        self.checked_out = Some(at);
        let result = f(&mut contract, self);
        self.checked_out = None;
        self.contracts.insert(at, contract.into_deployed());
        result
    }

    /// Mutates the authority registry at `at`.
    pub fn with_authority<R, F>(&mut self, at: Address, f: F) -> Result<R, AccessError>
    where
        F: FnOnce(&mut AuthorityRegistry, &Ledger) -> Result<R, AccessError>,
    {
        self.with_contract(at, f)
    }

    /// Mutates the blocker registry at `at`.
    pub fn with_blocker<R, F>(&mut self, at: Address, f: F) -> Result<R, AccessError>
    where
        F: FnOnce(&mut BlockerRegistry, &Ledger) -> Result<R, AccessError>,
    {
        self.with_contract(at, f)
    }

    /// Mutates the trader registry at `at`.
    pub fn with_trader<R, F>(&mut self, at: Address, f: F) -> Result<R, AccessError>
    where
        F: FnOnce(&mut TraderRegistry, &Ledger) -> Result<R, AccessError>,
    {
        self.with_contract(at, f)
    }

    /// Mutates the raise registry at `at`.
    pub fn with_raise<R, F>(&mut self, at: Address, f: F) -> Result<R, AccessError>
    where
        F: FnOnce(&mut RaiseRegistry, &Ledger) -> Result<R, AccessError>,
    {
        self.with_contract(at, f)
    }

    /// Mutates the whitelist at `at`.
    pub fn with_whitelist<R, F>(&mut self, at: Address, f: F) -> Result<R, AccessError>
    where
        F: FnOnce(&mut Whitelist, &Ledger) -> Result<R, AccessError>,
    {
        self.with_contract(at, f)
    }

    /// Runs `f` as one transaction: on error every change `f` made to the
    /// ledger is rolled back.
    pub fn transact<T, E, F>(&mut self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut Ledger) -> Result<T, E>,
    {
        let snapshot = self.clone();
        let result = f(self);
        if result.is_err() {
            *self = snapshot;
            debug!("Transaction reverted");
        }
        result
    }

    // -------------------------------------------------------------------------
    // Pointer confirmation (registry side)
    // -------------------------------------------------------------------------

    /// Confirms, on behalf of `registry`, a dependent's pending pointer to it.
    ///
    /// `caller` must be admin in the registry's governing authority
    /// registry. Returns the dependent's new live pointer.
    pub fn confirm_for(
        &self,
        registry: Address,
        caller: Address,
        dependent: &mut dyn PointerHolder,
    ) -> Result<Address, AccessError> {
        let kind = self.authorize_confirm(registry, caller)?;
        let confirmed = dependent.confirm_pointer(kind, registry)?;
        info!(registry = %registry, caller = %caller, kind = %kind, "Pointer confirmed for dependent");
        Ok(confirmed)
    }

    /// [`Ledger::confirm_for`] where the dependent is itself hosted here.
    pub fn confirm_for_hosted(
        &mut self,
        registry: Address,
        caller: Address,
        dependent: Address,
    ) -> Result<Address, AccessError> {
        if dependent.is_zero() {
            return Err(AccessError::ZeroAddress);
        }
        let kind = self.authorize_confirm(registry, caller)?;
        let holder = self
            .contracts
            .get_mut(&dependent)
            .ok_or(AccessError::UnknownRegistry(dependent))?
            .as_holder_mut()
            .ok_or(AccessError::UnsupportedPointer(kind))?;
        let confirmed = holder.confirm_pointer(kind, registry)?;
        info!(
            registry = %registry,
            caller = %caller,
            dependent = %dependent,
            kind = %kind,
            "Pointer confirmed for dependent"
        );
        Ok(confirmed)
    }

    /// Checks that `caller` is admin in the registry's governing authority
    /// and returns the registry's kind.
    fn authorize_confirm(&self, registry: Address, caller: Address) -> Result<RegistryKind, AccessError> {
        let deployed = self
            .contracts
            .get(&registry)
            .ok_or(AccessError::UnknownRegistry(registry))?;
        let (kind, governing): (RegistryKind, &dyn RoleReader) = match deployed {
            Deployed::Authority(reg) => (RegistryKind::Authority, reg as &dyn RoleReader),
            Deployed::Blocker(reg) => (RegistryKind::Blocker, reg.authority().roles(self)?),
            Deployed::Trader(reg) => (RegistryKind::Trader, reg.authority().roles(self)?),
            Deployed::Raise(reg) => (RegistryKind::Raise, reg.authority().roles(self)?),
            Deployed::Whitelist(list) => (RegistryKind::Whitelist, list.authority().roles(self)?),
            Deployed::Code => return Err(AccessError::UnknownRegistry(registry)),
        };
        Gate::ADMIN.require(caller, &[governing])?;
        Ok(kind)
    }
}

impl RegistryDirectory for Ledger {
    fn roles(&self, kind: RegistryKind, at: Address) -> Option<&dyn RoleReader> {
        match (kind, self.contracts.get(&at)?) {
            (RegistryKind::Authority, Deployed::Authority(reg)) => Some(reg),
            (RegistryKind::Blocker, Deployed::Blocker(reg)) => Some(reg),
            (RegistryKind::Trader, Deployed::Trader(reg)) => Some(reg),
            (RegistryKind::Raise, Deployed::Raise(reg)) => Some(reg),
            _ => None,
        }
    }

    fn whitelist(&self, at: Address) -> Option<&dyn WhitelistReader> {
        match self.contracts.get(&at)? {
            Deployed::Whitelist(list) => Some(list),
            _ => None,
        }
    }
}

impl CodeInspector for Ledger {
    fn is_contract(&self, at: Address) -> bool {
        self.checked_out == Some(at) || self.contracts.contains_key(&at)
    }
}

// =============================================================================
// TESTS
// =============================================================================
