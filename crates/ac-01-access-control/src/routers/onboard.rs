//! # Onboard Router
//!
//! Relay contract that moves an account between roles across the authority,
//! trader, blocker and raise registries and keeps a whitelist in step, all in
//! one ledger transaction. The router's own address must hold relay in the
//! authority registry.
//!
//! Every operation takes a whitelist address; the zero address selects the
//! router's default whitelist.
//!
//! | Operation | Registry changes | Whitelist |
//! |-----------|------------------|-----------|
//! | onboard / deboard system | system | listed / delisted |
//! | onboard / deboard super admin | operator + admin, trader | listed / delisted |
//! | onboard / deboard blocker | blocker | listed / delisted |
//! | onboard / deboard trader | trader | listed / delisted |
//! | onboard / deboard investor | investor | listed / delisted |
//! | admin -> trader | -admin, +trader | listed |
//! | admin -> super admin | +operator, +trader | listed |
//! | operator -> trader | -operator, +trader | listed |
//! | operator -> super admin | +admin, +trader | listed |
//! | trader -> operator | -trader, +operator | delisted |
//! | trader -> admin | -trader, +admin | delisted |
//! | super admin -> admin | -operator, -trader | delisted |
//! | super admin -> operator | -admin, -trader | delisted |
//!
//! Investor operations are gated by operator or system; everything else by
//! admin, both in the router's authority registry.

use crate::adapters::ledger::Ledger;
use crate::domain::authority::AuthorityRegistry;
use crate::domain::client::RegistryKind;
use crate::domain::gates::Gate;
use crate::domain::initializer::Initializer;
use crate::domain::roles::Role;
use crate::errors::AccessError;
use crate::ports::outbound::RoleReader;
use serde::{Deserialize, Serialize};
use shared_types::Address;
use tracing::info;

/// Registries the router drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RouterContracts {
    /// Default whitelist.
    pub whitelist: Address,
    /// Authority registry.
    pub base: Address,
    /// Raise registry.
    pub raise: Address,
    /// Trader registry.
    pub trader: Address,
    /// Blocker registry.
    pub blocker: Address,
}

impl RouterContracts {
    fn any_zero(&self) -> bool {
        [self.whitelist, self.base, self.raise, self.trader, self.blocker]
            .iter()
            .any(Address::is_zero)
    }
}

/// Onboarding relay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnboardRouter {
    address: Address,
    initializer: Initializer,
    contracts: RouterContracts,
}

impl OnboardRouter {
    /// An uninitialized router deployed at `address`.
    #[must_use]
    pub fn new(address: Address) -> Self {
        Self {
            address,
            initializer: Initializer::new(),
            contracts: RouterContracts::default(),
        }
    }

    /// The router's own address, which acts as relay.
    #[must_use]
    pub fn address(&self) -> Address {
        self.address
    }

    /// Sets every registry address. Callable once; no address may be zero.
    pub fn initialize(&mut self, contracts: RouterContracts) -> Result<(), AccessError> {
        let Self {
            initializer,
            contracts: slot,
            ..
        } = self;
        initializer.run(|| {
            if contracts.any_zero() {
                return Err(AccessError::ZeroAddress);
            }
            *slot = contracts;
            Ok(())
        })?;
        info!(router = %self.address, base = %contracts.base, "Onboard router initialized");
        Ok(())
    }

    /// Returns true once initialized.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initializer.is_initialized()
    }

    // =========================================================================
    // CONTRACT POINTERS
    // =========================================================================

    /// Default whitelist.
    #[must_use]
    pub fn whitelist_contract(&self) -> Address {
        self.contracts.whitelist
    }

    /// Authority registry.
    #[must_use]
    pub fn base_operators_contract(&self) -> Address {
        self.contracts.base
    }

    /// Raise registry.
    #[must_use]
    pub fn raise_operators_contract(&self) -> Address {
        self.contracts.raise
    }

    /// Trader registry.
    #[must_use]
    pub fn trader_operators_contract(&self) -> Address {
        self.contracts.trader
    }

    /// Blocker registry.
    #[must_use]
    pub fn blocker_operators_contract(&self) -> Address {
        self.contracts.blocker
    }

    /// Replaces the default whitelist. Admin only.
    pub fn change_whitelist_contract(
        &mut self,
        ledger: &Ledger,
        caller: Address,
        whitelist: Address,
    ) -> Result<(), AccessError> {
        self.change_contract(ledger, caller, whitelist, |c| &mut c.whitelist)
    }

    /// Replaces the authority registry. Admin (in the current one) only.
    pub fn change_base_operators_contract(
        &mut self,
        ledger: &Ledger,
        caller: Address,
        base: Address,
    ) -> Result<(), AccessError> {
        self.change_contract(ledger, caller, base, |c| &mut c.base)
    }

    /// Replaces the raise registry. Admin only.
    pub fn change_raise_operators_contract(
        &mut self,
        ledger: &Ledger,
        caller: Address,
        raise: Address,
    ) -> Result<(), AccessError> {
        self.change_contract(ledger, caller, raise, |c| &mut c.raise)
    }

    /// Replaces the trader registry. Admin only.
    pub fn change_trader_operators_contract(
        &mut self,
        ledger: &Ledger,
        caller: Address,
        trader: Address,
    ) -> Result<(), AccessError> {
        self.change_contract(ledger, caller, trader, |c| &mut c.trader)
    }

    /// Replaces the blocker registry. Admin only.
    pub fn change_blocker_operators_contract(
        &mut self,
        ledger: &Ledger,
        caller: Address,
        blocker: Address,
    ) -> Result<(), AccessError> {
        self.change_contract(ledger, caller, blocker, |c| &mut c.blocker)
    }

    fn change_contract<F>(&mut self, ledger: &Ledger, caller: Address, address: Address, field: F) -> Result<(), AccessError>
    where
        F: FnOnce(&mut RouterContracts) -> &mut Address,
    {
        self.require(ledger, caller, Gate::ADMIN)?;
        if address.is_zero() {
            return Err(AccessError::ZeroAddress);
        }
        let slot = field(&mut self.contracts);
        info!(router = %self.address, previous = %*slot, current = %address, "Router contract changed");
        *slot = address;
        Ok(())
    }

    // =========================================================================
    // ONBOARD / DEBOARD
    // =========================================================================

    /// Grants system and whitelists `account`.
    pub fn onboard_system(
        &self,
        ledger: &mut Ledger,
        caller: Address,
        account: Address,
        whitelist: Address,
    ) -> Result<(), AccessError> {
        self.admin_route(ledger, caller, "onboard_system", account, |router, ledger| {
            router.on_base(ledger, |reg, relay| reg.add_system(relay, account))?;
            router.list(ledger, whitelist, account, true)
        })
    }

    /// Revokes system and delists `account`.
    pub fn deboard_system(
        &self,
        ledger: &mut Ledger,
        caller: Address,
        account: Address,
        whitelist: Address,
    ) -> Result<(), AccessError> {
        self.admin_route(ledger, caller, "deboard_system", account, |router, ledger| {
            router.on_base(ledger, |reg, relay| reg.remove_system(relay, account))?;
            router.list(ledger, whitelist, account, false)
        })
    }

    /// Grants operator, admin and trader and whitelists `account`.
    pub fn onboard_super_admin(
        &self,
        ledger: &mut Ledger,
        caller: Address,
        account: Address,
        whitelist: Address,
    ) -> Result<(), AccessError> {
        self.admin_route(ledger, caller, "onboard_super_admin", account, |router, ledger| {
            router.on_base(ledger, |reg, relay| reg.add_operator_and_admin(relay, account))?;
            router.set_trader(ledger, account, true)?;
            router.list(ledger, whitelist, account, true)
        })
    }

    /// Revokes operator, admin and trader and delists `account`.
    pub fn deboard_super_admin(
        &self,
        ledger: &mut Ledger,
        caller: Address,
        account: Address,
        whitelist: Address,
    ) -> Result<(), AccessError> {
        self.admin_route(ledger, caller, "deboard_super_admin", account, |router, ledger| {
            router.on_base(ledger, |reg, relay| reg.remove_operator_and_admin(relay, account))?;
            router.set_trader(ledger, account, false)?;
            router.list(ledger, whitelist, account, false)
        })
    }

    /// Grants blocker and whitelists `account`.
    pub fn onboard_blocker(
        &self,
        ledger: &mut Ledger,
        caller: Address,
        account: Address,
        whitelist: Address,
    ) -> Result<(), AccessError> {
        self.admin_route(ledger, caller, "onboard_blocker", account, |router, ledger| {
            router.set_blocker(ledger, account, true)?;
            router.list(ledger, whitelist, account, true)
        })
    }

    /// Revokes blocker and delists `account`.
    pub fn deboard_blocker(
        &self,
        ledger: &mut Ledger,
        caller: Address,
        account: Address,
        whitelist: Address,
    ) -> Result<(), AccessError> {
        self.admin_route(ledger, caller, "deboard_blocker", account, |router, ledger| {
            router.set_blocker(ledger, account, false)?;
            router.list(ledger, whitelist, account, false)
        })
    }

    /// Grants trader and whitelists `account`.
    pub fn onboard_trader(
        &self,
        ledger: &mut Ledger,
        caller: Address,
        account: Address,
        whitelist: Address,
    ) -> Result<(), AccessError> {
        self.admin_route(ledger, caller, "onboard_trader", account, |router, ledger| {
            router.set_trader(ledger, account, true)?;
            router.list(ledger, whitelist, account, true)
        })
    }

    /// Revokes trader and delists `account`.
    pub fn deboard_trader(
        &self,
        ledger: &mut Ledger,
        caller: Address,
        account: Address,
        whitelist: Address,
    ) -> Result<(), AccessError> {
        self.admin_route(ledger, caller, "deboard_trader", account, |router, ledger| {
            router.set_trader(ledger, account, false)?;
            router.list(ledger, whitelist, account, false)
        })
    }

    /// Grants investor and whitelists `account`. Operator or system only.
    pub fn onboard_investor(
        &self,
        ledger: &mut Ledger,
        caller: Address,
        account: Address,
        whitelist: Address,
    ) -> Result<(), AccessError> {
        self.route(ledger, caller, Gate::OPERATOR_OR_SYSTEM, "onboard_investor", account, |router, ledger| {
            router.set_investor(ledger, account, true)?;
            router.list(ledger, whitelist, account, true)
        })
    }

    /// Revokes investor and delists `account`. Operator or system only.
    pub fn deboard_investor(
        &self,
        ledger: &mut Ledger,
        caller: Address,
        account: Address,
        whitelist: Address,
    ) -> Result<(), AccessError> {
        self.route(ledger, caller, Gate::OPERATOR_OR_SYSTEM, "deboard_investor", account, |router, ledger| {
            router.set_investor(ledger, account, false)?;
            router.list(ledger, whitelist, account, false)
        })
    }

    // =========================================================================
    // ROLE CHANGES
    // =========================================================================

    /// Admin becomes trader.
    pub fn change_admin_to_trader(
        &self,
        ledger: &mut Ledger,
        caller: Address,
        account: Address,
        whitelist: Address,
    ) -> Result<(), AccessError> {
        self.admin_route(ledger, caller, "change_admin_to_trader", account, |router, ledger| {
            router.on_base(ledger, |reg, relay| reg.remove_admin(relay, account))?;
            router.set_trader(ledger, account, true)?;
            router.list(ledger, whitelist, account, true)
        })
    }

    /// Admin additionally becomes operator and trader.
    pub fn change_admin_to_super_admin(
        &self,
        ledger: &mut Ledger,
        caller: Address,
        account: Address,
        whitelist: Address,
    ) -> Result<(), AccessError> {
        self.admin_route(ledger, caller, "change_admin_to_super_admin", account, |router, ledger| {
            router.require_role(ledger, Role::Admin, account)?;
            router.on_base(ledger, |reg, relay| reg.add_operator(relay, account))?;
            router.set_trader(ledger, account, true)?;
            router.list(ledger, whitelist, account, true)
        })
    }

    /// Operator becomes trader.
    pub fn change_operator_to_trader(
        &self,
        ledger: &mut Ledger,
        caller: Address,
        account: Address,
        whitelist: Address,
    ) -> Result<(), AccessError> {
        self.admin_route(ledger, caller, "change_operator_to_trader", account, |router, ledger| {
            router.on_base(ledger, |reg, relay| reg.remove_operator(relay, account))?;
            router.set_trader(ledger, account, true)?;
            router.list(ledger, whitelist, account, true)
        })
    }

    /// Operator additionally becomes admin and trader.
    pub fn change_operator_to_super_admin(
        &self,
        ledger: &mut Ledger,
        caller: Address,
        account: Address,
        whitelist: Address,
    ) -> Result<(), AccessError> {
        self.admin_route(ledger, caller, "change_operator_to_super_admin", account, |router, ledger| {
            router.require_role(ledger, Role::Operator, account)?;
            router.on_base(ledger, |reg, relay| reg.add_admin(relay, account))?;
            router.set_trader(ledger, account, true)?;
            router.list(ledger, whitelist, account, true)
        })
    }

    /// Trader becomes operator.
    pub fn change_trader_to_operator(
        &self,
        ledger: &mut Ledger,
        caller: Address,
        account: Address,
        whitelist: Address,
    ) -> Result<(), AccessError> {
        self.admin_route(ledger, caller, "change_trader_to_operator", account, |router, ledger| {
            router.set_trader(ledger, account, false)?;
            router.on_base(ledger, |reg, relay| reg.add_operator(relay, account))?;
            router.list(ledger, whitelist, account, false)
        })
    }

    /// Trader becomes admin.
    pub fn change_trader_to_admin(
        &self,
        ledger: &mut Ledger,
        caller: Address,
        account: Address,
        whitelist: Address,
    ) -> Result<(), AccessError> {
        self.admin_route(ledger, caller, "change_trader_to_admin", account, |router, ledger| {
            router.set_trader(ledger, account, false)?;
            router.on_base(ledger, |reg, relay| reg.add_admin(relay, account))?;
            router.list(ledger, whitelist, account, false)
        })
    }

    /// Super admin keeps admin only.
    pub fn change_super_admin_to_admin(
        &self,
        ledger: &mut Ledger,
        caller: Address,
        account: Address,
        whitelist: Address,
    ) -> Result<(), AccessError> {
        self.admin_route(ledger, caller, "change_super_admin_to_admin", account, |router, ledger| {
            router.require_role(ledger, Role::Admin, account)?;
            router.on_base(ledger, |reg, relay| reg.remove_operator(relay, account))?;
            router.set_trader(ledger, account, false)?;
            router.list(ledger, whitelist, account, false)
        })
    }

    /// Super admin keeps operator only.
    pub fn change_super_admin_to_operator(
        &self,
        ledger: &mut Ledger,
        caller: Address,
        account: Address,
        whitelist: Address,
    ) -> Result<(), AccessError> {
        self.admin_route(ledger, caller, "change_super_admin_to_operator", account, |router, ledger| {
            router.require_role(ledger, Role::Admin, account)?;
            router.on_base(ledger, |reg, relay| reg.remove_admin(relay, account))?;
            router.set_trader(ledger, account, false)?;
            router.list(ledger, whitelist, account, false)
        })
    }

    // =========================================================================
    // INTERNALS
    // =========================================================================

    fn require(&self, ledger: &Ledger, caller: Address, gate: Gate) -> Result<(), AccessError> {
        if !self.is_initialized() {
            return Err(AccessError::NotInitialized(RegistryKind::Authority));
        }
        let base: &dyn RoleReader = ledger.authority_at(self.contracts.base)?;
        gate.require(caller, &[base])
    }

    fn require_role(&self, ledger: &Ledger, role: Role, account: Address) -> Result<(), AccessError> {
        if ledger.authority_at(self.contracts.base)?.has_role(role, account) {
            Ok(())
        } else {
            Err(AccessError::DoesNotHaveRole { role, account })
        }
    }

    fn admin_route<F>(
        &self,
        ledger: &mut Ledger,
        caller: Address,
        action: &'static str,
        account: Address,
        steps: F,
    ) -> Result<(), AccessError>
    where
        F: FnOnce(&Self, &mut Ledger) -> Result<(), AccessError>,
    {
        self.route(ledger, caller, Gate::ADMIN, action, account, steps)
    }

    /// Checks `gate`, then runs `steps` as one ledger transaction.
    fn route<F>(
        &self,
        ledger: &mut Ledger,
        caller: Address,
        gate: Gate,
        action: &'static str,
        account: Address,
        steps: F,
    ) -> Result<(), AccessError>
    where
        F: FnOnce(&Self, &mut Ledger) -> Result<(), AccessError>,
    {
        self.require(ledger, caller, gate)?;
        ledger.transact(|ledger| steps(self, ledger))?;
        info!(router = %self.address, caller = %caller, account = %account, action, "Router call applied");
        Ok(())
    }

    fn on_base<F>(&self, ledger: &mut Ledger, f: F) -> Result<(), AccessError>
    where
        F: FnOnce(&mut AuthorityRegistry, Address) -> Result<(), AccessError>,
    {
        let relay = self.address;
        ledger.with_authority(self.contracts.base, |reg, _| f(reg, relay))
    }

    fn set_trader(&self, ledger: &mut Ledger, account: Address, grant: bool) -> Result<(), AccessError> {
        let relay = self.address;
        ledger.with_trader(self.contracts.trader, |reg, dir| {
            if grant {
                reg.add_trader(dir, relay, account)
            } else {
                reg.remove_trader(dir, relay, account)
            }
        })
    }

    fn set_blocker(&self, ledger: &mut Ledger, account: Address, grant: bool) -> Result<(), AccessError> {
        let relay = self.address;
        ledger.with_blocker(self.contracts.blocker, |reg, dir| {
            if grant {
                reg.add_blocker(dir, relay, account)
            } else {
                reg.remove_blocker(dir, relay, account)
            }
        })
    }

    fn set_investor(&self, ledger: &mut Ledger, account: Address, grant: bool) -> Result<(), AccessError> {
        let relay = self.address;
        ledger.with_raise(self.contracts.raise, |reg, dir| {
            if grant {
                reg.add_investor(dir, relay, account)
            } else {
                reg.remove_investor(dir, relay, account)
            }
        })
    }

    fn list(&self, ledger: &mut Ledger, whitelist: Address, account: Address, listed: bool) -> Result<(), AccessError> {
        let target = if whitelist.is_zero() {
            self.contracts.whitelist
        } else {
            whitelist
        };
        let relay = self.address;
        ledger.with_whitelist(target, |list, dir| list.toggle_whitelist(dir, relay, account, listed))
    }
}
