//! # Operatorable Mixins
//!
//! Contract-level surface over embedded [`AuthorityClient`]s. A contract
//! implements the accessor methods and gets the pointer protocol, gate
//! checks and pass-through role queries as default methods.
//!
//! - [`Operatorable`]: pointer to the authority registry.
//! - [`BlockerOperatorable`], [`TraderOperatorable`], [`RaiseOperatorable`]:
//!   a second pointer to a satellite registry. Combined gates OR the
//!   satellite role with authority roles, both read at call time.
//!
//! Changing any pointer requires admin in the CURRENT authority registry.

use crate::domain::client::AuthorityClient;
use crate::domain::gates::Gate;
use crate::errors::AccessError;
use crate::ports::outbound::RegistryDirectory;
use shared_types::Address;

// =============================================================================
// AUTHORITY POINTER
// =============================================================================

/// A contract gated by an authority registry.
pub trait Operatorable {
    /// The authority pointer.
    fn authority(&self) -> &AuthorityClient;

    /// The authority pointer, mutably.
    fn authority_mut(&mut self) -> &mut AuthorityClient;

    /// Live authority registry address (zero when unbound).
    fn operators_contract(&self) -> Address {
        self.authority().contract()
    }

    /// Pending authority registry address (zero when none).
    fn operators_pending(&self) -> Address {
        self.authority().pending()
    }

    /// Proposes a new authority registry. Admin only.
    fn set_operators_contract(
        &mut self,
        dir: &dyn RegistryDirectory,
        caller: Address,
        registry: Address,
    ) -> Result<(), AccessError> {
        self.require_admin(dir, caller)?;
        self.authority_mut().set_pending(registry)
    }

    /// Completes the authority migration. `caller` must be the pending registry.
    fn confirm_operators_contract(&mut self, caller: Address) -> Result<Address, AccessError> {
        self.authority_mut().confirm(caller)
    }

    /// Fails unless the authority registry grants `caller` a role of `gate`.
    fn require_base(&self, dir: &dyn RegistryDirectory, caller: Address, gate: Gate) -> Result<(), AccessError> {
        gate.require(caller, &[self.authority().roles(dir)?])
    }

    /// Returns whether the authority registry grants `account` a role of `gate`.
    fn base_permits(&self, dir: &dyn RegistryDirectory, account: Address, gate: Gate) -> Result<bool, AccessError> {
        Ok(gate.permits(account, &[self.authority().roles(dir)?]))
    }

    /// Admin only.
    fn require_admin(&self, dir: &dyn RegistryDirectory, caller: Address) -> Result<(), AccessError> {
        self.require_base(dir, caller, Gate::ADMIN)
    }

    /// Operator only.
    fn require_operator(&self, dir: &dyn RegistryDirectory, caller: Address) -> Result<(), AccessError> {
        self.require_base(dir, caller, Gate::OPERATOR)
    }

    /// System only.
    fn require_system(&self, dir: &dyn RegistryDirectory, caller: Address) -> Result<(), AccessError> {
        self.require_base(dir, caller, Gate::SYSTEM)
    }

    /// Relay only.
    fn require_relay(&self, dir: &dyn RegistryDirectory, caller: Address) -> Result<(), AccessError> {
        self.require_base(dir, caller, Gate::RELAY)
    }

    /// Multisig only.
    fn require_multisig(&self, dir: &dyn RegistryDirectory, caller: Address) -> Result<(), AccessError> {
        self.require_base(dir, caller, Gate::MULTISIG)
    }

    /// Admin or system.
    fn require_admin_or_system(&self, dir: &dyn RegistryDirectory, caller: Address) -> Result<(), AccessError> {
        self.require_base(dir, caller, Gate::ADMIN_OR_SYSTEM)
    }

    /// Operator or system.
    fn require_operator_or_system(&self, dir: &dyn RegistryDirectory, caller: Address) -> Result<(), AccessError> {
        self.require_base(dir, caller, Gate::OPERATOR_OR_SYSTEM)
    }

    /// Operator or relay.
    fn require_operator_or_relay(&self, dir: &dyn RegistryDirectory, caller: Address) -> Result<(), AccessError> {
        self.require_base(dir, caller, Gate::OPERATOR_OR_RELAY)
    }

    /// Admin or relay.
    fn require_admin_or_relay(&self, dir: &dyn RegistryDirectory, caller: Address) -> Result<(), AccessError> {
        self.require_base(dir, caller, Gate::ADMIN_OR_RELAY)
    }

    /// Operator or system or relay.
    fn require_operator_or_system_or_relay(
        &self,
        dir: &dyn RegistryDirectory,
        caller: Address,
    ) -> Result<(), AccessError> {
        self.require_base(dir, caller, Gate::OPERATOR_OR_SYSTEM_OR_RELAY)
    }

    /// Pass-through `is_admin`.
    fn is_admin(&self, dir: &dyn RegistryDirectory, account: Address) -> Result<bool, AccessError> {
        self.base_permits(dir, account, Gate::ADMIN)
    }

    /// Pass-through `is_operator`.
    fn is_operator(&self, dir: &dyn RegistryDirectory, account: Address) -> Result<bool, AccessError> {
        self.base_permits(dir, account, Gate::OPERATOR)
    }

    /// Pass-through `is_system`.
    fn is_system(&self, dir: &dyn RegistryDirectory, account: Address) -> Result<bool, AccessError> {
        self.base_permits(dir, account, Gate::SYSTEM)
    }

    /// Pass-through `is_relay`.
    fn is_relay(&self, dir: &dyn RegistryDirectory, account: Address) -> Result<bool, AccessError> {
        self.base_permits(dir, account, Gate::RELAY)
    }

    /// Pass-through `is_multisig`.
    fn is_multisig(&self, dir: &dyn RegistryDirectory, account: Address) -> Result<bool, AccessError> {
        self.base_permits(dir, account, Gate::MULTISIG)
    }

    /// Pass-through `is_operator_or_system`.
    fn is_operator_or_system(&self, dir: &dyn RegistryDirectory, account: Address) -> Result<bool, AccessError> {
        self.base_permits(dir, account, Gate::OPERATOR_OR_SYSTEM)
    }

    /// Pass-through `is_admin_or_system`.
    fn is_admin_or_system(&self, dir: &dyn RegistryDirectory, account: Address) -> Result<bool, AccessError> {
        self.base_permits(dir, account, Gate::ADMIN_OR_SYSTEM)
    }

    /// Pass-through `is_operator_or_relay`.
    fn is_operator_or_relay(&self, dir: &dyn RegistryDirectory, account: Address) -> Result<bool, AccessError> {
        self.base_permits(dir, account, Gate::OPERATOR_OR_RELAY)
    }

    /// Pass-through `is_admin_or_relay`.
    fn is_admin_or_relay(&self, dir: &dyn RegistryDirectory, account: Address) -> Result<bool, AccessError> {
        self.base_permits(dir, account, Gate::ADMIN_OR_RELAY)
    }

    /// Pass-through `is_operator_or_system_or_relay`.
    fn is_operator_or_system_or_relay(
        &self,
        dir: &dyn RegistryDirectory,
        account: Address,
    ) -> Result<bool, AccessError> {
        self.base_permits(dir, account, Gate::OPERATOR_OR_SYSTEM_OR_RELAY)
    }
}

// =============================================================================
// SATELLITE POINTERS
// =============================================================================

/// A contract additionally gated by a blocker registry.
pub trait BlockerOperatorable: Operatorable {
    /// The blocker pointer.
    fn blockers(&self) -> &AuthorityClient;

    /// The blocker pointer, mutably.
    fn blockers_mut(&mut self) -> &mut AuthorityClient;

    /// Live blocker registry address.
    fn blocker_operators_contract(&self) -> Address {
        self.blockers().contract()
    }

    /// Pending blocker registry address.
    fn blocker_operators_pending(&self) -> Address {
        self.blockers().pending()
    }

    /// Proposes a new blocker registry. Admin only.
    fn set_blocker_operators_contract(
        &mut self,
        dir: &dyn RegistryDirectory,
        caller: Address,
        registry: Address,
    ) -> Result<(), AccessError> {
        self.require_admin(dir, caller)?;
        self.blockers_mut().set_pending(registry)
    }

    /// Completes the blocker migration.
    fn confirm_blocker_operators_contract(&mut self, caller: Address) -> Result<Address, AccessError> {
        self.blockers_mut().confirm(caller)
    }

    /// Blocker only.
    fn require_blocker(&self, dir: &dyn RegistryDirectory, caller: Address) -> Result<(), AccessError> {
        Gate::BLOCKER.require(caller, &[self.blockers().roles(dir)?])
    }

    /// Blocker (satellite) or operator (authority).
    fn require_blocker_or_operator(&self, dir: &dyn RegistryDirectory, caller: Address) -> Result<(), AccessError> {
        Gate::BLOCKER_OR_OPERATOR.require(
            caller,
            &[self.blockers().roles(dir)?, self.authority().roles(dir)?],
        )
    }

    /// Pass-through `is_blocker`.
    fn is_blocker(&self, dir: &dyn RegistryDirectory, account: Address) -> Result<bool, AccessError> {
        Ok(Gate::BLOCKER.permits(account, &[self.blockers().roles(dir)?]))
    }
}

/// A contract additionally gated by a trader registry.
pub trait TraderOperatorable: Operatorable {
    /// The trader pointer.
    fn traders(&self) -> &AuthorityClient;

    /// The trader pointer, mutably.
    fn traders_mut(&mut self) -> &mut AuthorityClient;

    /// Live trader registry address.
    fn trader_operators_contract(&self) -> Address {
        self.traders().contract()
    }

    /// Pending trader registry address.
    fn trader_operators_pending(&self) -> Address {
        self.traders().pending()
    }

    /// Proposes a new trader registry. Admin only.
    fn set_trader_operators_contract(
        &mut self,
        dir: &dyn RegistryDirectory,
        caller: Address,
        registry: Address,
    ) -> Result<(), AccessError> {
        self.require_admin(dir, caller)?;
        self.traders_mut().set_pending(registry)
    }

    /// Completes the trader migration.
    fn confirm_trader_operators_contract(&mut self, caller: Address) -> Result<Address, AccessError> {
        self.traders_mut().confirm(caller)
    }

    /// Trader only.
    fn require_trader(&self, dir: &dyn RegistryDirectory, caller: Address) -> Result<(), AccessError> {
        Gate::TRADER.require(caller, &[self.traders().roles(dir)?])
    }

    /// Operator or system (authority) or trader (satellite).
    fn require_operator_or_trader_or_system(
        &self,
        dir: &dyn RegistryDirectory,
        caller: Address,
    ) -> Result<(), AccessError> {
        Gate::OPERATOR_OR_TRADER_OR_SYSTEM.require(
            caller,
            &[self.traders().roles(dir)?, self.authority().roles(dir)?],
        )
    }

    /// Pass-through `is_trader`.
    fn is_trader(&self, dir: &dyn RegistryDirectory, account: Address) -> Result<bool, AccessError> {
        Ok(Gate::TRADER.permits(account, &[self.traders().roles(dir)?]))
    }
}

/// A contract additionally gated by a raise (investor/issuer) registry.
pub trait RaiseOperatorable: Operatorable {
    /// The raise pointer.
    fn raise(&self) -> &AuthorityClient;

    /// The raise pointer, mutably.
    fn raise_mut(&mut self) -> &mut AuthorityClient;

    /// Live raise registry address.
    fn raise_operators_contract(&self) -> Address {
        self.raise().contract()
    }

    /// Pending raise registry address.
    fn raise_operators_pending(&self) -> Address {
        self.raise().pending()
    }

    /// Proposes a new raise registry. Admin only.
    fn set_raise_operators_contract(
        &mut self,
        dir: &dyn RegistryDirectory,
        caller: Address,
        registry: Address,
    ) -> Result<(), AccessError> {
        self.require_admin(dir, caller)?;
        self.raise_mut().set_pending(registry)
    }

    /// Completes the raise migration.
    fn confirm_raise_operators_contract(&mut self, caller: Address) -> Result<Address, AccessError> {
        self.raise_mut().confirm(caller)
    }

    /// Investor only.
    fn require_investor(&self, dir: &dyn RegistryDirectory, caller: Address) -> Result<(), AccessError> {
        Gate::INVESTOR.require(caller, &[self.raise().roles(dir)?])
    }

    /// Issuer only.
    fn require_issuer(&self, dir: &dyn RegistryDirectory, caller: Address) -> Result<(), AccessError> {
        Gate::ISSUER.require(caller, &[self.raise().roles(dir)?])
    }

    /// Pass-through `is_investor`.
    fn is_investor(&self, dir: &dyn RegistryDirectory, account: Address) -> Result<bool, AccessError> {
        Ok(Gate::INVESTOR.permits(account, &[self.raise().roles(dir)?]))
    }

    /// Pass-through `is_issuer`.
    fn is_issuer(&self, dir: &dyn RegistryDirectory, account: Address) -> Result<bool, AccessError> {
        Ok(Gate::ISSUER.permits(account, &[self.raise().roles(dir)?]))
    }
}
