//! # Authority Registry
//!
//! The base registry: five role sets (admin, operator, system, relay,
//! multisig) governed by the registry's own admins and relays.
//!
//! | Operation | Gate |
//! |-----------|------|
//! | add/remove admin, operator, system | admin or relay |
//! | add/remove relay | admin |
//! | `add_multisig` | admin, empty slot only |
//! | `change_multisig` | current multisig, target must be a contract |
//! | `change_to_operator` / `change_to_admin` | admin, never on itself |
//! | `add_operator_and_admin` / `remove_operator_and_admin` | admin or relay |
//!
//! Composite operations validate every step before mutating anything.
//!
//! ## Invariants
//! - The admin set is never empty: an admin cannot remove itself, and no
//!   removal may take out the last remaining admin.
//! - The multisig slot holds at most one member.

use crate::domain::gates::Gate;
use crate::domain::roles::{Role, RoleSet};
use crate::errors::AccessError;
use crate::ports::outbound::{CodeInspector, RoleReader};
use serde::{Deserialize, Serialize};
use shared_types::Address;
use tracing::info;

/// Central role registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorityRegistry {
    address: Address,
    admins: RoleSet,
    operators: RoleSet,
    systems: RoleSet,
    relays: RoleSet,
    multisig: RoleSet,
}

impl AuthorityRegistry {
    /// Creates a registry at `address` with `admin` as its first admin.
    pub fn new(address: Address, admin: Address) -> Result<Self, AccessError> {
        let mut admins = RoleSet::new(Role::Admin);
        admins.add(admin)?;
        info!(registry = %address, admin = %admin, "Authority registry created");
        Ok(Self {
            address,
            admins,
            operators: RoleSet::new(Role::Operator),
            systems: RoleSet::new(Role::System),
            relays: RoleSet::new(Role::Relay),
            multisig: RoleSet::new(Role::Multisig),
        })
    }

    /// The registry's own address.
    #[must_use]
    pub fn address(&self) -> Address {
        self.address
    }

    fn require(&self, caller: Address, gate: Gate) -> Result<(), AccessError> {
        gate.require(caller, &[self])
    }

    /// Rejects removing `account` if it is the only admin left.
    fn check_not_last_admin(&self, account: Address) -> Result<(), AccessError> {
        if self.admins.len() == 1 && self.admins.has(account) {
            return Err(AccessError::LastAdmin(account));
        }
        Ok(())
    }

    // =========================================================================
    // ADMIN
    // =========================================================================

    /// Grants admin to `account`.
    pub fn add_admin(&mut self, caller: Address, account: Address) -> Result<(), AccessError> {
        self.require(caller, Gate::ADMIN_OR_RELAY)?;
        self.admins.add(account)?;
        info!(caller = %caller, account = %account, role = %Role::Admin, "Role granted");
        Ok(())
    }

    /// Revokes admin from `account`. An admin can never remove itself.
    pub fn remove_admin(&mut self, caller: Address, account: Address) -> Result<(), AccessError> {
        self.require(caller, Gate::ADMIN_OR_RELAY)?;
        if account == caller {
            return Err(AccessError::CannotRemoveSelf(caller));
        }
        self.admins.check_remove(account)?;
        self.check_not_last_admin(account)?;
        self.admins.remove(account)?;
        info!(caller = %caller, account = %account, role = %Role::Admin, "Role revoked");
        Ok(())
    }

    // =========================================================================
    // OPERATOR / SYSTEM / RELAY
    // =========================================================================

    /// Grants operator to `account`.
    pub fn add_operator(&mut self, caller: Address, account: Address) -> Result<(), AccessError> {
        self.require(caller, Gate::ADMIN_OR_RELAY)?;
        self.operators.add(account)?;
        info!(caller = %caller, account = %account, role = %Role::Operator, "Role granted");
        Ok(())
    }

    /// Revokes operator from `account`.
    pub fn remove_operator(&mut self, caller: Address, account: Address) -> Result<(), AccessError> {
        self.require(caller, Gate::ADMIN_OR_RELAY)?;
        self.operators.remove(account)?;
        info!(caller = %caller, account = %account, role = %Role::Operator, "Role revoked");
        Ok(())
    }

    /// Grants system to `account`.
    pub fn add_system(&mut self, caller: Address, account: Address) -> Result<(), AccessError> {
        self.require(caller, Gate::ADMIN_OR_RELAY)?;
        self.systems.add(account)?;
        info!(caller = %caller, account = %account, role = %Role::System, "Role granted");
        Ok(())
    }

    /// Revokes system from `account`.
    pub fn remove_system(&mut self, caller: Address, account: Address) -> Result<(), AccessError> {
        self.require(caller, Gate::ADMIN_OR_RELAY)?;
        self.systems.remove(account)?;
        info!(caller = %caller, account = %account, role = %Role::System, "Role revoked");
        Ok(())
    }

    /// Grants relay to `account`. Admin only.
    pub fn add_relay(&mut self, caller: Address, account: Address) -> Result<(), AccessError> {
        self.require(caller, Gate::ADMIN)?;
        self.relays.add(account)?;
        info!(caller = %caller, account = %account, role = %Role::Relay, "Role granted");
        Ok(())
    }

    /// Revokes relay from `account`. Admin only.
    pub fn remove_relay(&mut self, caller: Address, account: Address) -> Result<(), AccessError> {
        self.require(caller, Gate::ADMIN)?;
        self.relays.remove(account)?;
        info!(caller = %caller, account = %account, role = %Role::Relay, "Role revoked");
        Ok(())
    }

    // =========================================================================
    // MULTISIG
    // =========================================================================

    /// Assigns the multisig slot. Admin only, and only while the slot is empty.
    pub fn add_multisig(&mut self, caller: Address, account: Address) -> Result<(), AccessError> {
        self.require(caller, Gate::ADMIN)?;
        if account.is_zero() {
            return Err(AccessError::ZeroAddress);
        }
        if let Some(existing) = self.multisig.single() {
            return Err(AccessError::MultisigAlreadyAssigned(existing));
        }
        self.multisig.add(account)?;
        info!(caller = %caller, account = %account, role = %Role::Multisig, "Role granted");
        Ok(())
    }

    /// Hands the multisig slot to `account`.
    ///
    /// Only the current multisig may call this, and `account` must carry
    /// contract code. No deeper interface check is made.
    pub fn change_multisig(
        &mut self,
        code: &dyn CodeInspector,
        caller: Address,
        account: Address,
    ) -> Result<(), AccessError> {
        self.require(caller, Gate::MULTISIG)?;
        if account.is_zero() {
            return Err(AccessError::ZeroAddress);
        }
        if !code.is_contract(account) {
            return Err(AccessError::NotAContract(account));
        }
        self.multisig.check_add(account)?;
        self.multisig.remove(caller)?;
        self.multisig.add(account)?;
        info!(previous = %caller, current = %account, "Multisig changed");
        Ok(())
    }

    // =========================================================================
    // ROLE TRANSITIONS
    // =========================================================================

    /// Moves `account` from admin to operator.
    pub fn change_to_operator(&mut self, caller: Address, account: Address) -> Result<(), AccessError> {
        self.require(caller, Gate::ADMIN)?;
        if account == caller {
            return Err(AccessError::CannotChangeSelf(caller));
        }
        self.admins.check_remove(account)?;
        self.operators.check_add(account)?;
        self.check_not_last_admin(account)?;

        self.admins.remove(account)?;
        self.operators.add(account)?;
        info!(caller = %caller, account = %account, "Admin changed to operator");
        Ok(())
    }

    /// Moves `account` from operator to admin.
    pub fn change_to_admin(&mut self, caller: Address, account: Address) -> Result<(), AccessError> {
        self.require(caller, Gate::ADMIN)?;
        if account == caller {
            return Err(AccessError::CannotChangeSelf(caller));
        }
        self.admins.check_add(account)?;
        self.operators.check_remove(account)?;

        self.admins.add(account)?;
        self.operators.remove(account)?;
        info!(caller = %caller, account = %account, "Operator changed to admin");
        Ok(())
    }

    /// Grants both operator and admin to `account`.
    pub fn add_operator_and_admin(&mut self, caller: Address, account: Address) -> Result<(), AccessError> {
        self.require(caller, Gate::ADMIN_OR_RELAY)?;
        self.operators.check_add(account)?;
        self.admins.check_add(account)?;

        self.operators.add(account)?;
        self.admins.add(account)?;
        info!(caller = %caller, account = %account, "Operator and admin granted");
        Ok(())
    }

    /// Revokes both operator and admin from `account`.
    pub fn remove_operator_and_admin(&mut self, caller: Address, account: Address) -> Result<(), AccessError> {
        self.require(caller, Gate::ADMIN_OR_RELAY)?;
        if account == caller {
            return Err(AccessError::CannotRemoveSelf(caller));
        }
        self.operators.check_remove(account)?;
        self.admins.check_remove(account)?;
        self.check_not_last_admin(account)?;

        self.operators.remove(account)?;
        self.admins.remove(account)?;
        info!(caller = %caller, account = %account, "Operator and admin revoked");
        Ok(())
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    /// Returns true if `account` is an admin.
    #[must_use]
    pub fn is_admin(&self, account: Address) -> bool {
        self.admins.has(account)
    }

    /// Returns true if `account` is an operator.
    #[must_use]
    pub fn is_operator(&self, account: Address) -> bool {
        self.operators.has(account)
    }

    /// Returns true if `account` is a system account.
    #[must_use]
    pub fn is_system(&self, account: Address) -> bool {
        self.systems.has(account)
    }

    /// Returns true if `account` is a relay.
    #[must_use]
    pub fn is_relay(&self, account: Address) -> bool {
        self.relays.has(account)
    }

    /// Returns true if `account` is the multisig.
    #[must_use]
    pub fn is_multisig(&self, account: Address) -> bool {
        self.multisig.has(account)
    }

    /// Returns true if `account` is an operator or an admin.
    #[must_use]
    pub fn is_operator_or_admin(&self, account: Address) -> bool {
        self.is_operator(account) || self.is_admin(account)
    }

    /// Returns true if `account` is both operator and admin.
    #[must_use]
    pub fn is_operator_and_admin(&self, account: Address) -> bool {
        self.is_operator(account) && self.is_admin(account)
    }

    /// Returns true if `account` is an operator or a system account.
    #[must_use]
    pub fn is_operator_or_system(&self, account: Address) -> bool {
        self.is_operator(account) || self.is_system(account)
    }

    /// Returns true if `account` is an admin or a system account.
    #[must_use]
    pub fn is_admin_or_system(&self, account: Address) -> bool {
        self.is_admin(account) || self.is_system(account)
    }

    /// Returns true if `account` is an operator or a relay.
    #[must_use]
    pub fn is_operator_or_relay(&self, account: Address) -> bool {
        self.is_operator(account) || self.is_relay(account)
    }

    /// Returns true if `account` is an admin or a relay.
    #[must_use]
    pub fn is_admin_or_relay(&self, account: Address) -> bool {
        self.is_admin(account) || self.is_relay(account)
    }

    /// Returns true if `account` is an operator, system account or relay.
    #[must_use]
    pub fn is_operator_or_system_or_relay(&self, account: Address) -> bool {
        self.is_operator(account) || self.is_system(account) || self.is_relay(account)
    }

    /// Current multisig, if assigned.
    #[must_use]
    pub fn multisig(&self) -> Option<Address> {
        self.multisig.single()
    }

    /// All admins in ascending address order.
    #[must_use]
    pub fn admins(&self) -> Vec<Address> {
        self.admins.members()
    }

    /// Number of admins.
    #[must_use]
    pub fn admin_count(&self) -> usize {
        self.admins.len()
    }

    /// Number of accounts in the multisig slot (zero or one).
    #[must_use]
    pub fn multisig_count(&self) -> usize {
        self.multisig.len()
    }
}

impl RoleReader for AuthorityRegistry {
    fn has_role(&self, role: Role, account: Address) -> bool {
        match role {
            Role::Admin => self.admins.has(account),
            Role::Operator => self.operators.has(account),
            Role::System => self.systems.has(account),
            Role::Relay => self.relays.has(account),
            Role::Multisig => self.multisig.has(account),
            Role::Blocker | Role::Trader | Role::Investor | Role::Issuer => false,
        }
    }
}
