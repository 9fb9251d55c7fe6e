//! # Gates
//!
//! A gate is a named set of roles guarding an entry point. The caller is an
//! explicit argument and the registries to consult are passed by reference,
//! so every check states exactly which registries it depends on.
//!
//! A caller passes when ANY supplied registry grants ANY role of the gate.
//! Registries only answer for the roles they own, so a combined gate such as
//! [`Gate::BLOCKER_OR_OPERATOR`] checks Blocker in the satellite and
//! Operator in the authority registry. Membership is read at call time and
//! never cached: a revocation in either registry closes access immediately.

use crate::domain::roles::Role;
use crate::errors::AccessError;
use crate::ports::outbound::RoleReader;
use shared_types::Address;
use std::fmt;
use tracing::warn;

/// A fixed set of roles, any one of which admits the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gate {
    roles: &'static [Role],
}

impl Gate {
    /// Admin only.
    pub const ADMIN: Self = Self::new(&[Role::Admin]);
    /// Operator only.
    pub const OPERATOR: Self = Self::new(&[Role::Operator]);
    /// System only.
    pub const SYSTEM: Self = Self::new(&[Role::System]);
    /// Relay only.
    pub const RELAY: Self = Self::new(&[Role::Relay]);
    /// The current multisig only.
    pub const MULTISIG: Self = Self::new(&[Role::Multisig]);
    /// Admin or relay.
    pub const ADMIN_OR_RELAY: Self = Self::new(&[Role::Admin, Role::Relay]);
    /// Admin or system.
    pub const ADMIN_OR_SYSTEM: Self = Self::new(&[Role::Admin, Role::System]);
    /// Operator or admin.
    pub const OPERATOR_OR_ADMIN: Self = Self::new(&[Role::Operator, Role::Admin]);
    /// Operator or system.
    pub const OPERATOR_OR_SYSTEM: Self = Self::new(&[Role::Operator, Role::System]);
    /// Operator or relay.
    pub const OPERATOR_OR_RELAY: Self = Self::new(&[Role::Operator, Role::Relay]);
    /// Operator or admin or relay.
    pub const OPERATOR_OR_ADMIN_OR_RELAY: Self =
        Self::new(&[Role::Operator, Role::Admin, Role::Relay]);
    /// Operator or system or relay.
    pub const OPERATOR_OR_SYSTEM_OR_RELAY: Self =
        Self::new(&[Role::Operator, Role::System, Role::Relay]);
    /// Blocker only.
    pub const BLOCKER: Self = Self::new(&[Role::Blocker]);
    /// Blocker or operator.
    pub const BLOCKER_OR_OPERATOR: Self = Self::new(&[Role::Blocker, Role::Operator]);
    /// Trader only.
    pub const TRADER: Self = Self::new(&[Role::Trader]);
    /// Operator or trader or system.
    pub const OPERATOR_OR_TRADER_OR_SYSTEM: Self =
        Self::new(&[Role::Operator, Role::Trader, Role::System]);
    /// Investor only.
    pub const INVESTOR: Self = Self::new(&[Role::Investor]);
    /// Issuer only.
    pub const ISSUER: Self = Self::new(&[Role::Issuer]);

    /// Creates a gate admitting any of `roles`.
    #[must_use]
    pub const fn new(roles: &'static [Role]) -> Self {
        Self { roles }
    }

    /// The roles this gate admits.
    #[must_use]
    pub fn roles(&self) -> &'static [Role] {
        self.roles
    }

    /// Returns true if any registry grants `caller` any role of this gate.
    #[must_use]
    pub fn permits(&self, caller: Address, registries: &[&dyn RoleReader]) -> bool {
        registries.iter().any(|registry| {
            self.roles
                .iter()
                .any(|role| registry.has_role(*role, caller))
        })
    }

    /// Fails with [`AccessError::CallerUnauthorized`] unless [`Self::permits`].
    pub fn require(&self, caller: Address, registries: &[&dyn RoleReader]) -> Result<(), AccessError> {
        if self.permits(caller, registries) {
            return Ok(());
        }
        warn!(caller = %caller, gate = %self, "Caller rejected by gate");
        Err(AccessError::CallerUnauthorized { caller, gate: *self })
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, role) in self.roles.iter().enumerate() {
            if i > 0 {
                f.write_str(" or ")?;
            }
            write!(f, "{role}")?;
        }
        Ok(())
    }
}
