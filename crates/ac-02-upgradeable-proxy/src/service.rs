//! # Upgradeable Proxy Service
//!
//! A transparent proxy: one stable address and storage space, with the
//! code behind it swappable by a dedicated admin.
//!
//! ## Routing
//!
//! | Caller | Function | Outcome |
//! |--------|----------|---------|
//! | admin | `admin`, `implementation`, `changeAdmin`, `upgradeTo`, `upgradeToAndCall` | handled by the proxy |
//! | admin | anything else | `AdminCannotFallbackToTarget` |
//! | anyone else | anything | delegated to the implementation |
//!
//! Delegated calls see the original caller and run against the proxy's
//! storage. A failed call leaves storage, slots and events untouched.

use crate::adapters::code_registry::CodeRegistry;
use crate::domain::{CallContext, CallData, ProxyEvent, ProxyStorage, Token, ADMIN_SLOT, IMPLEMENTATION_SLOT};
use crate::errors::ProxyError;
use serde::{Deserialize, Serialize};
use shared_types::Address;
use tracing::{debug, info, warn};

/// Proxy-owned function: read the admin slot.
pub const ADMIN_FN: &str = "admin";
/// Proxy-owned function: read the implementation slot.
pub const IMPLEMENTATION_FN: &str = "implementation";
/// Proxy-owned function: hand the admin role to another account.
pub const CHANGE_ADMIN_FN: &str = "changeAdmin";
/// Proxy-owned function: swap the implementation.
pub const UPGRADE_TO_FN: &str = "upgradeTo";
/// Proxy-owned function: swap the implementation, then delegate a call.
pub const UPGRADE_TO_AND_CALL_FN: &str = "upgradeToAndCall";

/// A deployed transparent proxy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpgradeableProxy {
    address: Address,
    storage: ProxyStorage,
    events: Vec<ProxyEvent>,
}

impl UpgradeableProxy {
    // =========================================================================
    // DEPLOYMENT
    // =========================================================================

    /// Deploys a proxy at `address` pointing at `implementation`.
    ///
    /// When `init` is given it is delegated to the implementation with
    /// `deployer` as caller, the constructor-time initializer call. Any
    /// failure aborts the deployment.
    pub fn deploy<E>(
        env: &mut E,
        code: &CodeRegistry<E>,
        address: Address,
        deployer: Address,
        implementation: Address,
        admin: Address,
        init: Option<&CallData>,
    ) -> Result<Self, ProxyError> {
        let mut proxy = Self {
            address,
            storage: ProxyStorage::new(),
            events: Vec::new(),
        };
        proxy.set_implementation(code, implementation)?;
        proxy.set_admin(admin)?;
        if let Some(init) = init {
            proxy.delegate(env, code, deployer, init)?;
        }
        info!(
            proxy = %address,
            implementation = %implementation,
            admin = %admin,
            "Proxy deployed"
        );
        Ok(proxy)
    }

    // =========================================================================
    // SLOTS
    // =========================================================================

    /// The proxy's address.
    #[must_use]
    pub fn address(&self) -> Address {
        self.address
    }

    /// Current admin, read from the EIP-1967 admin slot.
    #[must_use]
    pub fn admin(&self) -> Address {
        self.storage.load_address(ADMIN_SLOT)
    }

    /// Current implementation, read from the EIP-1967 implementation slot.
    #[must_use]
    pub fn implementation(&self) -> Address {
        self.storage.load_address(IMPLEMENTATION_SLOT)
    }

    /// The proxy's storage, slots included.
    #[must_use]
    pub fn storage(&self) -> &ProxyStorage {
        &self.storage
    }

    /// Slot changes in the order they happened.
    #[must_use]
    pub fn events(&self) -> &[ProxyEvent] {
        &self.events
    }

    // =========================================================================
    // CALLS
    // =========================================================================

    /// Routes `call` from `caller` per the transparency rule.
    pub fn call<E>(
        &mut self,
        env: &mut E,
        code: &CodeRegistry<E>,
        caller: Address,
        call: &CallData,
    ) -> Result<Vec<Token>, ProxyError> {
        if caller == self.admin() {
            return self.admin_call(env, code, call);
        }
        self.delegate(env, code, caller, call)
    }

    /// `changeAdmin(new_admin)` sent by `caller`.
    pub fn change_admin<E>(
        &mut self,
        env: &mut E,
        code: &CodeRegistry<E>,
        caller: Address,
        new_admin: Address,
    ) -> Result<(), ProxyError> {
        let call = CallData::new(CHANGE_ADMIN_FN, vec![new_admin.into()]);
        self.call(env, code, caller, &call).map(drop)
    }

    /// `upgradeTo(implementation)` sent by `caller`.
    pub fn upgrade_to<E>(
        &mut self,
        env: &mut E,
        code: &CodeRegistry<E>,
        caller: Address,
        implementation: Address,
    ) -> Result<(), ProxyError> {
        let call = CallData::new(UPGRADE_TO_FN, vec![implementation.into()]);
        self.call(env, code, caller, &call).map(drop)
    }

    /// `upgradeToAndCall(implementation, data)` sent by `caller`. Returns the
    /// follow-up call's output.
    pub fn upgrade_to_and_call<E>(
        &mut self,
        env: &mut E,
        code: &CodeRegistry<E>,
        caller: Address,
        implementation: Address,
        data: &CallData,
    ) -> Result<Vec<Token>, ProxyError> {
        let call = CallData::new(
            UPGRADE_TO_AND_CALL_FN,
            vec![implementation.into(), Token::Bytes(data.encode()?)],
        );
        self.call(env, code, caller, &call)
    }

    // =========================================================================
    // INTERNALS
    // =========================================================================

    fn admin_call<E>(
        &mut self,
        env: &mut E,
        code: &CodeRegistry<E>,
        call: &CallData,
    ) -> Result<Vec<Token>, ProxyError> {
        match call.function.as_str() {
            ADMIN_FN => {
                call.expect_args(0)?;
                Ok(vec![self.admin().into()])
            }
            IMPLEMENTATION_FN => {
                call.expect_args(0)?;
                Ok(vec![self.implementation().into()])
            }
            CHANGE_ADMIN_FN => {
                call.expect_args(1)?;
                self.set_admin(call.address(0)?)?;
                Ok(Vec::new())
            }
            UPGRADE_TO_FN => {
                call.expect_args(1)?;
                self.set_implementation(code, call.address(0)?)?;
                Ok(Vec::new())
            }
            UPGRADE_TO_AND_CALL_FN => {
                call.expect_args(2)?;
                let implementation = call.address(0)?;
                let data = CallData::decode(call.bytes(1)?)?;
                self.upgrade_and_delegate(env, code, implementation, &data)
            }
            other => {
                warn!(proxy = %self.address, function = other, "Admin cannot fallback to proxy target");
                Err(ProxyError::AdminCannotFallbackToTarget)
            }
        }
    }

    fn upgrade_and_delegate<E>(
        &mut self,
        env: &mut E,
        code: &CodeRegistry<E>,
        implementation: Address,
        data: &CallData,
    ) -> Result<Vec<Token>, ProxyError> {
        let snapshot = self.storage.clone();
        let event_count = self.events.len();
        let admin = self.admin();

        let result = self
            .set_implementation(code, implementation)
            .and_then(|()| self.delegate(env, code, admin, data));
        if result.is_err() {
            self.storage = snapshot;
            self.events.truncate(event_count);
        }
        result
    }

    fn delegate<E>(
        &mut self,
        env: &mut E,
        code: &CodeRegistry<E>,
        caller: Address,
        call: &CallData,
    ) -> Result<Vec<Token>, ProxyError> {
        let implementation = self.implementation();
        let logic = code
            .get(implementation)
            .ok_or(ProxyError::NotAContract(implementation))?;
        let ctx = CallContext {
            caller,
            address: self.address,
            implementation,
        };

        let snapshot = self.storage.clone();
        let result = logic.execute(env, &ctx, &mut self.storage, call);
        match &result {
            Ok(_) => debug!(proxy = %self.address, caller = %caller, function = %call.function, "Call delegated"),
            Err(e) => {
                debug!(proxy = %self.address, caller = %caller, function = %call.function, error = %e, "Delegated call reverted");
                self.storage = snapshot;
            }
        }
        result
    }

    fn set_admin(&mut self, new_admin: Address) -> Result<(), ProxyError> {
        if new_admin.is_zero() {
            return Err(ProxyError::AdminIsZero);
        }
        let previous = self.admin();
        self.storage.store_address(ADMIN_SLOT, new_admin);
        self.events.push(ProxyEvent::AdminChanged {
            previous,
            new: new_admin,
        });
        info!(proxy = %self.address, previous = %previous, new = %new_admin, "Proxy admin changed");
        Ok(())
    }

    fn set_implementation<E>(&mut self, code: &CodeRegistry<E>, implementation: Address) -> Result<(), ProxyError> {
        if !code.has_code(implementation) {
            return Err(ProxyError::NotAContract(implementation));
        }
        self.storage.store_address(IMPLEMENTATION_SLOT, implementation);
        self.events.push(ProxyEvent::Upgraded { implementation });
        info!(proxy = %self.address, implementation = %implementation, "Proxy upgraded");
        Ok(())
    }
}
