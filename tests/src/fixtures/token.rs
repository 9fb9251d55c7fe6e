//! # Proxy-Hosted Token Logic
//!
//! Minimal token implementations that keep all state in the proxy's
//! storage and gate minting through the access-control registries.
//!
//! ## Storage layout
//!
//! | Slot | Content |
//! |------|---------|
//! | 0 | initialized flag |
//! | 1 | base operators contract |
//! | 2 | whitelist contract |
//! | 3 | total supply |
//! | 4 | balances mapping |

use ac_01_access_control::prelude::*;
use ac_02_upgradeable_proxy::prelude::*;
use shared_types::{Address, StorageKey, U256};

const INITIALIZED: u64 = 0;
const BASE: u64 = 1;
const WHITELIST: u64 = 2;
const TOTAL_SUPPLY: u64 = 3;
const BALANCES: u64 = 4;

fn slot(index: u64) -> StorageKey {
    StorageKey::slot(index)
}

fn balance_slot(account: Address) -> StorageKey {
    mapping_slot(slot(BALANCES), account)
}

/// Balance of `account` read straight from proxy storage.
pub fn balance_of(storage: &ProxyStorage, account: Address) -> U256 {
    storage.load_u256(balance_slot(account))
}

fn require_operator(ledger: &Ledger, storage: &ProxyStorage, caller: Address) -> Result<(), ProxyError> {
    let base: &dyn RoleReader = ledger.authority_at(storage.load_address(slot(BASE)))?;
    Gate::OPERATOR.require(caller, &[base])?;
    Ok(())
}

fn require_whitelisted(ledger: &Ledger, storage: &ProxyStorage, account: Address) -> Result<(), ProxyError> {
    let whitelist = ledger.whitelist_at(storage.load_address(slot(WHITELIST)))?;
    if whitelist.is_whitelisted(account) {
        Ok(())
    } else {
        Err(AccessError::NotWhitelisted(account).into())
    }
}

// =============================================================================
// V1: WHITELISTED MINTING
// =============================================================================

/// `initialize(base, whitelist)`, `mint(to, amount)`, `balanceOf(account)`,
/// `totalSupply()`, `operatorsContract()`, `whitelistContract()`.
pub struct TokenV1;

impl TokenV1 {
    fn initialize(storage: &mut ProxyStorage, call: &CallData) -> Result<Vec<Token>, ProxyError> {
        call.expect_args(2)?;
        if storage.load_bool(slot(INITIALIZED)) {
            return Err(AccessError::AlreadyInitialized.into());
        }
        let base = call.address(0)?;
        let whitelist = call.address(1)?;
        if base.is_zero() || whitelist.is_zero() {
            return Err(AccessError::ZeroAddress.into());
        }
        storage.store_bool(slot(INITIALIZED), true);
        storage.store_address(slot(BASE), base);
        storage.store_address(slot(WHITELIST), whitelist);
        Ok(Vec::new())
    }

    fn mint(
        ledger: &Ledger,
        ctx: &CallContext,
        storage: &mut ProxyStorage,
        call: &CallData,
    ) -> Result<Vec<Token>, ProxyError> {
        call.expect_args(2)?;
        let to = call.address(0)?;
        let amount = call.uint(1)?;
        require_operator(ledger, storage, ctx.caller)?;
        require_whitelisted(ledger, storage, to)?;

        let balance = balance_of(storage, to)
            .checked_add(amount)
            .ok_or_else(|| ProxyError::Reverted("balance overflow".to_string()))?;
        let supply = storage
            .load_u256(slot(TOTAL_SUPPLY))
            .checked_add(amount)
            .ok_or_else(|| ProxyError::Reverted("supply overflow".to_string()))?;
        storage.store_u256(balance_slot(to), balance);
        storage.store_u256(slot(TOTAL_SUPPLY), supply);
        Ok(Vec::new())
    }
}

impl Implementation<Ledger> for TokenV1 {
    fn execute(
        &self,
        env: &mut Ledger,
        ctx: &CallContext,
        storage: &mut ProxyStorage,
        call: &CallData,
    ) -> Result<Vec<Token>, ProxyError> {
        match call.function.as_str() {
            "initialize" => Self::initialize(storage, call),
            "mint" => Self::mint(env, ctx, storage, call),
            "balanceOf" => {
                call.expect_args(1)?;
                Ok(vec![balance_of(storage, call.address(0)?).into()])
            }
            "totalSupply" => Ok(vec![storage.load_u256(slot(TOTAL_SUPPLY)).into()]),
            "operatorsContract" => Ok(vec![storage.load_address(slot(BASE)).into()]),
            "whitelistContract" => Ok(vec![storage.load_address(slot(WHITELIST)).into()]),
            other => Err(ProxyError::UnknownFunction(other.to_string())),
        }
    }
}

// =============================================================================
// V2: V1 PLUS DESTROY
// =============================================================================

/// Everything in [`TokenV1`] plus `destroy(account)`, which burns the whole
/// balance of `account`. Operator only.
pub struct TokenV2;

impl TokenV2 {
    fn destroy(
        ledger: &Ledger,
        ctx: &CallContext,
        storage: &mut ProxyStorage,
        call: &CallData,
    ) -> Result<Vec<Token>, ProxyError> {
        call.expect_args(1)?;
        let account = call.address(0)?;
        require_operator(ledger, storage, ctx.caller)?;

        let balance = balance_of(storage, account);
        let supply = storage.load_u256(slot(TOTAL_SUPPLY)).saturating_sub(balance);
        storage.store_u256(balance_slot(account), U256::zero());
        storage.store_u256(slot(TOTAL_SUPPLY), supply);
        Ok(vec![balance.into()])
    }
}

impl Implementation<Ledger> for TokenV2 {
    fn execute(
        &self,
        env: &mut Ledger,
        ctx: &CallContext,
        storage: &mut ProxyStorage,
        call: &CallData,
    ) -> Result<Vec<Token>, ProxyError> {
        if call.function == "destroy" {
            return Self::destroy(env, ctx, storage, call);
        }
        TokenV1.execute(env, ctx, storage, call)
    }
}

// =============================================================================
// CALL BUILDERS
// =============================================================================

/// `initialize(base, whitelist)`.
pub fn initialize_call(base: Address, whitelist: Address) -> CallData {
    CallData::new("initialize", vec![base.into(), whitelist.into()])
}

/// `mint(to, amount)`.
pub fn mint_call(to: Address, amount: u64) -> CallData {
    CallData::new("mint", vec![to.into(), U256::from(amount).into()])
}

/// `destroy(account)`.
pub fn destroy_call(account: Address) -> CallData {
    CallData::new("destroy", vec![account.into()])
}

/// `balanceOf(account)`.
pub fn balance_call(account: Address) -> CallData {
    CallData::new("balanceOf", vec![account.into()])
}
