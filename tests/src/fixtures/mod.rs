//! # Test Fixtures
//!
//! A deployed platform (authority registry, satellites, whitelist) on an
//! in-memory ledger, plus token logic to host behind a proxy.

pub mod token;

use ac_01_access_control::prelude::*;
use shared_types::Address;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

// =============================================================================
// ACCOUNTS
// =============================================================================

/// Deploys every contract in the fixtures.
pub const DEPLOYER: u64 = 900;
/// Initial admin of the base registry.
pub const ADMIN: u64 = 1;
/// Operator in the base registry.
pub const OPERATOR: u64 = 2;
/// System account in the base registry.
pub const SYSTEM: u64 = 3;
/// Holds no role anywhere.
pub const ATTACKER: u64 = 66;

/// Readable fixture address.
pub fn addr(n: u64) -> Address {
    Address::from_low_u64_be(n)
}

/// Installs a test-writer subscriber once; `RUST_LOG` selects the level.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

// =============================================================================
// PLATFORM
// =============================================================================

/// A fully wired deployment.
pub struct Platform {
    /// Host of every registry.
    pub ledger: Ledger,
    /// Authority registry, admin [`ADMIN`], operator [`OPERATOR`], system [`SYSTEM`].
    pub base: Address,
    /// Blocker registry bound to `base`.
    pub blocker: Address,
    /// Trader registry bound to `base`.
    pub trader: Address,
    /// Raise registry bound to `base`.
    pub raise: Address,
    /// Whitelist bound to `base`.
    pub whitelist: Address,
}

impl Platform {
    /// Deploys and initializes everything with the default configuration.
    pub fn deploy() -> Self {
        Self::deploy_with(AccessConfig::default())
    }

    /// Deploys and initializes everything with `config`.
    pub fn deploy_with(config: AccessConfig) -> Self {
        init_tracing();
        let mut ledger = Ledger::with_config(config);
        let base = ledger
            .deploy_authority(addr(DEPLOYER), addr(ADMIN))
            .expect("base registry deploys");
        let blocker = ledger.deploy_blocker(addr(DEPLOYER));
        let trader = ledger.deploy_trader(addr(DEPLOYER));
        let raise = ledger.deploy_raise(addr(DEPLOYER));
        let whitelist = ledger.deploy_whitelist(addr(DEPLOYER));

        ledger
            .with_authority(base, |reg, _| {
                reg.add_operator(addr(ADMIN), addr(OPERATOR))?;
                reg.add_system(addr(ADMIN), addr(SYSTEM))
            })
            .expect("roles granted");
        ledger.with_blocker(blocker, |reg, _| reg.initialize(base)).expect("blocker initialized");
        ledger.with_trader(trader, |reg, _| reg.initialize(base)).expect("trader initialized");
        ledger.with_raise(raise, |reg, _| reg.initialize(base)).expect("raise initialized");
        ledger
            .with_whitelist(whitelist, |list, _| list.initialize(base))
            .expect("whitelist initialized");

        info!(
            base = %base,
            blocker = %blocker,
            trader = %trader,
            raise = %raise,
            whitelist = %whitelist,
            "Platform deployed"
        );
        Self {
            ledger,
            base,
            blocker,
            trader,
            raise,
            whitelist,
        }
    }

    /// Deploys a second authority registry administered by `admin`.
    pub fn deploy_authority(&mut self, admin: u64) -> Address {
        let registry = self
            .ledger
            .deploy_authority(addr(DEPLOYER), addr(admin))
            .expect("authority registry deploys");
        debug!(registry = %registry, admin = %addr(admin), "Authority registry deployed");
        registry
    }

    /// The base registry.
    pub fn base(&self) -> &AuthorityRegistry {
        self.ledger.authority_at(self.base).expect("base registry hosted")
    }

    /// Whitelists `account` as the operator.
    pub fn whitelist_account(&mut self, account: Address) {
        self.ledger
            .with_whitelist(self.whitelist, |list, ledger| {
                list.toggle_whitelist(ledger, addr(OPERATOR), account, true)
            })
            .expect("account whitelisted");
        debug!(account = %account, "Account whitelisted");
    }

    /// Returns true if `account` is on the platform whitelist.
    pub fn is_whitelisted(&self, account: Address) -> bool {
        self.ledger
            .whitelist_at(self.whitelist)
            .map(|list| list.is_whitelisted(account))
            .unwrap_or(false)
    }
}
