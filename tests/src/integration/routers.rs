//! # Router Pipelines
//!
//! Deployment wiring through the initialize router followed by account
//! lifecycles through the onboarding relay.
//!
//! ## Flows Tested:
//!
//! 1. **Initialize**: satellites and whitelists bound in one transaction
//! 2. **Onboard**: roles granted across registries by a relay contract
//! 3. **Use**: onboarded accounts pass the mixins' gates
//! 4. **Revoke**: a router without relay standing changes nothing

#[cfg(test)]
mod tests {
    use crate::fixtures::{addr, init_tracing, ADMIN, ATTACKER, DEPLOYER};
    use ac_01_access_control::prelude::*;
    use shared_types::{Address, Hash};

    const SYSTEM: u64 = 5;
    const SUPER: u64 = 10;
    const INVESTOR: u64 = 11;
    const NEW_OPERATOR: u64 = 12;
    const BUY: u64 = 200;
    const SELL: u64 = 201;

    struct Deployment {
        ledger: Ledger,
        contracts: RouterContracts,
        onboard: OnboardRouter,
    }

    /// Deploys the registries, wires them with the initialize router and
    /// installs the onboarding router as a relay.
    fn deploy() -> Deployment {
        init_tracing();
        let mut ledger = Ledger::new();
        let base = ledger.deploy_authority(addr(DEPLOYER), addr(ADMIN)).unwrap();
        let contracts = RouterContracts {
            whitelist: ledger.deploy_whitelist(addr(DEPLOYER)),
            base,
            raise: ledger.deploy_raise(addr(DEPLOYER)),
            trader: ledger.deploy_trader(addr(DEPLOYER)),
            blocker: ledger.deploy_blocker(addr(DEPLOYER)),
        };

        let mut init = InitializeRouter::new(ledger.deploy_code(addr(DEPLOYER)));
        init.initialize(base).unwrap();
        let targets = InitializeTargets {
            base: Address::ZERO,
            raise: contracts.raise,
            trader: contracts.trader,
            blocker: contracts.blocker,
            whitelists: vec![contracts.whitelist],
        };
        init.initialize_contracts(&mut ledger, addr(ADMIN), &targets).unwrap();

        let mut onboard = OnboardRouter::new(ledger.deploy_code(addr(DEPLOYER)));
        onboard.initialize(contracts).unwrap();
        let relay = onboard.address();
        ledger
            .with_authority(base, |reg, _| {
                reg.add_relay(addr(ADMIN), relay)?;
                reg.add_system(addr(ADMIN), addr(SYSTEM))
            })
            .unwrap();

        Deployment {
            ledger,
            contracts,
            onboard,
        }
    }

    impl Deployment {
        fn base(&self) -> &AuthorityRegistry {
            self.ledger.authority_at(self.contracts.base).unwrap()
        }

        fn listed(&self, account: u64) -> bool {
            self.ledger
                .whitelist_at(self.contracts.whitelist)
                .unwrap()
                .is_whitelisted(addr(account))
        }

        fn is_trader(&self, account: u64) -> bool {
            self.ledger
                .trader_at(self.contracts.trader)
                .unwrap()
                .is_trader(addr(account))
        }
    }

    #[test]
    fn test_initialized_registries_share_base() {
        let d = deploy();
        let base = d.contracts.base;
        assert_eq!(d.ledger.raise_at(d.contracts.raise).unwrap().operators_contract(), base);
        assert_eq!(d.ledger.trader_at(d.contracts.trader).unwrap().operators_contract(), base);
        assert_eq!(d.ledger.blocker_at(d.contracts.blocker).unwrap().operators_contract(), base);
        assert_eq!(d.ledger.whitelist_at(d.contracts.whitelist).unwrap().operators_contract(), base);
    }

    #[test]
    fn test_super_admin_passes_every_gate() {
        let mut d = deploy();
        let base = d.contracts.base;
        d.onboard
            .onboard_super_admin(&mut d.ledger, addr(ADMIN), addr(SUPER), Address::ZERO)
            .unwrap();
        assert!(d.base().is_operator_and_admin(addr(SUPER)));
        assert!(d.is_trader(SUPER));
        assert!(d.listed(SUPER));

        // admin in the base registry
        d.ledger
            .with_authority(base, |reg, _| reg.add_operator(addr(SUPER), addr(NEW_OPERATOR)))
            .unwrap();

        // operator for the trading-pair whitelist, trader for pausing
        let mut pairs = TradingPairWhitelist::new(AccessConfig::default());
        pairs.initialize(base, d.contracts.trader).unwrap();
        pairs
            .pair_tokens(&d.ledger, addr(SUPER), Hash::new([1; 32]), addr(BUY), addr(SELL))
            .unwrap();
        assert!(pairs.is_paired(addr(BUY), addr(SELL)));

        let mut pausable = Pausable::new();
        pausable.initialize(base, d.contracts.trader).unwrap();
        pausable.pause(&d.ledger, addr(SUPER)).unwrap();
        assert!(pausable.is_paused());
    }

    #[test]
    fn test_super_admin_demoted_to_admin() {
        let mut d = deploy();
        d.onboard
            .onboard_super_admin(&mut d.ledger, addr(ADMIN), addr(SUPER), Address::ZERO)
            .unwrap();
        d.onboard
            .change_super_admin_to_admin(&mut d.ledger, addr(ADMIN), addr(SUPER), Address::ZERO)
            .unwrap();

        assert!(d.base().is_admin(addr(SUPER)));
        assert!(!d.base().is_operator(addr(SUPER)));
        assert!(!d.is_trader(SUPER));
        assert!(!d.listed(SUPER));
    }

    #[test]
    fn test_system_onboards_investor() {
        let mut d = deploy();
        d.onboard
            .onboard_investor(&mut d.ledger, addr(SYSTEM), addr(INVESTOR), Address::ZERO)
            .unwrap();
        assert!(d.ledger.raise_at(d.contracts.raise).unwrap().is_investor(addr(INVESTOR)));
        assert!(d.listed(INVESTOR));

        let err = d
            .onboard
            .onboard_investor(&mut d.ledger, addr(ATTACKER), addr(ATTACKER), Address::ZERO)
            .unwrap_err();
        assert!(err.is_authorization_failure());
        assert!(!d.listed(ATTACKER));
    }

    #[test]
    fn test_router_without_relay_changes_nothing() {
        let mut d = deploy();
        let (base, relay) = (d.contracts.base, d.onboard.address());
        d.ledger
            .with_authority(base, |reg, _| reg.remove_relay(addr(ADMIN), relay))
            .unwrap();

        let err = d
            .onboard
            .onboard_super_admin(&mut d.ledger, addr(ADMIN), addr(SUPER), Address::ZERO)
            .unwrap_err();
        assert!(err.is_authorization_failure());
        assert!(!d.base().is_operator(addr(SUPER)));
        assert!(!d.is_trader(SUPER));
        assert!(!d.listed(SUPER));
    }

    #[test]
    fn test_duplicate_onboarding_rejected_then_deboard() {
        let mut d = deploy();
        d.onboard
            .onboard_trader(&mut d.ledger, addr(ADMIN), addr(SUPER), Address::ZERO)
            .unwrap();

        // a second onboarding hits AlreadyHasRole and leaves the state as is
        let err = d
            .onboard
            .onboard_trader(&mut d.ledger, addr(ADMIN), addr(SUPER), Address::ZERO)
            .unwrap_err();
        assert_eq!(
            err,
            AccessError::AlreadyHasRole {
                role: Role::Trader,
                account: addr(SUPER),
            }
        );
        assert!(d.is_trader(SUPER));
        assert!(d.listed(SUPER));

        d.onboard
            .deboard_trader(&mut d.ledger, addr(ADMIN), addr(SUPER), Address::ZERO)
            .unwrap();
        assert!(!d.is_trader(SUPER));
        assert!(!d.listed(SUPER));
    }
}
