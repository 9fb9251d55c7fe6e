//! # Authority Migration
//!
//! Several dependents moving from one authority registry to another, each
//! through its own two-step pointer swap.
//!
//! ## Flows Tested:
//!
//! 1. **Propose**: an admin of the current registry sets each pending pointer
//! 2. **Confirm**: an admin of the new registry confirms on its behalf
//! 3. **Partial migration**: dependents answer to whichever registry is live
//! 4. **Races**: a superseded registry can never complete a migration

#[cfg(test)]
mod tests {
    use crate::fixtures::{addr, Platform, ADMIN, ATTACKER, OPERATOR};
    use ac_01_access_control::prelude::*;
    use shared_types::Address;

    const NEW_ADMIN: u64 = 70;
    const NEW_OPERATOR: u64 = 71;
    const SECOND_ADMIN: u64 = 72;
    const ACCOUNT: u64 = 80;

    struct Migration {
        p: Platform,
        base2: Address,
    }

    /// A platform plus a second authority registry with its own operator.
    fn setup() -> Migration {
        let mut p = Platform::deploy();
        let base2 = p.deploy_authority(NEW_ADMIN);
        p.ledger
            .with_authority(base2, |reg, _| reg.add_operator(addr(NEW_ADMIN), addr(NEW_OPERATOR)))
            .unwrap();
        Migration { p, base2 }
    }

    impl Migration {
        fn propose_blocker(&mut self) {
            let base2 = self.base2;
            self.p
                .ledger
                .with_blocker(self.p.blocker, |reg, ledger| {
                    reg.set_operators_contract(ledger, addr(ADMIN), base2)
                })
                .unwrap();
        }

        fn add_blocker(&mut self, caller: u64, account: u64) -> Result<(), AccessError> {
            self.p
                .ledger
                .with_blocker(self.p.blocker, |reg, ledger| {
                    reg.add_blocker(ledger, addr(caller), addr(account))
                })
        }
    }

    #[test]
    fn test_pending_registry_has_no_power_until_confirmed() {
        let mut m = setup();
        m.propose_blocker();

        assert!(m.add_blocker(NEW_OPERATOR, ACCOUNT).unwrap_err().is_authorization_failure());
        m.add_blocker(OPERATOR, ACCOUNT).unwrap();

        let blocker = m.p.ledger.blocker_at(m.p.blocker).unwrap();
        assert_eq!(blocker.operators_contract(), m.p.base);
        assert_eq!(blocker.operators_pending(), m.base2);
    }

    #[test]
    fn test_confirmed_migration_moves_authority() {
        let mut m = setup();
        m.propose_blocker();
        let confirmed = m
            .p
            .ledger
            .confirm_for_hosted(m.base2, addr(NEW_ADMIN), m.p.blocker)
            .unwrap();
        assert_eq!(confirmed, m.base2);

        assert!(m.add_blocker(OPERATOR, ACCOUNT).unwrap_err().is_authorization_failure());
        m.add_blocker(NEW_OPERATOR, ACCOUNT).unwrap();
    }

    #[test]
    fn test_partial_migration_splits_governance() {
        let mut m = setup();
        m.propose_blocker();
        m.p.ledger
            .confirm_for_hosted(m.base2, addr(NEW_ADMIN), m.p.blocker)
            .unwrap();

        // trader registry still answers to the old base
        let trader = m.p.trader;
        m.p.ledger
            .with_trader(trader, |reg, ledger| reg.add_trader(ledger, addr(ADMIN), addr(ACCOUNT)))
            .unwrap();
        let err = m
            .p
            .ledger
            .with_trader(trader, |reg, ledger| {
                reg.add_trader(ledger, addr(NEW_ADMIN), addr(ACCOUNT + 1))
            })
            .unwrap_err();
        assert!(err.is_authorization_failure());
    }

    #[test]
    fn test_every_dependent_migrates() {
        let mut m = setup();
        let base2 = m.base2;
        let (blocker, trader, raise, whitelist) = (m.p.blocker, m.p.trader, m.p.raise, m.p.whitelist);
        let mut freezable = Freezable::new(AccessConfig::default());
        freezable.initialize(m.p.base).unwrap();

        let ledger = &mut m.p.ledger;
        ledger
            .with_blocker(blocker, |reg, l| reg.set_operators_contract(l, addr(ADMIN), base2))
            .unwrap();
        ledger
            .with_trader(trader, |reg, l| reg.set_operators_contract(l, addr(ADMIN), base2))
            .unwrap();
        ledger
            .with_raise(raise, |reg, l| reg.set_operators_contract(l, addr(ADMIN), base2))
            .unwrap();
        ledger
            .with_whitelist(whitelist, |list, l| list.set_operators_contract(l, addr(ADMIN), base2))
            .unwrap();
        freezable.set_operators_contract(&*ledger, addr(ADMIN), base2).unwrap();

        for dependent in [blocker, trader, raise, whitelist] {
            ledger.confirm_for_hosted(base2, addr(NEW_ADMIN), dependent).unwrap();
        }
        ledger.confirm_for(base2, addr(NEW_ADMIN), &mut freezable).unwrap();

        assert_eq!(ledger.blocker_at(blocker).unwrap().operators_contract(), base2);
        assert_eq!(ledger.trader_at(trader).unwrap().operators_contract(), base2);
        assert_eq!(ledger.raise_at(raise).unwrap().operators_contract(), base2);
        assert_eq!(ledger.whitelist_at(whitelist).unwrap().operators_contract(), base2);
        assert_eq!(freezable.operators_contract(), base2);

        freezable
            .toggle_freeze(&*ledger, addr(NEW_OPERATOR), addr(ACCOUNT), true)
            .unwrap();
        assert!(freezable
            .toggle_freeze(&*ledger, addr(OPERATOR), addr(ACCOUNT), false)
            .unwrap_err()
            .is_authorization_failure());
    }

    #[test]
    fn test_superseded_registry_cannot_confirm() {
        let mut m = setup();
        let base3 = m.p.deploy_authority(NEW_ADMIN);
        let (base, base2, whitelist) = (m.p.base, m.base2, m.p.whitelist);
        m.p.ledger
            .with_authority(base, |reg, _| reg.add_admin(addr(ADMIN), addr(SECOND_ADMIN)))
            .unwrap();

        // two admins race to propose different registries
        m.p.ledger
            .with_whitelist(whitelist, |list, l| list.set_operators_contract(l, addr(ADMIN), base2))
            .unwrap();
        m.p.ledger
            .with_whitelist(whitelist, |list, l| {
                list.set_operators_contract(l, addr(SECOND_ADMIN), base3)
            })
            .unwrap();

        let err = m
            .p
            .ledger
            .confirm_for_hosted(base2, addr(NEW_ADMIN), whitelist)
            .unwrap_err();
        assert!(err.is_pending_mismatch());
        assert_eq!(m.p.ledger.whitelist_at(whitelist).unwrap().operators_contract(), base);

        m.p.ledger
            .confirm_for_hosted(base3, addr(NEW_ADMIN), whitelist)
            .unwrap();
        let list = m.p.ledger.whitelist_at(whitelist).unwrap();
        assert_eq!(list.operators_contract(), base3);
        assert_eq!(list.operators_pending(), Address::ZERO);
    }

    #[test]
    fn test_confirm_for_rejects_outsiders_and_bad_targets() {
        let mut m = setup();
        m.propose_blocker();
        let (base2, blocker) = (m.base2, m.p.blocker);
        let opaque = m.p.ledger.deploy_code(addr(ADMIN));

        let err = m
            .p
            .ledger
            .confirm_for_hosted(base2, addr(ATTACKER), blocker)
            .unwrap_err();
        assert!(err.is_authorization_failure());
        assert_eq!(
            m.p.ledger.confirm_for_hosted(base2, addr(NEW_ADMIN), Address::ZERO),
            Err(AccessError::ZeroAddress)
        );
        assert_eq!(
            m.p.ledger.confirm_for_hosted(base2, addr(NEW_ADMIN), addr(ACCOUNT)),
            Err(AccessError::UnknownRegistry(addr(ACCOUNT)))
        );
        assert_eq!(
            m.p.ledger.confirm_for_hosted(base2, addr(NEW_ADMIN), opaque),
            Err(AccessError::UnsupportedPointer(RegistryKind::Authority))
        );
        assert_eq!(m.p.ledger.blocker_at(blocker).unwrap().operators_pending(), base2);
    }

    #[test]
    fn test_batched_confirmation_rolls_back() {
        let mut m = setup();
        m.propose_blocker();
        let (base2, blocker, trader) = (m.base2, m.p.blocker, m.p.trader);

        // the trader registry has nothing pending, so the batch fails halfway
        let result = m.p.ledger.transact(|ledger| {
            ledger.confirm_for_hosted(base2, addr(NEW_ADMIN), blocker)?;
            ledger.confirm_for_hosted(base2, addr(NEW_ADMIN), trader)
        });
        assert_eq!(result, Err(AccessError::PendingIsZero(RegistryKind::Authority)));

        let reg = m.p.ledger.blocker_at(blocker).unwrap();
        assert_eq!(reg.operators_contract(), m.p.base);
        assert_eq!(reg.operators_pending(), base2);
    }

    #[test]
    fn test_trader_pointer_confirmed_by_trader_registry() {
        let mut m = setup();
        let trader2 = m.p.ledger.deploy_trader(addr(ADMIN));
        let base = m.p.base;
        m.p.ledger.with_trader(trader2, |reg, _| reg.initialize(base)).unwrap();

        let mut pausable = Pausable::new();
        pausable.initialize(base, m.p.trader).unwrap();
        pausable
            .set_trader_operators_contract(&m.p.ledger, addr(ADMIN), trader2)
            .unwrap();

        // trader2 is governed by the old base, so its admin confirms
        let err = m
            .p
            .ledger
            .confirm_for(trader2, addr(NEW_ADMIN), &mut pausable)
            .unwrap_err();
        assert!(err.is_authorization_failure());
        m.p.ledger.confirm_for(trader2, addr(ADMIN), &mut pausable).unwrap();
        assert_eq!(pausable.trader_operators_contract(), trader2);
    }
}
