//! # Access-Control Scenarios
//!
//! End-to-end checks of the registry, satellite, pointer and batch rules
//! against a ledger-hosted deployment.
//!
//! ## Flows Tested:
//!
//! 1. **Authority registry**: operators cannot grant operators; admins can
//! 2. **Satellite registry**: gates evaluated in the bound authority registry
//! 3. **Pointer migration**: only the pending registry completes a migration
//! 4. **Batches**: oversized batches change nothing

#[cfg(test)]
mod tests {
    use crate::fixtures::{addr, Platform, ADMIN, ATTACKER, OPERATOR, SYSTEM};
    use ac_01_access_control::domain::invariants::{invariant_admin_set_non_empty, invariant_pointer_non_zero};
    use ac_01_access_control::prelude::*;
    use shared_types::Address;

    const NEW_OPERATOR: u64 = 30;
    const BLOCKED: u64 = 40;
    const OTHER_ADMIN: u64 = 50;

    // =============================================================================
    // AUTHORITY REGISTRY
    // =============================================================================

    #[test]
    fn test_operator_cannot_add_operator_but_admin_can() {
        let mut p = Platform::deploy();
        let base = p.base;

        let err = p
            .ledger
            .with_authority(base, |reg, _| reg.add_operator(addr(OPERATOR), addr(NEW_OPERATOR)))
            .unwrap_err();
        assert!(err.is_authorization_failure());
        assert!(!p.base().is_operator(addr(NEW_OPERATOR)));

        p.ledger
            .with_authority(base, |reg, _| reg.add_operator(addr(ADMIN), addr(NEW_OPERATOR)))
            .unwrap();
        assert!(p.base().is_operator(addr(NEW_OPERATOR)));
    }

    #[test]
    fn test_duplicate_add_and_missing_remove_fail_loudly() {
        let mut p = Platform::deploy();
        let base = p.base;

        assert_eq!(
            p.ledger
                .with_authority(base, |reg, _| reg.add_operator(addr(ADMIN), addr(OPERATOR))),
            Err(AccessError::AlreadyHasRole {
                role: Role::Operator,
                account: addr(OPERATOR),
            })
        );
        assert_eq!(
            p.ledger
                .with_authority(base, |reg, _| reg.remove_system(addr(ADMIN), addr(ATTACKER))),
            Err(AccessError::DoesNotHaveRole {
                role: Role::System,
                account: addr(ATTACKER),
            })
        );
    }

    #[test]
    fn test_admins_cannot_lock_themselves_out() {
        let mut p = Platform::deploy();
        let base = p.base;

        assert_eq!(
            p.ledger.with_authority(base, |reg, _| reg.remove_admin(addr(ADMIN), addr(ADMIN))),
            Err(AccessError::CannotRemoveSelf(addr(ADMIN)))
        );

        // a second admin may remove the first, and the set stays non-empty
        p.ledger
            .with_authority(base, |reg, _| {
                reg.add_admin(addr(ADMIN), addr(OTHER_ADMIN))?;
                reg.remove_admin(addr(OTHER_ADMIN), addr(ADMIN))
            })
            .unwrap();
        assert!(!p.base().is_admin(addr(ADMIN)));
        assert!(p.base().is_admin(addr(OTHER_ADMIN)));
        assert!(invariant_admin_set_non_empty(p.base()));
    }

    #[test]
    fn test_multisig_handover_requires_contract() {
        let mut p = Platform::deploy();
        let base = p.base;
        let wallet = p.ledger.deploy_code(addr(ADMIN));
        let next_wallet = p.ledger.deploy_code(addr(ADMIN));

        p.ledger
            .with_authority(base, |reg, _| reg.add_multisig(addr(ADMIN), wallet))
            .unwrap();
        assert_eq!(
            p.ledger.with_authority(base, |reg, ledger| {
                reg.change_multisig(ledger, wallet, addr(ATTACKER))
            }),
            Err(AccessError::NotAContract(addr(ATTACKER)))
        );
        p.ledger
            .with_authority(base, |reg, ledger| reg.change_multisig(ledger, wallet, next_wallet))
            .unwrap();
        assert_eq!(p.base().multisig(), Some(next_wallet));
    }

    // =============================================================================
    // SATELLITE REGISTRY
    // =============================================================================

    #[test]
    fn test_operator_adds_blocker_attacker_rejected() {
        let mut p = Platform::deploy();
        let blocker = p.blocker;

        p.ledger
            .with_blocker(blocker, |reg, ledger| reg.add_blocker(ledger, addr(OPERATOR), addr(BLOCKED)))
            .unwrap();
        let err = p
            .ledger
            .with_blocker(blocker, |reg, ledger| reg.add_blocker(ledger, addr(ATTACKER), addr(BLOCKED + 1)))
            .unwrap_err();
        assert!(err.is_authorization_failure());

        let reg = p.ledger.blocker_at(blocker).unwrap();
        assert!(reg.is_blocker(addr(BLOCKED)));
        assert!(!reg.is_blocker(addr(BLOCKED + 1)));
    }

    #[test]
    fn test_revoked_operator_loses_satellite_access_immediately() {
        let mut p = Platform::deploy();
        let (base, blocker) = (p.base, p.blocker);

        p.ledger
            .with_authority(base, |reg, _| reg.remove_operator(addr(ADMIN), addr(OPERATOR)))
            .unwrap();
        let err = p
            .ledger
            .with_blocker(blocker, |reg, ledger| reg.add_blocker(ledger, addr(OPERATOR), addr(BLOCKED)))
            .unwrap_err();
        assert!(err.is_authorization_failure());
    }

    // =============================================================================
    // POINTER MIGRATION
    // =============================================================================

    #[test]
    fn test_only_pending_registry_confirms() {
        let mut p = Platform::deploy();
        let registry2 = p.deploy_authority(OTHER_ADMIN);
        let mut freezable = Freezable::new(AccessConfig::default());
        freezable.initialize(p.base).unwrap();

        freezable
            .set_operators_contract(&p.ledger, addr(ADMIN), registry2)
            .unwrap();
        assert_eq!(freezable.operators_pending(), registry2);

        let err = freezable.confirm_operators_contract(addr(ATTACKER)).unwrap_err();
        assert!(err.is_pending_mismatch());
        assert_eq!(freezable.operators_contract(), p.base);

        // an admin of the new registry confirms on its behalf
        let err = p
            .ledger
            .confirm_for(registry2, addr(ADMIN), &mut freezable)
            .unwrap_err();
        assert!(err.is_authorization_failure());
        p.ledger
            .confirm_for(registry2, addr(OTHER_ADMIN), &mut freezable)
            .unwrap();

        assert_eq!(freezable.operators_contract(), registry2);
        assert_eq!(freezable.operators_pending(), Address::ZERO);
        assert!(invariant_pointer_non_zero(freezable.authority()));
    }

    #[test]
    fn test_last_set_wins() {
        let mut p = Platform::deploy();
        let x = p.deploy_authority(OTHER_ADMIN);
        let y = p.deploy_authority(OTHER_ADMIN);
        let mut freezable = Freezable::new(AccessConfig::default());
        freezable.initialize(p.base).unwrap();

        freezable.set_operators_contract(&p.ledger, addr(ADMIN), x).unwrap();
        freezable.set_operators_contract(&p.ledger, addr(ADMIN), y).unwrap();

        assert!(freezable.confirm_operators_contract(x).unwrap_err().is_pending_mismatch());
        assert_eq!(freezable.confirm_operators_contract(y), Ok(y));
        assert_eq!(freezable.operators_contract(), y);
    }

    #[test]
    fn test_confirm_without_pending_fails() {
        let p = Platform::deploy();
        let mut freezable = Freezable::new(AccessConfig::default());
        freezable.initialize(p.base).unwrap();
        assert_eq!(
            freezable.confirm_operators_contract(p.base),
            Err(AccessError::PendingIsZero(RegistryKind::Authority))
        );
    }

    #[test]
    fn test_non_admin_cannot_propose() {
        let mut p = Platform::deploy();
        let registry2 = p.deploy_authority(OTHER_ADMIN);
        let mut freezable = Freezable::new(AccessConfig::default());
        freezable.initialize(p.base).unwrap();
        for caller in [OPERATOR, SYSTEM, ATTACKER] {
            let err = freezable
                .set_operators_contract(&p.ledger, addr(caller), registry2)
                .unwrap_err();
            assert!(err.is_authorization_failure());
        }
        assert_eq!(freezable.operators_pending(), Address::ZERO);
    }

    // =============================================================================
    // BATCHES
    // =============================================================================

    #[test]
    fn test_oversized_freeze_batch_changes_nothing() {
        let p = Platform::deploy();
        let mut freezable = Freezable::new(AccessConfig::default());
        freezable.initialize(p.base).unwrap();
        let accounts: Vec<Address> = (1000..1300).map(addr).collect();

        assert_eq!(
            freezable.batch_toggle_freeze(&p.ledger, addr(OPERATOR), &accounts, true),
            Err(AccessError::BatchTooLarge { count: 300, max: 256 })
        );
        assert!(accounts.iter().all(|a| !freezable.is_frozen(*a)));

        freezable
            .batch_toggle_freeze(&p.ledger, addr(OPERATOR), &accounts[..256], true)
            .unwrap();
        assert!(accounts[..256].iter().all(|a| freezable.is_frozen(*a)));
        assert!(!freezable.is_frozen(accounts[256]));
    }

    #[test]
    fn test_configured_bound_applies_to_hosted_whitelist() {
        let mut p = Platform::deploy_with(AccessConfig { max_batch_size: 4 });
        let whitelist = p.whitelist;
        let accounts: Vec<Address> = (1000..1005).map(addr).collect();

        let result = p.ledger.with_whitelist(whitelist, |list, ledger| {
            list.batch_toggle_whitelist(ledger, addr(SYSTEM), &accounts, true)
        });
        assert_eq!(result, Err(AccessError::BatchTooLarge { count: 5, max: 4 }));
        assert!(accounts.iter().all(|a| !p.is_whitelisted(*a)));

        p.ledger
            .with_whitelist(whitelist, |list, ledger| {
                list.batch_toggle_whitelist(ledger, addr(SYSTEM), &accounts[..4], true)
            })
            .unwrap();
        assert!(accounts[..4].iter().all(|a| p.is_whitelisted(*a)));
    }
}
