//! # Property Tests
//!
//! Invariants checked over random call sequences.
//!
//! - the admin set of an authority registry never empties
//! - `confirm` succeeds exactly when the caller is the pending registry
//! - batches over the bound change nothing, batches within it apply fully

#[cfg(test)]
mod tests {
    use crate::fixtures::{addr, Platform, OPERATOR};
    use ac_01_access_control::domain::invariants::{
        invariant_admin_set_non_empty, invariant_batch_within_bound, invariant_single_multisig,
    };
    use ac_01_access_control::prelude::*;
    use proptest::prelude::*;
    use shared_types::Address;

    /// (operation, caller, account) over a four-account pool.
    fn arb_registry_call() -> impl Strategy<Value = (u8, u64, u64)> {
        (0u8..7, 1u64..5, 1u64..5)
    }

    fn apply(reg: &mut AuthorityRegistry, (op, caller, account): (u8, u64, u64)) -> Result<(), AccessError> {
        let (caller, account) = (addr(caller), addr(account));
        match op {
            0 => reg.add_admin(caller, account),
            1 => reg.remove_admin(caller, account),
            2 => reg.change_to_operator(caller, account),
            3 => reg.change_to_admin(caller, account),
            4 => reg.add_operator_and_admin(caller, account),
            5 => reg.remove_operator_and_admin(caller, account),
            _ => reg.add_relay(caller, account),
        }
    }

    proptest! {
        /// No sequence of calls, by admins or anyone else, empties the admin set.
        #[test]
        fn admin_set_never_empties(calls in prop::collection::vec(arb_registry_call(), 0..80)) {
            let mut reg = AuthorityRegistry::new(addr(100), addr(1)).unwrap();
            for call in calls {
                let before = reg.admins();
                let result = apply(&mut reg, call);
                prop_assert!(invariant_admin_set_non_empty(&reg));
                prop_assert!(invariant_single_multisig(&reg));
                if result.is_err() {
                    prop_assert_eq!(reg.admins(), before);
                }
            }
        }

        /// `confirm` succeeds iff something is pending and the caller is it.
        #[test]
        fn confirm_only_by_pending(steps in prop::collection::vec((any::<bool>(), 1u64..5), 0..40)) {
            let mut client = AuthorityClient::new(RegistryKind::Authority);
            client.bind(addr(1)).unwrap();
            let mut pending: Option<Address> = None;
            let mut current = addr(1);

            for (propose, n) in steps {
                let target = addr(n);
                if propose {
                    client.set_pending(target).unwrap();
                    pending = Some(target);
                } else {
                    let result = client.confirm(target);
                    if pending == Some(target) {
                        prop_assert_eq!(result, Ok(target));
                        current = target;
                        pending = None;
                    } else {
                        prop_assert!(result.unwrap_err().is_pending_mismatch());
                    }
                }
                prop_assert_eq!(client.contract(), current);
                prop_assert_eq!(client.pending(), pending.unwrap_or(Address::ZERO));
            }
        }

        /// A batch either applies to every account or to none.
        #[test]
        fn freeze_batch_all_or_nothing(ids in prop::collection::vec(1u64..100_000, 0..400)) {
            let p = Platform::deploy();
            let mut freezable = Freezable::new(*p.ledger.config());
            freezable.initialize(p.base).unwrap();
            let accounts: Vec<Address> = ids.into_iter().map(addr).collect();

            let result = freezable.batch_toggle_freeze(&p.ledger, addr(OPERATOR), &accounts, true);
            if invariant_batch_within_bound(accounts.len(), p.ledger.config()) {
                prop_assert!(result.is_ok());
                prop_assert!(accounts.iter().all(|a| freezable.is_frozen(*a)));
            } else {
                prop_assert_eq!(
                    result,
                    Err(AccessError::BatchTooLarge { count: accounts.len(), max: DEFAULT_MAX_BATCH_SIZE })
                );
                prop_assert!(accounts.iter().all(|a| !freezable.is_frozen(*a)));
            }
        }
    }
}
