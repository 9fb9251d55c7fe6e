//! # Domain Invariants
//!
//! State predicates that must hold after every committed operation. The
//! registries enforce them on the write path; these checks let tests and
//! hosts assert them over arbitrary call sequences.

use super::authority::AuthorityRegistry;
use super::client::AuthorityClient;
use crate::config::AccessConfig;

/// Invariant: an authority registry always has at least one admin.
#[must_use]
pub fn invariant_admin_set_non_empty(registry: &AuthorityRegistry) -> bool {
    registry.admin_count() > 0
}

/// Invariant: the multisig slot holds at most one account.
#[must_use]
pub fn invariant_single_multisig(registry: &AuthorityRegistry) -> bool {
    registry.multisig_count() <= 1
}

/// Invariant: a bound pointer never names the zero address, and a pending
/// value is never the zero address.
#[must_use]
pub fn invariant_pointer_non_zero(client: &AuthorityClient) -> bool {
    let current_ok = !client.is_bound() || !client.contract().is_zero();
    let pending_ok = client.pending().is_zero() || client.is_bound();
    current_ok && pending_ok
}

/// Invariant: a batch of `count` entries may be applied under `config`.
#[must_use]
pub fn invariant_batch_within_bound(count: usize, config: &AccessConfig) -> bool {
    count <= config.max_batch_size
}
