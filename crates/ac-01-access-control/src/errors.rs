//! # Error Types
//!
//! All error types for role registries, pointer migration and gated mixins.
//!
//! Every failure aborts the whole call. Variants carry the role, account,
//! gate or count involved so the rendered message pinpoints the cause.

use crate::domain::client::RegistryKind;
use crate::domain::gates::Gate;
use crate::domain::roles::Role;
use shared_types::{Address, Hash};
use thiserror::Error;

// =============================================================================
// ACCESS ERRORS
// =============================================================================

/// Errors raised by access-controlled operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccessError {
    /// A role subject, pointer target or other live address is the sentinel.
    #[error("account is the zero address")]
    ZeroAddress,

    /// The account is already a member of the role set.
    #[error("{account} already has role {role}")]
    AlreadyHasRole { role: Role, account: Address },

    /// The account is not a member of the role set.
    #[error("{account} does not have role {role}")]
    DoesNotHaveRole { role: Role, account: Address },

    /// The caller holds none of the roles the gate accepts.
    #[error("caller {caller} is not {gate}")]
    CallerUnauthorized { caller: Address, gate: Gate },

    /// An admin tried to drop its own admin status.
    #[error("caller {0} cannot remove itself")]
    CannotRemoveSelf(Address),

    /// An admin tried to move itself between admin and operator.
    #[error("caller {0} cannot change itself")]
    CannotChangeSelf(Address),

    /// The removal would leave the registry without any admin.
    #[error("cannot remove {0}: last remaining admin")]
    LastAdmin(Address),

    /// A one-time initializer was entered a second time.
    #[error("contract instance has already been initialized")]
    AlreadyInitialized,

    /// A pointer was used before it was bound.
    #[error("{0} pointer is not initialized")]
    NotInitialized(RegistryKind),

    /// `confirm` was called with no migration in flight.
    #[error("no pending {0} contract to confirm")]
    PendingIsZero(RegistryKind),

    /// `confirm` was called by someone other than the pending contract.
    #[error("caller {caller} is not the pending {kind} contract {pending}")]
    PendingMismatch {
        kind: RegistryKind,
        caller: Address,
        pending: Address,
    },

    /// A batch exceeded the configured bound.
    #[error("batch count {count} is greater than {max}")]
    BatchTooLarge { count: usize, max: usize },

    /// Parallel batch arrays differ in length.
    #[error("array length mismatch: {left} != {right}")]
    ArrayLengthMismatch { left: usize, right: usize },

    /// An address expected to carry contract code does not.
    #[error("{0} is not a contract")]
    NotAContract(Address),

    /// The single multisig slot is already occupied.
    #[error("multisig is already assigned to {0}")]
    MultisigAlreadyAssigned(Address),

    /// A pointer names an address that hosts no registry of the expected kind.
    #[error("no {kind} contract deployed at {address}")]
    RegistryNotFound { kind: RegistryKind, address: Address },

    /// The address hosts no registry at all.
    #[error("no registry deployed at {0}")]
    UnknownRegistry(Address),

    /// The dependent does not hold a pointer of the confirming registry's kind.
    #[error("contract does not hold a {0} pointer")]
    UnsupportedPointer(RegistryKind),

    // -------------------------------------------------------------------------
    // Mixin guards
    // -------------------------------------------------------------------------
    /// The account is frozen.
    #[error("account {0} is frozen")]
    AccountFrozen(Address),

    /// The account is not frozen.
    #[error("account {0} is not frozen")]
    AccountNotFrozen(Address),

    /// The contract is paused.
    #[error("contract is paused")]
    Paused,

    /// The contract is not paused.
    #[error("contract is not paused")]
    NotPaused,

    /// The account is not whitelisted.
    #[error("account {0} is not whitelisted")]
    NotWhitelisted(Address),

    // -------------------------------------------------------------------------
    // Trading pairs
    // -------------------------------------------------------------------------
    /// Buy and sell token are the same address.
    #[error("buy and sell tokens are identical: {0}")]
    IdenticalTokens(Address),

    /// The (buy, sell) combination is already whitelisted.
    #[error("pair {buy} / {sell} is already whitelisted")]
    PairAlreadyWhitelisted { buy: Address, sell: Address },

    /// The (buy, sell) combination is not whitelisted.
    #[error("pair {buy} / {sell} is not whitelisted")]
    PairNotWhitelisted { buy: Address, sell: Address },

    /// The pair identifier is already in use.
    #[error("pair identifier {0:?} is already used")]
    PairIdAlreadyUsed(Hash),

    /// No pair is registered under the identifier.
    #[error("pair identifier {0:?} does not exist")]
    PairIdNotFound(Hash),

    /// The pair is frozen.
    #[error("pair {0:?} is frozen")]
    PairFrozen(Hash),

    /// The pair is not frozen.
    #[error("pair {0:?} is not frozen")]
    PairNotFrozen(Hash),
}

impl AccessError {
    /// Returns true if the caller simply lacked permission.
    #[must_use]
    pub fn is_authorization_failure(&self) -> bool {
        matches!(self, Self::CallerUnauthorized { .. })
    }

    /// Returns true if a pointer confirmation was rejected.
    #[must_use]
    pub fn is_pending_mismatch(&self) -> bool {
        matches!(self, Self::PendingMismatch { .. } | Self::PendingIsZero(_))
    }
}

// =============================================================================
// CONFIG ERRORS
// =============================================================================

/// Errors from loading or validating [`crate::config::AccessConfig`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The batch bound must admit at least one entry.
    #[error("invalid max_batch_size: {0}")]
    InvalidBatchSize(usize),

    /// The configuration document could not be parsed.
    #[error("config parse error: {0}")]
    Parse(String),
}
