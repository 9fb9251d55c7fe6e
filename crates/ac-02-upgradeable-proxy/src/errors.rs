//! # Error Types
//!
//! Errors raised by the proxy and by implementations running behind it.

use ac_01_access_control::errors::AccessError;
use shared_types::Address;
use thiserror::Error;

// =============================================================================
// PROXY ERRORS
// =============================================================================

/// Errors that abort a proxy call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProxyError {
    /// The new admin is the zero address.
    #[error("new admin is the zero address")]
    AdminIsZero,

    /// The target address carries no implementation code.
    #[error("new implementation {0} is not a contract")]
    NotAContract(Address),

    /// The proxy admin called a function the proxy does not own.
    #[error("admin cannot fallback to proxy target")]
    AdminCannotFallbackToTarget,

    /// The implementation has no function with this name.
    #[error("unknown function: {0}")]
    UnknownFunction(String),

    /// Arguments do not match what the function expects.
    #[error("invalid arguments for {function}: {reason}")]
    InvalidArguments { function: String, reason: String },

    /// The implementation rejected the call.
    #[error("revert: {0}")]
    Reverted(String),
}

impl ProxyError {
    /// Shorthand for an argument mismatch.
    pub fn invalid_arguments(function: &str, reason: impl Into<String>) -> Self {
        Self::InvalidArguments {
            function: function.to_string(),
            reason: reason.into(),
        }
    }

    /// Returns true if the failure came from the implementation rather than
    /// the proxy itself.
    #[must_use]
    pub fn is_revert(&self) -> bool {
        matches!(self, Self::Reverted(_) | Self::UnknownFunction(_) | Self::InvalidArguments { .. })
    }
}

impl From<AccessError> for ProxyError {
    fn from(err: AccessError) -> Self {
        Self::Reverted(err.to_string())
    }
}
