//! # Error Types
//!
//! Parsing errors for the shared value objects.

use thiserror::Error;

/// Errors produced when parsing an [`crate::Address`] from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseAddressError {
    /// The text is not valid hexadecimal.
    #[error("invalid hex in address: {0}")]
    InvalidHex(String),

    /// The decoded bytes do not form a 20-byte address.
    #[error("invalid address length: expected 20 bytes, got {0}")]
    InvalidLength(usize),
}
