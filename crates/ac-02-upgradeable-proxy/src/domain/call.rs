//! # Call Data
//!
//! A function name plus typed arguments, the unit every proxy call carries.
//! Encodable to bytes so a follow-up call can travel inside
//! `upgradeToAndCall`.

use crate::errors::ProxyError;
use serde::{Deserialize, Serialize};
use shared_types::{Address, U256};

// =============================================================================
// TOKEN
// =============================================================================

/// One call argument or return value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Token {
    /// An account.
    Address(Address),
    /// A 256-bit unsigned integer.
    Uint(U256),
    /// A flag.
    Bool(bool),
    /// Opaque bytes.
    Bytes(Vec<u8>),
}

impl Token {
    /// The address, if this is one.
    #[must_use]
    pub fn as_address(&self) -> Option<Address> {
        match self {
            Self::Address(address) => Some(*address),
            _ => None,
        }
    }

    /// The integer, if this is one.
    #[must_use]
    pub fn as_uint(&self) -> Option<U256> {
        match self {
            Self::Uint(value) => Some(*value),
            _ => None,
        }
    }

    /// The flag, if this is one.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(flag) => Some(*flag),
            _ => None,
        }
    }

    /// The bytes, if this is a byte string.
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }
}

impl From<Address> for Token {
    fn from(address: Address) -> Self {
        Self::Address(address)
    }
}

impl From<U256> for Token {
    fn from(value: U256) -> Self {
        Self::Uint(value)
    }
}

impl From<bool> for Token {
    fn from(flag: bool) -> Self {
        Self::Bool(flag)
    }
}

// =============================================================================
// CALL DATA
// =============================================================================

/// A call against a proxy or an implementation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallData {
    /// Function name.
    pub function: String,
    /// Positional arguments.
    pub args: Vec<Token>,
}

impl CallData {
    /// Builds a call.
    pub fn new(function: impl Into<String>, args: Vec<Token>) -> Self {
        Self {
            function: function.into(),
            args,
        }
    }

    /// Serializes the call into opaque bytes.
    pub fn encode(&self) -> Result<Vec<u8>, ProxyError> {
        serde_json::to_vec(self).map_err(|e| ProxyError::invalid_arguments(&self.function, e.to_string()))
    }

    /// Parses a call previously produced by [`CallData::encode`].
    pub fn decode(bytes: &[u8]) -> Result<Self, ProxyError> {
        serde_json::from_slice(bytes).map_err(|e| ProxyError::invalid_arguments("<encoded call>", e.to_string()))
    }

    /// Fails unless exactly `count` arguments were supplied.
    pub fn expect_args(&self, count: usize) -> Result<(), ProxyError> {
        if self.args.len() == count {
            Ok(())
        } else {
            Err(ProxyError::invalid_arguments(
                &self.function,
                format!("expected {count} arguments, got {}", self.args.len()),
            ))
        }
    }

    /// Argument `index` as an address.
    pub fn address(&self, index: usize) -> Result<Address, ProxyError> {
        self.arg(index)?
            .as_address()
            .ok_or_else(|| self.mismatch(index, "address"))
    }

    /// Argument `index` as an integer.
    pub fn uint(&self, index: usize) -> Result<U256, ProxyError> {
        self.arg(index)?.as_uint().ok_or_else(|| self.mismatch(index, "uint"))
    }

    /// Argument `index` as a flag.
    pub fn flag(&self, index: usize) -> Result<bool, ProxyError> {
        self.arg(index)?.as_bool().ok_or_else(|| self.mismatch(index, "bool"))
    }

    /// Argument `index` as bytes.
    pub fn bytes(&self, index: usize) -> Result<&[u8], ProxyError> {
        self.arg(index)?
            .as_bytes()
            .ok_or_else(|| self.mismatch(index, "bytes"))
    }

    fn arg(&self, index: usize) -> Result<&Token, ProxyError> {
        self.args
            .get(index)
            .ok_or_else(|| ProxyError::invalid_arguments(&self.function, format!("missing argument {index}")))
    }

    fn mismatch(&self, index: usize, expected: &str) -> ProxyError {
        ProxyError::invalid_arguments(&self.function, format!("argument {index} is not {expected}"))
    }
}

// =============================================================================
// CALL CONTEXT
// =============================================================================

/// Who is calling and where the code runs.
///
/// `address` is the proxy, `implementation` the contract whose code is
/// executing in the proxy's storage. `caller` is the account that called
/// the proxy; delegated execution keeps it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallContext {
    /// Account that called the proxy.
    pub caller: Address,
    /// The proxy's address.
    pub address: Address,
    /// The implementation executing the call.
    pub implementation: Address,
}
