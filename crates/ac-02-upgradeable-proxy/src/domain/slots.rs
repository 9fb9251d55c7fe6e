//! # EIP-1967 Slots
//!
//! Well-known storage positions for the proxy's admin and implementation.
//!
//! Each slot is `keccak256(label) - 1`. Sequential implementation layouts
//! start at slot 0 and can never reach these positions, and having no known
//! preimage rules out a collision through a mapping slot.

use shared_types::{keccak256, StorageKey, U256};

/// Label hashed into [`ADMIN_SLOT`].
pub const ADMIN_LABEL: &str = "eip1967.proxy.admin";

/// Label hashed into [`IMPLEMENTATION_SLOT`].
pub const IMPLEMENTATION_LABEL: &str = "eip1967.proxy.implementation";

/// `0xb53127684a568b3173ae13b9f8a6016e243e63b6e8ee1178d6a717850b5d6103`
pub const ADMIN_SLOT: StorageKey = StorageKey::new([
    0xb5, 0x31, 0x27, 0x68, 0x4a, 0x56, 0x8b, 0x31,
    0x73, 0xae, 0x13, 0xb9, 0xf8, 0xa6, 0x01, 0x6e,
    0x24, 0x3e, 0x63, 0xb6, 0xe8, 0xee, 0x11, 0x78,
    0xd6, 0xa7, 0x17, 0x85, 0x0b, 0x5d, 0x61, 0x03,
]);

/// `0x360894a13ba1a3210667c828492db98dca3e2076cc3735a920a3ca505d382bbc`
pub const IMPLEMENTATION_SLOT: StorageKey = StorageKey::new([
    0x36, 0x08, 0x94, 0xa1, 0x3b, 0xa1, 0xa3, 0x21,
    0x06, 0x67, 0xc8, 0x28, 0x49, 0x2d, 0xb9, 0x8d,
    0xca, 0x3e, 0x20, 0x76, 0xcc, 0x37, 0x35, 0xa9,
    0x20, 0xa3, 0xca, 0x50, 0x5d, 0x38, 0x2b, 0xbc,
]);

/// Derives an EIP-1967 slot from its label.
#[must_use]
pub fn derive_slot(label: &str) -> StorageKey {
    let hash = keccak256(label.as_bytes()).to_u256();
    StorageKey::from_u256(hash.overflowing_sub(U256::one()).0)
}
