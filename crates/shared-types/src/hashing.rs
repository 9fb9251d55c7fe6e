//! # Hashing
//!
//! Keccak-256 and deterministic contract-address derivation.
//!
//! Pure functions. No I/O.

use crate::value_objects::{Address, Hash};
use sha3::{Digest, Keccak256};

// =============================================================================
// KECCAK256
// =============================================================================

/// Computes keccak256 hash of data.
#[must_use]
pub fn keccak256(data: &[u8]) -> Hash {
    let hash = Keccak256::digest(data);
    Hash::new(hash.into())
}

// =============================================================================
// CONTRACT ADDRESS COMPUTATION
// =============================================================================

/// Computes the address a contract deployed by `deployer` receives.
///
/// Address = keccak256(rlp(\[deployer, nonce\]))\[12:\]
#[must_use]
pub fn compute_contract_address(deployer: Address, nonce: u64) -> Address {
    let mut content = Vec::with_capacity(32);

    // 20-byte string header: 0x80 + 20
    content.push(0x94);
    content.extend_from_slice(deployer.as_bytes());

    match nonce {
        0 => content.push(0x80),
        // single bytes below 0x80 encode as themselves
        1..=0x7f => content.extend_from_slice(&nonce.to_be_bytes()[7..]),
        _ => {
            let nonce_bytes = trimmed_be_bytes(nonce);
            content.push(0x80 + byte_len(&nonce_bytes));
            content.extend_from_slice(&nonce_bytes);
        }
    }

    // content is at most 30 bytes, always a short list
    let mut rlp = Vec::with_capacity(content.len() + 1);
    rlp.push(0xc0 + byte_len(&content));
    rlp.extend_from_slice(&content);

    let hash = keccak256(&rlp);
    let mut addr = [0u8; 20];
    addr.copy_from_slice(&hash.as_bytes()[12..]);
    Address::new(addr)
}

fn trimmed_be_bytes(value: u64) -> Vec<u8> {
    let bytes = value.to_be_bytes();
    let start = bytes.iter().position(|&b| b != 0).unwrap_or(7);
    bytes[start..].to_vec()
}

fn byte_len(bytes: &[u8]) -> u8 {
    u8::try_from(bytes.len()).unwrap_or(u8::MAX)
}
