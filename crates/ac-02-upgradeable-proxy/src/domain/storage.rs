//! # Proxy Storage
//!
//! The single storage space a proxy owns. The proxy's own slots and every
//! implementation's business state live side by side in it.

use serde::{Deserialize, Serialize};
use shared_types::{keccak256, Address, StorageKey, StorageValue, U256};
use std::collections::HashMap;

/// Word-addressed key/value storage. Untouched slots read as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyStorage {
    slots: HashMap<StorageKey, StorageValue>,
}

impl ProxyStorage {
    /// Empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a word.
    #[must_use]
    pub fn load(&self, key: StorageKey) -> StorageValue {
        self.slots.get(&key).copied().unwrap_or(StorageValue::ZERO)
    }

    /// Writes a word. Writing zero clears the slot.
    pub fn store(&mut self, key: StorageKey, value: StorageValue) {
        if value.is_zero() {
            self.slots.remove(&key);
        } else {
            self.slots.insert(key, value);
        }
    }

    /// Reads an address stored right-aligned.
    #[must_use]
    pub fn load_address(&self, key: StorageKey) -> Address {
        self.load(key).to_address()
    }

    /// Writes an address right-aligned.
    pub fn store_address(&mut self, key: StorageKey, address: Address) {
        self.store(key, StorageValue::from_address(address));
    }

    /// Reads a 256-bit integer.
    #[must_use]
    pub fn load_u256(&self, key: StorageKey) -> U256 {
        self.load(key).to_u256()
    }

    /// Writes a 256-bit integer.
    pub fn store_u256(&mut self, key: StorageKey, value: U256) {
        self.store(key, StorageValue::from_u256(value));
    }

    /// Reads a boolean flag.
    #[must_use]
    pub fn load_bool(&self, key: StorageKey) -> bool {
        self.load(key).to_bool()
    }

    /// Writes a boolean flag.
    pub fn store_bool(&mut self, key: StorageKey, flag: bool) {
        self.store(key, StorageValue::from_bool(flag));
    }

    /// Number of non-zero slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if every slot is zero.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Position of `map[key]` for a mapping declared at slot `base`.
///
/// `keccak256(pad32(key) ++ base)`, the layout Solidity uses, so mapping
/// entries scatter across the key space and never meet sequential slots.
#[must_use]
pub fn mapping_slot(base: StorageKey, key: Address) -> StorageKey {
    let mut preimage = [0u8; 64];
    preimage[12..32].copy_from_slice(key.as_bytes());
    preimage[32..].copy_from_slice(base.as_bytes());
    keccak256(&preimage).into()
}
