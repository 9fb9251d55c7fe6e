//! # Code Registry
//!
//! Maps deployed addresses to implementation code.

use crate::ports::outbound::Implementation;
use ac_01_access_control::ports::outbound::CodeInspector;
use shared_types::{compute_contract_address, Address};
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// Deployed implementations keyed by address.
pub struct CodeRegistry<E> {
    code: HashMap<Address, Box<dyn Implementation<E>>>,
    nonces: HashMap<Address, u64>,
}

impl<E> CodeRegistry<E> {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            code: HashMap::new(),
            nonces: HashMap::new(),
        }
    }

    /// Deploys `implementation` from `deployer` and returns its address.
    pub fn deploy(&mut self, deployer: Address, implementation: impl Implementation<E> + 'static) -> Address {
        let nonce = self.nonces.entry(deployer).or_default();
        let address = compute_contract_address(deployer, *nonce);
        *nonce += 1;
        self.code.insert(address, Box::new(implementation));
        debug!(deployer = %deployer, address = %address, "Implementation deployed");
        address
    }

    /// The implementation at `address`, if any.
    #[must_use]
    pub fn get(&self, address: Address) -> Option<&dyn Implementation<E>> {
        self.code.get(&address).map(|code| &**code)
    }

    /// Returns true if `address` carries code.
    #[must_use]
    pub fn has_code(&self, address: Address) -> bool {
        self.code.contains_key(&address)
    }

    /// Number of deployed implementations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.code.len()
    }

    /// Returns true if nothing is deployed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }
}

impl<E> Default for CodeRegistry<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for CodeRegistry<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut addresses: Vec<_> = self.code.keys().collect();
        addresses.sort();
        f.debug_struct("CodeRegistry").field("code", &addresses).finish()
    }
}

impl<E> CodeInspector for CodeRegistry<E> {
    fn is_contract(&self, at: Address) -> bool {
        self.has_code(at)
    }
}
