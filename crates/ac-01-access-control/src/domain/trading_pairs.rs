//! # Trading Pair Whitelist
//!
//! Whitelisted (buy token, sell token) pairs keyed by a 32-byte identifier,
//! each with a freeze flag.
//!
//! | Operation | Gate |
//! |-----------|------|
//! | pair / depair (single and batch) | operator |
//! | freeze / unfreeze (single and batch) | operator or trader or system |
//!
//! Batches are validated against a staged copy of the book and committed
//! only if every entry succeeds.

use crate::config::AccessConfig;
use crate::domain::client::{AuthorityClient, RegistryKind};
use crate::domain::initializer::Initializer;
use crate::domain::operatorable::{Operatorable, TraderOperatorable};
use crate::errors::AccessError;
use crate::ports::outbound::{PointerHolder, RegistryDirectory};
use serde::{Deserialize, Serialize};
use shared_types::{Address, Hash};
use std::collections::HashMap;
use tracing::info;

// =============================================================================
// PAIR BOOK
// =============================================================================

/// One whitelisted pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradingPair {
    /// Token bought.
    pub buy: Address,
    /// Token sold.
    pub sell: Address,
    /// Whether trading on the pair is suspended.
    pub frozen: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct PairBook {
    pairs: HashMap<Hash, TradingPair>,
    by_tokens: HashMap<(Address, Address), Hash>,
    identifiers: Vec<Hash>,
}

impl PairBook {
    fn insert(&mut self, id: Hash, buy: Address, sell: Address) -> Result<(), AccessError> {
        if buy.is_zero() || sell.is_zero() {
            return Err(AccessError::ZeroAddress);
        }
        if buy == sell {
            return Err(AccessError::IdenticalTokens(buy));
        }
        if self.by_tokens.contains_key(&(buy, sell)) {
            return Err(AccessError::PairAlreadyWhitelisted { buy, sell });
        }
        if self.pairs.contains_key(&id) {
            return Err(AccessError::PairIdAlreadyUsed(id));
        }
        self.pairs.insert(
            id,
            TradingPair {
                buy,
                sell,
                frozen: false,
            },
        );
        self.by_tokens.insert((buy, sell), id);
        self.identifiers.push(id);
        Ok(())
    }

    fn remove(&mut self, id: Hash) -> Result<TradingPair, AccessError> {
        let pair = self.pairs.remove(&id).ok_or(AccessError::PairIdNotFound(id))?;
        self.by_tokens.remove(&(pair.buy, pair.sell));
        self.identifiers.retain(|existing| *existing != id);
        Ok(pair)
    }

    fn set_frozen(&mut self, id: Hash, frozen: bool) -> Result<(), AccessError> {
        let pair = self.pairs.get_mut(&id).ok_or(AccessError::PairIdNotFound(id))?;
        match (pair.frozen, frozen) {
            (true, true) => Err(AccessError::PairFrozen(id)),
            (false, false) => Err(AccessError::PairNotFrozen(id)),
            _ => {
                pair.frozen = frozen;
                Ok(())
            }
        }
    }

    fn find(&self, buy: Address, sell: Address) -> Option<(Hash, &TradingPair)> {
        let id = self.by_tokens.get(&(buy, sell))?;
        self.pairs.get(id).map(|pair| (*id, pair))
    }
}

// =============================================================================
// CONTRACT
// =============================================================================

/// Trading-pair whitelist mixin state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradingPairWhitelist {
    initializer: Initializer,
    authority: AuthorityClient,
    traders: AuthorityClient,
    book: PairBook,
    config: AccessConfig,
}

impl TradingPairWhitelist {
    /// An uninitialized, empty whitelist.
    #[must_use]
    pub fn new(config: AccessConfig) -> Self {
        Self {
            initializer: Initializer::new(),
            authority: AuthorityClient::new(RegistryKind::Authority),
            traders: AuthorityClient::new(RegistryKind::Trader),
            book: PairBook::default(),
            config,
        }
    }

    /// Binds the authority and trader registries. Callable once.
    pub fn initialize(&mut self, base: Address, traders: Address) -> Result<(), AccessError> {
        let Self {
            initializer,
            authority,
            traders: trader_client,
            ..
        } = self;
        initializer.run(|| {
            if traders.is_zero() {
                return Err(AccessError::ZeroAddress);
            }
            authority.bind(base)?;
            trader_client.bind(traders)
        })
    }

    /// Returns true once initialized.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initializer.is_initialized()
    }

    // -------------------------------------------------------------------------
    // Single-entry operations
    // -------------------------------------------------------------------------

    /// Whitelists `buy` / `sell` under `id`. Operator only.
    pub fn pair_tokens(
        &mut self,
        dir: &dyn RegistryDirectory,
        caller: Address,
        id: Hash,
        buy: Address,
        sell: Address,
    ) -> Result<(), AccessError> {
        self.require_operator(dir, caller)?;
        self.book.insert(id, buy, sell)?;
        info!(id = ?id, buy = %buy, sell = %sell, "Pair whitelisted");
        Ok(())
    }

    /// Removes the pair registered under `id`. Operator only.
    pub fn depair_tokens(&mut self, dir: &dyn RegistryDirectory, caller: Address, id: Hash) -> Result<(), AccessError> {
        self.require_operator(dir, caller)?;
        let pair = self.book.remove(id)?;
        info!(id = ?id, buy = %pair.buy, sell = %pair.sell, "Pair removed");
        Ok(())
    }

    /// Suspends trading on `id`.
    pub fn freeze_pair(&mut self, dir: &dyn RegistryDirectory, caller: Address, id: Hash) -> Result<(), AccessError> {
        self.require_operator_or_trader_or_system(dir, caller)?;
        self.book.set_frozen(id, true)?;
        info!(id = ?id, "Pair frozen");
        Ok(())
    }

    /// Resumes trading on `id`.
    pub fn unfreeze_pair(&mut self, dir: &dyn RegistryDirectory, caller: Address, id: Hash) -> Result<(), AccessError> {
        self.require_operator_or_trader_or_system(dir, caller)?;
        self.book.set_frozen(id, false)?;
        info!(id = ?id, "Pair unfrozen");
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Batches
    // -------------------------------------------------------------------------

    /// Whitelists `ids[i]` -> (`buys[i]`, `sells[i]`) for every `i`. Operator only.
    pub fn batch_pair_tokens(
        &mut self,
        dir: &dyn RegistryDirectory,
        caller: Address,
        ids: &[Hash],
        buys: &[Address],
        sells: &[Address],
    ) -> Result<(), AccessError> {
        self.require_operator(dir, caller)?;
        if ids.len() != buys.len() {
            return Err(AccessError::ArrayLengthMismatch {
                left: ids.len(),
                right: buys.len(),
            });
        }
        if ids.len() != sells.len() {
            return Err(AccessError::ArrayLengthMismatch {
                left: ids.len(),
                right: sells.len(),
            });
        }
        self.config.check_batch(ids.len())?;

        let mut staged = self.book.clone();
        for ((id, buy), sell) in ids.iter().zip(buys).zip(sells) {
            staged.insert(*id, *buy, *sell)?;
        }
        self.book = staged;
        info!(count = ids.len(), "Pairs whitelisted");
        Ok(())
    }

    /// Removes every pair in `ids`. Operator only.
    pub fn batch_depair_tokens(
        &mut self,
        dir: &dyn RegistryDirectory,
        caller: Address,
        ids: &[Hash],
    ) -> Result<(), AccessError> {
        self.require_operator(dir, caller)?;
        self.config.check_batch(ids.len())?;
        let mut staged = self.book.clone();
        for id in ids {
            staged.remove(*id)?;
        }
        self.book = staged;
        info!(count = ids.len(), "Pairs removed");
        Ok(())
    }

    /// Freezes every pair in `ids`.
    pub fn batch_freeze_tokens(
        &mut self,
        dir: &dyn RegistryDirectory,
        caller: Address,
        ids: &[Hash],
    ) -> Result<(), AccessError> {
        self.batch_set_frozen(dir, caller, ids, true)
    }

    /// Unfreezes every pair in `ids`.
    pub fn batch_unfreeze_tokens(
        &mut self,
        dir: &dyn RegistryDirectory,
        caller: Address,
        ids: &[Hash],
    ) -> Result<(), AccessError> {
        self.batch_set_frozen(dir, caller, ids, false)
    }

    fn batch_set_frozen(
        &mut self,
        dir: &dyn RegistryDirectory,
        caller: Address,
        ids: &[Hash],
        frozen: bool,
    ) -> Result<(), AccessError> {
        self.require_operator_or_trader_or_system(dir, caller)?;
        self.config.check_batch(ids.len())?;
        let mut staged = self.book.clone();
        for id in ids {
            staged.set_frozen(*id, frozen)?;
        }
        self.book = staged;
        info!(count = ids.len(), frozen, "Pair freeze batch applied");
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Queries and guards
    // -------------------------------------------------------------------------

    /// Returns true if `buy` / `sell` is whitelisted.
    #[must_use]
    pub fn is_paired(&self, buy: Address, sell: Address) -> bool {
        self.book.find(buy, sell).is_some()
    }

    /// Returns true if `buy` / `sell` is whitelisted and frozen.
    #[must_use]
    pub fn is_frozen(&self, buy: Address, sell: Address) -> bool {
        self.book.find(buy, sell).is_some_and(|(_, pair)| pair.frozen)
    }

    /// Number of whitelisted pairs.
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.book.identifiers.len()
    }

    /// Identifier at `index` in insertion order.
    #[must_use]
    pub fn identifier(&self, index: usize) -> Option<Hash> {
        self.book.identifiers.get(index).copied()
    }

    /// The pair registered under `id`.
    #[must_use]
    pub fn pair(&self, id: Hash) -> Option<TradingPair> {
        self.book.pairs.get(&id).copied()
    }

    /// Fails with [`AccessError::PairNotWhitelisted`] unless `buy` / `sell` is whitelisted.
    pub fn require_paired(&self, buy: Address, sell: Address) -> Result<(), AccessError> {
        if self.is_paired(buy, sell) {
            Ok(())
        } else {
            Err(AccessError::PairNotWhitelisted { buy, sell })
        }
    }

    /// Fails with [`AccessError::PairFrozen`] if `buy` / `sell` is frozen.
    pub fn require_pair_not_frozen(&self, buy: Address, sell: Address) -> Result<(), AccessError> {
        match self.book.find(buy, sell) {
            Some((id, pair)) if pair.frozen => Err(AccessError::PairFrozen(id)),
            _ => Ok(()),
        }
    }
}

impl Operatorable for TradingPairWhitelist {
    fn authority(&self) -> &AuthorityClient {
        &self.authority
    }

    fn authority_mut(&mut self) -> &mut AuthorityClient {
        &mut self.authority
    }
}

impl TraderOperatorable for TradingPairWhitelist {
    fn traders(&self) -> &AuthorityClient {
        &self.traders
    }

    fn traders_mut(&mut self) -> &mut AuthorityClient {
        &mut self.traders
    }
}

impl PointerHolder for TradingPairWhitelist {
    fn pointer_mut(&mut self, kind: RegistryKind) -> Option<&mut AuthorityClient> {
        match kind {
            RegistryKind::Authority => Some(&mut self.authority),
            RegistryKind::Trader => Some(&mut self.traders),
            _ => None,
        }
    }
}
