//! # Pausable
//!
//! Contract-wide pause switch. Operators and system accounts of the
//! authority registry, and traders of the trader registry, may flip it.

use crate::domain::client::{AuthorityClient, RegistryKind};
use crate::domain::initializer::Initializer;
use crate::domain::operatorable::{Operatorable, TraderOperatorable};
use crate::errors::AccessError;
use crate::ports::outbound::{PointerHolder, RegistryDirectory};
use serde::{Deserialize, Serialize};
use shared_types::Address;
use tracing::info;

/// Pause mixin state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pausable {
    initializer: Initializer,
    authority: AuthorityClient,
    traders: AuthorityClient,
    paused: bool,
}

impl Default for Pausable {
    fn default() -> Self {
        Self::new()
    }
}

impl Pausable {
    /// An uninitialized, unpaused mixin.
    #[must_use]
    pub fn new() -> Self {
        Self {
            initializer: Initializer::new(),
            authority: AuthorityClient::new(RegistryKind::Authority),
            traders: AuthorityClient::new(RegistryKind::Trader),
            paused: false,
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

    /// Pauses the contract.
    pub fn pause(&mut self, dir: &dyn RegistryDirectory, caller: Address) -> Result<(), AccessError> {
        self.require_operator_or_trader_or_system(dir, caller)?;
        self.require_not_paused()?;
        self.paused = true;
        info!(caller = %caller, "Paused");
        Ok(())
    }

    /// Unpauses the contract.
    pub fn unpause(&mut self, dir: &dyn RegistryDirectory, caller: Address) -> Result<(), AccessError> {
        self.require_operator_or_trader_or_system(dir, caller)?;
        self.require_paused()?;
        self.paused = false;
        info!(caller = %caller, "Unpaused");
        Ok(())
    }

    /// Returns true while paused.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Fails with [`AccessError::NotPaused`] unless paused.
    pub fn require_paused(&self) -> Result<(), AccessError> {
        if self.paused {
            Ok(())
        } else {
            Err(AccessError::NotPaused)
        }
    }

    /// Fails with [`AccessError::Paused`] while paused.
    pub fn require_not_paused(&self) -> Result<(), AccessError> {
        if self.paused {
            Err(AccessError::Paused)
        } else {
            Ok(())
        }
    }
}

impl Operatorable for Pausable {
    fn authority(&self) -> &AuthorityClient {
        &self.authority
    }

    fn authority_mut(&mut self) -> &mut AuthorityClient {
        &mut self.authority
    }
}

impl TraderOperatorable for Pausable {
    fn traders(&self) -> &AuthorityClient {
        &self.traders
    }

    fn traders_mut(&mut self) -> &mut AuthorityClient {
        &mut self.traders
    }
}

impl PointerHolder for Pausable {
    fn pointer_mut(&mut self, kind: RegistryKind) -> Option<&mut AuthorityClient> {
        match kind {
            RegistryKind::Authority => Some(&mut self.authority),
            RegistryKind::Trader => Some(&mut self.traders),
            _ => None,
        }
    }
}
