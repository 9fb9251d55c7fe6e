//! # Proxy Events
//!
//! Notifications recorded by the proxy when its slots change.

use serde::{Deserialize, Serialize};
use shared_types::Address;

/// A change to the proxy's admin or implementation slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProxyEvent {
    /// The admin slot changed. `previous` is zero at deployment.
    AdminChanged {
        /// Admin before the change.
        previous: Address,
        /// Admin after the change.
        new: Address,
    },
    /// The implementation slot changed.
    Upgraded {
        /// The new implementation.
        implementation: Address,
    },
}
