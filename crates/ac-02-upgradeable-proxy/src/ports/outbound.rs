//! # Outbound Ports
//!
//! The seam between the proxy and the business logic behind it.

use crate::domain::{CallContext, CallData, ProxyStorage, Token};
use crate::errors::ProxyError;

/// Contract code a proxy delegates to.
///
/// `E` is the host environment the logic acts against (for the token
/// platform, the ledger of role registries). The implementation keeps no
/// state of its own: everything it persists goes into `storage`, which
/// belongs to the proxy, so swapping the implementation keeps the state.
pub trait Implementation<E> {
    /// Runs `call` in the proxy's storage context.
    ///
    /// An `Err` reverts the call; the proxy restores `storage` to what it
    /// was before.
    fn execute(
        &self,
        env: &mut E,
        ctx: &CallContext,
        storage: &mut ProxyStorage,
        call: &CallData,
    ) -> Result<Vec<Token>, ProxyError>;
}
