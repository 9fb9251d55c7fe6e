//! # Domain Layer
//!
//! Slots, storage, call encoding and events. No I/O.

pub mod call;
pub mod events;
pub mod slots;
pub mod storage;

pub use call::*;
pub use events::*;
pub use slots::*;
pub use storage::*;
