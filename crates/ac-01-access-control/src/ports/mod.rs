//! # Ports Layer (Middle Hexagon)
//!
//! Trait definitions between the access-control domain and its host.
//!
//! - **Driven Ports (Outbound)**: `RoleReader`, `WhitelistReader`,
//!   `RegistryDirectory`, `CodeInspector`, `PointerHolder`
//! - No concrete implementations in this module

pub mod outbound;

pub use outbound::*;
