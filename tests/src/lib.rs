//! # Sentinel-RBAC Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures/         # Deployed platform and proxy-hosted token logic
//! │   ├── mod.rs
//! │   └── token.rs
//! │
//! ├── integration/      # Cross-crate scenarios
//! │   ├── scenarios.rs  # Registry, satellite, pointer and batch scenarios
//! │   ├── migration.rs  # Many dependents moving to a new authority
//! │   ├── routers.rs    # Onboarding and initialization through relays
//! │   └── proxy_token.rs# Token behind the transparent proxy
//! │
//! └── properties.rs     # Property tests over random call sequences
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p ac-tests
//!
//! # By category
//! cargo test -p ac-tests integration::
//! cargo test -p ac-tests properties::
//!
//! # With logs
//! RUST_LOG=debug cargo test -p ac-tests -- --nocapture
//! ```

#![allow(dead_code)]

pub mod fixtures;
pub mod integration;
pub mod properties;
