//! # Integration Tests
//!
//! Scenarios that span the registries, the ledger host, the routers and
//! the proxy.

pub mod migration;
pub mod routers;
pub mod scenarios;
