//! hostgate store library entry.
//!
//! Wires the rule store backends, the effective-decision policy, config
//! loading, and metrics. It is consumed by the admin binary (`main.rs`), by
//! the networking layer that checks every fetch, and by integration tests.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod app_state;
pub mod config;
pub mod obs;
pub mod policy;
pub mod store;
