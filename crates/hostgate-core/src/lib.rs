//! hostgate core: request permission model, bit-packed row codec, and errors.
//!
//! This crate defines the decision types and the packed on-disk encoding
//! shared by every rule store backend. It carries no storage or runtime
//! dependencies so the codec can be verified in isolation.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Decoding is total; the only fallible path is mapping a request kind
//! ordinal, which surfaces as `HostGateError::InvalidRequestKind`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod rules;

/// Shared result type.
pub use error::{HostGateError, Result};
pub use rules::{Permission, PermissionSet, RequestKind, NUM_KINDS, NUM_SLOTS};
