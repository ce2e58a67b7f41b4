//! Effective-decision layer.
//!
//! Turns stored rows into one answer per resource fetch: the exact host-pair
//! row first, then the browser-wide default row.

pub mod engine;

pub use engine::{PolicyDecision, RequestPolicy};
