//! Request permission rules.
//!
//! - `permission`: the three-valued decision, the ordered request kinds, and
//!   the decoded per-row `PermissionSet`.
//! - `codec`: the packed two-bits-per-slot integer format persisted by the
//!   durable backend.
//!
//! The codec is total: every integer decodes to a valid `PermissionSet`, so a
//! persisted row can never be rejected as corrupt.

pub mod codec;
pub mod permission;

pub use permission::{Permission, PermissionSet, RequestKind, NUM_KINDS, NUM_SLOTS};
