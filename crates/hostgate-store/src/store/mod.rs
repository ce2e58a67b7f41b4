//! Rule stores.
//!
//! Every backend implements [`RuleStore`] with identical semantics:
//! - rows are keyed by the exact `(frame_host, request_host)` strings;
//!   `"*"` is a literal sentinel key, never a wildcard,
//! - a never-written pair reads as [`PermissionSet::undecided`] and reading
//!   never creates a row,
//! - a write replaces exactly one slot and leaves every other slot intact.
//!
//! Backends:
//! - [`MemoryRuleStore`]: process-local nested map.
//! - [`PersistentRuleStore`]: packed rows on a [`RowHandle`] such as
//!   [`SqliteRowHandle`].

pub mod bootstrap;
pub mod memory;
pub mod metered;
pub mod persistent;
pub mod sqlite;

use hostgate_core::error::Result;
use hostgate_core::{Permission, PermissionSet, RequestKind};

pub use bootstrap::{seed_defaults, BOOTSTRAP_FRAME_HOST, BOOTSTRAP_REQUEST_HOST};
pub use memory::MemoryRuleStore;
pub use metered::MeteredRuleStore;
pub use persistent::{PersistentRuleStore, RowHandle};
pub use sqlite::SqliteRowHandle;

/// Capability interface shared by all backends.
///
/// Implementations must be safe to call concurrently; per-key writes are
/// linearizable and never lose updates to other slots of the same row.
pub trait RuleStore: Send + Sync {
    /// Decoded row for the exact host pair, or all-`Undecided`.
    fn get_permissions(&self, frame_host_pattern: &str, request_host: &str) -> Result<PermissionSet>;

    /// Upsert one slot (`kind = None` targets the global slot).
    /// Storing `Undecided` resets the slot.
    fn store_permissions(
        &self,
        frame_host: &str,
        request_host: &str,
        kind: Option<RequestKind>,
        permission: Permission,
    ) -> Result<()>;
}
