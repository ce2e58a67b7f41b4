//! Durable rule store over a packed-row handle.
//!
//! The store itself holds no rows: it encodes/decodes the packed column and
//! delegates storage to a [`RowHandle`] supplied by the caller. Acquiring
//! and closing the handle is the caller's concern.

use hostgate_core::error::Result;
use hostgate_core::rules::codec;
use hostgate_core::{Permission, PermissionSet, RequestKind};

use super::{bootstrap, RuleStore};

/// Row store keyed by `(frame_host, request_host)` with one packed integer
/// column, plus the persisted `permissions_initialized` flag.
pub trait RowHandle: Send + Sync {
    /// Packed value of the exact key, if the row exists.
    fn fetch(&self, frame_host: &str, request_host: &str) -> Result<Option<u32>>;

    /// Atomic upsert: insert `set_mask` when the row is absent, otherwise
    /// replace the column with `(existing & clear_mask) | set_mask`.
    fn update(&self, frame_host: &str, request_host: &str, clear_mask: u32, set_mask: u32) -> Result<()>;

    fn permissions_initialized(&self) -> Result<bool>;

    fn set_permissions_initialized(&self, value: bool) -> Result<()>;
}

/// Rule store backed by a durable [`RowHandle`].
pub struct PersistentRuleStore<H: RowHandle> {
    handle: H,
}

impl<H: RowHandle> PersistentRuleStore<H> {
    /// Wrap a handle, seeding the default row unless the persisted flag says
    /// it already happened.
    pub fn new(handle: H) -> Result<Self> {
        let store = Self { handle };
        if !store.handle.permissions_initialized()? {
            bootstrap::seed_defaults(&store)?;
            store.handle.set_permissions_initialized(true)?;
        } else {
            tracing::debug!("rule store already initialized; bootstrap skipped");
        }
        Ok(store)
    }

    pub fn handle(&self) -> &H {
        &self.handle
    }
}

impl<H: RowHandle> RuleStore for PersistentRuleStore<H> {
    fn get_permissions(&self, frame_host_pattern: &str, request_host: &str) -> Result<PermissionSet> {
        let set = match self.handle.fetch(frame_host_pattern, request_host)? {
            Some(packed) => codec::decode(packed),
            None => PermissionSet::undecided(),
        };
        Ok(set)
    }

    fn store_permissions(
        &self,
        frame_host: &str,
        request_host: &str,
        kind: Option<RequestKind>,
        permission: Permission,
    ) -> Result<()> {
        let clear_mask = codec::encode_clear_mask(kind);
        let set_mask = codec::encode_set(kind, permission);
        self.handle.update(frame_host, request_host, clear_mask, set_mask)?;

        tracing::debug!(
            frame_host = %frame_host,
            request_host = %request_host,
            kind = ?kind,
            permission = %permission,
            set_mask,
            "stored rule"
        );
        Ok(())
    }
}
