//! In-memory rule store.
//!
//! Same semantics as the persistent backend without durability. One mutex
//! guards the whole map: every operation is mutually exclusive, which keeps
//! slot mutation and map insertion from interleaving.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use hostgate_core::error::{HostGateError, Result};
use hostgate_core::{Permission, PermissionSet, RequestKind, NUM_SLOTS};

use super::{bootstrap, RuleStore};

type Slots = [Permission; NUM_SLOTS];

/// `frame_host -> request_host -> slots` (slot 0 = global).
pub struct MemoryRuleStore {
    rows: Mutex<HashMap<String, HashMap<String, Slots>>>,
}

impl MemoryRuleStore {
    /// Create a store with the default row seeded.
    pub fn new() -> Result<Self> {
        let store = Self {
            rows: Mutex::new(HashMap::new()),
        };
        bootstrap::seed_defaults(&store)?;
        Ok(store)
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, HashMap<String, Slots>>>> {
        self.rows.lock().map_err(|_| {
            tracing::warn!("memory rule store lock poisoned");
            HostGateError::Internal("memory rule store lock poisoned".into())
        })
    }

    /// Number of materialized rows.
    pub fn row_count(&self) -> Result<usize> {
        Ok(self.lock()?.values().map(HashMap::len).sum())
    }

    /// Log every row at debug level.
    pub fn dump(&self) -> Result<()> {
        let rows = self.lock()?;
        for (frame_host, inner) in rows.iter() {
            for (request_host, slots) in inner {
                tracing::debug!(
                    frame_host = %frame_host,
                    request_host = %request_host,
                    slots = ?slots,
                    "rule row"
                );
            }
        }
        Ok(())
    }
}

impl RuleStore for MemoryRuleStore {
    fn get_permissions(&self, frame_host_pattern: &str, request_host: &str) -> Result<PermissionSet> {
        let rows = self.lock()?;
        let set = rows
            .get(frame_host_pattern)
            .and_then(|inner| inner.get(request_host))
            .map(PermissionSet::from_slots)
            .unwrap_or_else(PermissionSet::undecided);
        Ok(set)
    }

    fn store_permissions(
        &self,
        frame_host: &str,
        request_host: &str,
        kind: Option<RequestKind>,
        permission: Permission,
    ) -> Result<()> {
        let slot = kind.map_or(0, RequestKind::slot);
        let mut rows = self.lock()?;
        let slots = rows
            .entry(frame_host.to_string())
            .or_default()
            .entry(request_host.to_string())
            .or_insert([Permission::Undecided; NUM_SLOTS]);
        slots[slot] = permission;

        tracing::debug!(
            frame_host = %frame_host,
            request_host = %request_host,
            kind = ?kind,
            permission = %permission,
            "stored rule (memory)"
        );
        Ok(())
    }
}
