//! Metrics decorator for any [`RuleStore`].

use std::sync::Arc;
use std::time::Instant;

use hostgate_core::error::Result;
use hostgate_core::{Permission, PermissionSet, RequestKind};

use crate::obs::StoreMetrics;

use super::RuleStore;

/// Counts reads/writes/errors and times every call to the inner store.
pub struct MeteredRuleStore {
    inner: Arc<dyn RuleStore>,
    backend: &'static str,
    metrics: Arc<StoreMetrics>,
}

impl MeteredRuleStore {
    pub fn new(inner: Arc<dyn RuleStore>, backend: &'static str, metrics: Arc<StoreMetrics>) -> Self {
        Self { inner, backend, metrics }
    }

    fn record<T>(&self, op: &'static str, started: Instant, res: &Result<T>) {
        let labels = [("backend", self.backend), ("op", op)];
        self.metrics.store_op_duration.observe(&labels, started.elapsed());
        if let Err(e) = res {
            self.metrics
                .store_errors
                .inc(&[("backend", self.backend), ("code", e.code().as_str())]);
            tracing::error!(backend = self.backend, op, error = %e, "rule store call failed");
        }
    }
}

impl RuleStore for MeteredRuleStore {
    fn get_permissions(&self, frame_host_pattern: &str, request_host: &str) -> Result<PermissionSet> {
        let started = Instant::now();
        let res = self.inner.get_permissions(frame_host_pattern, request_host);
        self.metrics.store_reads.inc(&[("backend", self.backend)]);
        self.record("get", started, &res);
        res
    }

    fn store_permissions(
        &self,
        frame_host: &str,
        request_host: &str,
        kind: Option<RequestKind>,
        permission: Permission,
    ) -> Result<()> {
        let started = Instant::now();
        let res = self
            .inner
            .store_permissions(frame_host, request_host, kind, permission);
        self.metrics.store_writes.inc(&[("backend", self.backend)]);
        self.record("store", started, &res);
        res
    }
}
