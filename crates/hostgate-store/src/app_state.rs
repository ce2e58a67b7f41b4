//! Shared application state.
//!
//! Builds the configured rule store exactly once and hands it to consumers
//! by `Arc` instead of a process-wide singleton.

use std::sync::Arc;

use hostgate_core::error::Result;

use crate::config::{Backend, HostGateConfig};
use crate::obs::StoreMetrics;
use crate::policy::RequestPolicy;
use crate::store::{MemoryRuleStore, MeteredRuleStore, PersistentRuleStore, RuleStore, SqliteRowHandle};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: Arc<dyn RuleStore>,
    policy: Arc<RequestPolicy>,
    metrics: Arc<StoreMetrics>,
}

impl AppState {
    /// Build application state.
    /// Returns Result so main can report storage errors (no panic).
    pub fn new(cfg: &HostGateConfig) -> Result<Self> {
        let backend: Arc<dyn RuleStore> = match cfg.store.backend {
            Backend::Sqlite => {
                let handle = SqliteRowHandle::open(&cfg.store.sqlite)?;
                Arc::new(PersistentRuleStore::new(handle)?)
            }
            Backend::Memory => Arc::new(MemoryRuleStore::new()?),
        };
        Ok(Self::with_store(backend, cfg.store.backend.as_str()))
    }

    /// Wire an already constructed backend (tests, embedders with their own
    /// handle). `backend_label` tags every store metric.
    pub fn with_store(backend: Arc<dyn RuleStore>, backend_label: &'static str) -> Self {
        let metrics = Arc::new(StoreMetrics::default());
        let store: Arc<dyn RuleStore> = Arc::new(MeteredRuleStore::new(
            backend,
            backend_label,
            Arc::clone(&metrics),
        ));
        let policy = Arc::new(RequestPolicy::new(Arc::clone(&store), Arc::clone(&metrics)));

        tracing::info!(backend = backend_label, "rule store ready");
        Self {
            inner: Arc::new(AppStateInner {
                store,
                policy,
                metrics,
            }),
        }
    }

    pub fn store(&self) -> Arc<dyn RuleStore> {
        Arc::clone(&self.inner.store)
    }

    pub fn policy(&self) -> Arc<RequestPolicy> {
        Arc::clone(&self.inner.policy)
    }

    pub fn metrics(&self) -> Arc<StoreMetrics> {
        Arc::clone(&self.inner.metrics)
    }
}
