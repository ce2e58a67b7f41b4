use std::sync::Arc;

use hostgate_core::error::Result;
use hostgate_core::{Permission, PermissionSet, RequestKind};

use crate::obs::StoreMetrics;
use crate::store::{RuleStore, BOOTSTRAP_FRAME_HOST, BOOTSTRAP_REQUEST_HOST};

/// Decision handed to the networking layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyDecision {
    Allow,
    Deny,
    /// No stored rule decides this request; the caller applies its own
    /// default (prompt, or deny).
    Ask,
}

impl PolicyDecision {
    pub fn as_str(self) -> &'static str {
        match self {
            PolicyDecision::Allow => "allow",
            PolicyDecision::Deny => "deny",
            PolicyDecision::Ask => "ask",
        }
    }

    fn from_permission(p: Permission) -> Option<Self> {
        match p {
            Permission::Allow => Some(PolicyDecision::Allow),
            Permission::Deny => Some(PolicyDecision::Deny),
            Permission::Undecided => None,
        }
    }
}

/// Resolves effective decisions against a shared rule store.
/// Construct once at startup, then share via Arc.
pub struct RequestPolicy {
    store: Arc<dyn RuleStore>,
    metrics: Arc<StoreMetrics>,
}

impl RequestPolicy {
    pub fn new(store: Arc<dyn RuleStore>, metrics: Arc<StoreMetrics>) -> Self {
        Self { store, metrics }
    }

    /// Effective decision for one fetch.
    ///
    /// Order: exact `(frame_host, request_host)` row with kind-over-global
    /// precedence, then the default `("*", "")` row, then `Ask`.
    pub fn check(&self, frame_host: &str, request_host: &str, kind: RequestKind) -> Result<PolicyDecision> {
        let decision = match self.resolve_row(frame_host, request_host, kind)? {
            Some(d) => d,
            None => self
                .resolve_row(BOOTSTRAP_FRAME_HOST, BOOTSTRAP_REQUEST_HOST, kind)?
                .unwrap_or(PolicyDecision::Ask),
        };

        self.metrics
            .policy_decisions
            .inc(&[("decision", decision.as_str()), ("kind", kind.as_str())]);
        tracing::trace!(
            frame_host = %frame_host,
            request_host = %request_host,
            kind = %kind,
            decision = decision.as_str(),
            "request policy"
        );
        Ok(decision)
    }

    /// Raw row for a pair (no fallback).
    pub fn row(&self, frame_host: &str, request_host: &str) -> Result<PermissionSet> {
        self.store.get_permissions(frame_host, request_host)
    }

    /// Persist a user decision for one slot (`None` = the whole pair).
    pub fn decide(
        &self,
        frame_host: &str,
        request_host: &str,
        kind: Option<RequestKind>,
        permission: Permission,
    ) -> Result<()> {
        self.store
            .store_permissions(frame_host, request_host, kind, permission)
    }

    fn resolve_row(&self, frame_host: &str, request_host: &str, kind: RequestKind) -> Result<Option<PolicyDecision>> {
        let row = self.store.get_permissions(frame_host, request_host)?;
        Ok(PolicyDecision::from_permission(row.effective(kind)))
    }
}
