//! Lightweight in-process metrics.
//!
//! Counters and histograms are stored as atomics behind `DashMap` label sets
//! and rendered in Prometheus text format on demand.

pub mod metrics;

pub use metrics::{CounterVec, HistogramVec, StoreMetrics};
