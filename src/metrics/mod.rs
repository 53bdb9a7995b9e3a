//! Optional cache metrics (`metrics` feature).
//!
//! Recording, snapshotting and export are split into separate pieces:
//! [`LruMetrics`](metrics_impl::LruMetrics) only counts,
//! [`MetricsSnapshotProvider`](traits::MetricsSnapshotProvider) reads a
//! consistent copy, and [`MetricsExporter`](traits::MetricsExporter)
//! publishes it.

pub mod exporter;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;
