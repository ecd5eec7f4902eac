//! Observability: pruning counters and the sink abstraction that feeds them.
//!
//! Condition logic records through `sink::record` only; it never touches
//! metrics state directly.

pub(crate) mod metrics;
pub(crate) mod sink;

// re-exports
pub use metrics::{EventReport, PruneCounters};
pub use sink::{MetricsEvent, MetricsSink, metrics_report, metrics_reset_all, with_metrics_sink};
