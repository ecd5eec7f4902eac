//! Metrics sink boundary.
//!
//! Condition logic MUST NOT depend on obs::metrics directly.
//! All instrumentation flows through MetricsEvent and MetricsSink.
use crate::obs::metrics;
use std::cell::RefCell;

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<*const dyn MetricsSink>> = RefCell::new(None);
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MetricsEvent {
    Compile { elements: u64, dropped: u64 },
    GranuleCheck { pruned: bool, rectangles: u64 },
    EvalError,
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent);
}

/// GlobalMetricsSink
/// Default sink that writes into the thread-local counters.
/// Acts as the concrete sink when no scoped override is installed.

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent) {
        match event {
            MetricsEvent::Compile { elements, dropped } => {
                metrics::with_state_mut(|m| {
                    m.conditions_compiled = m.conditions_compiled.saturating_add(1);
                    m.rpn_elements = m.rpn_elements.saturating_add(elements);
                    m.clauses_dropped = m.clauses_dropped.saturating_add(dropped);
                });
            }

            MetricsEvent::GranuleCheck { pruned, rectangles } => {
                metrics::with_state_mut(|m| {
                    m.granules_checked = m.granules_checked.saturating_add(1);
                    if pruned {
                        m.granules_pruned = m.granules_pruned.saturating_add(1);
                    }
                    m.rectangles_evaluated = m.rectangles_evaluated.saturating_add(rectangles);
                });
            }

            MetricsEvent::EvalError => {
                metrics::with_state_mut(|m| m.eval_errors = m.eval_errors.saturating_add(1));
            }
        }
    }
}

pub(crate) const GLOBAL_METRICS_SINK: GlobalMetricsSink = GlobalMetricsSink;

pub(crate) fn record(event: MetricsEvent) {
    let override_ptr = SINK_OVERRIDE.with(|cell| *cell.borrow());
    if let Some(ptr) = override_ptr {
        // SAFETY:
        // - `ptr` was produced from a valid `&dyn MetricsSink` in `with_metrics_sink`,
        //   which restores the previous slot on every exit, including unwind.
        // - `record` is synchronous and never stores `ptr` beyond this call.
        // - Only a shared reference is materialized, matching the borrow handed to `with_metrics_sink`.
        unsafe { (&*ptr).record(event) };
    } else {
        GLOBAL_METRICS_SINK.record(event);
    }
}

/// Snapshot the current thread's pruning counters.
#[must_use]
pub fn metrics_report() -> metrics::EventReport {
    metrics::report()
}

/// Reset all pruning counters.
pub fn metrics_reset_all() {
    metrics::reset_all();
}

/// Run a closure with a temporary metrics sink override on this thread.
pub fn with_metrics_sink<T>(sink: &dyn MetricsSink, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<*const dyn MetricsSink>);

    impl Drop for Guard {
        fn drop(&mut self) {
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = self.0;
            });
        }
    }

    // SAFETY:
    // - `sink_ptr` is installed only for this dynamic scope and `Guard`
    //   restores the previous slot on all exits.
    // - `record` dereferences synchronously and never persists `sink_ptr`.
    let sink_ptr = unsafe { std::mem::transmute::<&dyn MetricsSink, *const dyn MetricsSink>(sink) };
    let prev = SINK_OVERRIDE.with(|cell| cell.borrow_mut().replace(sink_ptr));
    let _guard = Guard(prev);

    f()
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct CaptureSink {
        events: RefCell<Vec<MetricsEvent>>,
    }

    impl MetricsSink for CaptureSink {
        fn record(&self, event: MetricsEvent) {
            self.events.borrow_mut().push(event);
        }
    }

    #[test]
    fn global_sink_accumulates_counters() {
        metrics_reset_all();

        record(MetricsEvent::Compile {
            elements: 3,
            dropped: 1,
        });
        record(MetricsEvent::GranuleCheck {
            pruned: true,
            rectangles: 4,
        });
        record(MetricsEvent::GranuleCheck {
            pruned: false,
            rectangles: 2,
        });
        record(MetricsEvent::EvalError);

        let report = metrics_report();
        assert_eq!(report.counters.conditions_compiled, 1);
        assert_eq!(report.counters.rpn_elements, 3);
        assert_eq!(report.counters.clauses_dropped, 1);
        assert_eq!(report.counters.granules_checked, 2);
        assert_eq!(report.counters.granules_pruned, 1);
        assert_eq!(report.counters.rectangles_evaluated, 6);
        assert_eq!(report.counters.eval_errors, 1);
        assert_eq!(report.prune_ratio(), Some(0.5));

        metrics_reset_all();
        assert_eq!(metrics_report().prune_ratio(), None);
    }

    #[test]
    fn override_captures_events_and_restores_global() {
        metrics_reset_all();
        let sink = CaptureSink::default();

        with_metrics_sink(&sink, || record(MetricsEvent::EvalError));
        assert_eq!(sink.events.borrow().as_slice(), &[MetricsEvent::EvalError]);
        assert_eq!(metrics_report().counters.eval_errors, 0);

        record(MetricsEvent::EvalError);
        assert_eq!(metrics_report().counters.eval_errors, 1);
        assert_eq!(sink.events.borrow().len(), 1);
    }
}
