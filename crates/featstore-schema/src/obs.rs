//! Observability: registration and validation counters behind a sink
//! boundary.
//!
//! Registry logic MUST NOT touch counter state directly. All
//! instrumentation flows through MetricsEvent and MetricsSink; this
//! module is the only bridge between registration logic and the
//! process-wide counter state.

use crate::node::NodeKind;
use serde::Serialize;
use std::{
    cell::RefCell,
    sync::atomic::{AtomicU64, Ordering},
};

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<*const dyn MetricsSink>> = const { RefCell::new(None) };
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MetricsEvent {
    NodeRegistered { kind: NodeKind },
    ValidationRun { issues: u64 },
    ManifestLoaded { nodes: u64 },
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent);
}

/// Route all events on this thread to `sink` for the duration of `f`.
pub fn with_sink<R>(sink: &dyn MetricsSink, f: impl FnOnce() -> R) -> R {
    struct Reset {
        previous: Option<*const dyn MetricsSink>,
    }

    impl Drop for Reset {
        fn drop(&mut self) {
            let previous = self.previous.take();
            SINK_OVERRIDE.with(|cell| *cell.borrow_mut() = previous);
        }
    }

    let previous =
        SINK_OVERRIDE.with(|cell| cell.borrow_mut().replace(std::ptr::from_ref(sink)));
    let _reset = Reset { previous };

    f()
}

// record
pub(crate) fn record(event: MetricsEvent) {
    let sink = SINK_OVERRIDE.with(|cell| *cell.borrow());

    match sink {
        // Pointer is installed and cleared by `with_sink`, which keeps
        // the sink alive across the call.
        Some(ptr) => unsafe { (*ptr).record(event) },
        None => COUNTERS.record(event),
    }
}

///
/// Counters
///

#[derive(Debug)]
struct Counters {
    sources_registered: AtomicU64,
    entities_registered: AtomicU64,
    feature_views_registered: AtomicU64,
    feature_services_registered: AtomicU64,
    validation_runs: AtomicU64,
    validation_issues: AtomicU64,
    manifests_loaded: AtomicU64,
}

static COUNTERS: Counters = Counters {
    sources_registered: AtomicU64::new(0),
    entities_registered: AtomicU64::new(0),
    feature_views_registered: AtomicU64::new(0),
    feature_services_registered: AtomicU64::new(0),
    validation_runs: AtomicU64::new(0),
    validation_issues: AtomicU64::new(0),
    manifests_loaded: AtomicU64::new(0),
};

impl Counters {
    fn record(&self, event: MetricsEvent) {
        match event {
            MetricsEvent::NodeRegistered { kind } => {
                let counter = match kind {
                    NodeKind::Entity => &self.entities_registered,
                    NodeKind::FeatureService => &self.feature_services_registered,
                    NodeKind::FeatureView => &self.feature_views_registered,
                    NodeKind::Source => &self.sources_registered,
                };
                counter.fetch_add(1, Ordering::Relaxed);
            }

            MetricsEvent::ValidationRun { issues } => {
                self.validation_runs.fetch_add(1, Ordering::Relaxed);
                self.validation_issues.fetch_add(issues, Ordering::Relaxed);
            }

            MetricsEvent::ManifestLoaded { .. } => {
                self.manifests_loaded.fetch_add(1, Ordering::Relaxed);
            }
        }
    }
}

///
/// EventReport
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub struct EventReport {
    pub sources_registered: u64,
    pub entities_registered: u64,
    pub feature_views_registered: u64,
    pub feature_services_registered: u64,
    pub validation_runs: u64,
    pub validation_issues: u64,
    pub manifests_loaded: u64,
}

/// Snapshot the process-wide counters.
#[must_use]
pub fn metrics_report() -> EventReport {
    EventReport {
        sources_registered: COUNTERS.sources_registered.load(Ordering::Relaxed),
        entities_registered: COUNTERS.entities_registered.load(Ordering::Relaxed),
        feature_views_registered: COUNTERS.feature_views_registered.load(Ordering::Relaxed),
        feature_services_registered: COUNTERS.feature_services_registered.load(Ordering::Relaxed),
        validation_runs: COUNTERS.validation_runs.load(Ordering::Relaxed),
        validation_issues: COUNTERS.validation_issues.load(Ordering::Relaxed),
        manifests_loaded: COUNTERS.manifests_loaded.load(Ordering::Relaxed),
    }
}

/// Reset the process-wide counters.
pub fn metrics_reset_all() {
    COUNTERS.sources_registered.store(0, Ordering::Relaxed);
    COUNTERS.entities_registered.store(0, Ordering::Relaxed);
    COUNTERS.feature_views_registered.store(0, Ordering::Relaxed);
    COUNTERS.feature_services_registered.store(0, Ordering::Relaxed);
    COUNTERS.validation_runs.store(0, Ordering::Relaxed);
    COUNTERS.validation_issues.store(0, Ordering::Relaxed);
    COUNTERS.manifests_loaded.store(0, Ordering::Relaxed);
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

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
    fn sink_override_captures_events() {
        let sink = CaptureSink::default();

        with_sink(&sink, || {
            record(MetricsEvent::NodeRegistered {
                kind: NodeKind::Source,
            });
            record(MetricsEvent::ValidationRun { issues: 2 });
        });

        assert_eq!(
            *sink.events.borrow(),
            vec![
                MetricsEvent::NodeRegistered {
                    kind: NodeKind::Source,
                },
                MetricsEvent::ValidationRun { issues: 2 },
            ],
        );
    }

    #[test]
    fn default_path_advances_counters() {
        let before = metrics_report();

        record(MetricsEvent::ManifestLoaded { nodes: 4 });

        let after = metrics_report();
        assert!(after.manifests_loaded > before.manifests_loaded);
    }
}
