use super::traits::{Observer, ObserverEvent, ObserverMetric};
use std::sync::atomic::{AtomicU64, Ordering};

/// Forwards pipeline events to `tracing`.
pub struct LogObserver {
    event_count: AtomicU64,
}

impl LogObserver {
    #[must_use]
    pub fn new() -> Self {
        Self {
            event_count: AtomicU64::new(0),
        }
    }

    pub fn events_recorded(&self) -> u64 {
        self.event_count.load(Ordering::Relaxed)
    }
}

impl Default for LogObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for LogObserver {
    fn record_event(&self, event: &ObserverEvent) {
        self.event_count.fetch_add(1, Ordering::Relaxed);
        match event {
            ObserverEvent::ElementAttached { element, kind } => {
                tracing::info!(%element, %kind, "element.attached");
            }
            ObserverEvent::ElementDetached { element } => {
                tracing::info!(%element, "element.detached");
            }
            ObserverEvent::PromptStabilized { epoch, chars } => {
                tracing::debug!(epoch, chars, "prompt.stabilized");
            }
            ObserverEvent::PromptSubmitted { history_len } => {
                tracing::info!(history_len, "prompt.submitted");
            }
            ObserverEvent::RequestIssued { operation, token } => {
                tracing::debug!(operation, token, "request.issued");
            }
            ObserverEvent::ResponseApplied { operation, token } => {
                tracing::debug!(operation, token, "response.applied");
            }
            ObserverEvent::ResponseDiscarded { operation, token } => {
                tracing::debug!(operation, token, "response.discarded");
            }
            ObserverEvent::RequestFailed { operation, error } => {
                tracing::warn!(operation, %error, "request.failed");
            }
        }
    }

    fn record_metric(&self, metric: &ObserverMetric) {
        match metric {
            ObserverMetric::RequestLatency {
                operation,
                duration,
            } => {
                let ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
                tracing::debug!(operation, latency_ms = ms, "request.latency");
            }
            ObserverMetric::InFlightRequests(n) => {
                tracing::trace!(in_flight = n, "request.in_flight");
            }
        }
    }

    fn flush(&self) {
        tracing::debug!(events_total = self.events_recorded(), "observer.log.flush");
    }

    fn name(&self) -> &str {
        "log"
    }
}
