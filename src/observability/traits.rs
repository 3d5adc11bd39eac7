use std::time::Duration;

/// Notable things that happen inside the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObserverEvent {
    ElementAttached { element: String, kind: String },
    ElementDetached { element: String },
    PromptStabilized { epoch: u64, chars: usize },
    PromptSubmitted { history_len: usize },
    RequestIssued { operation: &'static str, token: u64 },
    ResponseApplied { operation: &'static str, token: u64 },
    ResponseDiscarded { operation: &'static str, token: u64 },
    RequestFailed { operation: &'static str, error: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ObserverMetric {
    RequestLatency {
        operation: &'static str,
        duration: Duration,
    },
    InFlightRequests(u64),
}

pub trait Observer: Send + Sync {
    fn record_event(&self, event: &ObserverEvent);
    fn record_metric(&self, metric: &ObserverMetric);
    fn flush(&self) {}
    fn name(&self) -> &str;
}
