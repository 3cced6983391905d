use std::sync::Mutex;

use serde::{Deserialize, Serialize};

/// Per-outcome query counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryMetrics {
    pub answered: usize,
    pub parse_failures: usize,
    pub resolution_failures: usize,
    pub data_failures: usize,
}

impl QueryMetrics {
    pub fn total(&self) -> usize {
        self.answered + self.parse_failures + self.resolution_failures + self.data_failures
    }
}

pub struct MetricsRecorder {
    inner: Mutex<QueryMetrics>,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(QueryMetrics::default()),
        }
    }

    fn update(&self, apply: impl FnOnce(&mut QueryMetrics)) {
        if let Ok(mut metrics) = self.inner.lock() {
            apply(&mut metrics);
        }
    }

    pub fn record_answered(&self) {
        self.update(|m| m.answered += 1);
    }

    pub fn record_parse_failure(&self) {
        self.update(|m| m.parse_failures += 1);
    }

    pub fn record_resolution_failure(&self) {
        self.update(|m| m.resolution_failures += 1);
    }

    pub fn record_data_failure(&self) {
        self.update(|m| m.data_failures += 1);
    }

    pub fn snapshot(&self) -> QueryMetrics {
        self.inner.lock().map(|m| *m).unwrap_or_default()
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}
