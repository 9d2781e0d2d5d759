use api_client::{ApiError, Endpoint};
use core_types::{CalendarWindow, Category};
use std::sync::{Arc, Mutex};

/// Everything known about a window whose query failed.
#[derive(Debug, Clone, Copy)]
pub struct WindowFailure<'a> {
    pub category: Category,
    pub window: &'a CalendarWindow,
    pub endpoint: &'a Endpoint,
    pub error: &'a ApiError,
}

impl WindowFailure<'_> {
    /// `"{category} {endpoint} {window}: {error}"`.
    pub fn message(&self) -> String {
        format!(
            "{} {} {}: {}",
            self.category,
            self.endpoint.source_text(),
            self.window.text(),
            self.error
        )
    }
}

/// Receives recoverable query failures. The pipeline never re-raises them.
pub trait FailureLog: Send + Sync {
    fn record(&self, failure: &WindowFailure<'_>);
}

impl<T: FailureLog + ?Sized> FailureLog for Arc<T> {
    fn record(&self, failure: &WindowFailure<'_>) {
        (**self).record(failure)
    }
}

/// Emits each failure as a `tracing` error event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingFailureLog;

impl FailureLog for TracingFailureLog {
    fn record(&self, failure: &WindowFailure<'_>) {
        tracing::error!(
            category = %failure.category,
            endpoint = %failure.endpoint,
            window = %failure.window.text(),
            code = ?failure.error.code(),
            error = %failure.error,
            "Transaction query failed; the window is reported empty."
        );
    }
}

/// Keeps failure messages in memory.
#[derive(Debug, Default)]
pub struct MemoryFailureLog {
    entries: Mutex<Vec<String>>,
}

impl MemoryFailureLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FailureLog for MemoryFailureLog {
    fn record(&self, failure: &WindowFailure<'_>) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(failure.message());
        }
    }
}
