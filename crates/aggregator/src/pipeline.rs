use crate::classify::classify_payload;
use crate::error::PipelineError;
use crate::failure::{FailureLog, WindowFailure};
use crate::result::AggregationResult;
use api_client::TransactionSource;
use chrono::Utc;
use core_types::{CalendarWindow, Category, QueryInterval};

/// Lifecycle of a single pipeline. `Aggregated` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Querying,
    Aggregated,
    Failed,
}

/// Queries one window for one category and classifies the response.
///
/// A pipeline runs exactly once. Transport and API failures are handed to the
/// [`FailureLog`] and produce an empty, annotated result; an unrecognized
/// response shape is returned as an error.
pub struct Pipeline<'a> {
    category: Category,
    source: &'a dyn TransactionSource,
    failure_log: &'a dyn FailureLog,
    state: PipelineState,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        category: Category,
        source: &'a dyn TransactionSource,
        failure_log: &'a dyn FailureLog,
    ) -> Self {
        Self {
            category,
            source,
            failure_log,
            state: PipelineState::Idle,
        }
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    pub async fn run(&mut self, window: CalendarWindow) -> Result<AggregationResult, PipelineError> {
        if self.state != PipelineState::Idle {
            return Err(PipelineError::AlreadyRun(self.category));
        }
        self.state = PipelineState::Querying;

        let endpoint = self.source.endpoint().clone();
        tracing::info!(
            category = %self.category,
            endpoint = %endpoint,
            window = %window.text(),
            "Querying transactions."
        );

        let started = Utc::now();
        let fetched = self
            .source
            .fetch(&window.start_boundary(), &window.end_boundary())
            .await;
        let runtime = QueryInterval::new(started, Utc::now());

        let payload = match fetched {
            Ok(payload) => payload,
            Err(error) => {
                self.state = PipelineState::Failed;
                self.failure_log.record(&WindowFailure {
                    category: self.category,
                    window: &window,
                    endpoint: &endpoint,
                    error: &error,
                });
                return Ok(AggregationResult::failed(
                    self.category,
                    window,
                    runtime,
                    endpoint,
                    error.to_string(),
                ));
            }
        };

        let lists = match classify_payload(self.category, &payload) {
            Ok(lists) => lists,
            Err(e) => {
                self.state = PipelineState::Failed;
                return Err(e);
            }
        };
        self.state = PipelineState::Aggregated;

        let result = AggregationResult::aggregated(self.category, window, runtime, endpoint, lists);
        tracing::info!(
            category = %self.category,
            items = result.total_items(),
            elapsed = %runtime.elapsed_secs_text(),
            "Window aggregated."
        );
        Ok(result)
    }
}
