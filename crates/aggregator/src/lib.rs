//! # Cardledger Aggregator
//!
//! One [`Pipeline`] per category and window: query the [`TransactionSource`],
//! classify the payload into keyed lists and hand back an [`AggregationResult`]
//! that can render itself as a report fragment.
//!
//! [`TransactionSource`]: api_client::TransactionSource

pub mod classify;
pub mod error;
pub mod failure;
pub mod pipeline;
pub mod result;

pub use classify::{Classifier, PURCHASE_LIST, PayloadSection, classifier_for, classify_payload};
pub use error::PipelineError;
pub use failure::{FailureLog, MemoryFailureLog, TracingFailureLog, WindowFailure};
pub use pipeline::{Pipeline, PipelineState};
pub use result::{AggregationResult, QueryOutcome};
