use core_types::Category;
use document::DocumentError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    #[error("Unrecognized response shape for {category} query at '{key}': {reason}")]
    UnrecognizedResponseShape {
        category: Category,
        key: String,
        reason: String,
    },

    #[error("Pipeline for {0} has already run; create a new one per window")]
    AlreadyRun(Category),

    #[error("Failed to build the report fragment: {0}")]
    Document(#[from] DocumentError),
}
