use aggregator::PipelineError;
use core_types::CoreError;
use document::DocumentError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Invalid report window: {0}")]
    Window(#[from] CoreError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("Failed to assemble the report document: {0}")]
    Document(#[from] DocumentError),

    #[error("Failed to write the report: {0}")]
    Io(#[from] std::io::Error),
}
