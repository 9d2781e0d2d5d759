use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid argument for {0}: {1}")]
    InvalidArgument(String, String),
}
