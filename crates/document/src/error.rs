use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    #[error("Indentation amount must be a positive integer, not {0}")]
    InvalidArgument(usize),

    #[error("Unable to dedent {requested} levels: current level is {current}")]
    IndentationUnderflow { requested: usize, current: usize },
}
