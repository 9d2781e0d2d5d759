use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read the report configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Invalid value for '{field}': {reason}")]
    ValidationError { field: String, reason: String },
}

impl ConfigError {
    pub(crate) fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::ValidationError {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
