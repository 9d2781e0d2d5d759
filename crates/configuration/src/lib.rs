use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{ApiConfig, CategorySettings, Config, LogFormat, LoggingConfig, ReportSettings};

/// Longest look-back accepted for a single category.
pub const MAX_MONTHS: u32 = 120;

/// Loads the application configuration.
///
/// Values are layered: built-in defaults, then the TOML file at `path` (if it
/// exists), then `CARDLEDGER__SECTION__KEY` environment variables.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(config::Environment::with_prefix("CARDLEDGER").separator("__"))
        .build()?;

    let config = builder.try_deserialize::<Config>()?;
    validate(&config)?;

    tracing::debug!(path = %path.display(), categories = config.report.categories.len(), "Configuration loaded.");
    Ok(config)
}

/// Parses configuration from an in-memory TOML document.
pub fn parse_config(toml: &str) -> Result<Config, ConfigError> {
    let config = config::Config::builder()
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()?
        .try_deserialize::<Config>()?;
    validate(&config)?;
    Ok(config)
}

/// Rejects configurations the report cannot be built from.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.report.indent_width == 0 {
        return Err(ConfigError::invalid("report.indent_width", "must be at least 1"));
    }
    if config.report.categories.is_empty() {
        return Err(ConfigError::invalid(
            "report.categories",
            "must list at least one category",
        ));
    }
    for category in &config.report.categories {
        if category.months > MAX_MONTHS {
            return Err(ConfigError::invalid(
                "report.categories.months",
                format!(
                    "category '{}' asks for {} months; the limit is {}",
                    category.label, category.months, MAX_MONTHS
                ),
            ));
        }
        if category.label.trim().is_empty() {
            return Err(ConfigError::invalid(
                "report.categories.label",
                format!("category '{}' needs a non-empty label", category.category),
            ));
        }
    }
    if config.api.base_url.trim().is_empty() {
        return Err(ConfigError::invalid("api.base_url", "must not be empty"));
    }
    Ok(())
}
