use core_types::Category;
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub report: ReportSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the transaction API lives. Missing keys fall back to `Default`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Scheme and host, e.g. "https://www.creditcard.com".
    pub base_url: String,
    /// Path prefix shared by every endpoint, e.g. "api/v1".
    pub subpath: String,
    /// Per-request timeout applied by the HTTP client. `None` waits forever.
    pub request_timeout_secs: Option<u64>,
}

/// Shape of the generated report.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportSettings {
    /// Spaces per nesting level in the rendered output.
    #[serde(default = "default_indent_width")]
    pub indent_width: usize,
    /// Categories in the order they appear in the report.
    #[serde(default = "default_categories")]
    pub categories: Vec<CategorySettings>,
}

/// One category of transactions and how far back to query it.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CategorySettings {
    pub category: Category,
    /// Section label, e.g. "settled transactions".
    pub label: String,
    /// Number of full prior months; a month-to-date window is always added.
    pub months: u32,
    /// Overrides the category's default endpoint name.
    #[serde(default)]
    pub endpoint: Option<String>,
}

impl CategorySettings {
    pub fn endpoint_name(&self) -> &str {
        self.endpoint
            .as_deref()
            .unwrap_or_else(|| self.category.default_endpoint())
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum LogFormat {
    /// Human-readable multi-line format.
    #[default]
    Pretty,
    /// Compact single-line format.
    Compact,
    /// JSON format for machine parsing.
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset (e.g. "info").
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
    /// When set, logs go to this file instead of stderr.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

// --- Default Implementations ---
// These mirror the deployment the report was written for: two years of settled
// transactions followed by one quarter of authorizations.

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.creditcard.com".to_string(),
            subpath: "api/v1".to_string(),
            request_timeout_secs: None,
        }
    }
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            indent_width: default_indent_width(),
            categories: default_categories(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
            file: None,
        }
    }
}

fn default_indent_width() -> usize {
    2
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_categories() -> Vec<CategorySettings> {
    vec![
        CategorySettings {
            category: Category::Settled,
            label: "settled transactions".to_string(),
            months: 24,
            endpoint: None,
        },
        CategorySettings {
            category: Category::Authorized,
            label: "authorized transactions".to_string(),
            months: 3,
            endpoint: None,
        },
    ]
}
