//! Global `tracing` subscriber setup.
//!
//! `RUST_LOG` wins over everything; otherwise `-v` raises the configured level
//! to debug (`-v`) or trace (`-vv`). Logs go to stderr so the report on stdout
//! stays clean, or to the configured file through a non-blocking appender.

use anyhow::{Context, Result};
use configuration::{LogFormat, LoggingConfig};
use std::io;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, writer::BoxMakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

fn default_directive(config: &LoggingConfig, verbosity: u8) -> String {
    match verbosity {
        0 => config.level.clone(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

/// Installs the subscriber. Keep the returned guard alive until exit so a
/// file appender can flush.
pub fn init_logging(config: &LoggingConfig, verbosity: u8) -> Result<Option<WorkerGuard>> {
    let directive = default_directive(config, verbosity);
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&directive))
        .with_context(|| format!("invalid log level '{}'", directive))?;

    let (writer, guard, ansi) = match &config.file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let name = path
                .file_name()
                .with_context(|| format!("log file '{}' has no file name", path.display()))?;
            let (non_blocking, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name));
            (BoxMakeWriter::new(non_blocking), Some(guard), false)
        }
        None => (BoxMakeWriter::new(io::stderr), None, true),
    };

    let layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(false);
    let registry = tracing_subscriber::registry().with(filter);

    match config.format {
        LogFormat::Json => registry.with(layer.json()).try_init(),
        LogFormat::Compact => registry.with(layer.compact()).try_init(),
        LogFormat::Pretty => registry.with(layer).try_init(),
    }
    .context("failed to install the tracing subscriber")?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_overrides_configured_level() {
        let config = LoggingConfig {
            level: "warn".to_string(),
            format: LogFormat::Compact,
            file: None,
        };
        assert_eq!(default_directive(&config, 0), "warn");
        assert_eq!(default_directive(&config, 1), "debug");
        assert_eq!(default_directive(&config, 3), "trace");
    }
}
