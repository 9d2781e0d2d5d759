use aggregator::TracingFailureLog;
use anyhow::{Context, Result};
use api_client::CardApiClient;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use configuration::{LogFormat, MAX_MONTHS, load_config};
use core_types::trailing_month_windows;
use formatting::TransactionFormatter;
use indicatif::{ProgressBar, ProgressStyle};
use report::{CategoryPlan, ReportAssembler, StdoutSink};
use std::path::PathBuf;
use std::sync::Arc;

mod logging;

/// The main entry point for the cardledger report.
#[tokio::main]
async fn main() -> Result<()> {
    // CARDLEDGER__* overrides may live in a .env file; it is optional.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Report(args) => handle_report(args).await,
        Commands::Windows(args) => handle_windows(args),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Rolling-window credit card transaction report.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Query every configured category window by window and print the report.
    Report(ReportArgs),
    /// Print the calendar windows a category with the given look-back would query.
    Windows(WindowsArgs),
}

#[derive(Parser)]
struct ReportArgs {
    /// Path to the TOML configuration file.
    #[arg(long, short, default_value = "config.toml")]
    config: PathBuf,

    /// Reference date of the report (format: YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    as_of: Option<NaiveDate>,

    /// Spaces per indentation level; overrides `report.indent_width`.
    #[arg(long)]
    indent: Option<usize>,

    /// Log output format; overrides `logging.format`.
    #[arg(long, value_enum)]
    log_format: Option<LogFormat>,

    /// Hide the progress bar.
    #[arg(long)]
    no_progress: bool,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Parser)]
struct WindowsArgs {
    /// Number of full months before the reference month.
    #[arg(
        long,
        default_value_t = 24,
        value_parser = clap::value_parser!(u32).range(..=i64::from(MAX_MONTHS))
    )]
    months: u32,

    /// Reference date (format: YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    as_of: Option<NaiveDate>,
}

// ==============================================================================
// Command Logic
// ==============================================================================

async fn handle_report(args: ReportArgs) -> Result<()> {
    let mut config = load_config(&args.config)
        .with_context(|| format!("failed to load configuration from {}", args.config.display()))?;
    if let Some(format) = args.log_format {
        config.logging.format = format;
    }
    let _log_guard = logging::init_logging(&config.logging, args.verbose)?;

    let indent_width = args.indent.unwrap_or(config.report.indent_width);
    anyhow::ensure!(indent_width > 0, "--indent must be at least 1");
    let reference = args.as_of.unwrap_or_else(|| Local::now().date_naive());

    let plans = config
        .report
        .categories
        .iter()
        .map(|settings| {
            let client = CardApiClient::new(&config.api, settings.endpoint_name())
                .with_context(|| format!("failed to build the client for {}", settings.label))?;
            Ok::<_, anyhow::Error>(CategoryPlan::new(
                settings.category,
                settings.label.clone(),
                settings.months,
                Box::new(client),
            ))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut assembler = ReportAssembler::new(plans, Arc::new(TracingFailureLog));
    if !args.no_progress {
        let progress_bar = ProgressBar::new(assembler.total_windows());
        progress_bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
                .progress_chars("#>-"),
        );
        assembler = assembler.with_progress(progress_bar);
    }

    tracing::info!(%reference, indent_width, "Building report.");
    let report = assembler
        .run(reference, &TransactionFormatter::new())
        .await
        .context("the report run was aborted")?;

    report.write_to(&mut StdoutSink::new(), indent_width)?;
    Ok(())
}

fn handle_windows(args: WindowsArgs) -> Result<()> {
    let reference = args.as_of.unwrap_or_else(|| Local::now().date_naive());
    let windows = trailing_month_windows(args.months, reference)?;

    for window in windows {
        println!("{}", window.text());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn windows_months_is_bounded() {
        let cli = Cli::try_parse_from(["cardledger", "windows", "--months", "120"]).unwrap();
        match cli.command {
            Commands::Windows(args) => assert_eq!(args.months, MAX_MONTHS),
            Commands::Report(_) => panic!("parsed the wrong subcommand"),
        }

        assert!(Cli::try_parse_from(["cardledger", "windows", "--months", "121"]).is_err());
        assert!(Cli::try_parse_from(["cardledger", "windows", "--months", "4294967295"]).is_err());
    }

    #[test]
    fn report_flags_parse() {
        let cli = Cli::try_parse_from([
            "cardledger",
            "report",
            "--as-of",
            "2024-03-15",
            "--log-format",
            "json",
            "-vv",
        ])
        .unwrap();
        match cli.command {
            Commands::Report(args) => {
                assert_eq!(args.as_of, NaiveDate::from_ymd_opt(2024, 3, 15));
                assert_eq!(args.log_format, Some(LogFormat::Json));
                assert_eq!(args.verbose, 2);
            }
            Commands::Windows(_) => panic!("parsed the wrong subcommand"),
        }
    }
}
