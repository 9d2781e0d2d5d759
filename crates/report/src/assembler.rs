use crate::error::ReportError;
use crate::sink::LineSink;
use aggregator::{AggregationResult, FailureLog, Pipeline};
use api_client::TransactionSource;
use chrono::NaiveDate;
use core_types::{Category, trailing_month_windows};
use document::{DocumentError, IndentedDocument};
use formatting::ItemFormatter;
use indicatif::ProgressBar;
use std::sync::Arc;

pub const RUNTIME_SECTION: &str = "Query runtime";

/// One configured category: what to query, how far back, and from where.
pub struct CategoryPlan {
    pub category: Category,
    pub label: String,
    pub months: u32,
    pub source: Box<dyn TransactionSource>,
}

impl CategoryPlan {
    pub fn new(
        category: Category,
        label: impl Into<String>,
        months: u32,
        source: Box<dyn TransactionSource>,
    ) -> Self {
        Self {
            category,
            label: label.into(),
            months,
            source,
        }
    }

    /// Full prior months plus the month-to-date window.
    pub fn window_count(&self) -> u64 {
        u64::from(self.months) + 1
    }
}

/// The outcome of one window, tagged with its category label.
#[derive(Debug, Clone)]
pub struct ReportEntry {
    pub label: String,
    pub result: AggregationResult,
}

/// A finished report: the master document plus every window's result.
#[derive(Debug, Clone)]
pub struct Report {
    document: IndentedDocument,
    entries: Vec<ReportEntry>,
}

impl Report {
    pub fn document(&self) -> &IndentedDocument {
        &self.document
    }

    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    pub fn render(&self, indent_width: usize) -> Vec<String> {
        self.document.render(indent_width)
    }

    pub fn write_to(&self, sink: &mut dyn LineSink, indent_width: usize) -> Result<(), ReportError> {
        for line in self.render(indent_width) {
            sink.write_line(&line)?;
        }
        Ok(())
    }

    pub fn failed_windows(&self) -> Vec<&ReportEntry> {
        self.entries.iter().filter(|e| e.result.is_failed()).collect()
    }
}

/// Drives every category plan, window by window, into one [`Report`].
pub struct ReportAssembler {
    plans: Vec<CategoryPlan>,
    failure_log: Arc<dyn FailureLog>,
    progress: Option<ProgressBar>,
}

impl ReportAssembler {
    pub fn new(plans: Vec<CategoryPlan>, failure_log: Arc<dyn FailureLog>) -> Self {
        Self {
            plans,
            failure_log,
            progress: None,
        }
    }

    /// Ticks `progress` once per queried window.
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn total_windows(&self) -> u64 {
        self.plans.iter().map(CategoryPlan::window_count).sum()
    }

    /// Queries every window in plan order and assembles the report.
    ///
    /// Failed queries leave an annotated, empty section. Invalid windows,
    /// unrecognized response shapes and document errors abort the run.
    pub async fn run(
        &self,
        reference: NaiveDate,
        formatter: &dyn ItemFormatter,
    ) -> Result<Report, ReportError> {
        let outcome = self.assemble(reference, formatter).await;
        if let Some(progress) = &self.progress {
            match &outcome {
                Ok(report) => progress
                    .finish_with_message(format!("{} windows queried", report.entries.len())),
                Err(_) => progress.abandon_with_message("report aborted"),
            }
        }
        outcome
    }

    async fn assemble(
        &self,
        reference: NaiveDate,
        formatter: &dyn ItemFormatter,
    ) -> Result<Report, ReportError> {
        let mut document = IndentedDocument::new();
        let mut entries = Vec::new();

        for plan in &self.plans {
            let windows = trailing_month_windows(plan.months, reference)?;
            tracing::info!(
                category = %plan.category,
                label = %plan.label,
                windows = windows.len(),
                "Starting category."
            );

            for window in windows {
                let header = format!("{} {}", plan.label, window.text());
                if let Some(progress) = &self.progress {
                    progress.set_message(header.clone());
                }

                let mut pipeline =
                    Pipeline::new(plan.category, plan.source.as_ref(), self.failure_log.as_ref());
                let result = pipeline.run(window).await?;
                let fragment = result.fragment(formatter)?;

                document.start_section(&header);
                document.append(&fragment);
                document.end_section(&header);

                if let Some(progress) = &self.progress {
                    progress.inc(1);
                }
                entries.push(ReportEntry {
                    label: plan.label.clone(),
                    result,
                });
            }
        }

        push_runtime_section(&mut document, &entries)?;

        let failed = entries.iter().filter(|e| e.result.is_failed()).count();
        if failed > 0 {
            tracing::warn!(failed, total = entries.len(), "Report finished with failed windows.");
        } else {
            tracing::info!(total = entries.len(), "Report finished.");
        }

        Ok(Report { document, entries })
    }
}

fn push_runtime_section(
    document: &mut IndentedDocument,
    entries: &[ReportEntry],
) -> Result<(), DocumentError> {
    document.start_section(RUNTIME_SECTION);
    for group in entries.chunk_by(|a, b| a.label == b.label) {
        document.push(format!("{}:", group[0].label));
        document.indent()?;
        for entry in group {
            let runtime = entry.result.runtime();
            let failed = if entry.result.is_failed() { " [failed]" } else { "" };
            document.push(format!(
                "{}: {} - {} ({} secs){}",
                entry.result.window().text(),
                runtime.start_text(),
                runtime.end_text(),
                runtime.elapsed_secs_text(),
                failed
            ));
        }
        document.dedent()?;
    }
    document.end_section(&"-".repeat(RUNTIME_SECTION.len()));
    Ok(())
}
