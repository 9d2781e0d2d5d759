//! # Cardledger Report
//!
//! Assembles the rolling-window transaction report: for each configured
//! category, one section per calendar window followed by a runtime summary.

pub mod assembler;
pub mod error;
pub mod sink;

pub use assembler::{CategoryPlan, RUNTIME_SECTION, Report, ReportAssembler, ReportEntry};
pub use error::ReportError;
pub use sink::{LineSink, StdoutSink};
