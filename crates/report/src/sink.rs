use crate::error::ReportError;
use std::io::{self, Write};

/// Destination for rendered report lines.
pub trait LineSink {
    fn write_line(&mut self, line: &str) -> Result<(), ReportError>;
}

/// Writes each line to standard output.
#[derive(Debug, Default)]
pub struct StdoutSink;

impl StdoutSink {
    pub fn new() -> Self {
        Self
    }
}

impl LineSink for StdoutSink {
    fn write_line(&mut self, line: &str) -> Result<(), ReportError> {
        let mut out = io::stdout().lock();
        writeln!(out, "{}", line)?;
        Ok(())
    }
}

impl LineSink for Vec<String> {
    fn write_line(&mut self, line: &str) -> Result<(), ReportError> {
        self.push(line.to_string());
        Ok(())
    }
}
