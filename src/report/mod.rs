//! Final run report: text lines for the console, JSON for machines.
mod json;
mod text;


use std::path::Path;

use serde::Serialize;

use crate::args::{OutputFormat, Strategy};
use crate::error::{AppError, AppResult, ReportError};
use crate::metrics::SummaryReport;

pub use json::render_json;
pub use text::render_text;

/// Everything printed at the end of a run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RunReport {
    /// RFC 3339 timestamp of the moment the scheduler started.
    pub started_at: String,
    pub url: String,
    pub strategy: Strategy,
    pub concurrency: usize,
    /// Requests asked for on the command line or in the config.
    pub requested: u64,
    pub admitted: u64,
    pub abandoned: u64,
    pub interrupted: bool,
    pub summary: SummaryReport,
}

/// Renders the report in the requested format.
///
/// # Errors
///
/// Returns an error when JSON serialization fails.
pub fn render(report: &RunReport, format: OutputFormat) -> AppResult<String> {
    match format {
        OutputFormat::Text => Ok(render_text(report).join("\n")),
        OutputFormat::Json => render_json(report),
    }
}

/// Writes an already rendered report to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns an error when the file cannot be written.
pub fn write_report(path: &Path, rendered: &str) -> AppResult<()> {
    let mut content = rendered.to_owned();
    if !content.ends_with('\n') {
        content.push('\n');
    }
    std::fs::write(path, content).map_err(|err| {
        AppError::report(ReportError::Write {
            path: path.to_path_buf(),
            source: err,
        })
    })
}
