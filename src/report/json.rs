use crate::error::{AppError, AppResult, ReportError};

use super::RunReport;

/// Pretty-printed JSON. Undefined rates serialize as `null`.
///
/// # Errors
///
/// Returns an error when serialization fails.
pub fn render_json(report: &RunReport) -> AppResult<String> {
    serde_json::to_string_pretty(report)
        .map_err(|err| AppError::report(ReportError::Serialize { source: err }))
}
