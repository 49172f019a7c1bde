mod document;
mod workbook;

pub use document::{Block, Page, ReportDocument};
pub use workbook::{Sheet, Workbook};

use crate::dashboard::DashboardState;

/// Error enumeration for report exports.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The aggregation has not completed; callers surface a "please wait"
    /// signal instead of emitting a document with missing sections.
    #[error("les métriques ne sont pas encore prêtes, veuillez patienter")]
    NotReady,
    #[error("failed to serialize sheet data: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to write export: {0}")]
    Io(#[from] std::io::Error),
}

/// Build the multi-sheet workbook for the current dashboard, refusing to
/// run unless an aggregation pass has completed.
pub fn export_workbook(state: &DashboardState) -> Result<Workbook, ExportError> {
    let report = state.report().ok_or(ExportError::NotReady)?;
    Ok(workbook::build(report))
}

/// Build the paginated report document under the same readiness gate.
pub fn export_document(state: &DashboardState) -> Result<ReportDocument, ExportError> {
    let report = state.report().ok_or(ExportError::NotReady)?;
    Ok(document::build(report))
}
