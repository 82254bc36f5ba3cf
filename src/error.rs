use std::io;
use std::path::PathBuf;

use plotters::drawing::DrawingAreaErrorKind;
use thiserror::Error;

/// Failures surfaced to the operator. The aggregation functions never produce
/// one of these; an empty year range is a valid (empty) result.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("dataset '{path}' is missing required column '{column}'")]
    MissingColumn { path: PathBuf, column: &'static str },
    #[error("unsupported dataset extension: .{0}")]
    UnsupportedFormat(String),
    #[error("export directory '{0}' does not exist")]
    ExportDirMissing(PathBuf),
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("chart rendering failed: {0}")]
    Render(#[from] DrawingAreaErrorKind<io::Error>),
    #[error(transparent)]
    Io(#[from] io::Error),
}
