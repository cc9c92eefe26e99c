use nuzum_render_core::RenderError;
use thiserror::Error;

/// Errors that escape the public API. Data problems never do: they end in
/// a degraded or emergency document instead.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Report generation was cancelled")]
    Cancelled,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Rendering failed: {0}")]
    Render(RenderError),
}

impl From<RenderError> for ReportError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::Cancelled => ReportError::Cancelled,
            RenderError::Io(e) => ReportError::Io(e),
            other => ReportError::Render(other),
        }
    }
}

impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        ReportError::Config(err.to_string())
    }
}
