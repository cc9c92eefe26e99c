use crate::types::AdapterKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PDF generation error: {0}")]
    Pdf(String),
    #[error("Template rendering error: {0}")]
    Template(#[from] handlebars::RenderError),
    #[error("Template syntax error: {0}")]
    TemplateSyntax(#[from] handlebars::TemplateError),
    #[error("Spreadsheet generation error: {0}")]
    Xlsx(String),
    #[error("Image error: {0}")]
    Image(String),
    #[error("{adapter} renderer unavailable: {reason}")]
    RendererUnavailable { adapter: AdapterKind, reason: String },
    #[error("No usable font: {0}")]
    MissingFont(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Rendering cancelled")]
    Cancelled,
    #[error("Other rendering error: {0}")]
    Other(String),
}

impl RenderError {
    pub fn unavailable(adapter: AdapterKind, reason: impl Into<String>) -> Self {
        RenderError::RendererUnavailable { adapter, reason: reason.into() }
    }
}

impl From<lopdf::Error> for RenderError {
    fn from(err: lopdf::Error) -> Self {
        RenderError::Pdf(err.to_string())
    }
}

impl From<&str> for RenderError {
    fn from(s: &str) -> Self {
        RenderError::Other(s.to_string())
    }
}
