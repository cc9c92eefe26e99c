use nuzum_fonts::FontRegistry;
use nuzum_render_core::RenderError;
use nuzum_render_html::HtmlToPdf;
use nuzum_traits::{CancellationToken, Clock, InMemoryResourceProvider, ResourceProvider, SystemClock};
use nuzum_types::PageSize;
use std::fmt::{self, Write};
use std::sync::Arc;

/// Date pattern used when none is configured or the configured one is invalid.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Everything a template reads besides its entity. Cheap to clone.
#[derive(Clone)]
pub struct RenderEnv {
    pub fonts: Arc<FontRegistry>,
    pub resources: Arc<dyn ResourceProvider>,
    pub clock: Arc<dyn Clock>,
    pub cancel: CancellationToken,
    pub page_size: PageSize,
    /// strftime pattern for dates.
    pub date_format: String,
    /// Skip the embedded-font and HTML adapters.
    pub emergency_mode: bool,
    /// Asset path of the company logo.
    pub logo_path: Option<String>,
    pub html_converter: Option<Arc<dyn HtmlToPdf>>,
}

impl fmt::Debug for RenderEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderEnv")
            .field("font", &self.fonts.selected_font_name())
            .field("resources", &self.resources.name())
            .field("page_size", &self.page_size)
            .field("date_format", &self.date_format)
            .field("emergency_mode", &self.emergency_mode)
            .field("html_converter", &self.html_converter.as_ref().map(|c| c.name().to_string()))
            .finish()
    }
}

impl RenderEnv {
    /// A degraded-font environment with no assets, on the system clock.
    pub fn new(fonts: Arc<FontRegistry>) -> Self {
        Self {
            fonts,
            resources: Arc::new(InMemoryResourceProvider::new()),
            clock: Arc::new(SystemClock),
            cancel: CancellationToken::new(),
            page_size: PageSize::A4,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            emergency_mode: false,
            logo_path: None,
            html_converter: None,
        }
    }

    pub fn check_cancelled(&self) -> Result<(), RenderError> {
        if self.cancel.is_cancelled() {
            log::info!("Render cancelled by caller");
            return Err(RenderError::Cancelled);
        }
        Ok(())
    }

    pub fn today(&self) -> chrono::NaiveDate {
        self.clock.today()
    }

    /// Formats with the configured pattern, or ISO dates when the pattern
    /// does not parse.
    pub fn format_date(&self, date: chrono::NaiveDate) -> String {
        let mut out = String::new();
        if write!(out, "{}", date.format(&self.date_format)).is_err() {
            log::warn!("Invalid date format '{}'. Using {}", self.date_format, DEFAULT_DATE_FORMAT);
            return date.format(DEFAULT_DATE_FORMAT).to_string();
        }
        out
    }

    /// Issue timestamp printed in footers.
    pub fn timestamp(&self) -> String {
        format!("{} {}", self.format_date(self.today()), self.clock.now().format("%H:%M"))
    }
}
