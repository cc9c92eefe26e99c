#![allow(dead_code)]

pub mod fixtures;
pub mod pdf_assertions;
pub mod xlsx_assertions;

use lopdf::Document as LopdfDocument;
use nuzum::{FixedClock, ReportConfig, ReportContext};
use nuzum_fonts::{FontOptions, FontRegistry};
use nuzum_traits::InMemoryResourceProvider;
use std::sync::Arc;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// 2025-01-20 12:00, the date every fixture is written against.
pub fn fixed_clock() -> Arc<FixedClock> {
    Arc::new(FixedClock::on(2025, 1, 20).expect("valid date"))
}

fn context_with(config: ReportConfig, fonts: Arc<FontRegistry>, resources: Arc<InMemoryResourceProvider>) -> ReportContext {
    init_logging();
    ReportContext::builder(config)
        .fonts(fonts)
        .resources(resources)
        .timestamp_provider(fixed_clock())
        .build()
}

/// No Arabic font: every PDF goes through the Latin adapter.
pub fn degraded_context() -> ReportContext {
    context_with(
        ReportConfig::default(),
        Arc::new(FontRegistry::degraded()),
        Arc::new(InMemoryResourceProvider::new()),
    )
}

pub fn degraded_context_with(resources: Arc<InMemoryResourceProvider>) -> ReportContext {
    context_with(ReportConfig::default(), Arc::new(FontRegistry::degraded()), resources)
}

/// Degraded registry with a caller-supplied configuration.
pub fn degraded_context_from(config: ReportConfig) -> ReportContext {
    context_with(config, Arc::new(FontRegistry::degraded()), Arc::new(InMemoryResourceProvider::new()))
}

pub fn emergency_context() -> ReportContext {
    let config = ReportConfig { emergency_mode: true, ..Default::default() };
    context_with(config, Arc::new(FontRegistry::degraded()), Arc::new(InMemoryResourceProvider::new()))
}

/// An Arabic-capable registry from the system fonts, if the machine has one.
pub fn system_arabic_registry() -> Option<Arc<FontRegistry>> {
    let empty = tempfile::tempdir().ok()?;
    let options = FontOptions { preferred_font: None, system_fonts: true };
    let registry = FontRegistry::load(empty.path(), &options);
    (!registry.is_degraded()).then(|| Arc::new(registry))
}

/// A context on the embedded-font adapter, or the degraded one when the
/// machine has no Arabic font.
pub fn best_context() -> (ReportContext, bool) {
    match system_arabic_registry() {
        Some(fonts) => (context_with(ReportConfig::default(), fonts, Arc::new(InMemoryResourceProvider::new())), true),
        None => {
            log::warn!("No Arabic system font found; checking the degraded path instead");
            (degraded_context(), false)
        }
    }
}

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Every string shown with `Tj`/`TJ`, in content-stream order.
    /// Shown text, decoded through ToUnicode maps for embedded fonts.
    pub fn strings(&self) -> Vec<String> {
        pdf_assertions::decoded_strings(&self.doc)
    }

    pub fn text(&self) -> String {
        self.strings().join("\n")
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.strings().iter().any(|s| s.contains(needle))
    }

    /// Save PDF to a file for manual debugging
    pub fn save_for_debug(&self, name: &str) -> std::io::Result<()> {
        std::fs::write(format!("test_output_{}.pdf", name), &self.bytes)
    }
}
