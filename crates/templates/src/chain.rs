//! The ordered list of adapters a PDF report is tried on.

use crate::env::RenderEnv;
use nuzum_render_core::{AdapterKind, Document, DocumentRenderer, RenderError, RenderOutcome};
use nuzum_render_html::html_to_pdf;
use nuzum_render_lopdf::{LatinPdfRenderer, minimal_error_pdf};
use nuzum_render_printpdf::EmbeddedPdfRenderer;
use nuzum_types::PageSetup;
use std::sync::Arc;

/// A PDF report that can be laid out on any adapter.
pub(crate) trait PdfReport {
    /// Log name and PDF title.
    fn title(&self) -> String;

    fn page_setup(&self, env: &RenderEnv) -> PageSetup {
        PageSetup::new(env.page_size)
    }

    fn chain(&self, env: &RenderEnv) -> Vec<AdapterKind> {
        strategy(env, false)
    }

    /// `InvalidInput` sends the render straight to the emergency page.
    fn validate(&self) -> Result<(), RenderError> {
        Ok(())
    }

    fn layout(&self, doc: &mut Document, env: &RenderEnv) -> Result<(), RenderError>;

    /// The page handed to the HTML adapter, for reports that have one.
    fn html(&self, _env: &RenderEnv) -> Option<Result<String, RenderError>> {
        None
    }

    /// Latin lines of the last-resort page.
    fn emergency_lines(&self, failure: &RenderError) -> Vec<String>;
}

/// Adapters to try, most capable first. Emergency mode goes straight to
/// the sanitizing Latin adapter.
pub fn strategy(env: &RenderEnv, with_html: bool) -> Vec<AdapterKind> {
    if env.emergency_mode {
        log::info!("Emergency mode enabled. Selecting the Latin adapter only.");
        return vec![AdapterKind::Latin];
    }
    let mut chain = vec![AdapterKind::Embedded];
    if with_html {
        chain.push(AdapterKind::Html);
    }
    chain.push(AdapterKind::Latin);
    chain
}

pub(crate) fn render_pdf(report: &dyn PdfReport, env: &RenderEnv) -> Result<RenderOutcome, RenderError> {
    env.check_cancelled()?;
    let title = report.title();
    if let Err(err) = report.validate() {
        log::warn!("Invalid input for '{}': {}", title, err);
        return Ok(emergency(report, &title, &err));
    }

    let mut failures: Vec<String> = Vec::new();
    for kind in report.chain(env) {
        env.check_cancelled()?;
        match attempt(report, env, kind, &title) {
            Ok(bytes) => {
                log::info!("Rendered '{}' with the {} adapter", title, kind);
                return Ok(classify(kind, bytes, failures, env));
            }
            Err(RenderError::Cancelled) => return Err(RenderError::Cancelled),
            Err(err @ RenderError::InvalidInput(_)) => {
                log::warn!("Invalid input for '{}': {}", title, err);
                return Ok(emergency(report, &title, &err));
            }
            Err(RenderError::RendererUnavailable { adapter: AdapterKind::Html, reason }) => {
                log::debug!("HTML adapter skipped: {}", reason);
            }
            Err(err) => {
                log::warn!("{} adapter failed for '{}': {}. Trying the next one", kind, title, err);
                failures.push(err.to_string());
            }
        }
    }

    let err = RenderError::Other(format!("every adapter failed: {}", failures.join("; ")));
    Ok(emergency(report, &title, &err))
}

fn attempt(report: &dyn PdfReport, env: &RenderEnv, kind: AdapterKind, title: &str) -> Result<Vec<u8>, RenderError> {
    let renderer: Box<dyn DocumentRenderer> = match kind {
        AdapterKind::Embedded => Box::new(EmbeddedPdfRenderer::from_registry(&env.fonts, title)?),
        AdapterKind::Latin => Box::new(LatinPdfRenderer::new()?.with_title(title)),
        AdapterKind::Html => {
            let html = report
                .html(env)
                .unwrap_or_else(|| Err(RenderError::unavailable(AdapterKind::Html, "report has no HTML layout")))?;
            return html_to_pdf(&html, env.html_converter.as_deref());
        }
        AdapterKind::Xlsx => return Err(RenderError::unavailable(kind, "not a PDF adapter")),
    };
    let mut doc = Document::new(renderer, report.page_setup(env), Arc::clone(&env.resources));
    report.layout(&mut doc, env)?;
    doc.finish()
}

fn classify(kind: AdapterKind, bytes: Vec<u8>, failures: Vec<String>, env: &RenderEnv) -> RenderOutcome {
    let reason = if !failures.is_empty() {
        failures.join("; ")
    } else if kind == AdapterKind::Latin {
        if env.emergency_mode { "emergency mode".to_string() } else { "Latin rendering".to_string() }
    } else {
        return RenderOutcome::Ok(bytes);
    };
    log::warn!("Degraded render: {}", reason);
    RenderOutcome::Degraded { bytes, reason }
}

fn emergency(report: &dyn PdfReport, title: &str, failure: &RenderError) -> RenderOutcome {
    let reason = failure.to_string();
    log::error!("Producing the emergency page for '{}': {}", title, reason);
    let mut lines = report.emergency_lines(failure);
    lines.push(String::new());
    lines.push(format!("Reason: {}", reason));
    RenderOutcome::Emergency { bytes: minimal_error_pdf(&lines), reason }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nuzum_fonts::FontRegistry;
    use nuzum_render_core::ParagraphStyle;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Probe {
        invalid: bool,
        fail_layout: bool,
        layouts: AtomicUsize,
    }

    impl PdfReport for Probe {
        fn title(&self) -> String {
            "Probe".into()
        }

        fn validate(&self) -> Result<(), RenderError> {
            if self.invalid { Err(RenderError::InvalidInput("no entity".into())) } else { Ok(()) }
        }

        fn layout(&self, doc: &mut Document, _env: &RenderEnv) -> Result<(), RenderError> {
            self.layouts.fetch_add(1, Ordering::SeqCst);
            if self.fail_layout {
                return Err(RenderError::Other("broken layout".into()));
            }
            doc.paragraph("Probe body", ParagraphStyle::Body);
            Ok(())
        }

        fn emergency_lines(&self, _failure: &RenderError) -> Vec<String> {
            vec!["PROBE".into(), "Unable to render probe".into()]
        }
    }

    fn env() -> RenderEnv {
        let _ = env_logger::builder().is_test(true).try_init();
        RenderEnv::new(Arc::new(FontRegistry::degraded()))
    }

    #[test]
    fn strategy_orders_adapters() {
        let mut env = env();
        assert_eq!(strategy(&env, true), vec![AdapterKind::Embedded, AdapterKind::Html, AdapterKind::Latin]);
        assert_eq!(strategy(&env, false), vec![AdapterKind::Embedded, AdapterKind::Latin]);
        env.emergency_mode = true;
        assert_eq!(strategy(&env, true), vec![AdapterKind::Latin]);
    }

    #[test]
    fn degraded_registry_falls_back_to_latin() {
        let outcome = render_pdf(&Probe::default(), &env()).unwrap();
        assert!(matches!(outcome, RenderOutcome::Degraded { .. }));
        assert!(outcome.reason().unwrap().contains("Arabic"));
        assert!(outcome.bytes().starts_with(b"%PDF-"));
    }

    #[test]
    fn invalid_input_skips_every_adapter() {
        let probe = Probe { invalid: true, ..Default::default() };
        let outcome = render_pdf(&probe, &env()).unwrap();
        assert!(outcome.is_emergency());
        assert_eq!(probe.layouts.load(Ordering::SeqCst), 0);
        let text = String::from_utf8_lossy(outcome.bytes()).to_string();
        assert!(text.contains("Unable to render probe"));
    }

    #[test]
    fn all_adapters_failing_yields_emergency_page() {
        let probe = Probe { fail_layout: true, ..Default::default() };
        let outcome = render_pdf(&probe, &env()).unwrap();
        assert!(outcome.is_emergency());
        assert!(outcome.reason().unwrap().contains("broken layout"));
        assert!(outcome.bytes().starts_with(b"%PDF-"));
    }

    #[test]
    fn cancellation_propagates() {
        let env = env();
        env.cancel.cancel();
        assert!(matches!(render_pdf(&Probe::default(), &env), Err(RenderError::Cancelled)));
    }
}
