mod common;

use common::fixtures::{handover, salary, vehicle, workshop_records};
use common::{GeneratedPdf, TestResult, degraded_context, degraded_context_from, emergency_context};
use nuzum::model::HandoverKind;
use nuzum::{
    CONTENT_TYPE_PDF, LocaleConfig, ReportConfig, ReportContext, ReportError, render_handover_pdf, render_salary_pdf,
    render_workshop_pdf, render_workshop_report,
};
use std::sync::Arc;
use std::thread;

#[test]
fn emergency_mode_skips_embedded_adapter() -> TestResult {
    let ctx = emergency_context();
    let outcome = render_workshop_report(&vehicle(), &workshop_records(), &ctx)?;
    assert_eq!(outcome.reason(), Some("emergency mode"));
    let pdf = GeneratedPdf::from_bytes(outcome.into_bytes())?;
    assert!(common::pdf_assertions::font_names(&pdf.doc).iter().any(|f| f.starts_with("Helvetica")));
    assert!(!common::pdf_assertions::has_embedded_font(&pdf.doc));
    Ok(())
}

#[test]
fn cancelled_context_returns_cancelled() {
    let ctx = degraded_context();
    ctx.cancellation().cancel();
    assert!(matches!(render_salary_pdf(&salary(), &ctx), Err(ReportError::Cancelled)));
    assert!(matches!(render_handover_pdf(&handover(HandoverKind::Delivery), &ctx), Err(ReportError::Cancelled)));
}

#[test]
fn renders_in_parallel_on_a_shared_context() -> TestResult {
    let ctx = Arc::new(degraded_context());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let ctx = Arc::clone(&ctx);
            thread::spawn(move || {
                let mut view = salary();
                view.salary.id = i;
                render_salary_pdf(&view, &ctx)
            })
        })
        .collect();

    for handle in handles {
        let bytes = handle.join().map_err(|_| "render thread panicked")??;
        assert!(bytes.starts_with(b"%PDF-"));
    }
    Ok(())
}

#[test]
fn context_new_uses_process_registry() -> TestResult {
    let dir = tempfile::tempdir()?;
    let config = ReportConfig {
        fonts_dir: dir.path().join("fonts"),
        assets_root: dir.path().to_path_buf(),
        ..Default::default()
    };
    let first = ReportContext::new(config.clone());
    let second = ReportContext::new(config);
    assert!(std::ptr::eq(first.fonts(), second.fonts()));

    // no logo on disk: the header simply has none
    let bytes = render_salary_pdf(&salary(), &first)?;
    assert!(bytes.starts_with(b"%PDF-"));
    assert_eq!(CONTENT_TYPE_PDF, "application/pdf");
    Ok(())
}

#[test]
fn unparsable_date_format_renders_iso_dates() -> TestResult {
    let config = ReportConfig { locale: LocaleConfig { date_format: "%Q".into() }, ..Default::default() };
    let ctx = degraded_context_from(config);

    let salary_pdf = GeneratedPdf::from_bytes(render_salary_pdf(&salary(), &ctx)?)?;
    assert!(salary_pdf.contains_text("2025-01-20"));
    let workshop_pdf = GeneratedPdf::from_bytes(render_workshop_pdf(&vehicle(), &workshop_records(), &ctx)?)?;
    assert!(workshop_pdf.contains_text("2025-01-20"));
    Ok(())
}
