//! Arabic-first report generation.
//!
//! Turns vehicle handovers, workshop histories and salaries into PDFs, and
//! employee records into an XLSX export. Every call returns a usable
//! document: when the Arabic font is missing or an adapter fails, the
//! report degrades to a Latin rendering or a one-page error notice instead
//! of failing. Only cancellation and catastrophic I/O surface as
//! [`ReportError`].
//!
//! ```no_run
//! use nuzum::{ReportConfig, ReportContext, render_workshop_pdf};
//! # fn main() -> Result<(), nuzum::ReportError> {
//! # let vehicle = nuzum::model::Vehicle::default();
//! let ctx = ReportContext::new(ReportConfig::default());
//! let pdf = render_workshop_pdf(&vehicle, &[], &ctx)?;
//! # Ok(())
//! # }
//! ```

mod config;
mod context;
mod error;

pub use config::{LocaleConfig, ReportConfig};
pub use context::{ReportContext, ReportContextBuilder};
pub use error::ReportError;

pub use nuzum_render_core::{AdapterKind, RenderError, RenderOutcome};
pub use nuzum_render_html::HtmlToPdf;
pub use nuzum_templates::SalaryPeriod;
pub use nuzum_traits::{CancellationToken, Clock, FixedClock, ResourceProvider, SystemClock};
pub use nuzum_types::{DocumentId, PageSize, model};

use nuzum_templates::{employee_export, handover, salary, salary_summary, workshop};
use nuzum_types::model::{EmployeeRecord, HandoverView, SalaryView, Vehicle, WorkshopRecord};

pub const CONTENT_TYPE_PDF: &str = "application/pdf";
pub const CONTENT_TYPE_XLSX: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

fn log_outcome(report: &str, outcome: &RenderOutcome) {
    match outcome {
        RenderOutcome::Ok(bytes) => log::debug!("{} rendered ({} bytes)", report, bytes.len()),
        RenderOutcome::Degraded { reason, .. } => log::warn!("{} degraded: {}", report, reason),
        RenderOutcome::Emergency { reason, .. } => log::error!("{} fell back to the error page: {}", report, reason),
    }
}

fn finish(report: &str, outcome: Result<RenderOutcome, RenderError>) -> Result<RenderOutcome, ReportError> {
    let outcome = outcome?;
    log_outcome(report, &outcome);
    Ok(outcome)
}

pub fn render_handover_report(view: &HandoverView, ctx: &ReportContext) -> Result<RenderOutcome, ReportError> {
    finish("Handover report", handover::render(view, ctx.env()))
}

/// The handover form of one vehicle delivery or return.
pub fn render_handover_pdf(view: &HandoverView, ctx: &ReportContext) -> Result<Vec<u8>, ReportError> {
    render_handover_report(view, ctx).map(RenderOutcome::into_bytes)
}

/// The handover form as a standalone right-to-left HTML page.
pub fn render_handover_html(view: &HandoverView, ctx: &ReportContext) -> Result<String, ReportError> {
    Ok(handover::render_html(view, ctx.env())?)
}

pub fn render_workshop_report(
    vehicle: &Vehicle,
    records: &[WorkshopRecord],
    ctx: &ReportContext,
) -> Result<RenderOutcome, ReportError> {
    finish("Workshop report", workshop::render(vehicle, records, ctx.env()))
}

/// The workshop history of `vehicle`, oldest entry first, with totals.
pub fn render_workshop_pdf(
    vehicle: &Vehicle,
    records: &[WorkshopRecord],
    ctx: &ReportContext,
) -> Result<Vec<u8>, ReportError> {
    render_workshop_report(vehicle, records, ctx).map(RenderOutcome::into_bytes)
}

pub fn render_salary_report(view: &SalaryView, ctx: &ReportContext) -> Result<RenderOutcome, ReportError> {
    finish("Salary notification", salary::render(view, ctx.env()))
}

/// The monthly salary notification of one employee.
pub fn render_salary_pdf(view: &SalaryView, ctx: &ReportContext) -> Result<Vec<u8>, ReportError> {
    render_salary_report(view, ctx).map(RenderOutcome::into_bytes)
}

pub fn render_salary_summary_report(
    salaries: &[SalaryView],
    period: SalaryPeriod,
    ctx: &ReportContext,
) -> Result<RenderOutcome, ReportError> {
    finish("Salary summary", salary_summary::render(salaries, period, ctx.env()))
}

/// One landscape table of every salary in `period`, with a totals row.
pub fn render_salary_summary_pdf(
    salaries: &[SalaryView],
    period: SalaryPeriod,
    ctx: &ReportContext,
) -> Result<Vec<u8>, ReportError> {
    render_salary_summary_report(salaries, period, ctx).map(RenderOutcome::into_bytes)
}

pub fn render_employee_export_report(
    employees: impl IntoIterator<Item = EmployeeRecord>,
    ctx: &ReportContext,
) -> Result<RenderOutcome, ReportError> {
    finish("Employee export", employee_export::render(employees, ctx.env()))
}

/// The comprehensive employee workbook: a data sheet and a statistics sheet.
pub fn render_employee_export_xlsx(
    employees: impl IntoIterator<Item = EmployeeRecord>,
    ctx: &ReportContext,
) -> Result<Vec<u8>, ReportError> {
    render_employee_export_report(employees, ctx).map(RenderOutcome::into_bytes)
}
