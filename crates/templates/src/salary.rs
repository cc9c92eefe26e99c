//! Monthly salary notification for one employee.

use crate::chain::{PdfReport, render_pdf};
use crate::common::{footer_info, header_with_logo, latin_text, or_dash};
use crate::env::RenderEnv;
use nuzum_render_core::{ColumnSpec, Document, ParagraphStyle, RenderError, RenderOutcome, TableRow, TableSpec};
use nuzum_types::model::{SalaryView, arabic_month_name};
use nuzum_types::{DocumentId, format_amount, format_amount_plain};
use rust_decimal::Decimal;

const NOTES_LIMIT: usize = 200;
pub const CURRENCY_AR: &str = "ر.س";

/// `1,700.00 ر.س`
pub fn riyals(value: Decimal) -> String {
    format!("{} {}", format_amount(value), CURRENCY_AR)
}

/// `5000 SAR`
fn sar(value: Decimal) -> String {
    format!("{} SAR", format_amount_plain(value))
}

/// At most 200 characters, with an ellipsis when cut.
pub fn truncate_notes(notes: &str) -> String {
    let notes = notes.trim();
    if notes.chars().count() <= NOTES_LIMIT {
        return notes.to_string();
    }
    let cut: String = notes.chars().take(NOTES_LIMIT).collect();
    format!("{}...", cut)
}

pub(crate) struct SalaryReport<'a> {
    view: &'a SalaryView,
}

impl<'a> SalaryReport<'a> {
    pub(crate) fn new(view: &'a SalaryView) -> Self {
        Self { view }
    }

    fn document_id(&self) -> DocumentId {
        let s = &self.view.salary;
        DocumentId::salary(s.id, s.year, s.month)
    }

    fn footer(&self, doc: &Document, env: &RenderEnv, arabic: bool) -> nuzum_render_core::FooterInfo {
        let s = &self.view.salary;
        let caption = if arabic {
            let paid = if s.is_paid { "مدفوع" } else { "غير مدفوع" };
            format!("تاريخ الإصدار: {} | حالة الدفع: {}", env.timestamp(), paid)
        } else {
            let paid = if s.is_paid { "Paid" } else { "Unpaid" };
            format!("Issued: {} | Payment status: {}", env.timestamp(), paid)
        };
        let mut footer = footer_info(doc, env, self.document_id().as_str()).caption(caption);
        if let Some(stored) = s.net_mismatch() {
            log::warn!(
                "Salary {}: stored net {} differs from computed {}; printing the computed value",
                s.id,
                stored,
                s.computed_net()
            );
            footer = footer.note(if arabic {
                format!("تمت إعادة حساب صافي الراتب (القيمة المخزنة {})", format_amount(stored))
            } else {
                format!("Net salary recomputed (stored value {})", format_amount_plain(stored))
            });
        }
        footer
    }

    fn layout_arabic(&self, doc: &mut Document, env: &RenderEnv) -> Result<(), RenderError> {
        let s = &self.view.salary;
        let employee = self.view.employee.as_ref().ok_or_else(|| self.invalid("no employee"))?;
        let month = arabic_month_name(s.month).ok_or_else(|| self.invalid("month out of range"))?;

        let success = doc.palette().success.clone();
        let primary = doc.palette().primary.clone();
        doc.color_strip(3.0, primary);
        let header = header_with_logo("إشعار راتب", env)
            .subtitle(format!("التاريخ: {}", env.format_date(env.today())))
            .badge("نُظم", success.clone());
        doc.header(&header);
        env.check_cancelled()?;

        doc.paragraph("معلومات الموظف", ParagraphStyle::Heading);
        let mut pairs = vec![
            ("الاسم".to_string(), employee.name.clone()),
            ("رقم الموظف".to_string(), employee.employee_id.clone()),
            ("القسم".to_string(), or_dash(self.view.department.as_deref())),
        ];
        if let Some(title) = employee.job_title.as_deref().filter(|t| !t.trim().is_empty()) {
            pairs.push(("المنصب".to_string(), title.to_string()));
        }
        doc.kv_table(&pairs);
        env.check_cancelled()?;

        doc.paragraph("تفاصيل الراتب", ParagraphStyle::Heading);
        let mut details = TableSpec::new(vec![ColumnSpec::new(1.0), ColumnSpec::numeric(1.0)])
            .header(["البند", "المبلغ"])
            .font_size(10.5);
        for (label, value) in [
            ("الشهر", format!("{} {}", month, s.year)),
            ("الراتب الأساسي", riyals(s.basic)),
            ("البدلات", riyals(s.allowances)),
            ("المكافآت", riyals(s.bonus)),
            ("إجمالي المستحقات", riyals(s.total_earnings())),
            ("الخصومات", riyals(s.deductions)),
        ] {
            details.push(TableRow::new(vec![label.into(), value.into()]));
        }
        details.push(
            TableRow::new(vec!["صافي الراتب".into(), riyals(s.computed_net()).into()])
                .fill(success)
                .text_color(nuzum_types::Color::WHITE)
                .bold(),
        );
        doc.rtl_table(&details);
        env.check_cancelled()?;

        if let Some(notes) = s.notes.as_deref().filter(|n| !n.trim().is_empty()) {
            doc.paragraph("ملاحظات", ParagraphStyle::Heading);
            doc.paragraph(&truncate_notes(notes), ParagraphStyle::Body);
        }

        let mut footer = self.footer(doc, env, true);
        footer.caption = footer
            .caption
            .map(|c| format!("{} | هذا المستند مُولد إلكترونياً من نظام نُظم لإدارة الموظفين", c));
        doc.footer(footer);
        Ok(())
    }

    fn layout_latin(&self, doc: &mut Document, env: &RenderEnv) -> Result<(), RenderError> {
        let s = &self.view.salary;
        let employee = self.view.employee.as_ref().ok_or_else(|| self.invalid("no employee"))?;

        let success = doc.palette().success.clone();
        let primary = doc.palette().primary.clone();
        doc.color_strip(3.0, primary);
        doc.header(
            &header_with_logo("Salary Notification", env)
                .subtitle(format!("Date: {}", env.format_date(env.today())))
                .badge("Nuzum", success.clone()),
        );
        env.check_cancelled()?;

        doc.paragraph("Employee", ParagraphStyle::Heading);
        doc.paragraph(&format!("Employee: {}", latin_text(&employee.name)), ParagraphStyle::Body);
        doc.paragraph(&format!("ID: {}", latin_text(&employee.employee_id)), ParagraphStyle::Body);
        if let Some(department) = self.view.department.as_deref().filter(|d| !d.trim().is_empty()) {
            doc.paragraph(&format!("Department: {}", latin_text(department)), ParagraphStyle::Body);
        }
        if let Some(title) = employee.job_title.as_deref().filter(|t| !t.trim().is_empty()) {
            doc.paragraph(&format!("Position: {}", latin_text(title)), ParagraphStyle::Body);
        }
        env.check_cancelled()?;

        doc.paragraph("Salary details", ParagraphStyle::Heading);
        for line in [
            format!("Month: {}/{}", s.month, s.year),
            format!("Basic Salary: {}", sar(s.basic)),
            format!("Allowances: {}", sar(s.allowances)),
            format!("Bonus: {}", sar(s.bonus)),
            format!("Total Earnings: {}", sar(s.total_earnings())),
            format!("Deductions: {}", sar(s.deductions)),
        ] {
            doc.paragraph(&line, ParagraphStyle::Body);
        }
        doc.banner(&format!("Net Salary: {}", sar(s.computed_net())), success);
        env.check_cancelled()?;

        if let Some(notes) = s.notes.as_deref().filter(|n| !n.trim().is_empty()) {
            doc.paragraph("Notes", ParagraphStyle::Heading);
            doc.paragraph(&latin_text(&truncate_notes(notes)), ParagraphStyle::Body);
        }

        let footer = self.footer(doc, env, false);
        doc.footer(footer);
        Ok(())
    }

    fn invalid(&self, what: &str) -> RenderError {
        RenderError::InvalidInput(format!("salary {}: {}", self.view.salary.id, what))
    }
}

impl PdfReport for SalaryReport<'_> {
    fn title(&self) -> String {
        format!("Salary Notification {}", self.document_id())
    }

    fn validate(&self) -> Result<(), RenderError> {
        if self.view.employee.is_none() {
            return Err(self.invalid("no employee"));
        }
        if !(1..=12).contains(&self.view.salary.month) {
            return Err(self.invalid(&format!("month {} out of range", self.view.salary.month)));
        }
        Ok(())
    }

    fn layout(&self, doc: &mut Document, env: &RenderEnv) -> Result<(), RenderError> {
        if doc.supports_arabic() { self.layout_arabic(doc, env) } else { self.layout_latin(doc, env) }
    }

    fn emergency_lines(&self, failure: &RenderError) -> Vec<String> {
        let s = &self.view.salary;
        if matches!(failure, RenderError::InvalidInput(_)) {
            return vec!["Unable to render salary notification".to_string(), format!("Salary ID: {}", s.id)];
        }
        let (name, id) = self
            .view
            .employee
            .as_ref()
            .map(|e| (latin_text(&e.name), e.employee_id.clone()))
            .unwrap_or_else(|| ("N/A".to_string(), "N/A".to_string()));
        vec![
            "SALARY NOTIFICATION".to_string(),
            format!("Employee: {}", name),
            format!("ID: {}", id),
            format!("Month: {}/{}", s.month, s.year),
            format!("Basic Salary: {}", sar(s.basic)),
            format!("Allowances: {}", sar(s.allowances)),
            format!("Bonus: {}", sar(s.bonus)),
            format!("Deductions: {}", sar(s.deductions)),
            format!("Net Salary: {}", sar(s.computed_net())),
        ]
    }
}

/// The salary notification as a PDF.
pub fn render(view: &SalaryView, env: &RenderEnv) -> Result<RenderOutcome, RenderError> {
    render_pdf(&SalaryReport::new(view), env)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{arabic_doc, latin_doc, sample_salary, test_env};
    use nuzum_render_core::DrawOp;
    use nuzum_types::Color;
    use rust_decimal_macros::dec;

    #[test]
    fn notes_are_cut_at_200_chars() {
        assert_eq!(truncate_notes("  short  "), "short");
        let long = "ن".repeat(250);
        let cut = truncate_notes(&long);
        assert_eq!(cut.chars().count(), 203);
        assert!(cut.ends_with("..."));
        assert_eq!(truncate_notes(&"x".repeat(200)).len(), 200);
    }

    #[test]
    fn net_row_is_green_with_white_bold_text() {
        let env = test_env();
        let view = sample_salary();
        let (mut doc, pages) = arabic_doc(&env);
        SalaryReport::new(&view).layout(&mut doc, &env).unwrap();
        doc.finish().unwrap();

        let net = pages.text_runs().into_iter().find(|r| r.text.as_str().contains("6,300.00")).unwrap();
        assert_eq!(net.color, Color::WHITE);
        assert_eq!(net.font, nuzum_render_core::FontRole::Bold);
        let success = nuzum_types::Palette::NUZUM.success;
        assert!(pages.ops().iter().any(|op| matches!(op, DrawOp::FillRect { color, .. } if *color == success)));
        assert!(pages.texts().iter().any(|t| t.contains("SAL-7-2025-03")));
    }

    #[test]
    fn december_id_ends_with_12() {
        let mut view = sample_salary();
        view.salary.month = 12;
        assert!(SalaryReport::new(&view).document_id().as_str().ends_with("-12"));
    }

    #[test]
    fn stored_net_mismatch_adds_footer_note() {
        let env = test_env();
        let mut view = sample_salary();
        view.salary.net = Some(dec!(6000));
        let (mut doc, pages) = latin_doc(&env);
        SalaryReport::new(&view).layout(&mut doc, &env).unwrap();
        doc.finish().unwrap();

        let texts = pages.texts();
        assert!(texts.iter().any(|t| t.contains("Net salary recomputed (stored value 6000)")));
        assert!(texts.iter().any(|t| t == "Net Salary: 6300 SAR"));
    }

    #[test]
    fn latin_lines_drop_trailing_zeros() {
        let env = test_env();
        let view = sample_salary();
        let (mut doc, pages) = latin_doc(&env);
        SalaryReport::new(&view).layout(&mut doc, &env).unwrap();
        doc.finish().unwrap();

        let texts = pages.texts();
        for line in ["Basic Salary: 5000 SAR", "Allowances: 1000 SAR", "Bonus: 500 SAR", "Deductions: 200 SAR"] {
            assert!(texts.iter().any(|t| t == line), "missing {line}");
        }
        assert!(texts.iter().any(|t| t.contains("Payment status: Paid")));
    }

    #[test]
    fn missing_employee_is_invalid() {
        let mut view = sample_salary();
        view.employee = None;
        let err = SalaryReport::new(&view).validate().unwrap_err();
        assert!(matches!(err, RenderError::InvalidInput(_)));
        let lines = SalaryReport::new(&view).emergency_lines(&err);
        assert_eq!(lines[0], "Unable to render salary notification");
        assert_eq!(lines[1], "Salary ID: 7");
    }

    #[test]
    fn month_thirteen_is_invalid() {
        let mut view = sample_salary();
        view.salary.month = 13;
        assert!(matches!(SalaryReport::new(&view).validate(), Err(RenderError::InvalidInput(_))));
    }
}
