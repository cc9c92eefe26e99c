//! Monthly salary summary across employees.

use crate::chain::{PdfReport, render_pdf};
use crate::common::{footer_info, header_with_logo, latin_text};
use crate::env::RenderEnv;
use crate::salary::riyals;
use nuzum_render_core::{ColumnSpec, Document, ParagraphStyle, RenderError, RenderOutcome, TableRow, TableSpec};
use nuzum_types::model::{SalaryView, arabic_month_name};
use nuzum_types::{DocumentId, PageSetup, format_amount, format_amount_plain};
use rust_decimal::Decimal;

pub const NO_SALARIES: &str = "لا توجد رواتب مسجلة لهذه الفترة";

/// Optional year and month filters. Both unset means every period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SalaryPeriod {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

impl SalaryPeriod {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn month(year: i32, month: u32) -> Self {
        Self { year: Some(year), month: Some(month) }
    }

    pub fn matches(&self, view: &SalaryView) -> bool {
        self.year.is_none_or(|y| y == view.salary.year) && self.month.is_none_or(|m| m == view.salary.month)
    }

    fn as_pair(&self) -> Option<(i32, u32)> {
        self.year.zip(self.month)
    }

    fn describe(&self, arabic: bool) -> String {
        match (self.year, self.month) {
            (Some(y), Some(m)) if arabic => {
                format!("{} {}", arabic_month_name(m).unwrap_or("-"), y)
            }
            (Some(y), Some(m)) => format!("{}/{}", m, y),
            (Some(y), None) => y.to_string(),
            (None, Some(m)) if arabic => arabic_month_name(m).unwrap_or("-").to_string(),
            (None, Some(m)) => format!("Month {}", m),
            (None, None) if arabic => "جميع الفترات".to_string(),
            (None, None) => "All periods".to_string(),
        }
    }
}

/// Column sums over the salaries in the period.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SalaryTotals {
    pub count: usize,
    pub basic: Decimal,
    pub allowances: Decimal,
    pub bonus: Decimal,
    pub deductions: Decimal,
    pub net: Decimal,
}

impl SalaryTotals {
    pub fn of<'v>(views: impl IntoIterator<Item = &'v SalaryView>) -> Self {
        views.into_iter().fold(Self::default(), |mut t, v| {
            let s = &v.salary;
            t.count += 1;
            t.basic += s.basic;
            t.allowances += s.allowances;
            t.bonus += s.bonus;
            t.deductions += s.deductions;
            t.net += s.computed_net();
            t
        })
    }
}

pub(crate) struct SalarySummaryReport<'a> {
    views: Vec<&'a SalaryView>,
    period: SalaryPeriod,
}

impl<'a> SalarySummaryReport<'a> {
    pub(crate) fn new(views: &'a [SalaryView], period: SalaryPeriod) -> Self {
        let mut views: Vec<&SalaryView> = views.iter().filter(|v| period.matches(v)).collect();
        views.sort_by(|a, b| {
            (a.salary.year, a.salary.month, employee_name(a)).cmp(&(b.salary.year, b.salary.month, employee_name(b)))
        });
        Self { views, period }
    }

    fn totals(&self) -> SalaryTotals {
        SalaryTotals::of(self.views.iter().copied())
    }

    fn table(&self, arabic: bool) -> TableSpec {
        let header = if arabic {
            ["اسم الموظف", "الراتب الأساسي", "البدلات", "المكافآت", "الخصومات", "صافي الراتب"]
        } else {
            ["Employee", "Basic", "Allowances", "Bonus", "Deductions", "Net"]
        };
        let amount = |v: Decimal| if arabic { format_amount(v) } else { format_amount_plain(v) };
        let mut table = TableSpec::new(vec![
            ColumnSpec::new(2.2),
            ColumnSpec::numeric(1.0),
            ColumnSpec::numeric(1.0),
            ColumnSpec::numeric(1.0),
            ColumnSpec::numeric(1.0),
            ColumnSpec::numeric(1.1),
        ])
        .header(header)
        .font_size(9.0);

        for view in &self.views {
            let s = &view.salary;
            let name = employee_name(view);
            let name = if arabic { name } else { latin_text(&name) };
            table.push(TableRow::new(vec![
                name.into(),
                amount(s.basic).into(),
                amount(s.allowances).into(),
                amount(s.bonus).into(),
                amount(s.deductions).into(),
                amount(s.computed_net()).into(),
            ]));
        }

        let t = self.totals();
        table.push(
            TableRow::new(vec![
                (if arabic { "المجموع" } else { "Total" }).into(),
                amount(t.basic).into(),
                amount(t.allowances).into(),
                amount(t.bonus).into(),
                amount(t.deductions).into(),
                amount(t.net).into(),
            ])
            .fill(nuzum_types::Palette::NUZUM.header_bg)
            .bold(),
        );
        table
    }
}

fn employee_name(view: &SalaryView) -> String {
    match &view.employee {
        Some(e) if !e.name.trim().is_empty() => e.name.trim().to_string(),
        Some(e) => e.employee_id.clone(),
        None => format!("#{}", view.salary.id),
    }
}

impl PdfReport for SalarySummaryReport<'_> {
    fn title(&self) -> String {
        format!("Salary Summary {}", DocumentId::salary_summary(self.period.as_pair()))
    }

    fn page_setup(&self, env: &RenderEnv) -> PageSetup {
        PageSetup::new(env.page_size).landscape()
    }

    fn validate(&self) -> Result<(), RenderError> {
        match self.period.month {
            Some(m) if !(1..=12).contains(&m) => {
                Err(RenderError::InvalidInput(format!("salary summary: month {} out of range", m)))
            }
            _ => Ok(()),
        }
    }

    fn layout(&self, doc: &mut Document, env: &RenderEnv) -> Result<(), RenderError> {
        let arabic = doc.supports_arabic();
        let primary = doc.palette().primary.clone();
        doc.color_strip(3.0, primary);
        let (title, subtitle) = if arabic {
            ("ملخص الرواتب", format!("الفترة: {}", self.period.describe(true)))
        } else {
            ("Salary Summary", format!("Period: {}", self.period.describe(false)))
        };
        doc.header(&header_with_logo(title, env).subtitle(subtitle));
        env.check_cancelled()?;

        if self.views.is_empty() {
            let text = if arabic { NO_SALARIES } else { "No salaries recorded for this period" };
            doc.paragraph(text, ParagraphStyle::Body);
        } else {
            doc.rtl_table(&self.table(arabic));
        }
        env.check_cancelled()?;

        let totals = self.totals();
        let pairs = if arabic {
            vec![
                ("عدد الرواتب".to_string(), totals.count.to_string()),
                ("إجمالي صافي الرواتب".to_string(), riyals(totals.net)),
            ]
        } else {
            vec![
                ("Salaries".to_string(), totals.count.to_string()),
                ("Total net".to_string(), format!("{} SAR", format_amount_plain(totals.net))),
            ]
        };
        doc.paragraph(if arabic { "ملخص" } else { "Summary" }, ParagraphStyle::Heading);
        doc.kv_table(&pairs);

        let id = DocumentId::salary_summary(self.period.as_pair());
        let caption = if arabic {
            "هذا المستند مُولد إلكترونياً من نظام نُظم لإدارة الموظفين"
        } else {
            "Generated by the Nuzum employee management system"
        };
        let footer = footer_info(doc, env, id.as_str()).caption(caption);
        doc.footer(footer);
        Ok(())
    }

    fn emergency_lines(&self, failure: &RenderError) -> Vec<String> {
        if matches!(failure, RenderError::InvalidInput(_)) {
            return vec!["Unable to render salary summary".to_string(), format!("Period: {}", self.period.describe(false))];
        }
        let totals = self.totals();
        vec![
            "SALARY SUMMARY".to_string(),
            format!("Period: {}", self.period.describe(false)),
            format!("Salaries: {}", totals.count),
            format!("Total Net: {} SAR", format_amount_plain(totals.net)),
        ]
    }
}

/// The salary summary for `period` as a landscape PDF.
pub fn render(views: &[SalaryView], period: SalaryPeriod, env: &RenderEnv) -> Result<RenderOutcome, RenderError> {
    render_pdf(&SalarySummaryReport::new(views, period), env)
}
