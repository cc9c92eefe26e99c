//! Workshop history of one vehicle.

use crate::chain::{PdfReport, render_pdf};
use crate::common::{footer_info, header_with_logo, latin_text, vehicle_pairs};
use crate::env::RenderEnv;
use chrono::NaiveDate;
use nuzum_render_core::{ColumnSpec, Document, ParagraphStyle, RenderError, RenderOutcome, TableRow, TableSpec};
use nuzum_types::model::workshop::UNSPECIFIED_AR;
use nuzum_types::model::{Vehicle, WorkshopRecord};
use nuzum_types::{DocumentId, format_amount, format_amount_plain};
use rust_decimal::Decimal;

pub const NO_RECORDS: &str = "لا توجد سجلات ورشة متاحة لهذه المركبة";
pub const STILL_IN_WORKSHOP: &str = "ما زالت في الورشة";

/// Totals printed under the records table. All zero for no records.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkshopSummary {
    pub count: usize,
    pub total_cost: Decimal,
    pub total_days: i64,
    pub average_cost: Decimal,
    pub average_days: f64,
}

impl WorkshopSummary {
    pub fn of<'r>(records: impl IntoIterator<Item = &'r WorkshopRecord>, today: NaiveDate) -> Self {
        let records: Vec<&WorkshopRecord> = records.into_iter().collect();
        let count = records.len();
        let total_cost: Decimal = records.iter().map(|r| r.cost).sum();
        let total_days: i64 = records.iter().map(|r| r.days_in_workshop(today)).sum();
        let (average_cost, average_days) = if count == 0 {
            (Decimal::ZERO, 0.0)
        } else {
            (total_cost / Decimal::from(count as u64), total_days as f64 / count as f64)
        };
        Self { count, total_cost, total_days, average_cost, average_days }
    }

    fn pairs(&self, arabic: bool) -> Vec<(String, String)> {
        let labels = if arabic {
            ["عدد السجلات", "إجمالي التكلفة", "إجمالي أيام الإصلاح", "متوسط التكلفة لكل سجل", "متوسط مدة الإصلاح"]
        } else {
            ["Records", "Total cost", "Total repair days", "Average cost per record", "Average repair duration"]
        };
        let days = if arabic { "يوم" } else { "days" };
        let values = [
            self.count.to_string(),
            format_amount(self.total_cost),
            self.total_days.to_string(),
            format_amount(self.average_cost),
            format!("{:.1} {}", self.average_days, days),
        ];
        labels.iter().map(|l| l.to_string()).zip(values).collect()
    }
}

pub(crate) struct WorkshopReport<'a> {
    vehicle: &'a Vehicle,
    records: Vec<&'a WorkshopRecord>,
    today: NaiveDate,
}

impl<'a> WorkshopReport<'a> {
    pub(crate) fn new(vehicle: &'a Vehicle, records: &'a [WorkshopRecord], today: NaiveDate) -> Self {
        let mut records: Vec<&WorkshopRecord> = records.iter().collect();
        records.sort_by_key(|r| r.entry_date);
        Self { vehicle, records, today }
    }

    fn summary(&self) -> WorkshopSummary {
        WorkshopSummary::of(self.records.iter().copied(), self.today)
    }

    fn row(&self, record: &WorkshopRecord, env: &RenderEnv, arabic: bool) -> TableRow {
        let named = |value: Option<&String>| -> String {
            match value.map(|s| s.trim()).filter(|s| !s.is_empty()) {
                Some(v) if arabic => v.to_string(),
                Some(v) => latin_text(v),
                None if arabic => UNSPECIFIED_AR.to_string(),
                None => "Unspecified".to_string(),
            }
        };
        let exit = match record.exit_date {
            Some(d) => env.format_date(d),
            None if arabic => STILL_IN_WORKSHOP.to_string(),
            None => "Still in workshop".to_string(),
        };
        let (reason, status) = if arabic {
            (record.reason.arabic_label(), record.status.arabic_label())
        } else {
            (record.reason.english_label(), record.status.english_label())
        };
        let row = TableRow::new(vec![
            reason.into(),
            env.format_date(record.entry_date).into(),
            exit.into(),
            record.days_in_workshop(self.today).to_string().into(),
            status.into(),
            named(record.workshop_name.as_ref()).into(),
            named(record.technician_name.as_ref()).into(),
            format_amount(record.cost).into(),
        ]);
        if record.is_in_progress() {
            row.text_color(nuzum_types::Palette::NUZUM.danger)
        } else {
            row
        }
    }

    fn records_table(&self, env: &RenderEnv, arabic: bool) -> TableSpec {
        let header = if arabic {
            ["سبب الدخول", "تاريخ الدخول", "تاريخ الخروج", "عدد الأيام", "الحالة", "الورشة", "الفني", "التكلفة"]
        } else {
            ["Reason", "Entry date", "Exit date", "Days", "Status", "Workshop", "Technician", "Cost"]
        };
        let mut table = TableSpec::new(vec![
            ColumnSpec::new(1.3),
            ColumnSpec::new(1.2),
            ColumnSpec::new(1.4),
            ColumnSpec::numeric(0.7),
            ColumnSpec::new(1.3),
            ColumnSpec::new(1.3),
            ColumnSpec::new(1.2),
            ColumnSpec::numeric(1.2),
        ])
        .header(header)
        .font_size(8.5);
        for record in &self.records {
            table.push(self.row(record, env, arabic));
        }
        table
    }
}

impl PdfReport for WorkshopReport<'_> {
    fn title(&self) -> String {
        format!("Workshop Records Report {}", self.vehicle.plate)
    }

    fn layout(&self, doc: &mut Document, env: &RenderEnv) -> Result<(), RenderError> {
        let arabic = doc.supports_arabic();
        let plate = self.vehicle.plate.trim();
        let title = if arabic {
            format!("تقرير سجلات الورشة للمركبة: {}", plate)
        } else {
            format!("Workshop Records Report: {}", plate)
        };
        let mut header = header_with_logo(title, env);
        if arabic {
            let fill = doc.palette().get(self.vehicle.status.badge()).clone();
            header = header.badge(self.vehicle.status.arabic_label(), fill);
        }
        doc.header(&header);
        env.check_cancelled()?;

        doc.paragraph(if arabic { "بيانات المركبة" } else { "Vehicle" }, ParagraphStyle::Heading);
        doc.kv_table(&vehicle_pairs(self.vehicle, arabic));
        env.check_cancelled()?;

        doc.paragraph(if arabic { "سجلات الورشة" } else { "Workshop records" }, ParagraphStyle::Heading);
        if self.records.is_empty() {
            let text = if arabic { NO_RECORDS } else { "No workshop records available for this vehicle" };
            doc.paragraph(text, ParagraphStyle::Body);
        } else {
            doc.rtl_table(&self.records_table(env, arabic));
        }
        env.check_cancelled()?;

        let summary = self.summary();
        doc.paragraph(if arabic { "ملخص" } else { "Summary" }, ParagraphStyle::Heading);
        doc.kv_table(&summary.pairs(arabic));

        let id = DocumentId::workshop(plate, self.today);
        let caption = if arabic {
            "تم إنشاء هذا التقرير بواسطة نظام نُظم لإدارة المركبات"
        } else {
            "Generated by the Nuzum fleet management system"
        };
        let footer = footer_info(doc, env, id.as_str()).caption(caption);
        doc.footer(footer);
        Ok(())
    }

    fn emergency_lines(&self, _failure: &RenderError) -> Vec<String> {
        let summary = self.summary();
        vec![
            "WORKSHOP RECORDS REPORT".to_string(),
            format!("Plate: {}", self.vehicle.plate),
            format!("Records: {}", summary.count),
            format!("Total cost: {} SAR", format_amount_plain(summary.total_cost)),
        ]
    }
}

/// The workshop report of `vehicle` as a PDF.
pub fn render(vehicle: &Vehicle, records: &[WorkshopRecord], env: &RenderEnv) -> Result<RenderOutcome, RenderError> {
    render_pdf(&WorkshopReport::new(vehicle, records, env.today()), env)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{arabic_doc, date, latin_doc, sample_vehicle, sample_workshop_records, test_env};
    use nuzum_render_core::DrawOp;
    use nuzum_shaper::shape_str;
    use rust_decimal_macros::dec;

    #[test]
    fn summary_of_two_records() {
        let summary = WorkshopSummary::of(&sample_workshop_records(), date(2025, 1, 20));
        assert_eq!(summary.count, 2);
        assert_eq!(summary.total_cost, dec!(1700.00));
        assert_eq!(summary.total_days, 4 + 10);
        assert_eq!(summary.average_cost, dec!(850));
        assert!((summary.average_days - 7.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_summary_is_all_zero() {
        let summary = WorkshopSummary::of(&[], date(2025, 1, 20));
        assert_eq!(summary.count, 0);
        assert_eq!(summary.average_cost, Decimal::ZERO);
        assert_eq!(summary.average_days, 0.0);
        assert_eq!(summary.pairs(true)[4].1, "0.0 يوم");
    }

    #[test]
    fn records_are_sorted_by_entry_date() {
        let records = sample_workshop_records();
        let vehicle = sample_vehicle();
        let report = WorkshopReport::new(&vehicle, &records, date(2025, 1, 20));
        assert_eq!(report.records[0].entry_date, date(2024, 12, 1));
    }

    #[test]
    fn in_progress_row_is_dark_red_and_still_in_workshop() {
        let env = test_env();
        let records = sample_workshop_records();
        let vehicle = sample_vehicle();
        let (mut doc, pages) = arabic_doc(&env);
        WorkshopReport::new(&vehicle, &records, env.today()).layout(&mut doc, &env).unwrap();
        doc.finish().unwrap();

        let danger = nuzum_types::Palette::NUZUM.danger;
        let still = shape_str("زالت");
        let run = pages.text_runs().into_iter().find(|r| r.text.as_str().contains(&still)).unwrap();
        assert_eq!(run.color, danger);
        assert!(pages.texts().iter().any(|t| t == "1,700.00"));
        assert!(pages.texts().iter().any(|t| t.starts_with("WSH-3220-ABC-20250120")));
    }

    #[test]
    fn empty_history_says_so() {
        let env = test_env();
        let vehicle = sample_vehicle();
        let (mut doc, pages) = arabic_doc(&env);
        WorkshopReport::new(&vehicle, &[], env.today()).layout(&mut doc, &env).unwrap();
        doc.finish().unwrap();
        let texts = pages.texts();
        assert!(texts.iter().any(|t| t.contains(&shape_str("سجلات ورشة"))));
        assert!(texts.iter().any(|t| t == "0.00"));
    }

    #[test]
    fn latin_variant_extracts_ascii_names() {
        let env = test_env();
        let records = sample_workshop_records();
        let vehicle = sample_vehicle();
        let (mut doc, pages) = latin_doc(&env);
        WorkshopReport::new(&vehicle, &records, env.today()).layout(&mut doc, &env).unwrap();
        doc.finish().unwrap();

        let texts = pages.texts();
        assert!(texts.iter().any(|t| t == "Al-Noor"));
        assert!(texts.iter().any(|t| t.contains("(Arabic")));
        assert!(texts.iter().any(|t| t.contains("Still in")));
        assert!(!texts.iter().any(|t| t.chars().any(|c| nuzum_shaper::is_arabic(c))));
        assert!(pages.ops().iter().all(|op| !matches!(op, DrawOp::Image { .. })));
    }
}
