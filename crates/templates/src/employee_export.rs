//! Comprehensive employee export: one data sheet and one statistics sheet.

use crate::env::RenderEnv;
use chrono::NaiveDate;
use nuzum_render_core::{RenderError, RenderOutcome};
use nuzum_render_xlsx::{CellValue, SheetSpec, WorkbookSpec, emergency_workbook};
use nuzum_types::model::{AttendanceStatus, DocumentStatus, EmployeeRecord};
use nuzum_types::money::round_money;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

pub const DATA_SHEET: &str = "البيانات الشاملة";
pub const STATS_SHEET: &str = "الإحصائيات العامة";
const STATS_TITLE: &str = "الإحصائيات العامة للموظفين";
const NO_DEPARTMENT: &str = "بدون قسم";

pub const COLUMNS: [&str; 58] = [
    "رقم الموظف",
    "الاسم",
    "الرقم الوطني/الإقامة",
    "رقم الهاتف",
    "رقم الهاتف الثاني",
    "البريد الإلكتروني",
    "المنصب/الوظيفة",
    "الحالة الوظيفية",
    "الأقسام",
    "عدد الأقسام",
    "الموقع",
    "المشروع",
    "تاريخ الانضمام",
    "تاريخ الميلاد",
    "الجنسية",
    "الجنسية التفصيلية",
    "رمز الجنسية",
    "نوع العقد",
    "الراتب الأساسي",
    "حالة العقد",
    "حالة الرخصة",
    "نوع الموظف",
    "لديه عهدة جوال",
    "نوع الجوال",
    "رقم IMEI",
    "حالة الكفالة",
    "اسم الكفيل الحالي",
    "رقم الإيبان",
    "لديه صورة إيبان",
    "لديه صورة شخصية",
    "لديه صورة هوية",
    "لديه صورة رخصة",
    "عدد الوثائق",
    "أنواع الوثائق",
    "الوثائق السارية",
    "الوثائق المنتهية",
    "عدد الرواتب المسجلة",
    "متوسط الراتب الأساسي",
    "متوسط صافي الراتب",
    "متوسط البدلات",
    "متوسط الخصومات",
    "أعلى راتب",
    "أدنى راتب",
    "آخر راتب - الشهر",
    "آخر راتب - السنة",
    "آخر راتب - الأساسي",
    "آخر راتب - صافي",
    "آخر راتب - البدلات",
    "آخر راتب - الخصومات",
    "آخر راتب - مدفوع",
    "عدد سجلات الحضور",
    "أيام الحضور",
    "أيام الغياب",
    "أيام الإجازة",
    "نسبة الحضور %",
    "ملاحظات",
    "تاريخ الإنشاء",
    "تاريخ آخر تحديث",
];

fn yes_no(flag: bool) -> CellValue {
    CellValue::text(if flag { "نعم" } else { "لا" })
}

fn money(value: Decimal) -> CellValue {
    CellValue::Number(round_money(value).to_f64().unwrap_or(0.0))
}

fn date_cell(date: Option<NaiveDate>) -> CellValue {
    CellValue::text(date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default())
}

/// `part / whole` as a percentage rounded to two places; 0 for an empty whole.
fn percent(part: usize, whole: usize) -> Decimal {
    if whole == 0 {
        return Decimal::ZERO;
    }
    round_money(Decimal::from(part as u64) * Decimal::ONE_HUNDRED / Decimal::from(whole as u64))
}

/// Both sides of a binary split. The second is the complement of the first,
/// so the pair always sums to 100 (or both are 0 for no rows).
fn split(part: usize, whole: usize) -> (Decimal, Decimal) {
    if whole == 0 {
        return (Decimal::ZERO, Decimal::ZERO);
    }
    let first = percent(part, whole);
    (first, Decimal::ONE_HUNDRED - first)
}

fn average(values: &[Decimal]) -> Decimal {
    if values.is_empty() {
        return Decimal::ZERO;
    }
    values.iter().sum::<Decimal>() / Decimal::from(values.len() as u64)
}

/// Why a record was left out of the export.
fn rejection(record: &EmployeeRecord) -> Option<&'static str> {
    let blank = |v: &Option<String>| v.as_deref().is_none_or(|s| s.trim().is_empty());
    (blank(&record.name) && blank(&record.employee_id)).then_some("neither a name nor an employee id")
}

/// One data-sheet row, column for column with [`COLUMNS`].
pub fn employee_row(record: &EmployeeRecord, today: NaiveDate) -> Vec<CellValue> {
    let text = |v: &Option<String>| CellValue::opt_text(v.as_deref().map(str::trim));
    let mut row = Vec::with_capacity(COLUMNS.len());

    row.extend([
        text(&record.employee_id),
        text(&record.name),
        text(&record.national_id),
        text(&record.phone),
        text(&record.phone_secondary),
        text(&record.email),
        text(&record.job_title),
        text(&record.status),
    ]);

    let departments: Vec<&str> =
        record.departments.iter().map(|d| d.trim()).filter(|d| !d.is_empty()).collect();
    row.push(if departments.is_empty() {
        CellValue::text(NO_DEPARTMENT)
    } else {
        CellValue::text(departments.join(" | "))
    });
    row.push(departments.len().into());

    row.extend([
        text(&record.location),
        text(&record.project),
        date_cell(record.join_date),
        date_cell(record.birth_date),
        text(&record.nationality),
    ]);
    let detail = record.nationality_detail.as_ref();
    row.push(CellValue::opt_text(detail.and_then(|d| d.name_ar.as_deref())));
    row.push(CellValue::opt_text(detail.and_then(|d| d.code.as_deref())));
    row.push(CellValue::text(if record.is_saudi() { "سعودي" } else { "وافد" }));

    row.push(money(record.basic_salary.unwrap_or_default()));
    row.push(text(&record.contract_status));
    row.push(text(&record.license_status));

    row.push(CellValue::text(if record.is_driver() { "سائق" } else { "عادي" }));
    row.push(yes_no(record.has_mobile_custody));
    row.push(text(&record.mobile_type));
    row.push(text(&record.mobile_imei));

    row.push(CellValue::text(if record.is_inside_sponsorship() { "على الكفالة" } else { "خارج الكفالة" }));
    row.push(text(&record.current_sponsor_name));

    row.push(text(&record.bank_iban));
    row.push(yes_no(record.has_iban_image));
    row.push(yes_no(record.has_profile_image));
    row.push(yes_no(record.has_national_id_image));
    row.push(yes_no(record.has_license_image));

    push_document_columns(&mut row, record, today);
    push_salary_columns(&mut row, record);
    push_attendance_columns(&mut row, record);

    row.push(text(&record.notes));
    for stamp in [record.created_at, record.updated_at] {
        row.push(CellValue::text(stamp.map(|t| t.format("%Y-%m-%d %H:%M").to_string()).unwrap_or_default()));
    }
    row
}

fn push_document_columns(row: &mut Vec<CellValue>, record: &EmployeeRecord, today: NaiveDate) {
    let mut kinds: Vec<&str> = Vec::new();
    for kind in record.documents.iter().filter_map(|d| d.doc_type.as_deref()).map(str::trim) {
        if !kind.is_empty() && !kinds.contains(&kind) {
            kinds.push(kind);
        }
    }
    let (valid, expired) = record.documents.iter().fold((0usize, 0usize), |(v, e), d| match d.status(today) {
        DocumentStatus::Valid => (v + 1, e),
        DocumentStatus::Expired => (v, e + 1),
    });
    row.push(record.documents.len().into());
    row.push(CellValue::text(kinds.join(" | ")));
    row.push(valid.into());
    row.push(expired.into());
}

fn push_salary_columns(row: &mut Vec<CellValue>, record: &EmployeeRecord) {
    let salaries = &record.salaries;
    let collect = |f: fn(&nuzum_types::model::SalaryEntry) -> Decimal| salaries.iter().map(f).collect::<Vec<_>>();
    let nets: Vec<Decimal> = salaries.iter().map(|s| s.net).filter(|n| !n.is_zero()).collect();

    row.push(salaries.len().into());
    row.push(money(average(&collect(|s| s.basic))));
    row.push(money(average(&collect(|s| s.net))));
    row.push(money(average(&collect(|s| s.allowances))));
    row.push(money(average(&collect(|s| s.deductions))));
    row.push(money(nets.iter().copied().max().unwrap_or_default()));
    row.push(money(nets.iter().copied().min().unwrap_or_default()));

    match record.latest_salary() {
        Some(latest) => {
            row.push(CellValue::Integer(i64::from(latest.month)));
            row.push(CellValue::Integer(i64::from(latest.year)));
            row.push(money(latest.basic));
            row.push(money(latest.net));
            row.push(money(latest.allowances));
            row.push(money(latest.deductions));
            row.push(yes_no(latest.is_paid));
        }
        None => {
            row.extend([0i64, 0].map(CellValue::Integer));
            row.extend([Decimal::ZERO; 4].map(money));
            row.push(CellValue::text(""));
        }
    }
}

fn push_attendance_columns(row: &mut Vec<CellValue>, record: &EmployeeRecord) {
    let total = record.attendances.len();
    let count = |status: AttendanceStatus| record.attendances.iter().filter(|a| a.status == status).count();
    let present = count(AttendanceStatus::Present);
    row.push(total.into());
    row.push(present.into());
    row.push(count(AttendanceStatus::Absent).into());
    row.push(count(AttendanceStatus::Leave).into());
    row.push(CellValue::Number(percent(present, total).to_f64().unwrap_or(0.0)));
}

/// Counts over the exported rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportStats {
    pub total: usize,
    pub active: usize,
    pub saudi: usize,
    pub drivers: usize,
    pub mobile_custody: usize,
    pub inside_sponsorship: usize,
    pub with_profile_image: usize,
    pub with_id_image: usize,
    pub with_license_image: usize,
    pub with_iban_image: usize,
    pub with_iban: usize,
}

impl ExportStats {
    pub fn of<'r>(records: impl IntoIterator<Item = &'r EmployeeRecord>) -> Self {
        records.into_iter().fold(Self::default(), |mut s, r| {
            s.total += 1;
            s.active += usize::from(r.is_active());
            s.saudi += usize::from(r.is_saudi());
            s.drivers += usize::from(r.is_driver());
            s.mobile_custody += usize::from(r.has_mobile_custody);
            s.inside_sponsorship += usize::from(r.is_inside_sponsorship());
            s.with_profile_image += usize::from(r.has_profile_image);
            s.with_id_image += usize::from(r.has_national_id_image);
            s.with_license_image += usize::from(r.has_license_image);
            s.with_iban_image += usize::from(r.has_iban_image);
            s.with_iban += usize::from(r.has_iban());
            s
        })
    }

    /// (metric, value) rows of the statistics sheet.
    pub fn rows(&self, exported_at: &str) -> Vec<(String, CellValue)> {
        let n = self.total;
        let pct = |d: Decimal| CellValue::Number(d.to_f64().unwrap_or(0.0));
        let (active_pct, inactive_pct) = split(self.active, n);
        let (saudi_pct, foreign_pct) = split(self.saudi, n);
        let (driver_pct, regular_pct) = split(self.drivers, n);
        let (inside_pct, outside_pct) = split(self.inside_sponsorship, n);

        let mut rows: Vec<(&str, CellValue)> = vec![
            ("إجمالي الموظفين", n.into()),
            ("الموظفون النشطون", self.active.into()),
            ("الموظفون غير النشطين", (n - self.active).into()),
            ("نسبة النشطين %", pct(active_pct)),
            ("نسبة غير النشطين %", pct(inactive_pct)),
            ("الموظفون السعوديون", self.saudi.into()),
            ("الموظفون الوافدون", (n - self.saudi).into()),
            ("نسبة السعوديين %", pct(saudi_pct)),
            ("نسبة الوافدين %", pct(foreign_pct)),
            ("السائقون", self.drivers.into()),
            ("الموظفون العاديون", (n - self.drivers).into()),
            ("نسبة السائقين %", pct(driver_pct)),
            ("نسبة العاديين %", pct(regular_pct)),
            ("لديهم عهدة جوال", self.mobile_custody.into()),
            ("نسبة العُهد %", pct(percent(self.mobile_custody, n))),
            ("على الكفالة", self.inside_sponsorship.into()),
            ("خارج الكفالة", (n - self.inside_sponsorship).into()),
            ("نسبة على الكفالة %", pct(inside_pct)),
            ("نسبة خارج الكفالة %", pct(outside_pct)),
            ("لديهم صورة شخصية", self.with_profile_image.into()),
            ("لديهم صورة هوية", self.with_id_image.into()),
            ("لديهم صورة رخصة", self.with_license_image.into()),
            ("لديهم صورة إيبان", self.with_iban_image.into()),
            ("لديهم رقم إيبان", self.with_iban.into()),
            ("نسبة اكتمال الصور الشخصية %", pct(percent(self.with_profile_image, n))),
            ("نسبة اكتمال صور الهوية %", pct(percent(self.with_id_image, n))),
            ("نسبة اكتمال صور الرخص %", pct(percent(self.with_license_image, n))),
            ("نسبة اكتمال المعلومات البنكية %", pct(percent(self.with_iban, n))),
        ];
        rows.push(("تاريخ التصدير", CellValue::text(exported_at)));
        rows.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
    }
}

/// Both sheets for the records that pass validation.
pub fn build_workbook(
    records: impl IntoIterator<Item = EmployeeRecord>,
    env: &RenderEnv,
) -> Result<WorkbookSpec, RenderError> {
    let today = env.today();
    let mut data = SheetSpec::new(DATA_SHEET).header(COLUMNS);
    let mut exported: Vec<EmployeeRecord> = Vec::new();

    for (index, record) in records.into_iter().enumerate() {
        if index % 100 == 0 {
            env.check_cancelled()?;
        }
        if let Some(reason) = rejection(&record) {
            log::warn!("Skipping employee row {}: {}", index, reason);
            continue;
        }
        data.push_row(employee_row(&record, today));
        exported.push(record);
    }
    env.check_cancelled()?;

    let stats = ExportStats::of(&exported);
    let exported_at = env.clock.now().format("%Y-%m-%d %H:%M:%S").to_string();
    let mut summary = SheetSpec::new(STATS_SHEET).title(STATS_TITLE).header(["المقياس", "القيمة"]);
    for (metric, value) in stats.rows(&exported_at) {
        summary.push_row(vec![CellValue::Text(metric), value]);
    }

    log::info!("Employee export: {} rows exported", exported.len());
    Ok(WorkbookSpec::new().sheet(data).sheet(summary))
}

/// The export as XLSX bytes. A workbook that cannot be written yields the
/// one-sheet emergency workbook.
pub fn render(records: impl IntoIterator<Item = EmployeeRecord>, env: &RenderEnv) -> Result<RenderOutcome, RenderError> {
    let built = build_workbook(records, env).and_then(|spec| spec.build());
    match built {
        Ok(bytes) => Ok(RenderOutcome::Ok(bytes)),
        Err(RenderError::Cancelled) => Err(RenderError::Cancelled),
        Err(e) => {
            let reason = e.to_string();
            let bytes = emergency_workbook(&reason)?;
            Ok(RenderOutcome::Emergency { bytes, reason })
        }
    }
}
