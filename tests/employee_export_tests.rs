mod common;

use calamine::{Data, Reader};
use common::fixtures::minimal_employee;
use common::xlsx_assertions::{as_number, metric, open, sheet};
use common::{TestResult, degraded_context};
use nuzum::model::EmployeeRecord;
use nuzum::{CONTENT_TYPE_XLSX, render_employee_export_report, render_employee_export_xlsx};

const DATA: &str = "البيانات الشاملة";
const STATS: &str = "الإحصائيات العامة";

#[test]
fn minimal_employee_exports_one_row() -> TestResult {
    let ctx = degraded_context();
    let bytes = render_employee_export_xlsx(vec![minimal_employee()], &ctx)?;
    assert_eq!(&bytes[..2], &[0x50, 0x4B]);

    let mut book = open(bytes)?;
    assert_eq!(book.sheet_names(), vec![DATA.to_string(), STATS.to_string()]);

    let data = sheet(&mut book, DATA)?;
    assert_eq!(data.height(), 2);
    assert_eq!(data.get_value((1, 1)), Some(&Data::String("أحمد".into())));
    assert_eq!(data.width(), 58);
    assert_eq!(data.get_value((1, 8)), Some(&Data::String("بدون قسم".into())));
    assert_eq!(data.get_value((1, 9)).and_then(as_number), Some(0.0));

    let stats = sheet(&mut book, STATS)?;
    assert_eq!(metric(&stats, "إجمالي الموظفين").and_then(as_number), Some(1.0));
    assert_eq!(metric(&stats, "الموظفون النشطون").and_then(as_number), Some(0.0));
    for row in stats.rows() {
        if let (Some(Data::String(name)), Some(value)) = (row.first(), row.get(1))
            && name.ends_with('%')
        {
            let pct = as_number(value).ok_or("percentage is not a number")?;
            assert!((0.0..=100.0).contains(&pct), "{name} = {pct}");
        }
    }
    Ok(())
}

#[test]
fn splits_are_complementary() -> TestResult {
    let ctx = degraded_context();
    let employees: Vec<EmployeeRecord> = (0..3)
        .map(|i| EmployeeRecord {
            employee_id: Some(format!("E-{i}")),
            status: Some(if i == 0 { "active" } else { "inactive" }.into()),
            ..Default::default()
        })
        .collect();

    let mut book = open(render_employee_export_xlsx(employees, &ctx)?)?;
    let stats = sheet(&mut book, STATS)?;
    let active = metric(&stats, "نسبة النشطين %").and_then(as_number).ok_or("missing")?;
    let inactive = metric(&stats, "نسبة غير النشطين %").and_then(as_number).ok_or("missing")?;
    assert!((active - 33.33).abs() < 1e-9);
    assert!((active + inactive - 100.0).abs() <= 0.02);
    Ok(())
}

#[test]
fn rows_without_identity_are_skipped() -> TestResult {
    let ctx = degraded_context();
    let nameless = EmployeeRecord { phone: Some("0500000000".into()), ..Default::default() };
    let mut book = open(render_employee_export_xlsx(vec![nameless, minimal_employee()], &ctx)?)?;
    assert_eq!(sheet(&mut book, DATA)?.height(), 2);
    Ok(())
}

#[test]
fn lenient_json_feeds_the_export() -> TestResult {
    let ctx = degraded_context();
    let json = serde_json::json!([
        {"employee_id": "E-9", "name": "Sara", "status": "active", "contract_type": "saudi"},
        {"employee_id": ["bad"]}
    ]);
    let outcome = render_employee_export_report(EmployeeRecord::from_json_lenient(json), &ctx)?;
    assert!(outcome.is_ok());
    assert!(CONTENT_TYPE_XLSX.ends_with(".sheet"));

    let mut book = open(outcome.into_bytes())?;
    let stats = sheet(&mut book, STATS)?;
    assert_eq!(metric(&stats, "الموظفون السعوديون").and_then(as_number), Some(1.0));
    assert_eq!(metric(&stats, "نسبة السعوديين %").and_then(as_number), Some(100.0));
    Ok(())
}

#[test]
fn empty_export_is_still_a_workbook() -> TestResult {
    let ctx = degraded_context();
    let mut book = open(render_employee_export_xlsx(Vec::new(), &ctx)?)?;
    let stats = sheet(&mut book, STATS)?;
    assert_eq!(metric(&stats, "نسبة النشطين %").and_then(as_number), Some(0.0));
    assert_eq!(metric(&stats, "تاريخ التصدير"), Some(&Data::String("2025-01-20 12:00:00".into())));
    Ok(())
}
