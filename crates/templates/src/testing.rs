//! Fixtures for the template tests.

use crate::env::RenderEnv;
use chrono::NaiveDate;
use nuzum_fonts::FontRegistry;
use nuzum_render_core::{Document, RecordedPages, RecordingRenderer};
use nuzum_traits::FixedClock;
use nuzum_types::model::{
    Checklist, EmployeeSummary, FuelLevel, Handover, HandoverKind, HandoverView, Salary, SalaryView, Vehicle,
    VehicleStatus, WorkshopReason, WorkshopRecord, WorkshopStatus,
};
use nuzum_types::PageSetup;
use rust_decimal_macros::dec;
use std::sync::Arc;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Degraded registry, no assets, clock pinned to 2025-01-20 12:00.
pub fn test_env() -> RenderEnv {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut env = RenderEnv::new(Arc::new(FontRegistry::degraded()));
    env.clock = Arc::new(FixedClock::on(2025, 1, 20).unwrap());
    env
}

fn recording_doc(env: &RenderEnv, arabic: bool, setup: PageSetup) -> (Document, RecordedPages) {
    let (renderer, pages) = RecordingRenderer::new(arabic);
    (Document::new(Box::new(renderer), setup, Arc::clone(&env.resources)), pages)
}

pub fn arabic_doc(env: &RenderEnv) -> (Document, RecordedPages) {
    recording_doc(env, true, PageSetup::new(env.page_size))
}

pub fn latin_doc(env: &RenderEnv) -> (Document, RecordedPages) {
    recording_doc(env, false, PageSetup::new(env.page_size))
}

pub fn arabic_landscape_doc(env: &RenderEnv) -> (Document, RecordedPages) {
    recording_doc(env, true, PageSetup::new(env.page_size).landscape())
}

/// Only the resource provider looks at these bytes.
pub fn tiny_png() -> Vec<u8> {
    b"\x89PNG\r\n\x1a\nfixture".to_vec()
}

pub fn sample_vehicle() -> Vehicle {
    Vehicle {
        id: Some(1),
        plate: "3220-ABC".into(),
        make: "Toyota".into(),
        model: "Hilux".into(),
        year: Some(2022),
        color: "White".into(),
        status: VehicleStatus::Available,
    }
}

pub fn sample_handover(kind: HandoverKind) -> HandoverView {
    HandoverView::new(
        Handover {
            id: 1,
            kind,
            date: date(2025, 1, 20),
            time: None,
            person_name: "Test Driver".into(),
            driver_ref: None,
            supervisor: None,
            mileage: 50_000,
            fuel_level: FuelLevel::Full,
            checklist: Checklist::all(true),
            vehicle_condition: None,
            notes: Some("OK".into()),
            form_link: None,
            signatures: Default::default(),
        },
        sample_vehicle(),
    )
}

pub fn sample_workshop_records() -> Vec<WorkshopRecord> {
    vec![
        WorkshopRecord {
            entry_date: date(2025, 1, 10),
            exit_date: None,
            reason: WorkshopReason::Breakdown,
            status: WorkshopStatus::InProgress,
            workshop_name: None,
            technician_name: None,
            cost: dec!(1200.00),
            description: None,
        },
        WorkshopRecord {
            entry_date: date(2024, 12, 1),
            exit_date: Some(date(2024, 12, 5)),
            reason: WorkshopReason::Maintenance,
            status: WorkshopStatus::Completed,
            workshop_name: Some("Al-Noor".into()),
            technician_name: Some("فني أحمد".into()),
            cost: dec!(500.00),
            description: None,
        },
    ]
}

pub fn sample_salary() -> SalaryView {
    SalaryView {
        salary: Salary {
            id: 7,
            month: 3,
            year: 2025,
            basic: dec!(5000),
            allowances: dec!(1000),
            bonus: dec!(500),
            deductions: dec!(200),
            net: Some(dec!(6300)),
            is_paid: true,
            notes: None,
        },
        employee: Some(EmployeeSummary {
            employee_id: "E-100".into(),
            name: "محمد علي".into(),
            job_title: Some("سائق".into()),
        }),
        department: Some("النقل".into()),
    }
}
