use chrono::NaiveDate;
use nuzum::model::{
    Checklist, EmployeeRecord, EmployeeSummary, FuelLevel, Handover, HandoverKind, HandoverView, Salary, SalaryView,
    Vehicle, VehicleStatus, WorkshopReason, WorkshopRecord, WorkshopStatus,
};
use rust_decimal_macros::dec;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn vehicle() -> Vehicle {
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

pub fn handover(kind: HandoverKind) -> HandoverView {
    HandoverView::new(
        Handover {
            id: 42,
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
        vehicle(),
    )
}

pub fn workshop_records() -> Vec<WorkshopRecord> {
    vec![
        WorkshopRecord {
            entry_date: date(2024, 12, 1),
            exit_date: Some(date(2024, 12, 5)),
            reason: WorkshopReason::Maintenance,
            status: WorkshopStatus::Completed,
            workshop_name: Some("Al-Noor".into()),
            technician_name: None,
            cost: dec!(500.00),
            description: None,
        },
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
    ]
}

pub fn salary() -> SalaryView {
    SalaryView {
        salary: Salary {
            id: 17,
            month: 3,
            year: 2025,
            basic: dec!(5000),
            allowances: dec!(1000),
            bonus: dec!(500),
            deductions: dec!(200),
            net: Some(dec!(6300)),
            is_paid: false,
            notes: Some("Includes overtime".into()),
        },
        employee: Some(EmployeeSummary {
            employee_id: "E-100".into(),
            name: "Mohammed Ali".into(),
            job_title: Some("Driver".into()),
        }),
        department: Some("Transport".into()),
    }
}

pub fn minimal_employee() -> EmployeeRecord {
    EmployeeRecord {
        employee_id: Some("E-1".into()),
        name: Some("أحمد".into()),
        ..Default::default()
    }
}
