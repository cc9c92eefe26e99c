//! View models handed to the report templates.
//!
//! These are snapshots assembled by the caller. Templates only borrow them.

pub mod employee;
pub mod handover;
pub mod salary;
pub mod vehicle;
pub mod workshop;

pub use employee::{
    AttendanceEntry, AttendanceStatus, ContractType, DocumentStatus, EmployeeDocument,
    EmployeeRecord, EmployeeType, NationalityDetail, SalaryEntry, SponsorshipStatus,
};
pub use handover::{Checklist, ChecklistItem, FuelLevel, Handover, HandoverKind, HandoverView, Signatures};
pub use salary::{arabic_month_name, EmployeeSummary, Salary, SalaryView};
pub use vehicle::{Vehicle, VehicleStatus};
pub use workshop::{WorkshopReason, WorkshopRecord, WorkshopStatus};
