//! Report templates.
//!
//! Each template lays out its view model on a [`nuzum_render_core::Document`]
//! and walks an adapter chain: the embedded-font PDF first, then the Latin
//! PDF, then a one-page emergency notice. The employee export writes XLSX.

mod chain;
mod common;
pub mod employee_export;
mod env;
pub mod handover;
pub mod salary;
pub mod salary_summary;
pub mod workshop;

#[cfg(test)]
mod testing;

pub use chain::strategy;
pub use common::{ARABIC_PLACEHOLDER, DEGRADED_NOTICE, latin_text};
pub use env::{DEFAULT_DATE_FORMAT, RenderEnv};
pub use salary_summary::{SalaryPeriod, SalaryTotals};
pub use workshop::WorkshopSummary;
