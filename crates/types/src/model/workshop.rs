use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const UNSPECIFIED_AR: &str = "غير محدد";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkshopReason {
    Maintenance,
    Breakdown,
    Accident,
    #[serde(other)]
    Unknown,
}

impl WorkshopReason {
    pub fn arabic_label(&self) -> &'static str {
        match self {
            WorkshopReason::Maintenance => "صيانة دورية",
            WorkshopReason::Breakdown => "عطل",
            WorkshopReason::Accident => "حادث",
            WorkshopReason::Unknown => UNSPECIFIED_AR,
        }
    }

    pub fn english_label(&self) -> &'static str {
        match self {
            WorkshopReason::Maintenance => "Maintenance",
            WorkshopReason::Breakdown => "Breakdown",
            WorkshopReason::Accident => "Accident",
            WorkshopReason::Unknown => "Unspecified",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkshopStatus {
    InProgress,
    Completed,
    PendingApproval,
    #[serde(other)]
    Unknown,
}

impl WorkshopStatus {
    pub fn arabic_label(&self) -> &'static str {
        match self {
            WorkshopStatus::InProgress => "قيد التنفيذ",
            WorkshopStatus::Completed => "تم الإصلاح",
            WorkshopStatus::PendingApproval => "بانتظار الموافقة",
            WorkshopStatus::Unknown => UNSPECIFIED_AR,
        }
    }

    pub fn english_label(&self) -> &'static str {
        match self {
            WorkshopStatus::InProgress => "In progress",
            WorkshopStatus::Completed => "Completed",
            WorkshopStatus::PendingApproval => "Pending approval",
            WorkshopStatus::Unknown => "Unspecified",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkshopRecord {
    pub entry_date: NaiveDate,
    #[serde(default)]
    pub exit_date: Option<NaiveDate>,
    pub reason: WorkshopReason,
    pub status: WorkshopStatus,
    #[serde(default)]
    pub workshop_name: Option<String>,
    #[serde(default)]
    pub technician_name: Option<String>,
    #[serde(default)]
    pub cost: Decimal,
    #[serde(default)]
    pub description: Option<String>,
}

impl WorkshopRecord {
    /// Whole days between entry and exit, or `today` while the vehicle is still in.
    /// Never negative.
    pub fn days_in_workshop(&self, today: NaiveDate) -> i64 {
        let end = self.exit_date.unwrap_or(today);
        (end - self.entry_date).num_days().max(0)
    }

    pub fn is_in_progress(&self) -> bool {
        self.status == WorkshopStatus::InProgress
    }
}
