use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractType {
    Saudi,
    #[default]
    #[serde(other)]
    Foreign,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeType {
    Driver,
    #[default]
    #[serde(other)]
    Regular,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SponsorshipStatus {
    Inside,
    #[default]
    #[serde(other)]
    Outside,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Leave,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentStatus {
    Valid,
    Expired,
}

impl DocumentStatus {
    /// Expired strictly before `today`. A document without an expiry date is valid.
    pub fn of(expiry_date: Option<NaiveDate>, today: NaiveDate) -> Self {
        match expiry_date {
            Some(expiry) if expiry < today => DocumentStatus::Expired,
            _ => DocumentStatus::Valid,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NationalityDetail {
    pub name_ar: Option<String>,
    pub code: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmployeeDocument {
    pub doc_type: Option<String>,
    pub expiry_date: Option<NaiveDate>,
}

impl EmployeeDocument {
    pub fn status(&self, today: NaiveDate) -> DocumentStatus {
        DocumentStatus::of(self.expiry_date, today)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SalaryEntry {
    pub month: u32,
    pub year: i32,
    pub basic: Decimal,
    pub allowances: Decimal,
    pub deductions: Decimal,
    pub net: Decimal,
    pub is_paid: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceEntry {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    pub status: AttendanceStatus,
}

/// Flattened employee snapshot for the comprehensive export.
///
/// Every field is optional; relations default to empty collections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmployeeRecord {
    pub employee_id: Option<String>,
    pub name: Option<String>,
    pub national_id: Option<String>,
    pub phone: Option<String>,
    pub phone_secondary: Option<String>,
    pub email: Option<String>,
    pub job_title: Option<String>,
    pub status: Option<String>,
    pub location: Option<String>,
    pub project: Option<String>,
    pub join_date: Option<NaiveDate>,
    pub birth_date: Option<NaiveDate>,
    pub nationality: Option<String>,
    pub nationality_detail: Option<NationalityDetail>,
    pub contract_type: Option<ContractType>,
    pub basic_salary: Option<Decimal>,
    pub contract_status: Option<String>,
    pub license_status: Option<String>,
    pub employee_type: Option<EmployeeType>,
    pub has_mobile_custody: bool,
    pub mobile_type: Option<String>,
    pub mobile_imei: Option<String>,
    pub sponsorship_status: Option<SponsorshipStatus>,
    pub current_sponsor_name: Option<String>,
    pub bank_iban: Option<String>,
    pub has_iban_image: bool,
    pub has_profile_image: bool,
    pub has_national_id_image: bool,
    pub has_license_image: bool,
    pub departments: Vec<String>,
    pub documents: Vec<EmployeeDocument>,
    pub salaries: Vec<SalaryEntry>,
    pub attendances: Vec<AttendanceEntry>,
    pub notes: Option<String>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

impl EmployeeRecord {
    pub fn is_active(&self) -> bool {
        self.status.as_deref().map(str::trim) == Some("active")
    }

    pub fn is_saudi(&self) -> bool {
        self.contract_type == Some(ContractType::Saudi)
    }

    pub fn is_driver(&self) -> bool {
        self.employee_type == Some(EmployeeType::Driver)
    }

    pub fn is_inside_sponsorship(&self) -> bool {
        self.sponsorship_status == Some(SponsorshipStatus::Inside)
    }

    pub fn has_iban(&self) -> bool {
        self.bank_iban.as_deref().is_some_and(|iban| !iban.trim().is_empty())
    }

    /// The salary with the highest (year, month).
    pub fn latest_salary(&self) -> Option<&SalaryEntry> {
        self.salaries.iter().max_by_key(|s| (s.year, s.month))
    }

    /// Records from an array of JSON objects, or a single object.
    /// Entries that do not deserialize are logged and skipped.
    pub fn from_json_lenient(value: serde_json::Value) -> Vec<EmployeeRecord> {
        let entries = match value {
            serde_json::Value::Array(items) => items,
            serde_json::Value::Null => Vec::new(),
            other => vec![other],
        };
        entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| match serde_json::from_value::<EmployeeRecord>(entry) {
                Ok(record) => Some(record),
                Err(e) => {
                    log::warn!("Skipping employee entry {}: {}", index, e);
                    None
                }
            })
            .collect()
    }
}
