//! Newtype wrappers for printed document identifiers.

use chrono::NaiveDate;
use std::fmt;
use std::sync::Arc;

/// The identifier printed in every report footer.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct DocumentId(Arc<str>);

impl DocumentId {
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    /// `HND-000042`
    pub fn handover(id: u64) -> Self {
        Self::new(format!("HND-{:06}", id))
    }

    /// `WSH-3220-ABC-20250120`
    pub fn workshop(plate: &str, issued: NaiveDate) -> Self {
        Self::new(format!("WSH-{}-{}", plate.trim(), issued.format("%Y%m%d")))
    }

    /// `SAL-17-2025-03`
    pub fn salary(id: u64, year: i32, month: u32) -> Self {
        Self::new(format!("SAL-{}-{}-{:02}", id, year, month))
    }

    /// `SUM-2025-03`, or `SUM-ALL` when the summary spans every period.
    pub fn salary_summary(period: Option<(i32, u32)>) -> Self {
        match period {
            Some((year, month)) => Self::new(format!("SUM-{}-{:02}", year, month)),
            None => Self::new("SUM-ALL"),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for DocumentId {
    fn from(s: String) -> Self {
        Self(s.into())
    }
}

impl From<&str> for DocumentId {
    fn from(s: &str) -> Self {
        Self(s.into())
    }
}

impl AsRef<str> for DocumentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn salary_id_pads_month() {
        assert_eq!(DocumentId::salary(7, 2025, 3).as_str(), "SAL-7-2025-03");
        assert!(DocumentId::salary(7, 2025, 12).as_str().ends_with("-12"));
    }

    #[test]
    fn handover_and_workshop_ids() {
        assert_eq!(DocumentId::handover(42).to_string(), "HND-000042");
        let day = NaiveDate::from_ymd_opt(2025, 1, 20).unwrap();
        assert_eq!(DocumentId::workshop(" 3220-ABC ", day).as_str(), "WSH-3220-ABC-20250120");
    }

    #[test]
    fn summary_id_without_period() {
        assert_eq!(DocumentId::salary_summary(None).as_str(), "SUM-ALL");
        assert_eq!(DocumentId::salary_summary(Some((2024, 11))).as_str(), "SUM-2024-11");
    }
}
