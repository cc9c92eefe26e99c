use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

const ARABIC_MONTHS: [&str; 12] = [
    "يناير", "فبراير", "مارس", "أبريل", "مايو", "يونيو",
    "يوليو", "أغسطس", "سبتمبر", "أكتوبر", "نوفمبر", "ديسمبر",
];

/// Gregorian month name as used on Saudi payslips. `None` outside `1..=12`.
pub fn arabic_month_name(month: u32) -> Option<&'static str> {
    month.checked_sub(1).and_then(|i| ARABIC_MONTHS.get(i as usize)).copied()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmployeeSummary {
    #[serde(default)]
    pub employee_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub job_title: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Salary {
    pub id: u64,
    pub month: u32,
    pub year: i32,
    #[serde(default)]
    pub basic: Decimal,
    #[serde(default)]
    pub allowances: Decimal,
    #[serde(default)]
    pub bonus: Decimal,
    #[serde(default)]
    pub deductions: Decimal,
    /// Net as stored by the payroll system. The reports print the recomputed value.
    #[serde(default)]
    pub net: Option<Decimal>,
    #[serde(default)]
    pub is_paid: bool,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Salary {
    pub fn total_earnings(&self) -> Decimal {
        self.basic + self.allowances + self.bonus
    }

    pub fn computed_net(&self) -> Decimal {
        self.total_earnings() - self.deductions
    }

    /// The stored net when it disagrees with the recomputed one by more than half a cent.
    pub fn net_mismatch(&self) -> Option<Decimal> {
        let stored = self.net?;
        let tolerance = Decimal::new(5, 3);
        ((stored - self.computed_net()).abs() > tolerance).then_some(stored)
    }
}

/// A salary with the employee and first department it is issued to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalaryView {
    pub salary: Salary,
    #[serde(default)]
    pub employee: Option<EmployeeSummary>,
    #[serde(default)]
    pub department: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample() -> Salary {
        Salary {
            id: 1,
            month: 3,
            year: 2025,
            basic: dec!(5000),
            allowances: dec!(1000),
            bonus: dec!(500),
            deductions: dec!(200),
            net: Some(dec!(6300)),
            ..Default::default()
        }
    }

    #[test]
    fn recomputes_net() {
        let s = sample();
        assert_eq!(s.total_earnings(), dec!(6500));
        assert_eq!(s.computed_net(), dec!(6300));
        assert_eq!(s.net_mismatch(), None);
    }

    #[test]
    fn flags_stored_net_mismatch() {
        let s = Salary { net: Some(dec!(6000)), ..sample() };
        assert_eq!(s.net_mismatch(), Some(dec!(6000)));
    }

    #[test]
    fn month_names() {
        assert_eq!(arabic_month_name(1), Some("يناير"));
        assert_eq!(arabic_month_name(12), Some("ديسمبر"));
        assert_eq!(arabic_month_name(0), None);
        assert_eq!(arabic_month_name(13), None);
    }

    #[test]
    fn amounts_deserialize_from_numbers_and_strings() {
        let s: Salary = serde_json::from_str(
            r#"{"id":9,"month":3,"year":2025,"basic":5000,"allowances":"1000.50"}"#,
        )
        .unwrap();
        assert_eq!(s.basic, dec!(5000));
        assert_eq!(s.allowances, dec!(1000.50));
        assert_eq!(s.net, None);
    }
}
