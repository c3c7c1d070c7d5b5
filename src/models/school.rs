//! School tenant and expenditure ledger models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{PayPeriod, PayrollSettings};

/// A tenant school.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct School {
    /// Unique identifier for the school.
    pub id: String,
    /// Display name used in messages and payslips.
    pub name: String,
    /// ISO currency code amounts are held in (e.g. "NGN").
    pub currency: String,
    /// Statutory payroll configuration.
    #[serde(default)]
    pub payroll_settings: PayrollSettings,
}

/// Ledger category of an expenditure.
///
/// Payroll runs are the only writers of the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenditureCategory {
    /// Staff salaries paid by a payroll run.
    Salaries,
}

/// A single entry in a school's expenditure ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expenditure {
    /// Unique identifier for the entry.
    pub id: Uuid,
    /// The school that spent the money.
    pub school_id: String,
    /// Ledger category.
    pub category: ExpenditureCategory,
    /// Free-text description.
    pub description: String,
    /// Amount spent.
    pub amount: Decimal,
    /// Date the expenditure was recorded.
    pub date: NaiveDate,
    /// The payroll period, for salary entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<PayPeriod>,
}

impl Expenditure {
    /// The ledger entry recording a payroll run's total.
    ///
    /// # Example
    ///
    /// ```
    /// use bursar_engine::models::{Expenditure, ExpenditureCategory, PayPeriod};
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let period = PayPeriod::new(2026, 3).unwrap();
    /// let entry = Expenditure::for_payroll(
    ///     "sch_001",
    ///     period,
    ///     Decimal::from(102_804),
    ///     NaiveDate::from_ymd_opt(2026, 3, 28).unwrap(),
    /// );
    /// assert_eq!(entry.category, ExpenditureCategory::Salaries);
    /// assert_eq!(entry.description, "Staff salaries for March 2026");
    /// ```
    pub fn for_payroll(
        school_id: &str,
        period: PayPeriod,
        total_payroll: Decimal,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            school_id: school_id.to_string(),
            category: ExpenditureCategory::Salaries,
            description: format!("Staff salaries for {}", period),
            amount: total_payroll,
            date,
            period: Some(period),
        }
    }
}
