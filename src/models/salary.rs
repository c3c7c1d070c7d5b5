//! Salary configuration and payslip records for team members.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};

use super::PayPeriod;

/// A named monthly amount, used for both allowances and deductions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryComponent {
    /// Label shown on the payslip (e.g. "Transport").
    pub name: String,
    /// Monthly amount.
    pub amount: Decimal,
}

impl SalaryComponent {
    /// Creates a component.
    pub fn new(name: impl Into<String>, amount: Decimal) -> Self {
        Self {
            name: name.into(),
            amount,
        }
    }
}

/// An immutable record of one payroll computation for one member and month.
///
/// The business key is `(team_member_id, period)`; a member's history never
/// holds two payslips for the same period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payslip {
    /// Unique identifier for this payslip.
    pub id: Uuid,
    /// The member the payslip was produced for.
    pub team_member_id: String,
    /// The month the payslip covers.
    pub period: PayPeriod,
    /// Base salary at the time of the run.
    pub base_salary: Decimal,
    /// Allowances paid in this period.
    pub allowances: Vec<SalaryComponent>,
    /// Other deductions taken in this period.
    pub deductions: Vec<SalaryComponent>,
    /// Base salary plus allowances.
    pub gross_salary: Decimal,
    /// Monthly PAYE.
    pub paye_tax: Decimal,
    /// Employee pension contribution.
    pub pension: Decimal,
    /// PAYE + pension + other deductions.
    pub total_deductions: Decimal,
    /// Amount paid to the member.
    pub net_salary: Decimal,
    /// When the payslip was generated.
    pub generated_at: DateTime<Utc>,
}

/// The salary terms a bursar can set for a member.
///
/// Applying a setup replaces the terms but never the payslip history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalarySetup {
    /// Monthly base salary.
    pub base_salary: Decimal,
    /// Monthly allowances.
    #[serde(default)]
    pub allowances: Vec<SalaryComponent>,
    /// Monthly deductions other than PAYE and pension.
    #[serde(default)]
    pub deductions: Vec<SalaryComponent>,
}

impl SalarySetup {
    /// Rejects negative amounts and unnamed components.
    pub fn validate(&self) -> EngineResult<()> {
        if self.base_salary < Decimal::ZERO {
            return Err(EngineError::InvalidSalary {
                field: "base_salary".to_string(),
                message: format!("{} cannot be negative", self.base_salary),
            });
        }

        let components = self
            .allowances
            .iter()
            .map(|c| ("allowances", c))
            .chain(self.deductions.iter().map(|c| ("deductions", c)));

        for (field, component) in components {
            if component.name.trim().is_empty() {
                return Err(EngineError::InvalidSalary {
                    field: field.to_string(),
                    message: "component name cannot be empty".to_string(),
                });
            }
            if component.amount < Decimal::ZERO {
                return Err(EngineError::InvalidSalary {
                    field: field.to_string(),
                    message: format!(
                        "'{}' amount {} cannot be negative",
                        component.name, component.amount
                    ),
                });
            }
        }

        Ok(())
    }
}

/// A member's salary terms and payslip history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryInfo {
    /// Monthly base salary.
    pub base_salary: Decimal,
    /// Monthly allowances.
    #[serde(default)]
    pub allowances: Vec<SalaryComponent>,
    /// Monthly deductions other than PAYE and pension.
    #[serde(default)]
    pub deductions: Vec<SalaryComponent>,
    /// Append-only payslip history.
    #[serde(default)]
    pub payslips: Vec<Payslip>,
}

impl SalaryInfo {
    /// Salary terms with an empty history.
    pub fn new(
        base_salary: Decimal,
        allowances: Vec<SalaryComponent>,
        deductions: Vec<SalaryComponent>,
    ) -> Self {
        Self {
            base_salary,
            allowances,
            deductions,
            payslips: vec![],
        }
    }

    /// Sum of all allowance amounts; `None` if the sum overflows.
    pub fn total_allowances(&self) -> Option<Decimal> {
        checked_total(&self.allowances)
    }

    /// Sum of all deduction amounts (PAYE and pension excluded); `None` if
    /// the sum overflows.
    pub fn total_deductions(&self) -> Option<Decimal> {
        checked_total(&self.deductions)
    }

    /// Returns true if a payslip already exists for the period.
    pub fn has_payslip_for(&self, period: PayPeriod) -> bool {
        self.payslips.iter().any(|p| p.period == period)
    }

    /// The payslip for the period, if payroll has run for it.
    pub fn payslip_for(&self, period: PayPeriod) -> Option<&Payslip> {
        self.payslips.iter().find(|p| p.period == period)
    }

    /// Replaces the salary terms, keeping the payslip history.
    pub fn apply_setup(&mut self, setup: SalarySetup) {
        self.base_salary = setup.base_salary;
        self.allowances = setup.allowances;
        self.deductions = setup.deductions;
    }
}

impl From<SalarySetup> for SalaryInfo {
    fn from(setup: SalarySetup) -> Self {
        SalaryInfo::new(setup.base_salary, setup.allowances, setup.deductions)
    }
}

fn checked_total(components: &[SalaryComponent]) -> Option<Decimal> {
    components
        .iter()
        .try_fold(Decimal::ZERO, |total, c| total.checked_add(c.amount))
}
