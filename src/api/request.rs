//! Request types for the payroll API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::{PayPeriod, PayrollSettings, TeamMember};

/// Request body for `POST /payslips/calculate`.
///
/// Computes a payslip for a member the caller supplies in full, with no
/// stored state involved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculatePayslipRequest {
    /// The member, with salary terms and payslip history.
    pub member: TeamMember,
    /// The year being paid.
    pub year: i32,
    /// The month being paid, 1 to 12.
    pub month: u32,
    /// Pension rate and PAYE brackets to apply.
    pub settings: PayrollSettings,
}

impl CalculatePayslipRequest {
    /// The requested pay period.
    pub fn period(&self) -> EngineResult<PayPeriod> {
        PayPeriod::new(self.year, self.month)
    }
}

/// Year and month of a pay period, as a body or query string.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PeriodRequest {
    /// The year being paid.
    pub year: i32,
    /// The month being paid, 1 to 12.
    pub month: u32,
}

impl PeriodRequest {
    /// The requested pay period.
    pub fn period(&self) -> EngineResult<PayPeriod> {
        PayPeriod::new(self.year, self.month)
    }
}

/// Query for the debt aging report.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AgingQuery {
    /// Date ages are measured at.
    pub as_of: NaiveDate,
}

/// Request body for rendering fee reminders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemindersRequest {
    /// Message template using `{field}` placeholders.
    pub template: String,
}
