//! Payslip calculation for a single team member.

use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{AuditStep, PayPeriod, PayrollSettings, Payslip, SalaryInfo, TeamMember};

use super::gross_salary::calculate_gross_salary;
use super::net_salary::calculate_net_salary;
use super::paye::calculate_paye;
use super::pension::calculate_pension;

/// Why a member gets no payslip for a period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Salary setup missing, or base salary not positive.
    NoSalary,
    /// A payslip for the period is already on record.
    AlreadyProcessed,
    /// A salary figure is too large to compute with.
    AmountOutOfRange,
}

/// Whether payroll applies to a member for a period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility<'a> {
    /// The member's salary terms to compute from.
    Eligible(&'a SalaryInfo),
    /// Nothing to do.
    Skipped(SkipReason),
}

/// A payslip together with the audit trail of its computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayslipCalculation {
    /// The computed payslip.
    pub payslip: Payslip,
    /// One step per stage of the computation.
    pub audit_steps: Vec<AuditStep>,
}

/// Decides whether payroll applies to the member for the period.
///
/// # Examples
///
/// ```
/// use bursar_engine::calculation::{check_eligibility, Eligibility, SkipReason};
/// use bursar_engine::models::{PayPeriod, StaffRole, TeamMember};
///
/// let member = TeamMember {
///     id: "tm_001".to_string(),
///     school_id: "sch_001".to_string(),
///     name: "Ada Obi".to_string(),
///     role: StaffRole::Teacher,
///     salary: None,
/// };
/// let period = PayPeriod::new(2026, 3).unwrap();
/// assert_eq!(check_eligibility(&member, period), Eligibility::Skipped(SkipReason::NoSalary));
/// ```
pub fn check_eligibility(member: &TeamMember, period: PayPeriod) -> Eligibility<'_> {
    match &member.salary {
        None => Eligibility::Skipped(SkipReason::NoSalary),
        Some(salary) if salary.base_salary <= Decimal::ZERO => {
            Eligibility::Skipped(SkipReason::NoSalary)
        }
        Some(salary) if salary.has_payslip_for(period) => {
            Eligibility::Skipped(SkipReason::AlreadyProcessed)
        }
        Some(salary) => Eligibility::Eligible(salary),
    }
}

/// Computes a payslip, or says why the member gets none.
///
/// Every stage uses checked arithmetic. Figures too large for `Decimal`
/// skip the member with [`SkipReason::AmountOutOfRange`] instead of
/// producing a partial payslip.
pub fn evaluate_payslip(
    member: &TeamMember,
    period: PayPeriod,
    settings: &PayrollSettings,
) -> Result<PayslipCalculation, SkipReason> {
    let salary = match check_eligibility(member, period) {
        Eligibility::Eligible(salary) => salary,
        Eligibility::Skipped(reason) => return Err(reason),
    };

    build_payslip(member, salary, period, settings).ok_or(SkipReason::AmountOutOfRange)
}

fn build_payslip(
    member: &TeamMember,
    salary: &SalaryInfo,
    period: PayPeriod,
    settings: &PayrollSettings,
) -> Option<PayslipCalculation> {
    let mut audit_steps = Vec::new();
    let mut step_number: u32 = 1;

    let gross = calculate_gross_salary(salary, step_number)?;
    audit_steps.push(gross.audit_step);
    step_number += 1;

    let pension = calculate_pension(
        salary.base_salary,
        settings.employee_pension_rate,
        step_number,
    )?;
    audit_steps.push(pension.audit_step);
    step_number += 1;

    let paye = calculate_paye(
        gross.gross_salary,
        pension.pension,
        &settings.paye_brackets,
        step_number,
    )?;
    step_number += paye.audit_steps.len() as u32;
    audit_steps.extend(paye.audit_steps);

    let net = calculate_net_salary(
        gross.gross_salary,
        paye.monthly_tax,
        pension.pension,
        salary.total_deductions()?,
        step_number,
    )?;
    audit_steps.push(net.audit_step);

    let payslip = Payslip {
        id: Uuid::new_v4(),
        team_member_id: member.id.clone(),
        period,
        base_salary: salary.base_salary,
        allowances: salary.allowances.clone(),
        deductions: salary.deductions.clone(),
        gross_salary: gross.gross_salary,
        paye_tax: paye.monthly_tax,
        pension: pension.pension,
        total_deductions: net.total_deductions,
        net_salary: net.net_salary,
        generated_at: Utc::now(),
    };

    Some(PayslipCalculation {
        payslip,
        audit_steps,
    })
}

/// Computes a payslip and records every stage in an audit trail.
///
/// Returns `None` whenever [`evaluate_payslip`] skips the member.
pub fn calculate_payslip_with_audit(
    member: &TeamMember,
    period: PayPeriod,
    settings: &PayrollSettings,
) -> Option<PayslipCalculation> {
    evaluate_payslip(member, period, settings).ok()
}

/// Computes the member's payslip for the period.
///
/// Returns `None` if the member has no positive base salary, already has
/// a payslip for the period, or has figures too large to compute with.
/// Running payroll twice is a no-op.
///
/// # Examples
///
/// ```
/// use bursar_engine::calculation::calculate_payslip;
/// use bursar_engine::models::{
///     PayPeriod, PayeBracket, PayrollSettings, SalaryComponent, SalaryInfo, StaffRole, TeamMember,
/// };
/// use rust_decimal::Decimal;
///
/// let settings = PayrollSettings {
///     employee_pension_rate: Decimal::new(8, 2),
///     paye_brackets: vec![
///         PayeBracket::bounded(Decimal::new(7, 2), Decimal::from(300_000)),
///         PayeBracket::bounded(Decimal::new(11, 2), Decimal::from(600_000)),
///         PayeBracket::unbounded(Decimal::new(24, 2)),
///     ],
/// };
/// let mut member = TeamMember {
///     id: "tm_001".to_string(),
///     school_id: "sch_001".to_string(),
///     name: "Ada Obi".to_string(),
///     role: StaffRole::Teacher,
///     salary: Some(SalaryInfo::new(
///         Decimal::from(120_000),
///         vec![SalaryComponent::new("Transport", Decimal::from(15_000))],
///         vec![],
///     )),
/// };
/// let period = PayPeriod::new(2026, 3).unwrap();
///
/// let payslip = calculate_payslip(&member, period, &settings).unwrap();
/// assert_eq!(payslip.gross_salary, Decimal::from(135_000));
/// assert_eq!(payslip.net_salary, Decimal::from(102_804));
///
/// member.salary.as_mut().unwrap().payslips.push(payslip);
/// assert!(calculate_payslip(&member, period, &settings).is_none());
/// ```
pub fn calculate_payslip(
    member: &TeamMember,
    period: PayPeriod,
    settings: &PayrollSettings,
) -> Option<Payslip> {
    calculate_payslip_with_audit(member, period, settings).map(|calc| calc.payslip)
}
