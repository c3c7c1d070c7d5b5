//! Total deductions and net salary.

use rust_decimal::Decimal;

use crate::models::AuditStep;

/// The take-home figures and the audit step that records them.
#[derive(Debug, Clone)]
pub struct NetSalaryResult {
    /// PAYE + pension + other deductions.
    pub total_deductions: Decimal,
    /// Gross salary less total deductions.
    pub net_salary: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Subtracts PAYE, pension and other deductions from gross salary.
///
/// Net salary is not floored: deductions larger than gross give a negative
/// figure, which is reported rather than hidden. Returns `None` if the
/// deductions overflow.
///
/// # Examples
///
/// ```
/// use bursar_engine::calculation::calculate_net_salary;
/// use rust_decimal::Decimal;
///
/// let result = calculate_net_salary(
///     Decimal::from(135_000),
///     Decimal::from(22_596),
///     Decimal::from(9_600),
///     Decimal::ZERO,
///     5,
/// )
/// .unwrap();
/// assert_eq!(result.total_deductions, Decimal::from(32_196));
/// assert_eq!(result.net_salary, Decimal::from(102_804));
/// ```
pub fn calculate_net_salary(
    gross_salary: Decimal,
    paye_tax: Decimal,
    pension: Decimal,
    other_deductions: Decimal,
    step_number: u32,
) -> Option<NetSalaryResult> {
    let total_deductions = paye_tax.checked_add(pension)?.checked_add(other_deductions)?;
    let net_salary = gross_salary.checked_sub(total_deductions)?;

    let audit_step = AuditStep {
        step_number,
        rule_id: "net_salary".to_string(),
        rule_name: "Net Salary".to_string(),
        input: serde_json::json!({
            "gross_salary": gross_salary.normalize().to_string(),
            "paye_tax": paye_tax.normalize().to_string(),
            "pension": pension.normalize().to_string(),
            "other_deductions": other_deductions.normalize().to_string()
        }),
        output: serde_json::json!({
            "total_deductions": total_deductions.normalize().to_string(),
            "net_salary": net_salary.normalize().to_string()
        }),
        reasoning: format!(
            "${} - (${} PAYE + ${} pension + ${} other) = ${}",
            gross_salary.normalize(),
            paye_tax.normalize(),
            pension.normalize(),
            other_deductions.normalize(),
            net_salary.normalize()
        ),
    };

    Some(NetSalaryResult {
        total_deductions,
        net_salary,
        audit_step,
    })
}
