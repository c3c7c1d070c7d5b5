//! Employee pension contribution.

use rust_decimal::Decimal;

use crate::models::AuditStep;

/// The pension contribution and the audit step that records it.
#[derive(Debug, Clone)]
pub struct PensionResult {
    /// The monthly employee contribution.
    pub pension: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Computes the employee pension contribution.
///
/// Pension is levied on base salary only; allowances never change it.
/// Returns `None` if the product overflows.
///
/// # Examples
///
/// ```
/// use bursar_engine::calculation::calculate_pension;
/// use rust_decimal::Decimal;
///
/// let result = calculate_pension(Decimal::from(120_000), Decimal::new(8, 2), 2).unwrap();
/// assert_eq!(result.pension, Decimal::from(9_600));
/// ```
pub fn calculate_pension(
    base_salary: Decimal,
    pension_rate: Decimal,
    step_number: u32,
) -> Option<PensionResult> {
    let pension = base_salary.checked_mul(pension_rate)?;

    let audit_step = AuditStep {
        step_number,
        rule_id: "employee_pension".to_string(),
        rule_name: "Employee Pension".to_string(),
        input: serde_json::json!({
            "base_salary": base_salary.normalize().to_string(),
            "pension_rate": pension_rate.normalize().to_string()
        }),
        output: serde_json::json!({
            "pension": pension.normalize().to_string()
        }),
        reasoning: format!(
            "${} base x {} = ${}",
            base_salary.normalize(),
            pension_rate.normalize(),
            pension.normalize()
        ),
    };

    Some(PensionResult {
        pension,
        audit_step,
    })
}
