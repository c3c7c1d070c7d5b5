//! Gross salary calculation.

use rust_decimal::Decimal;

use crate::models::{AuditStep, SalaryInfo};

/// The gross salary and the audit step that records it.
#[derive(Debug, Clone)]
pub struct GrossSalaryResult {
    /// Base salary plus all allowances.
    pub gross_salary: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Adds every allowance to the base salary.
///
/// Returns `None` if the sum overflows.
///
/// # Examples
///
/// ```
/// use bursar_engine::calculation::calculate_gross_salary;
/// use bursar_engine::models::{SalaryComponent, SalaryInfo};
/// use rust_decimal::Decimal;
///
/// let salary = SalaryInfo::new(
///     Decimal::from(120_000),
///     vec![SalaryComponent::new("Transport", Decimal::from(15_000))],
///     vec![],
/// );
/// let result = calculate_gross_salary(&salary, 1).unwrap();
/// assert_eq!(result.gross_salary, Decimal::from(135_000));
/// ```
pub fn calculate_gross_salary(salary: &SalaryInfo, step_number: u32) -> Option<GrossSalaryResult> {
    let allowances_total = salary.total_allowances()?;
    let gross_salary = salary.base_salary.checked_add(allowances_total)?;

    let allowances: Vec<serde_json::Value> = salary
        .allowances
        .iter()
        .map(|a| serde_json::json!({"name": a.name, "amount": a.amount.normalize().to_string()}))
        .collect();

    let audit_step = AuditStep {
        step_number,
        rule_id: "gross_salary".to_string(),
        rule_name: "Gross Salary".to_string(),
        input: serde_json::json!({
            "base_salary": salary.base_salary.normalize().to_string(),
            "allowances": allowances
        }),
        output: serde_json::json!({
            "gross_salary": gross_salary.normalize().to_string()
        }),
        reasoning: format!(
            "${} base + ${} allowances = ${}",
            salary.base_salary.normalize(),
            allowances_total.normalize(),
            gross_salary.normalize()
        ),
    };

    Some(GrossSalaryResult {
        gross_salary,
        audit_step,
    })
}
