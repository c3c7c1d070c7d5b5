//! Audit records for payroll computations.

use serde::{Deserialize, Serialize};

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for one stage of the
/// payslip computation, so a bursar can see how every figure was reached.
///
/// # Example
///
/// ```
/// use bursar_engine::models::AuditStep;
///
/// let step = AuditStep {
///     step_number: 1,
///     rule_id: "gross_salary".to_string(),
///     rule_name: "Gross Salary".to_string(),
///     input: serde_json::json!({"base_salary": "120000"}),
///     output: serde_json::json!({"gross_salary": "135000"}),
///     reasoning: "$120000 + $15000 allowances = $135000".to_string(),
/// };
/// assert_eq!(step.rule_id, "gross_salary");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}
