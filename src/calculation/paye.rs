//! Progressive PAYE income tax.
//!
//! Monthly figures are annualised, walked through the marginal brackets,
//! and the annual tax is brought back to a monthly amount.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{AuditStep, PayeBracket};

/// Number of pay periods in a tax year.
pub const MONTHS_PER_YEAR: u32 = 12;

/// The tax levied in one bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BracketTax {
    /// The bracket's marginal rate.
    pub rate: Decimal,
    /// Annual income at which the bracket starts.
    pub from: Decimal,
    /// Annual income at which it ends; `None` for the top bracket.
    pub up_to: Option<Decimal>,
    /// Income taxed in this bracket.
    pub taxable: Decimal,
    /// Tax levied in this bracket.
    pub tax: Decimal,
}

/// The PAYE computation, with a per-bracket breakdown.
#[derive(Debug, Clone)]
pub struct PayeResult {
    /// `(gross - pension) * 12`.
    pub annual_taxable_income: Decimal,
    /// Tax over the whole year.
    pub annual_tax: Decimal,
    /// `annual_tax / 12`.
    pub monthly_tax: Decimal,
    /// One entry per bracket that received income.
    pub breakdown: Vec<BracketTax>,
    /// Audit steps for annualisation and the bracket walk.
    pub audit_steps: Vec<AuditStep>,
}

/// Annualises the monthly taxable income.
///
/// Pension is relieved before tax; allowances are taxable. Returns `None`
/// if the annual figure overflows.
///
/// # Examples
///
/// ```
/// use bursar_engine::calculation::annual_taxable_income;
/// use rust_decimal::Decimal;
///
/// let annual = annual_taxable_income(Decimal::from(135_000), Decimal::from(9_600)).unwrap();
/// assert_eq!(annual, Decimal::from(1_504_800));
/// ```
pub fn annual_taxable_income(gross_salary: Decimal, pension: Decimal) -> Option<Decimal> {
    gross_salary
        .checked_sub(pension)?
        .checked_mul(Decimal::from(MONTHS_PER_YEAR))
}

/// Walks annual income through the brackets.
///
/// Bracket ceilings are cumulative. The walk stops once the income is
/// exhausted, so zero or negative income yields zero tax. Income above the
/// last bounded ceiling is untaxed unless an unbounded bracket follows.
/// Returns `None` if any bracket figure overflows.
///
/// # Examples
///
/// ```
/// use bursar_engine::calculation::progressive_tax;
/// use bursar_engine::models::PayeBracket;
/// use rust_decimal::Decimal;
///
/// let brackets = vec![
///     PayeBracket::bounded(Decimal::new(7, 2), Decimal::from(300_000)),
///     PayeBracket::bounded(Decimal::new(11, 2), Decimal::from(600_000)),
///     PayeBracket::unbounded(Decimal::new(24, 2)),
/// ];
/// let (tax, _) = progressive_tax(Decimal::from(900_000), &brackets).unwrap();
/// assert_eq!(tax, Decimal::from(126_000));
/// ```
pub fn progressive_tax(
    annual_income: Decimal,
    brackets: &[PayeBracket],
) -> Option<(Decimal, Vec<BracketTax>)> {
    let mut remaining_income = annual_income;
    let mut last_bracket_limit = Decimal::ZERO;
    let mut annual_tax = Decimal::ZERO;
    let mut breakdown = Vec::new();

    for bracket in brackets {
        if remaining_income <= Decimal::ZERO {
            break;
        }

        let taxable = match bracket.up_to {
            Some(ceiling) => remaining_income.min(ceiling.checked_sub(last_bracket_limit)?),
            None => remaining_income,
        };
        let tax = taxable.checked_mul(bracket.rate)?;

        annual_tax = annual_tax.checked_add(tax)?;
        remaining_income = remaining_income.checked_sub(taxable)?;
        breakdown.push(BracketTax {
            rate: bracket.rate,
            from: last_bracket_limit,
            up_to: bracket.up_to,
            taxable,
            tax,
        });

        match bracket.up_to {
            Some(ceiling) => last_bracket_limit = ceiling,
            None => break,
        }
    }

    Some((annual_tax, breakdown))
}

/// Computes monthly PAYE from monthly gross salary and pension.
///
/// Records two audit steps: annualisation, then the bracket walk. Returns
/// `None` if any intermediate figure overflows.
///
/// # Examples
///
/// ```
/// use bursar_engine::calculation::calculate_paye;
/// use bursar_engine::models::PayeBracket;
/// use rust_decimal::Decimal;
///
/// let brackets = vec![
///     PayeBracket::bounded(Decimal::new(7, 2), Decimal::from(300_000)),
///     PayeBracket::bounded(Decimal::new(11, 2), Decimal::from(600_000)),
///     PayeBracket::unbounded(Decimal::new(24, 2)),
/// ];
/// let result =
///     calculate_paye(Decimal::from(135_000), Decimal::from(9_600), &brackets, 3).unwrap();
/// assert_eq!(result.annual_taxable_income, Decimal::from(1_504_800));
/// assert_eq!(result.monthly_tax, Decimal::from(22_596));
/// ```
pub fn calculate_paye(
    gross_salary: Decimal,
    pension: Decimal,
    brackets: &[PayeBracket],
    step_number: u32,
) -> Option<PayeResult> {
    let annual_taxable_income = annual_taxable_income(gross_salary, pension)?;
    let (annual_tax, breakdown) = progressive_tax(annual_taxable_income, brackets)?;
    let monthly_tax = annual_tax.checked_div(Decimal::from(MONTHS_PER_YEAR))?;

    let annualisation_step = AuditStep {
        step_number,
        rule_id: "annual_taxable_income".to_string(),
        rule_name: "Annual Taxable Income".to_string(),
        input: serde_json::json!({
            "gross_salary": gross_salary.normalize().to_string(),
            "pension": pension.normalize().to_string()
        }),
        output: serde_json::json!({
            "annual_taxable_income": annual_taxable_income.normalize().to_string()
        }),
        reasoning: format!(
            "(${} - ${} pension) x {} = ${}",
            gross_salary.normalize(),
            pension.normalize(),
            MONTHS_PER_YEAR,
            annual_taxable_income.normalize()
        ),
    };

    let bands: Vec<serde_json::Value> = breakdown
        .iter()
        .map(|b| {
            serde_json::json!({
                "rate": b.rate.normalize().to_string(),
                "taxable": b.taxable.normalize().to_string(),
                "tax": b.tax.normalize().to_string()
            })
        })
        .collect();

    let reasoning = if breakdown.is_empty() {
        "No taxable income - PAYE is $0".to_string()
    } else {
        let terms: Vec<String> = breakdown
            .iter()
            .map(|b| format!("${} x {}", b.taxable.normalize(), b.rate.normalize()))
            .collect();
        format!(
            "{} = ${} annual / {} = ${} monthly",
            terms.join(" + "),
            annual_tax.normalize(),
            MONTHS_PER_YEAR,
            monthly_tax.normalize()
        )
    };

    let bracket_step = AuditStep {
        step_number: step_number + 1,
        rule_id: "paye_tax".to_string(),
        rule_name: "PAYE Tax".to_string(),
        input: serde_json::json!({
            "annual_taxable_income": annual_taxable_income.normalize().to_string(),
            "bracket_count": brackets.len()
        }),
        output: serde_json::json!({
            "brackets": bands,
            "annual_tax": annual_tax.normalize().to_string(),
            "monthly_tax": monthly_tax.normalize().to_string()
        }),
        reasoning,
    };

    Some(PayeResult {
        annual_taxable_income,
        annual_tax,
        monthly_tax,
        breakdown,
        audit_steps: vec![annualisation_step, bracket_step],
    })
}
