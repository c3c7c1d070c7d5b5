//! School-wide payroll run.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{PayPeriod, PayrollSettings, Payslip, TeamMember};

use super::payslip::{evaluate_payslip, SkipReason};

/// A member left out of a run, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedMember {
    /// The member's id.
    pub member_id: String,
    /// Why no payslip was produced.
    pub reason: SkipReason,
}

/// The outcome of running payroll over a school's staff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayrollRun {
    /// The month the run covers.
    pub period: PayPeriod,
    /// One payslip per eligible member, in input order.
    pub payslips: Vec<Payslip>,
    /// Sum of the payslips' net salaries.
    pub total_payroll: Decimal,
    /// Members without a payslip.
    pub skipped: Vec<SkippedMember>,
}

/// Computes payslips for every eligible member.
///
/// Members whose id has already been seen in `members` are ignored, so no
/// member is paid twice. A member whose net salary would push the total past
/// what `Decimal` can hold is skipped as out of range. Nothing is persisted;
/// the caller stores the payslips and records the expenditure.
///
/// # Examples
///
/// ```
/// use bursar_engine::calculation::run_payroll_for_school;
/// use bursar_engine::models::{PayPeriod, PayrollSettings, SalaryInfo, StaffRole, TeamMember};
/// use rust_decimal::Decimal;
///
/// let member = |id: &str, base: i64| TeamMember {
///     id: id.to_string(),
///     school_id: "sch_001".to_string(),
///     name: id.to_string(),
///     role: StaffRole::Teacher,
///     salary: Some(SalaryInfo::new(Decimal::from(base), vec![], vec![])),
/// };
/// let members = vec![member("tm_001", 50_000), member("tm_002", 70_000)];
/// let period = PayPeriod::new(2026, 3).unwrap();
///
/// let run = run_payroll_for_school(&members, period, &PayrollSettings::default());
/// assert_eq!(run.payslips.len(), 2);
/// assert_eq!(run.total_payroll, Decimal::from(120_000));
/// ```
pub fn run_payroll_for_school(
    members: &[TeamMember],
    period: PayPeriod,
    settings: &PayrollSettings,
) -> PayrollRun {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut payslips = Vec::new();
    let mut skipped = Vec::new();
    let mut total_payroll = Decimal::ZERO;

    for member in members {
        if !seen.insert(member.id.as_str()) {
            continue;
        }

        let outcome = evaluate_payslip(member, period, settings).and_then(|calculation| {
            total_payroll
                .checked_add(calculation.payslip.net_salary)
                .map(|total| (total, calculation.payslip))
                .ok_or(SkipReason::AmountOutOfRange)
        });

        match outcome {
            Ok((total, payslip)) => {
                total_payroll = total;
                payslips.push(payslip);
            }
            Err(reason) => skipped.push(SkippedMember {
                member_id: member.id.clone(),
                reason,
            }),
        }
    }

    PayrollRun {
        period,
        payslips,
        total_payroll,
        skipped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::calculate_payslip;
    use crate::models::{PayeBracket, SalaryComponent, SalaryInfo, StaffRole};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn standard_settings() -> PayrollSettings {
        PayrollSettings {
            employee_pension_rate: dec("0.08"),
            paye_brackets: vec![
                PayeBracket::bounded(dec("0.07"), dec("300000")),
                PayeBracket::bounded(dec("0.11"), dec("600000")),
                PayeBracket::unbounded(dec("0.24")),
            ],
        }
    }

    fn create_member(id: &str, salary: Option<SalaryInfo>) -> TeamMember {
        TeamMember {
            id: id.to_string(),
            school_id: "sch_001".to_string(),
            name: format!("Member {}", id),
            role: StaffRole::Teacher,
            salary,
        }
    }

    fn salaried(id: &str, base: &str) -> TeamMember {
        create_member(id, Some(SalaryInfo::new(dec(base), vec![], vec![])))
    }

    fn march() -> PayPeriod {
        PayPeriod::new(2026, 3).unwrap()
    }

    #[test]
    fn test_total_is_sum_of_net_salaries() {
        let members = vec![
            create_member(
                "tm_001",
                Some(SalaryInfo::new(
                    dec("120000"),
                    vec![SalaryComponent::new("Transport", dec("15000"))],
                    vec![],
                )),
            ),
            salaried("tm_002", "60000"),
        ];

        let run = run_payroll_for_school(&members, march(), &standard_settings());

        assert_eq!(run.payslips.len(), 2);
        let sum: Decimal = run.payslips.iter().map(|p| p.net_salary).sum();
        assert_eq!(run.total_payroll, sum);
        assert_eq!(run.payslips[0].net_salary, dec("102804"));
    }

    #[test]
    fn test_skips_members_without_salary() {
        let members = vec![
            salaried("tm_001", "50000"),
            create_member("tm_002", None),
            salaried("tm_003", "0"),
        ];

        let run = run_payroll_for_school(&members, march(), &standard_settings());

        assert_eq!(run.payslips.len(), 1);
        assert_eq!(
            run.skipped,
            vec![
                SkippedMember {
                    member_id: "tm_002".to_string(),
                    reason: SkipReason::NoSalary
                },
                SkippedMember {
                    member_id: "tm_003".to_string(),
                    reason: SkipReason::NoSalary
                },
            ]
        );
    }

    #[test]
    fn test_skips_members_already_paid() {
        let mut paid = salaried("tm_001", "50000");
        let payslip = calculate_payslip(&paid, march(), &standard_settings()).unwrap();
        paid.salary.as_mut().unwrap().payslips.push(payslip);

        let members = vec![paid, salaried("tm_002", "40000")];
        let run = run_payroll_for_school(&members, march(), &standard_settings());

        assert_eq!(run.payslips.len(), 1);
        assert_eq!(run.payslips[0].team_member_id, "tm_002");
        assert_eq!(run.skipped[0].reason, SkipReason::AlreadyProcessed);
    }

    #[test]
    fn test_duplicate_member_is_paid_once() {
        let members = vec![
            salaried("tm_001", "50000"),
            salaried("tm_001", "50000"),
            salaried("tm_002", "40000"),
        ];

        let run = run_payroll_for_school(&members, march(), &PayrollSettings::default());

        assert_eq!(run.payslips.len(), 2);
        assert_eq!(run.total_payroll, dec("90000"));
    }

    #[test]
    fn test_empty_staff_list_gives_empty_run() {
        let run = run_payroll_for_school(&[], march(), &standard_settings());
        assert!(run.payslips.is_empty());
        assert!(run.skipped.is_empty());
        assert_eq!(run.total_payroll, Decimal::ZERO);
    }

    #[test]
    fn test_run_keeps_period() {
        let run =
            run_payroll_for_school(&[salaried("tm_001", "1000")], march(), &standard_settings());
        assert_eq!(run.period, march());
        assert_eq!(run.payslips[0].period, march());
    }

    #[test]
    fn test_oversized_salary_is_skipped_and_others_paid() {
        let members = vec![
            salaried("tm_001", "50000"),
            salaried("tm_002", "9000000000000000000000000000"),
        ];

        let run = run_payroll_for_school(&members, march(), &standard_settings());

        assert_eq!(run.payslips.len(), 1);
        assert_eq!(run.payslips[0].team_member_id, "tm_001");
        assert_eq!(
            run.skipped,
            vec![SkippedMember {
                member_id: "tm_002".to_string(),
                reason: SkipReason::AmountOutOfRange
            }]
        );
    }

    #[test]
    fn test_member_overflowing_run_total_is_skipped() {
        // 14 x 6e27 exceeds Decimal::MAX; 13 of them do not
        let members: Vec<TeamMember> = (0..14)
            .map(|i| salaried(&format!("tm_{:03}", i), "6000000000000000000000000000"))
            .collect();

        let run = run_payroll_for_school(&members, march(), &PayrollSettings::default());

        assert_eq!(run.payslips.len(), 13);
        assert_eq!(run.total_payroll, dec("78000000000000000000000000000"));
        assert_eq!(run.skipped.len(), 1);
        assert_eq!(run.skipped[0].member_id, "tm_013");
        assert_eq!(run.skipped[0].reason, SkipReason::AmountOutOfRange);
    }
}
