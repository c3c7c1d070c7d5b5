//! Property tests for the payroll calculator's invariants.

use std::collections::HashSet;

use proptest::prelude::*;
use rust_decimal::Decimal;

use bursar_engine::calculation::{calculate_payslip, progressive_tax, run_payroll_for_school};
use bursar_engine::models::{
    PayPeriod, PayeBracket, PayrollSettings, SalaryComponent, SalaryInfo, StaffRole, TeamMember,
};

fn standard_settings() -> PayrollSettings {
    PayrollSettings {
        employee_pension_rate: Decimal::new(8, 2),
        paye_brackets: vec![
            PayeBracket::bounded(Decimal::new(7, 2), Decimal::from(300_000)),
            PayeBracket::bounded(Decimal::new(11, 2), Decimal::from(600_000)),
            PayeBracket::unbounded(Decimal::new(24, 2)),
        ],
    }
}

fn march() -> PayPeriod {
    PayPeriod::new(2026, 3).unwrap()
}

fn member(id: String, base: u32, allowances: &[u32], deductions: &[u32]) -> TeamMember {
    let components = |amounts: &[u32], prefix: &str| -> Vec<SalaryComponent> {
        amounts
            .iter()
            .enumerate()
            .map(|(i, a)| SalaryComponent::new(format!("{} {}", prefix, i), Decimal::from(*a)))
            .collect()
    };
    TeamMember {
        id,
        school_id: "sch_001".to_string(),
        name: "Property Member".to_string(),
        role: StaffRole::Teacher,
        salary: Some(SalaryInfo::new(
            Decimal::from(base),
            components(allowances, "Allowance"),
            components(deductions, "Deduction"),
        )),
    }
}

fn amounts() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec(0u32..100_000, 0..4)
}

proptest! {
    #[test]
    fn gross_is_base_plus_allowances(base in 1u32..2_000_000, allowances in amounts()) {
        let payslip = calculate_payslip(
            &member("tm_001".to_string(), base, &allowances, &[]),
            march(),
            &standard_settings(),
        ).unwrap();

        let expected = Decimal::from(base)
            + allowances.iter().map(|a| Decimal::from(*a)).sum::<Decimal>();
        prop_assert_eq!(payslip.gross_salary, expected);
    }

    #[test]
    fn net_is_gross_minus_all_deductions(
        base in 1u32..2_000_000,
        allowances in amounts(),
        deductions in amounts(),
    ) {
        let payslip = calculate_payslip(
            &member("tm_001".to_string(), base, &allowances, &deductions),
            march(),
            &standard_settings(),
        ).unwrap();

        let other: Decimal = deductions.iter().map(|d| Decimal::from(*d)).sum();
        prop_assert_eq!(payslip.total_deductions, payslip.paye_tax + payslip.pension + other);
        prop_assert_eq!(payslip.net_salary, payslip.gross_salary - payslip.total_deductions);
    }

    #[test]
    fn pension_ignores_allowances(base in 1u32..2_000_000, allowances in amounts()) {
        let settings = standard_settings();
        let with = calculate_payslip(
            &member("tm_001".to_string(), base, &allowances, &[]),
            march(),
            &settings,
        ).unwrap();
        let without = calculate_payslip(
            &member("tm_001".to_string(), base, &[], &[]),
            march(),
            &settings,
        ).unwrap();

        prop_assert_eq!(with.pension, without.pension);
        prop_assert_eq!(with.pension, Decimal::from(base) * settings.employee_pension_rate);
    }

    #[test]
    fn tax_never_decreases_with_income(a in 0u32..50_000_000, b in 0u32..50_000_000) {
        let brackets = standard_settings().paye_brackets;
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let (low_tax, _) = progressive_tax(Decimal::from(low), &brackets).unwrap();
        let (high_tax, _) = progressive_tax(Decimal::from(high), &brackets).unwrap();
        prop_assert!(low_tax <= high_tax);
        prop_assert!(high_tax >= Decimal::ZERO);
    }

    #[test]
    fn run_total_is_sum_of_net_and_members_are_unique(
        ids in prop::collection::vec(0u8..6, 1..12),
        base in 1u32..1_000_000,
    ) {
        let members: Vec<TeamMember> = ids
            .iter()
            .map(|i| member(format!("tm_{:03}", i), base, &[], &[]))
            .collect();

        let run = run_payroll_for_school(&members, march(), &standard_settings());

        let total: Decimal = run.payslips.iter().map(|p| p.net_salary).sum();
        prop_assert_eq!(run.total_payroll, total);

        let unique: HashSet<&str> =
            run.payslips.iter().map(|p| p.team_member_id.as_str()).collect();
        prop_assert_eq!(unique.len(), run.payslips.len());

        let distinct_ids: HashSet<u8> = ids.iter().copied().collect();
        prop_assert_eq!(run.payslips.len(), distinct_ids.len());
    }

    #[test]
    fn paid_period_is_never_paid_again(base in 1u32..2_000_000) {
        let settings = standard_settings();
        let mut paid = member("tm_001".to_string(), base, &[], &[]);
        let payslip = calculate_payslip(&paid, march(), &settings).unwrap();
        if let Some(salary) = paid.salary.as_mut() {
            salary.payslips.push(payslip);
        }
        prop_assert!(calculate_payslip(&paid, march(), &settings).is_none());
    }
}
