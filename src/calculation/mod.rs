//! Calculation logic for the payroll engine.
//!
//! This module contains the payslip computation split into its stages:
//! gross salary, employee pension, progressive PAYE, and net salary. On top
//! of these sit the single-member payslip calculator and the school-wide
//! payroll run.

mod gross_salary;
mod net_salary;
mod paye;
mod payroll_run;
mod payslip;
mod pension;

pub use gross_salary::{GrossSalaryResult, calculate_gross_salary};
pub use net_salary::{NetSalaryResult, calculate_net_salary};
pub use paye::{
    BracketTax, MONTHS_PER_YEAR, PayeResult, annual_taxable_income, calculate_paye,
    progressive_tax,
};
pub use payroll_run::{PayrollRun, SkippedMember, run_payroll_for_school};
pub use payslip::{
    Eligibility, PayslipCalculation, SkipReason, calculate_payslip, calculate_payslip_with_audit,
    check_eligibility, evaluate_payslip,
};
pub use pension::{PensionResult, calculate_pension};
