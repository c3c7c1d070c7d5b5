//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod audit;
mod member;
mod pay_period;
mod salary;
mod school;
mod settings;
mod user;

pub use audit::AuditStep;
pub use member::{StaffRole, TeamMember};
pub use pay_period::PayPeriod;
pub use salary::{Payslip, SalaryComponent, SalaryInfo, SalarySetup};
pub use school::{Expenditure, ExpenditureCategory, School};
pub use settings::{PayeBracket, PayrollSettings};
pub use user::CurrentUser;
