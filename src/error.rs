//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the engine, its repository and its service layer can report.
//! Note that the payroll calculator itself never fails: an inapplicable
//! calculation is signalled with `None`, not with an error.

use thiserror::Error;

/// The main error type for the payroll engine.
///
/// # Example
///
/// ```
/// use bursar_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/schools".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/schools");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Payroll settings failed validation.
    #[error("Invalid payroll settings: {message}")]
    InvalidPayrollSettings {
        /// A description of what made the settings invalid.
        message: String,
    },

    /// A salary setup was invalid or contained inconsistent data.
    #[error("Invalid salary field '{field}': {message}")]
    InvalidSalary {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A pay period did not name a real calendar month.
    #[error("Invalid pay period {year}-{month}: month must be between 1 and 12")]
    InvalidPeriod {
        /// The requested year.
        year: i32,
        /// The requested month.
        month: u32,
    },

    /// The school does not exist.
    #[error("School not found: {school_id}")]
    SchoolNotFound {
        /// The id that was looked up.
        school_id: String,
    },

    /// The team member does not exist within the school.
    #[error("Team member '{member_id}' not found in school '{school_id}'")]
    MemberNotFound {
        /// The school that was searched.
        school_id: String,
        /// The member id that was looked up.
        member_id: String,
    },

    /// A payroll run produced no payslips.
    #[error("No eligible staff for payroll in school '{school_id}' for {period}")]
    NoEligibleStaff {
        /// The school the run was for.
        school_id: String,
        /// The period, formatted as "Month Year".
        period: String,
    },

    /// A payslip for the same member and period is already on record.
    #[error("Payslip already exists for member '{member_id}' in {period}")]
    DuplicatePayslip {
        /// The member the payslip belongs to.
        member_id: String,
        /// The period, formatted as "Month Year".
        period: String,
    },

    /// The acting user may not perform the requested action.
    #[error("User with role '{role}' is not allowed to {action}")]
    Unauthorized {
        /// The acting user's role.
        role: String,
        /// The action that was refused.
        action: String,
    },

    /// The backing store failed.
    #[error("Repository error: {message}")]
    Repository {
        /// A description of the storage failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
