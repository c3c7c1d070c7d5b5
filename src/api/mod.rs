//! HTTP API module for the payroll engine.
//!
//! This module provides the REST endpoints for payslip calculation, payroll
//! runs, salary and settings management, and fee reporting.

mod actor;
mod handlers;
mod request;
mod response;
mod state;

pub use actor::{actor_from_headers, MEMBER_HEADER, ROLE_HEADER, SCHOOL_HEADER, STUDENTS_HEADER};
pub use handlers::create_router;
pub use request::{AgingQuery, CalculatePayslipRequest, PeriodRequest, RemindersRequest};
pub use response::{ApiError, ApiErrorResponse, CalculatePayslipResponse};
pub use state::AppState;
