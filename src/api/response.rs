//! Response types for the payroll API.
//!
//! This module defines the error response structures and the mapping from
//! engine errors to HTTP statuses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::calculation::SkipReason;
use crate::error::EngineError;
use crate::models::{AuditStep, Payslip};

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 with the given body.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }

    /// A 401 for requests without a usable actor.
    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            error: ApiError::with_details(
                "UNAUTHENTICATED",
                message,
                "Requests must carry x-user-role and, for school roles, x-school-id",
            ),
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        let (status, code) = match &error {
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR")
            }
            EngineError::Repository { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
            EngineError::InvalidPayrollSettings { .. } => {
                (StatusCode::BAD_REQUEST, "INVALID_PAYROLL_SETTINGS")
            }
            EngineError::InvalidSalary { .. } => (StatusCode::BAD_REQUEST, "INVALID_SALARY"),
            EngineError::InvalidPeriod { .. } => (StatusCode::BAD_REQUEST, "INVALID_PERIOD"),
            EngineError::SchoolNotFound { .. } => (StatusCode::NOT_FOUND, "SCHOOL_NOT_FOUND"),
            EngineError::MemberNotFound { .. } => (StatusCode::NOT_FOUND, "MEMBER_NOT_FOUND"),
            EngineError::NoEligibleStaff { .. } => (StatusCode::CONFLICT, "NO_ELIGIBLE_STAFF"),
            EngineError::DuplicatePayslip { .. } => (StatusCode::CONFLICT, "DUPLICATE_PAYSLIP"),
            EngineError::Unauthorized { .. } => (StatusCode::FORBIDDEN, "FORBIDDEN"),
        };

        let error = match error {
            EngineError::NoEligibleStaff { .. } => ApiError::with_details(
                code,
                message,
                "No member has a payable salary that is not already paid for this period",
            ),
            _ => ApiError::new(code, message),
        };

        ApiErrorResponse { status, error }
    }
}

/// Response body for `POST /payslips/calculate`.
#[derive(Debug, Clone, Serialize)]
pub struct CalculatePayslipResponse {
    /// The computed payslip, or `null` when the member was skipped.
    pub payslip: Option<Payslip>,
    /// How the payslip was computed.
    pub audit_steps: Vec<AuditStep>,
    /// Why no payslip was produced.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped_reason: Option<SkipReason>,
}
