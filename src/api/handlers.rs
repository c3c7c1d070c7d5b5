//! HTTP request handlers for the payroll API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::{HeaderMap, StatusCode},
    routing::{get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::evaluate_payslip;
use crate::error::EngineError;
use crate::fees::DebtAgingReport;
use crate::models::{PayrollSettings, Payslip, SalarySetup, School, TeamMember};
use crate::service::{FeeReminder, PayrollRunSummary, PayslipPreview};

use super::actor::actor_from_headers;
use super::request::{AgingQuery, CalculatePayslipRequest, PeriodRequest, RemindersRequest};
use super::response::{ApiError, ApiErrorResponse, CalculatePayslipResponse};
use super::state::AppState;

type ApiResult<T> = Result<T, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/payslips/calculate", post(calculate_payslip_handler))
        .route("/schools/:school_id/payroll/runs", post(run_payroll_handler))
        .route(
            "/schools/:school_id/payroll/settings",
            put(update_settings_handler),
        )
        .route(
            "/schools/:school_id/members/:member_id/salary",
            put(configure_salary_handler),
        )
        .route(
            "/schools/:school_id/members/:member_id/payslips",
            get(member_payslips_handler),
        )
        .route(
            "/schools/:school_id/members/:member_id/payslips/preview",
            get(preview_payslip_handler),
        )
        .route("/schools/:school_id/fees/aging", get(debt_aging_handler))
        .route("/schools/:school_id/fees/reminders", post(fee_reminders_handler))
        .with_state(state)
}

async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Handler for POST /payslips/calculate.
///
/// Computes a payslip from the request alone; nothing is stored.
async fn calculate_payslip_handler(
    payload: Result<Json<CalculatePayslipRequest>, JsonRejection>,
) -> ApiResult<Json<CalculatePayslipResponse>> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payslip calculation request");

    let Json(request) = payload.map_err(|r| json_rejection(correlation_id, r))?;
    let period = request.period().map_err(|e| failed(correlation_id, e))?;
    request
        .settings
        .validate()
        .map_err(|e| failed(correlation_id, e))?;

    let start_time = Instant::now();
    let calculation = match evaluate_payslip(&request.member, period, &request.settings) {
        Ok(calculation) => calculation,
        Err(reason) => {
            info!(
                correlation_id = %correlation_id,
                member_id = %request.member.id,
                reason = ?reason,
                "Member skipped"
            );
            return Ok(Json(CalculatePayslipResponse {
                payslip: None,
                audit_steps: Vec::new(),
                skipped_reason: Some(reason),
            }));
        }
    };

    info!(
        correlation_id = %correlation_id,
        member_id = %request.member.id,
        period = %period,
        net_salary = %calculation.payslip.net_salary,
        duration_us = start_time.elapsed().as_micros(),
        "Calculation completed successfully"
    );
    Ok(Json(CalculatePayslipResponse {
        payslip: Some(calculation.payslip),
        audit_steps: calculation.audit_steps,
        skipped_reason: None,
    }))
}

/// Handler for POST /schools/:school_id/payroll/runs.
async fn run_payroll_handler(
    State(state): State<AppState>,
    Path(school_id): Path<String>,
    headers: HeaderMap,
    payload: Result<Json<PeriodRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<PayrollRunSummary>)> {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        school_id = %school_id,
        "Processing payroll run request"
    );

    let actor = actor_from_headers(&headers)?;
    let Json(request) = payload.map_err(|r| json_rejection(correlation_id, r))?;
    let period = request.period().map_err(|e| failed(correlation_id, e))?;

    let start_time = Instant::now();
    let summary = state
        .service()
        .run_payroll(&actor, &school_id, period)
        .map_err(|e| failed(correlation_id, e))?;

    info!(
        correlation_id = %correlation_id,
        school_id = %school_id,
        payslips = summary.payslips.len(),
        total_payroll = %summary.total_payroll,
        duration_us = start_time.elapsed().as_micros(),
        "Payroll run completed successfully"
    );
    Ok((StatusCode::CREATED, Json(summary)))
}

/// Handler for PUT /schools/:school_id/payroll/settings.
async fn update_settings_handler(
    State(state): State<AppState>,
    Path(school_id): Path<String>,
    headers: HeaderMap,
    payload: Result<Json<PayrollSettings>, JsonRejection>,
) -> ApiResult<Json<School>> {
    let correlation_id = Uuid::new_v4();
    let actor = actor_from_headers(&headers)?;
    let Json(settings) = payload.map_err(|r| json_rejection(correlation_id, r))?;

    let school = state
        .service()
        .update_payroll_settings(&actor, &school_id, settings)
        .map_err(|e| failed(correlation_id, e))?;
    Ok(Json(school))
}

/// Handler for PUT /schools/:school_id/members/:member_id/salary.
async fn configure_salary_handler(
    State(state): State<AppState>,
    Path((school_id, member_id)): Path<(String, String)>,
    headers: HeaderMap,
    payload: Result<Json<SalarySetup>, JsonRejection>,
) -> ApiResult<Json<TeamMember>> {
    let correlation_id = Uuid::new_v4();
    let actor = actor_from_headers(&headers)?;
    let Json(setup) = payload.map_err(|r| json_rejection(correlation_id, r))?;

    let member = state
        .service()
        .configure_salary(&actor, &school_id, &member_id, setup)
        .map_err(|e| failed(correlation_id, e))?;
    Ok(Json(member))
}

/// Handler for GET /schools/:school_id/members/:member_id/payslips.
async fn member_payslips_handler(
    State(state): State<AppState>,
    Path((school_id, member_id)): Path<(String, String)>,
    headers: HeaderMap,
) -> ApiResult<Json<Vec<Payslip>>> {
    let correlation_id = Uuid::new_v4();
    let actor = actor_from_headers(&headers)?;

    let payslips = state
        .service()
        .member_payslips(&actor, &school_id, &member_id)
        .map_err(|e| failed(correlation_id, e))?;
    Ok(Json(payslips))
}

/// Handler for GET /schools/:school_id/members/:member_id/payslips/preview.
async fn preview_payslip_handler(
    State(state): State<AppState>,
    Path((school_id, member_id)): Path<(String, String)>,
    headers: HeaderMap,
    query: Result<Query<PeriodRequest>, QueryRejection>,
) -> ApiResult<Json<PayslipPreview>> {
    let correlation_id = Uuid::new_v4();
    let actor = actor_from_headers(&headers)?;
    let Query(request) = query.map_err(|r| query_rejection(correlation_id, r))?;
    let period = request.period().map_err(|e| failed(correlation_id, e))?;

    let preview = state
        .service()
        .preview_payslip(&actor, &school_id, &member_id, period)
        .map_err(|e| failed(correlation_id, e))?;
    Ok(Json(preview))
}

/// Handler for GET /schools/:school_id/fees/aging.
async fn debt_aging_handler(
    State(state): State<AppState>,
    Path(school_id): Path<String>,
    headers: HeaderMap,
    query: Result<Query<AgingQuery>, QueryRejection>,
) -> ApiResult<Json<DebtAgingReport>> {
    let correlation_id = Uuid::new_v4();
    let actor = actor_from_headers(&headers)?;
    let Query(request) = query.map_err(|r| query_rejection(correlation_id, r))?;

    let report = state
        .service()
        .debt_aging(&actor, &school_id, request.as_of)
        .map_err(|e| failed(correlation_id, e))?;
    Ok(Json(report))
}

/// Handler for POST /schools/:school_id/fees/reminders.
async fn fee_reminders_handler(
    State(state): State<AppState>,
    Path(school_id): Path<String>,
    headers: HeaderMap,
    payload: Result<Json<RemindersRequest>, JsonRejection>,
) -> ApiResult<Json<Vec<FeeReminder>>> {
    let correlation_id = Uuid::new_v4();
    let actor = actor_from_headers(&headers)?;
    let Json(request) = payload.map_err(|r| json_rejection(correlation_id, r))?;

    let reminders = state
        .service()
        .fee_reminders(&actor, &school_id, &request.template)
        .map_err(|e| failed(correlation_id, e))?;

    info!(
        correlation_id = %correlation_id,
        school_id = %school_id,
        reminders = reminders.len(),
        "Fee reminders rendered"
    );
    Ok(Json(reminders))
}

fn failed(correlation_id: Uuid, error: EngineError) -> ApiErrorResponse {
    warn!(correlation_id = %correlation_id, error = %error, "Request failed");
    error.into()
}

fn json_rejection(correlation_id: Uuid, rejection: JsonRejection) -> ApiErrorResponse {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::new("VALIDATION_ERROR", body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::bad_request(error)
}

fn query_rejection(correlation_id: Uuid, rejection: QueryRejection) -> ApiErrorResponse {
    let body_text = rejection.body_text();
    warn!(correlation_id = %correlation_id, error = %body_text, "Query string error");
    ApiErrorResponse::bad_request(ApiError::new("INVALID_QUERY", body_text))
}
