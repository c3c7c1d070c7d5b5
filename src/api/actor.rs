//! Resolves the acting user from gateway-set headers.

use axum::http::HeaderMap;

use crate::models::CurrentUser;

use super::response::ApiErrorResponse;

/// Header carrying the role tag (`superAdmin`, `schoolAdmin`, `parent`, `teacher`, `staff`).
pub const ROLE_HEADER: &str = "x-user-role";
/// Header carrying the actor's school.
pub const SCHOOL_HEADER: &str = "x-school-id";
/// Header carrying the actor's team member id, for staff roles.
pub const MEMBER_HEADER: &str = "x-member-id";
/// Comma-separated student ids, for parents.
pub const STUDENTS_HEADER: &str = "x-student-ids";

/// Builds the acting user from request headers.
pub fn actor_from_headers(headers: &HeaderMap) -> Result<CurrentUser, ApiErrorResponse> {
    let role = header(headers, ROLE_HEADER)
        .ok_or_else(|| ApiErrorResponse::unauthenticated("Missing x-user-role header"))?;

    let school_id = || {
        header(headers, SCHOOL_HEADER)
            .map(str::to_string)
            .ok_or_else(|| ApiErrorResponse::unauthenticated("Missing x-school-id header"))
    };
    let member_id = || {
        header(headers, MEMBER_HEADER)
            .map(str::to_string)
            .ok_or_else(|| ApiErrorResponse::unauthenticated("Missing x-member-id header"))
    };

    match role {
        "superAdmin" => Ok(CurrentUser::SuperAdmin),
        "schoolAdmin" => Ok(CurrentUser::SchoolAdmin {
            school_id: school_id()?,
        }),
        "parent" => Ok(CurrentUser::Parent {
            school_id: school_id()?,
            student_ids: header(headers, STUDENTS_HEADER)
                .map(|ids| {
                    ids.split(',')
                        .map(str::trim)
                        .filter(|id| !id.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
        }),
        "teacher" => Ok(CurrentUser::Teacher {
            school_id: school_id()?,
            member_id: member_id()?,
        }),
        "staff" => Ok(CurrentUser::Staff {
            school_id: school_id()?,
            member_id: member_id()?,
        }),
        other => Err(ApiErrorResponse::unauthenticated(format!(
            "Unknown role '{}'",
            other
        ))),
    }
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}
