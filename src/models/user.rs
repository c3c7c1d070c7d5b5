//! The signed-in user, modelled as a tagged union of roles.

use serde::{Deserialize, Serialize};

/// The user a request acts on behalf of.
///
/// Each role carries only the data that role has; the platform operator
/// belongs to no school.
///
/// # Example
///
/// ```
/// use bursar_engine::models::CurrentUser;
///
/// let admin: CurrentUser =
///     serde_json::from_str(r#"{"role": "schoolAdmin", "school_id": "sch_001"}"#).unwrap();
/// assert!(admin.can_run_payroll("sch_001"));
/// assert!(!admin.can_run_payroll("sch_002"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "camelCase")]
pub enum CurrentUser {
    /// Platform operator managing tenants and plans.
    SuperAdmin,
    /// Administrator of one school.
    SchoolAdmin {
        /// The administered school.
        school_id: String,
    },
    /// Parent paying fees for one or more students.
    Parent {
        /// The school the children attend.
        school_id: String,
        /// The parent's children.
        #[serde(default)]
        student_ids: Vec<String>,
    },
    /// Teaching staff.
    Teacher {
        /// The employing school.
        school_id: String,
        /// The teacher's team member record.
        member_id: String,
    },
    /// Non-teaching staff.
    Staff {
        /// The employing school.
        school_id: String,
        /// The staff member's team member record.
        member_id: String,
    },
}

impl CurrentUser {
    /// The role tag, as serialized.
    pub fn role_name(&self) -> &'static str {
        match self {
            CurrentUser::SuperAdmin => "superAdmin",
            CurrentUser::SchoolAdmin { .. } => "schoolAdmin",
            CurrentUser::Parent { .. } => "parent",
            CurrentUser::Teacher { .. } => "teacher",
            CurrentUser::Staff { .. } => "staff",
        }
    }

    /// The school the user belongs to; `None` for the platform operator.
    pub fn school_id(&self) -> Option<&str> {
        match self {
            CurrentUser::SuperAdmin => None,
            CurrentUser::SchoolAdmin { school_id }
            | CurrentUser::Parent { school_id, .. }
            | CurrentUser::Teacher { school_id, .. }
            | CurrentUser::Staff { school_id, .. } => Some(school_id),
        }
    }

    /// Payroll runs, salary setup and settings changes.
    pub fn can_run_payroll(&self, school_id: &str) -> bool {
        match self {
            CurrentUser::SuperAdmin => true,
            CurrentUser::SchoolAdmin { school_id: own } => own == school_id,
            _ => false,
        }
    }

    /// Admins see every payslip in their school; staff see only their own.
    pub fn can_view_payslips(&self, school_id: &str, member_id: &str) -> bool {
        match self {
            CurrentUser::SuperAdmin => true,
            CurrentUser::SchoolAdmin { school_id: own } => own == school_id,
            CurrentUser::Teacher {
                school_id: own,
                member_id: me,
            }
            | CurrentUser::Staff {
                school_id: own,
                member_id: me,
            } => own == school_id && me == member_id,
            CurrentUser::Parent { .. } => false,
        }
    }
}
