//! Team member model.
//!
//! This module defines the [`TeamMember`] struct and [`StaffRole`] enum
//! for representing school staff on the payroll.

use serde::{Deserialize, Serialize};

use super::SalaryInfo;

/// The position a team member holds at the school.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffRole {
    /// Teaching staff.
    Teacher,
    /// Finance office staff who record payments.
    Bursar,
    /// School administration.
    Administrator,
    /// Non-teaching support staff.
    SupportStaff,
}

/// A staff member of a school.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    /// Unique identifier for the member.
    pub id: String,
    /// The school the member works for.
    pub school_id: String,
    /// Full name.
    pub name: String,
    /// The member's position.
    pub role: StaffRole,
    /// Salary terms; `None` until salary setup has been done.
    #[serde(default)]
    pub salary: Option<SalaryInfo>,
}

impl TeamMember {
    /// Returns true if salary setup has been done for this member.
    ///
    /// # Examples
    ///
    /// ```
    /// use bursar_engine::models::{StaffRole, TeamMember};
    ///
    /// let member = TeamMember {
    ///     id: "tm_001".to_string(),
    ///     school_id: "sch_001".to_string(),
    ///     name: "Ada Obi".to_string(),
    ///     role: StaffRole::Teacher,
    ///     salary: None,
    /// };
    /// assert!(!member.has_salary());
    /// ```
    pub fn has_salary(&self) -> bool {
        self.salary.is_some()
    }
}
