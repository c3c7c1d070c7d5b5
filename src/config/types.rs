//! Configuration types deserialized from the school profile files.

use serde::Deserialize;

use crate::fees::StudentAccount;
use crate::models::{PayrollSettings, School, TeamMember};

/// A school profile, one file per tenant under `schools/`.
#[derive(Debug, Clone, Deserialize)]
pub struct SchoolProfile {
    /// Unique identifier for the school.
    pub id: String,
    /// Display name.
    pub name: String,
    /// ISO currency code.
    pub currency: String,
    /// Pension rate and PAYE brackets.
    #[serde(default)]
    pub payroll: PayrollSettings,
}

impl From<SchoolProfile> for School {
    fn from(profile: SchoolProfile) -> Self {
        School {
            id: profile.id,
            name: profile.name,
            currency: profile.currency,
            payroll_settings: profile.payroll,
        }
    }
}

/// Initial staff and fee accounts, read from `seed.yaml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedData {
    /// Staff across all schools.
    #[serde(default)]
    pub members: Vec<TeamMember>,
    /// Student fee accounts across all schools.
    #[serde(default)]
    pub student_accounts: Vec<StudentAccount>,
}
