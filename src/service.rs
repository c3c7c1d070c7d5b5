//! Payroll workflow over an injected repository.
//!
//! The calculator is pure; this layer adds the authorization checks,
//! persistence of payslips, and the salaries entry in the expenditure ledger.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::calculation::{
    evaluate_payslip, run_payroll_for_school, PayslipCalculation, SkipReason, SkippedMember,
};
use crate::error::{EngineError, EngineResult};
use crate::fees::{debt_aging_report, DebtAgingReport};
use crate::models::{
    CurrentUser, Expenditure, PayPeriod, PayrollSettings, Payslip, SalarySetup, School, TeamMember,
};
use crate::repository::SchoolRepository;
use crate::template::{render_template, TemplateContext};

/// What a completed payroll run produced and recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayrollRunSummary {
    /// The school the run was for.
    pub school_id: String,
    /// The month paid.
    pub period: PayPeriod,
    /// The payslips that were stored.
    pub payslips: Vec<Payslip>,
    /// Sum of net salaries.
    pub total_payroll: Decimal,
    /// Members left out of the run.
    pub skipped: Vec<SkippedMember>,
    /// The ledger entry recording the run.
    pub expenditure: Expenditure,
}

/// The outcome of previewing a member's payslip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PayslipPreview {
    /// The payslip the next run would produce.
    Calculated(PayslipCalculation),
    /// The next run would skip the member.
    Skipped {
        /// Why.
        reason: SkipReason,
    },
}

/// A rendered fee reminder for one student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeeReminder {
    /// The student the reminder is about.
    pub student_id: String,
    /// The rendered message.
    pub message: String,
}

/// Runs payroll workflows against a repository.
#[derive(Debug, Clone)]
pub struct PayrollService<R> {
    repository: R,
}

impl<R: SchoolRepository> PayrollService<R> {
    /// Creates a service over the given repository.
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// The underlying repository.
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Runs payroll for every eligible member of the school.
    ///
    /// Stores the payslips and records one salaries expenditure. Fails with
    /// `NoEligibleStaff` when nobody is due a payslip, leaving the store
    /// untouched.
    pub fn run_payroll(
        &self,
        actor: &CurrentUser,
        school_id: &str,
        period: PayPeriod,
    ) -> EngineResult<PayrollRunSummary> {
        authorize_payroll(actor, school_id, "run payroll")?;

        let school = self.repository.get_school(school_id)?;
        let members = self.repository.list_members(school_id)?;
        debug!(
            school_id = %school_id,
            period = %period,
            members = members.len(),
            "Starting payroll run"
        );

        let run = run_payroll_for_school(&members, period, &school.payroll_settings);

        if run.payslips.is_empty() {
            warn!(
                school_id = %school_id,
                period = %period,
                skipped = run.skipped.len(),
                "No eligible staff for payroll"
            );
            return Err(EngineError::NoEligibleStaff {
                school_id: school_id.to_string(),
                period: period.to_string(),
            });
        }

        let expenditure =
            Expenditure::for_payroll(school_id, period, run.total_payroll, today());
        self.repository
            .record_payroll(school_id, &run.payslips, expenditure.clone())?;

        info!(
            school_id = %school_id,
            period = %period,
            payslips = run.payslips.len(),
            skipped = run.skipped.len(),
            total_payroll = %run.total_payroll,
            "Payroll run completed"
        );

        Ok(PayrollRunSummary {
            school_id: school_id.to_string(),
            period,
            payslips: run.payslips,
            total_payroll: run.total_payroll,
            skipped: run.skipped,
            expenditure,
        })
    }

    /// Sets a member's salary terms.
    pub fn configure_salary(
        &self,
        actor: &CurrentUser,
        school_id: &str,
        member_id: &str,
        setup: SalarySetup,
    ) -> EngineResult<TeamMember> {
        authorize_payroll(actor, school_id, "configure salaries")?;
        setup.validate()?;

        let member = self.repository.update_salary(school_id, member_id, setup)?;
        info!(school_id = %school_id, member_id = %member_id, "Salary configured");
        Ok(member)
    }

    /// Validates and saves the school's payroll settings.
    pub fn update_payroll_settings(
        &self,
        actor: &CurrentUser,
        school_id: &str,
        settings: PayrollSettings,
    ) -> EngineResult<School> {
        authorize_payroll(actor, school_id, "change payroll settings")?;
        settings.validate()?;

        let school = self.repository.update_payroll_settings(school_id, settings)?;
        info!(
            school_id = %school_id,
            brackets = school.payroll_settings.paye_brackets.len(),
            "Payroll settings updated"
        );
        Ok(school)
    }

    /// A member's payslip history, oldest first.
    pub fn member_payslips(
        &self,
        actor: &CurrentUser,
        school_id: &str,
        member_id: &str,
    ) -> EngineResult<Vec<Payslip>> {
        if !actor.can_view_payslips(school_id, member_id) {
            return Err(unauthorized(actor, "view these payslips"));
        }

        let member = self.repository.get_member(school_id, member_id)?;
        let mut payslips = member.salary.map(|s| s.payslips).unwrap_or_default();
        payslips.sort_by_key(|p| p.period);
        Ok(payslips)
    }

    /// A member's payslip for one period, if payroll has run for it.
    pub fn payslip_for_period(
        &self,
        actor: &CurrentUser,
        school_id: &str,
        member_id: &str,
        period: PayPeriod,
    ) -> EngineResult<Option<Payslip>> {
        Ok(self
            .member_payslips(actor, school_id, member_id)?
            .into_iter()
            .find(|p| p.period == period))
    }

    /// Computes what the next run would pay a member, without storing it.
    pub fn preview_payslip(
        &self,
        actor: &CurrentUser,
        school_id: &str,
        member_id: &str,
        period: PayPeriod,
    ) -> EngineResult<PayslipPreview> {
        authorize_payroll(actor, school_id, "preview payslips")?;

        let school = self.repository.get_school(school_id)?;
        let member = self.repository.get_member(school_id, member_id)?;

        let preview = match evaluate_payslip(&member, period, &school.payroll_settings) {
            Ok(calculation) => PayslipPreview::Calculated(calculation),
            Err(reason) => PayslipPreview::Skipped { reason },
        };
        Ok(preview)
    }

    /// The school's outstanding fees grouped by age.
    pub fn debt_aging(
        &self,
        actor: &CurrentUser,
        school_id: &str,
        as_of: NaiveDate,
    ) -> EngineResult<DebtAgingReport> {
        authorize_payroll(actor, school_id, "view fee reports")?;
        let accounts = self.repository.student_accounts(school_id)?;
        Ok(debt_aging_report(&accounts, as_of))
    }

    /// Renders a reminder for every student with an outstanding balance.
    pub fn fee_reminders(
        &self,
        actor: &CurrentUser,
        school_id: &str,
        template: &str,
    ) -> EngineResult<Vec<FeeReminder>> {
        authorize_payroll(actor, school_id, "send fee reminders")?;

        let school = self.repository.get_school(school_id)?;
        let reminders: Vec<FeeReminder> = self
            .repository
            .student_accounts(school_id)?
            .iter()
            .filter(|a| a.outstanding_fees() > Decimal::ZERO)
            .map(|a| FeeReminder {
                student_id: a.student_id.clone(),
                message: render_template(template, &TemplateContext::from_account(&school, a)),
            })
            .collect();

        debug!(school_id = %school_id, reminders = reminders.len(), "Rendered fee reminders");
        Ok(reminders)
    }
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

fn authorize_payroll(actor: &CurrentUser, school_id: &str, action: &str) -> EngineResult<()> {
    if actor.can_run_payroll(school_id) {
        Ok(())
    } else {
        warn!(role = actor.role_name(), school_id = %school_id, action, "Action refused");
        Err(unauthorized(actor, action))
    }
}

fn unauthorized(actor: &CurrentUser, action: &str) -> EngineError {
    EngineError::Unauthorized {
        role: actor.role_name().to_string(),
        action: action.to_string(),
    }
}
