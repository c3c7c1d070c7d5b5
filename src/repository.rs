//! Storage interface for schools, staff, payslips and ledgers.
//!
//! The engine never owns global state. Callers inject a [`SchoolRepository`];
//! [`InMemoryRepository`] backs tests and the offline server.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{EngineError, EngineResult};
use crate::fees::StudentAccount;
use crate::models::{
    Expenditure, PayrollSettings, Payslip, SalaryInfo, SalarySetup, School, TeamMember,
};

/// Get, update and append operations over a tenant's payroll data.
pub trait SchoolRepository: Send + Sync {
    /// Adds or replaces a school.
    fn insert_school(&self, school: School) -> EngineResult<()>;

    /// Fetches a school by id.
    fn get_school(&self, school_id: &str) -> EngineResult<School>;

    /// Replaces a school's payroll settings.
    fn update_payroll_settings(
        &self,
        school_id: &str,
        settings: PayrollSettings,
    ) -> EngineResult<School>;

    /// Adds or replaces a team member in their school.
    fn insert_member(&self, member: TeamMember) -> EngineResult<()>;

    /// All members of a school, in insertion order.
    fn list_members(&self, school_id: &str) -> EngineResult<Vec<TeamMember>>;

    /// Fetches one member.
    fn get_member(&self, school_id: &str, member_id: &str) -> EngineResult<TeamMember>;

    /// Replaces a member's salary terms, keeping their payslip history.
    fn update_salary(
        &self,
        school_id: &str,
        member_id: &str,
        setup: SalarySetup,
    ) -> EngineResult<TeamMember>;

    /// Appends payslips to their members' histories.
    ///
    /// All-or-nothing: if any payslip's `(member, period)` is already on
    /// record, or names an unknown member, nothing is written.
    fn append_payslips(&self, school_id: &str, payslips: &[Payslip]) -> EngineResult<()>;

    /// Appends an entry to the school's expenditure ledger.
    fn append_expenditure(&self, expenditure: Expenditure) -> EngineResult<()>;

    /// Stores a run's payslips and its ledger entry as one write.
    ///
    /// Either both land or neither does: a rejected payslip batch leaves the
    /// ledger untouched, and an entry for another school stores no payslips.
    fn record_payroll(
        &self,
        school_id: &str,
        payslips: &[Payslip],
        expenditure: Expenditure,
    ) -> EngineResult<()>;

    /// The school's expenditure ledger, oldest first.
    fn list_expenditures(&self, school_id: &str) -> EngineResult<Vec<Expenditure>>;

    /// Adds or replaces a student's fee account.
    fn insert_student_account(&self, account: StudentAccount) -> EngineResult<()>;

    /// All fee accounts for a school.
    fn student_accounts(&self, school_id: &str) -> EngineResult<Vec<StudentAccount>>;
}

#[derive(Debug, Default)]
struct Tenant {
    school: Option<School>,
    members: Vec<TeamMember>,
    expenditures: Vec<Expenditure>,
    accounts: Vec<StudentAccount>,
}

/// A repository held entirely in memory.
///
/// Clones share the same data.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    tenants: Arc<RwLock<HashMap<String, Tenant>>>,
}

impl InMemoryRepository {
    /// An empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> EngineResult<RwLockReadGuard<'_, HashMap<String, Tenant>>> {
        self.tenants.read().map_err(|_| EngineError::Repository {
            message: "store lock poisoned".to_string(),
        })
    }

    fn write(&self) -> EngineResult<RwLockWriteGuard<'_, HashMap<String, Tenant>>> {
        self.tenants.write().map_err(|_| EngineError::Repository {
            message: "store lock poisoned".to_string(),
        })
    }
}

fn school_not_found(school_id: &str) -> EngineError {
    EngineError::SchoolNotFound {
        school_id: school_id.to_string(),
    }
}

fn member_not_found(school_id: &str, member_id: &str) -> EngineError {
    EngineError::MemberNotFound {
        school_id: school_id.to_string(),
        member_id: member_id.to_string(),
    }
}

fn existing_tenant<'a>(
    tenants: &'a HashMap<String, Tenant>,
    school_id: &str,
) -> EngineResult<&'a Tenant> {
    tenants
        .get(school_id)
        .filter(|t| t.school.is_some())
        .ok_or_else(|| school_not_found(school_id))
}

fn existing_tenant_mut<'a>(
    tenants: &'a mut HashMap<String, Tenant>,
    school_id: &str,
) -> EngineResult<&'a mut Tenant> {
    tenants
        .get_mut(school_id)
        .filter(|t| t.school.is_some())
        .ok_or_else(|| school_not_found(school_id))
}

/// Fails unless every payslip names a known member and a period not yet paid.
fn check_new_payslips(tenant: &Tenant, school_id: &str, payslips: &[Payslip]) -> EngineResult<()> {
    for (index, payslip) in payslips.iter().enumerate() {
        let member = tenant
            .members
            .iter()
            .find(|m| m.id == payslip.team_member_id)
            .ok_or_else(|| member_not_found(school_id, &payslip.team_member_id))?;

        let on_record = member
            .salary
            .as_ref()
            .is_some_and(|s| s.has_payslip_for(payslip.period));
        let repeated_in_batch = payslips[..index]
            .iter()
            .any(|p| p.team_member_id == payslip.team_member_id && p.period == payslip.period);

        if on_record || repeated_in_batch {
            return Err(EngineError::DuplicatePayslip {
                member_id: payslip.team_member_id.clone(),
                period: payslip.period.to_string(),
            });
        }
    }
    Ok(())
}

fn push_payslips(tenant: &mut Tenant, payslips: &[Payslip]) {
    for payslip in payslips {
        if let Some(member) = tenant
            .members
            .iter_mut()
            .find(|m| m.id == payslip.team_member_id)
        {
            member
                .salary
                .get_or_insert_with(|| SalaryInfo::new(payslip.base_salary, vec![], vec![]))
                .payslips
                .push(payslip.clone());
        }
    }
}

impl SchoolRepository for InMemoryRepository {
    fn insert_school(&self, school: School) -> EngineResult<()> {
        let mut tenants = self.write()?;
        let school_id = school.id.clone();
        tenants.entry(school_id).or_default().school = Some(school);
        Ok(())
    }

    fn get_school(&self, school_id: &str) -> EngineResult<School> {
        let tenants = self.read()?;
        existing_tenant(&tenants, school_id)?
            .school
            .clone()
            .ok_or_else(|| school_not_found(school_id))
    }

    fn update_payroll_settings(
        &self,
        school_id: &str,
        settings: PayrollSettings,
    ) -> EngineResult<School> {
        let mut tenants = self.write()?;
        let tenant = existing_tenant_mut(&mut tenants, school_id)?;
        let school = tenant
            .school
            .as_mut()
            .ok_or_else(|| school_not_found(school_id))?;
        school.payroll_settings = settings;
        Ok(school.clone())
    }

    fn insert_member(&self, member: TeamMember) -> EngineResult<()> {
        let mut tenants = self.write()?;
        let tenant = existing_tenant_mut(&mut tenants, &member.school_id)?;
        match tenant.members.iter_mut().find(|m| m.id == member.id) {
            Some(existing) => *existing = member,
            None => tenant.members.push(member),
        }
        Ok(())
    }

    fn list_members(&self, school_id: &str) -> EngineResult<Vec<TeamMember>> {
        let tenants = self.read()?;
        Ok(existing_tenant(&tenants, school_id)?.members.clone())
    }

    fn get_member(&self, school_id: &str, member_id: &str) -> EngineResult<TeamMember> {
        let tenants = self.read()?;
        existing_tenant(&tenants, school_id)?
            .members
            .iter()
            .find(|m| m.id == member_id)
            .cloned()
            .ok_or_else(|| member_not_found(school_id, member_id))
    }

    fn update_salary(
        &self,
        school_id: &str,
        member_id: &str,
        setup: SalarySetup,
    ) -> EngineResult<TeamMember> {
        let mut tenants = self.write()?;
        let tenant = existing_tenant_mut(&mut tenants, school_id)?;
        let member = tenant
            .members
            .iter_mut()
            .find(|m| m.id == member_id)
            .ok_or_else(|| member_not_found(school_id, member_id))?;

        match member.salary.as_mut() {
            Some(salary) => salary.apply_setup(setup),
            None => member.salary = Some(SalaryInfo::from(setup)),
        }
        Ok(member.clone())
    }

    fn append_payslips(&self, school_id: &str, payslips: &[Payslip]) -> EngineResult<()> {
        let mut tenants = self.write()?;
        let tenant = existing_tenant_mut(&mut tenants, school_id)?;
        check_new_payslips(tenant, school_id, payslips)?;
        push_payslips(tenant, payslips);
        Ok(())
    }

    fn append_expenditure(&self, expenditure: Expenditure) -> EngineResult<()> {
        let mut tenants = self.write()?;
        existing_tenant_mut(&mut tenants, &expenditure.school_id)?
            .expenditures
            .push(expenditure);
        Ok(())
    }

    fn record_payroll(
        &self,
        school_id: &str,
        payslips: &[Payslip],
        expenditure: Expenditure,
    ) -> EngineResult<()> {
        if expenditure.school_id != school_id {
            return Err(EngineError::Repository {
                message: format!(
                    "expenditure for school '{}' cannot be recorded against '{}'",
                    expenditure.school_id, school_id
                ),
            });
        }

        let mut tenants = self.write()?;
        let tenant = existing_tenant_mut(&mut tenants, school_id)?;
        check_new_payslips(tenant, school_id, payslips)?;
        push_payslips(tenant, payslips);
        tenant.expenditures.push(expenditure);
        Ok(())
    }

    fn list_expenditures(&self, school_id: &str) -> EngineResult<Vec<Expenditure>> {
        let tenants = self.read()?;
        Ok(existing_tenant(&tenants, school_id)?.expenditures.clone())
    }

    fn insert_student_account(&self, account: StudentAccount) -> EngineResult<()> {
        let mut tenants = self.write()?;
        let tenant = existing_tenant_mut(&mut tenants, &account.school_id)?;
        match tenant
            .accounts
            .iter_mut()
            .find(|a| a.student_id == account.student_id)
        {
            Some(existing) => *existing = account,
            None => tenant.accounts.push(account),
        }
        Ok(())
    }

    fn student_accounts(&self, school_id: &str) -> EngineResult<Vec<StudentAccount>> {
        let tenants = self.read()?;
        Ok(existing_tenant(&tenants, school_id)?.accounts.clone())
    }
}
