//! SMS and e-mail message templates.
//!
//! Templates may reference a fixed set of fields as `{field_name}`. Only
//! those fields are ever substituted; anything else in braces is left as
//! written, and substituted values are never scanned again.

use std::collections::HashMap;
use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::fees::StudentAccount;
use crate::models::School;

/// The placeholders a template may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateField {
    /// `{student_name}`
    StudentName,
    /// `{parent_name}`
    ParentName,
    /// `{school_name}`
    SchoolName,
    /// `{amount_due}`: total fees billed.
    AmountDue,
    /// `{amount_paid}`
    AmountPaid,
    /// `{balance}`: outstanding fees.
    Balance,
    /// `{due_date}`
    DueDate,
}

impl TemplateField {
    /// Every supported field.
    pub const ALL: [TemplateField; 7] = [
        TemplateField::StudentName,
        TemplateField::ParentName,
        TemplateField::SchoolName,
        TemplateField::AmountDue,
        TemplateField::AmountPaid,
        TemplateField::Balance,
        TemplateField::DueDate,
    ];

    /// The name used between the braces.
    pub fn placeholder(&self) -> &'static str {
        match self {
            TemplateField::StudentName => "student_name",
            TemplateField::ParentName => "parent_name",
            TemplateField::SchoolName => "school_name",
            TemplateField::AmountDue => "amount_due",
            TemplateField::AmountPaid => "amount_paid",
            TemplateField::Balance => "balance",
            TemplateField::DueDate => "due_date",
        }
    }

    /// Looks a placeholder name up; `None` for unsupported names.
    pub fn from_placeholder(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.placeholder() == name)
    }
}

impl fmt::Display for TemplateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.placeholder())
    }
}

/// Values available to a template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateContext {
    values: HashMap<TemplateField, String>,
}

impl TemplateContext {
    /// An empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field's value.
    pub fn with(mut self, field: TemplateField, value: impl Into<String>) -> Self {
        self.values.insert(field, value.into());
        self
    }

    /// The value of a field, if set.
    pub fn get(&self, field: TemplateField) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }

    /// Fills every field from a student's fee account.
    pub fn from_account(school: &School, account: &StudentAccount) -> Self {
        Self::new()
            .with(TemplateField::StudentName, &account.student_name)
            .with(TemplateField::ParentName, &account.parent_name)
            .with(TemplateField::SchoolName, &school.name)
            .with(TemplateField::AmountDue, money(&school.currency, account.total_fees))
            .with(TemplateField::AmountPaid, money(&school.currency, account.amount_paid))
            .with(TemplateField::Balance, money(&school.currency, account.outstanding_fees()))
            .with(TemplateField::DueDate, long_date(account.due_date))
    }
}

fn money(currency: &str, amount: Decimal) -> String {
    format!("{} {:.2}", currency, amount)
}

fn long_date(date: NaiveDate) -> String {
    date.format("%-d %B %Y").to_string()
}

/// Substitutes the context's values into the template.
///
/// # Example
///
/// ```
/// use bursar_engine::template::{render_template, TemplateContext, TemplateField};
///
/// let context = TemplateContext::new()
///     .with(TemplateField::ParentName, "Mrs Ade")
///     .with(TemplateField::Balance, "NGN 40000.00");
///
/// let message = render_template("Dear {parent_name}, {balance} is due. {unknown}", &context);
/// assert_eq!(message, "Dear Mrs Ade, NGN 40000.00 is due. {unknown}");
/// ```
pub fn render_template(template: &str, context: &TemplateContext) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        output.push_str(&rest[..open]);
        let after_open = &rest[open + 1..];

        let Some(close) = after_open.find('}') else {
            output.push_str(&rest[open..]);
            return output;
        };

        let name = &after_open[..close];
        if let Some(inner) = name.rfind('{') {
            // a stray brace is literal text; the placeholder starts at the last one
            output.push('{');
            output.push_str(&name[..inner]);
            rest = &after_open[inner..];
            continue;
        }

        match TemplateField::from_placeholder(name).and_then(|f| context.get(f)) {
            Some(value) => output.push_str(value),
            None => {
                output.push('{');
                output.push_str(name);
                output.push('}');
            }
        }
        rest = &after_open[close + 1..];
    }

    output.push_str(rest);
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PayrollSettings;
    use std::str::FromStr;

    fn sample_school() -> School {
        School {
            id: "sch_001".to_string(),
            name: "Greenfield Academy".to_string(),
            currency: "NGN".to_string(),
            payroll_settings: PayrollSettings::default(),
        }
    }

    fn sample_account() -> StudentAccount {
        StudentAccount {
            student_id: "st_001".to_string(),
            school_id: "sch_001".to_string(),
            student_name: "Tobi Ade".to_string(),
            parent_name: "Mrs Ade".to_string(),
            total_fees: Decimal::from_str("150000").unwrap(),
            amount_paid: Decimal::from_str("100000").unwrap(),
            discount: Decimal::from_str("10000").unwrap(),
            due_date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
        }
    }

    #[test]
    fn test_renders_fee_reminder() {
        let context = TemplateContext::from_account(&sample_school(), &sample_account());
        let message = render_template(
            "Dear {parent_name}, {student_name}'s balance at {school_name} is {balance}, due {due_date}.",
            &context,
        );
        assert_eq!(
            message,
            "Dear Mrs Ade, Tobi Ade's balance at Greenfield Academy is NGN 40000.00, due 5 January 2026."
        );
    }

    #[test]
    fn test_unknown_placeholder_is_left_verbatim() {
        let context = TemplateContext::from_account(&sample_school(), &sample_account());
        assert_eq!(
            render_template("Hello {teacher_name}", &context),
            "Hello {teacher_name}"
        );
    }

    #[test]
    fn test_known_field_without_value_is_left_verbatim() {
        let context = TemplateContext::new().with(TemplateField::StudentName, "Tobi");
        assert_eq!(
            render_template("{student_name} owes {balance}", &context),
            "Tobi owes {balance}"
        );
    }

    #[test]
    fn test_substituted_values_are_not_expanded() {
        let context = TemplateContext::new()
            .with(TemplateField::StudentName, "{parent_name}")
            .with(TemplateField::ParentName, "Mrs Ade");
        assert_eq!(
            render_template("Student: {student_name}", &context),
            "Student: {parent_name}"
        );
    }

    #[test]
    fn test_unclosed_brace_is_kept() {
        let context = TemplateContext::new().with(TemplateField::StudentName, "Tobi");
        assert_eq!(
            render_template("{student_name} paid {amount", &context),
            "Tobi paid {amount"
        );
    }

    #[test]
    fn test_stray_brace_does_not_swallow_placeholder() {
        let context = TemplateContext::new().with(TemplateField::Balance, "NGN 10.00");
        assert_eq!(
            render_template("Pay :-{ {balance} today", &context),
            "Pay :-{ NGN 10.00 today"
        );
        assert_eq!(render_template("{{balance}}", &context), "{NGN 10.00}");
    }

    #[test]
    fn test_repeated_placeholder() {
        let context = TemplateContext::new().with(TemplateField::SchoolName, "Greenfield");
        assert_eq!(
            render_template("{school_name} / {school_name}", &context),
            "Greenfield / Greenfield"
        );
    }

    #[test]
    fn test_placeholder_lookup_round_trips() {
        for field in TemplateField::ALL {
            assert_eq!(TemplateField::from_placeholder(field.placeholder()), Some(field));
        }
        assert_eq!(TemplateField::from_placeholder("password"), None);
    }

    #[test]
    fn test_field_displays_with_braces() {
        assert_eq!(TemplateField::DueDate.to_string(), "{due_date}");
    }
}
