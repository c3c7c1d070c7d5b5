//! Pay period model.
//!
//! This module contains the [`PayPeriod`] type: the calendar month a payroll
//! run and its payslips belong to.

use std::fmt;

use chrono::{Datelike, Month, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A calendar month identified by `(year, month)`.
///
/// Periods order chronologically and are validated on construction and on
/// deserialization, so a `PayPeriod` always names a real month.
///
/// # Example
///
/// ```
/// use bursar_engine::models::PayPeriod;
///
/// let period = PayPeriod::new(2026, 3).unwrap();
/// assert_eq!(period.to_string(), "March 2026");
/// assert!(PayPeriod::new(2026, 13).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "PayPeriodFields")]
pub struct PayPeriod {
    year: i32,
    month: u32,
}

#[derive(Deserialize)]
struct PayPeriodFields {
    year: i32,
    month: u32,
}

impl TryFrom<PayPeriodFields> for PayPeriod {
    type Error = EngineError;

    fn try_from(fields: PayPeriodFields) -> Result<Self, Self::Error> {
        PayPeriod::new(fields.year, fields.month)
    }
}

impl PayPeriod {
    /// Creates a period, rejecting months outside `1..=12`.
    pub fn new(year: i32, month: u32) -> EngineResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(EngineError::InvalidPeriod { year, month });
        }
        Ok(Self { year, month })
    }

    /// The period containing the given date.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The calendar year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The calendar month, `1..=12`.
    pub fn month(&self) -> u32 {
        self.month
    }

    /// The English name of the month (e.g. "March").
    pub fn month_name(&self) -> &'static str {
        u8::try_from(self.month)
            .ok()
            .and_then(|month| Month::try_from(month).ok())
            .map_or("", |month| month.name())
    }

    /// Checks if a given date falls within this month.
    ///
    /// # Example
    ///
    /// ```
    /// use bursar_engine::models::PayPeriod;
    /// use chrono::NaiveDate;
    ///
    /// let period = PayPeriod::new(2026, 1).unwrap();
    /// assert!(period.contains_date(NaiveDate::from_ymd_opt(2026, 1, 31).unwrap()));
    /// assert!(!period.contains_date(NaiveDate::from_ymd_opt(2026, 2, 1).unwrap()));
    /// ```
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for PayPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month_name(), self.year)
    }
}
