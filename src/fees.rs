//! Student fee balances and debt aging.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A student's fee position for the current term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentAccount {
    /// Unique identifier for the student.
    pub student_id: String,
    /// The school the student attends.
    pub school_id: String,
    /// The student's full name.
    pub student_name: String,
    /// The paying parent or guardian.
    pub parent_name: String,
    /// Fees billed.
    pub total_fees: Decimal,
    /// Payments recorded so far.
    #[serde(default)]
    pub amount_paid: Decimal,
    /// Discounts and scholarships granted.
    #[serde(default)]
    pub discount: Decimal,
    /// When the fees fall due.
    pub due_date: NaiveDate,
}

impl StudentAccount {
    /// Total fees minus amount paid minus discounts, never below zero.
    ///
    /// # Example
    ///
    /// ```
    /// use bursar_engine::fees::StudentAccount;
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let account = StudentAccount {
    ///     student_id: "st_001".to_string(),
    ///     school_id: "sch_001".to_string(),
    ///     student_name: "Tobi Ade".to_string(),
    ///     parent_name: "Mrs Ade".to_string(),
    ///     total_fees: Decimal::from(150_000),
    ///     amount_paid: Decimal::from(100_000),
    ///     discount: Decimal::from(10_000),
    ///     due_date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
    /// };
    /// assert_eq!(account.outstanding_fees(), Decimal::from(40_000));
    /// ```
    pub fn outstanding_fees(&self) -> Decimal {
        (self.total_fees - self.amount_paid - self.discount).max(Decimal::ZERO)
    }

    /// Which aging bucket the balance falls in; `None` when fully paid.
    pub fn aging_bucket(&self, as_of: NaiveDate) -> Option<AgingBucket> {
        if self.outstanding_fees() <= Decimal::ZERO {
            return None;
        }
        Some(AgingBucket::for_days_overdue((as_of - self.due_date).num_days()))
    }
}

/// How far past its due date a balance is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AgingBucket {
    /// Not yet due.
    #[serde(rename = "current")]
    Current,
    /// 1 to 30 days overdue.
    #[serde(rename = "days_1_30")]
    Days1To30,
    /// 31 to 60 days overdue.
    #[serde(rename = "days_31_60")]
    Days31To60,
    /// 61 to 90 days overdue.
    #[serde(rename = "days_61_90")]
    Days61To90,
    /// More than 90 days overdue.
    #[serde(rename = "over_90")]
    Over90,
}

impl AgingBucket {
    /// All buckets, youngest first.
    pub const ALL: [AgingBucket; 5] = [
        AgingBucket::Current,
        AgingBucket::Days1To30,
        AgingBucket::Days31To60,
        AgingBucket::Days61To90,
        AgingBucket::Over90,
    ];

    /// Maps a count of days past due to its bucket.
    pub fn for_days_overdue(days: i64) -> Self {
        match days {
            i64::MIN..=0 => AgingBucket::Current,
            1..=30 => AgingBucket::Days1To30,
            31..=60 => AgingBucket::Days31To60,
            61..=90 => AgingBucket::Days61To90,
            _ => AgingBucket::Over90,
        }
    }
}

/// Totals for one aging bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgingBucketTotal {
    /// The bucket.
    pub bucket: AgingBucket,
    /// Accounts with a balance in this bucket.
    pub accounts: usize,
    /// Sum of their outstanding balances.
    pub outstanding: Decimal,
}

/// Outstanding fees broken down by age.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DebtAgingReport {
    /// The date ages were measured at.
    pub as_of: NaiveDate,
    /// One row per bucket, youngest first; empty buckets included.
    pub buckets: Vec<AgingBucketTotal>,
    /// Outstanding fees across all accounts.
    pub total_outstanding: Decimal,
}

/// Groups outstanding balances by how overdue they are.
///
/// Fully paid accounts are left out.
pub fn debt_aging_report(accounts: &[StudentAccount], as_of: NaiveDate) -> DebtAgingReport {
    let mut buckets: Vec<AgingBucketTotal> = AgingBucket::ALL
        .iter()
        .map(|&bucket| AgingBucketTotal {
            bucket,
            accounts: 0,
            outstanding: Decimal::ZERO,
        })
        .collect();

    for account in accounts {
        if let Some(bucket) = account.aging_bucket(as_of) {
            // ALL is in declaration order
            let row = &mut buckets[bucket as usize];
            row.accounts += 1;
            row.outstanding += account.outstanding_fees();
        }
    }

    let total_outstanding = buckets.iter().map(|b| b.outstanding).sum();

    DebtAgingReport {
        as_of,
        buckets,
        total_outstanding,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_account(id: &str, total: &str, paid: &str, due: NaiveDate) -> StudentAccount {
        StudentAccount {
            student_id: id.to_string(),
            school_id: "sch_001".to_string(),
            student_name: format!("Student {}", id),
            parent_name: format!("Parent {}", id),
            total_fees: dec(total),
            amount_paid: dec(paid),
            discount: Decimal::ZERO,
            due_date: due,
        }
    }

    #[test]
    fn test_outstanding_subtracts_paid_and_discount() {
        let mut account = create_account("st_001", "150000", "50000", date(2026, 1, 15));
        account.discount = dec("15000");
        assert_eq!(account.outstanding_fees(), dec("85000"));
    }

    #[test]
    fn test_overpayment_is_not_negative_outstanding() {
        let account = create_account("st_001", "100000", "120000", date(2026, 1, 15));
        assert_eq!(account.outstanding_fees(), Decimal::ZERO);
        assert_eq!(account.aging_bucket(date(2026, 6, 1)), None);
    }

    #[test]
    fn test_bucket_boundaries() {
        assert_eq!(AgingBucket::for_days_overdue(-5), AgingBucket::Current);
        assert_eq!(AgingBucket::for_days_overdue(0), AgingBucket::Current);
        assert_eq!(AgingBucket::for_days_overdue(1), AgingBucket::Days1To30);
        assert_eq!(AgingBucket::for_days_overdue(30), AgingBucket::Days1To30);
        assert_eq!(AgingBucket::for_days_overdue(31), AgingBucket::Days31To60);
        assert_eq!(AgingBucket::for_days_overdue(60), AgingBucket::Days31To60);
        assert_eq!(AgingBucket::for_days_overdue(61), AgingBucket::Days61To90);
        assert_eq!(AgingBucket::for_days_overdue(90), AgingBucket::Days61To90);
        assert_eq!(AgingBucket::for_days_overdue(91), AgingBucket::Over90);
    }

    #[test]
    fn test_aging_report_groups_balances() {
        let as_of = date(2026, 4, 1);
        let accounts = vec![
            create_account("st_001", "100000", "0", date(2026, 4, 10)), // not due
            create_account("st_002", "100000", "60000", date(2026, 3, 20)), // 12 days
            create_account("st_003", "80000", "0", date(2026, 3, 25)), // 7 days
            create_account("st_004", "90000", "0", date(2025, 12, 1)), // 121 days
            create_account("st_005", "50000", "50000", date(2025, 12, 1)), // paid
        ];

        let report = debt_aging_report(&accounts, as_of);

        assert_eq!(report.buckets.len(), 5);
        assert_eq!(report.buckets[0].bucket, AgingBucket::Current);
        assert_eq!(report.buckets[0].outstanding, dec("100000"));
        assert_eq!(report.buckets[1].accounts, 2);
        assert_eq!(report.buckets[1].outstanding, dec("120000"));
        assert_eq!(report.buckets[2].accounts, 0);
        assert_eq!(report.buckets[4].outstanding, dec("90000"));
        assert_eq!(report.total_outstanding, dec("310000"));
    }

    #[test]
    fn test_empty_report_has_zero_total() {
        let report = debt_aging_report(&[], date(2026, 4, 1));
        assert_eq!(report.total_outstanding, Decimal::ZERO);
        assert!(report.buckets.iter().all(|b| b.accounts == 0));
    }

    #[test]
    fn test_bucket_serialization() {
        assert_eq!(
            serde_json::to_string(&AgingBucket::Days31To60).unwrap(),
            "\"days_31_60\""
        );
    }
}
