//! Statutory payroll settings: pension rate and PAYE brackets.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// One marginal band of the PAYE schedule.
///
/// `up_to` is the cumulative annual income ceiling of the band, not its width.
/// `None` marks the unbounded top band.
///
/// # Example
///
/// ```
/// use bursar_engine::models::PayeBracket;
/// use rust_decimal::Decimal;
///
/// let band = PayeBracket::bounded(Decimal::new(7, 2), Decimal::from(300_000));
/// assert!(!band.is_unbounded());
/// assert!(PayeBracket::unbounded(Decimal::new(24, 2)).is_unbounded());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayeBracket {
    /// Marginal rate as a fraction (0.07 for 7%).
    pub rate: Decimal,
    /// Cumulative annual ceiling of this band.
    #[serde(default)]
    pub up_to: Option<Decimal>,
}

impl PayeBracket {
    /// A band ending at the given annual ceiling.
    pub fn bounded(rate: Decimal, up_to: Decimal) -> Self {
        Self {
            rate,
            up_to: Some(up_to),
        }
    }

    /// The open-ended top band.
    pub fn unbounded(rate: Decimal) -> Self {
        Self { rate, up_to: None }
    }

    /// Returns true for the open-ended top band.
    pub fn is_unbounded(&self) -> bool {
        self.up_to.is_none()
    }
}

/// School-wide payroll configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollSettings {
    /// Employee pension contribution as a fraction of base salary.
    pub employee_pension_rate: Decimal,
    /// PAYE bands, ascending by ceiling.
    pub paye_brackets: Vec<PayeBracket>,
}

impl Default for PayrollSettings {
    /// No pension and no PAYE.
    fn default() -> Self {
        Self {
            employee_pension_rate: Decimal::ZERO,
            paye_brackets: vec![],
        }
    }
}

impl PayrollSettings {
    /// Checks the settings before they are saved.
    ///
    /// The calculator trusts its settings, so anything that would make the
    /// bracket walk meaningless is rejected here:
    ///
    /// - pension rate outside `[0, 1]`
    /// - bracket rate outside `[0, 1]`
    /// - a ceiling that is not positive
    /// - ceilings that are not strictly ascending
    /// - an unbounded band anywhere but last
    ///
    /// # Example
    ///
    /// ```
    /// use bursar_engine::models::{PayeBracket, PayrollSettings};
    /// use rust_decimal::Decimal;
    ///
    /// let settings = PayrollSettings {
    ///     employee_pension_rate: Decimal::new(8, 2),
    ///     paye_brackets: vec![
    ///         PayeBracket::bounded(Decimal::new(11, 2), Decimal::from(600_000)),
    ///         PayeBracket::bounded(Decimal::new(7, 2), Decimal::from(300_000)),
    ///     ],
    /// };
    /// assert!(settings.validate().is_err());
    /// ```
    pub fn validate(&self) -> EngineResult<()> {
        if self.employee_pension_rate < Decimal::ZERO || self.employee_pension_rate > Decimal::ONE
        {
            return Err(invalid(format!(
                "employee pension rate {} must be between 0 and 1",
                self.employee_pension_rate
            )));
        }

        let mut previous_ceiling: Option<Decimal> = None;
        let last_index = self.paye_brackets.len().saturating_sub(1);

        for (index, bracket) in self.paye_brackets.iter().enumerate() {
            if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
                return Err(invalid(format!(
                    "bracket {} rate {} must be between 0 and 1",
                    index + 1,
                    bracket.rate
                )));
            }

            match bracket.up_to {
                None if index != last_index => {
                    return Err(invalid(format!(
                        "bracket {} is unbounded but is not the last bracket",
                        index + 1
                    )));
                }
                None => {}
                Some(ceiling) => {
                    if ceiling <= Decimal::ZERO {
                        return Err(invalid(format!(
                            "bracket {} ceiling {} must be positive",
                            index + 1,
                            ceiling
                        )));
                    }
                    if let Some(previous) = previous_ceiling {
                        if ceiling <= previous {
                            return Err(invalid(format!(
                                "bracket {} ceiling {} must be above the previous ceiling {}",
                                index + 1,
                                ceiling,
                                previous
                            )));
                        }
                    }
                    previous_ceiling = Some(ceiling);
                }
            }
        }

        Ok(())
    }
}

fn invalid(message: String) -> EngineError {
    EngineError::InvalidPayrollSettings { message }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn standard_settings() -> PayrollSettings {
        PayrollSettings {
            employee_pension_rate: dec("0.08"),
            paye_brackets: vec![
                PayeBracket::bounded(dec("0.07"), dec("300000")),
                PayeBracket::bounded(dec("0.11"), dec("600000")),
                PayeBracket::unbounded(dec("0.24")),
            ],
        }
    }

    #[test]
    fn test_standard_settings_are_valid() {
        assert!(standard_settings().validate().is_ok());
    }

    #[test]
    fn test_default_settings_are_valid() {
        assert!(PayrollSettings::default().validate().is_ok());
    }

    #[test]
    fn test_all_bounded_brackets_are_valid() {
        let mut settings = standard_settings();
        settings.paye_brackets.pop();
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_rejects_non_ascending_ceilings() {
        let mut settings = standard_settings();
        settings.paye_brackets.swap(0, 1);
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("must be above the previous ceiling"));
    }

    #[test]
    fn test_rejects_equal_ceilings() {
        let mut settings = standard_settings();
        settings.paye_brackets[1].up_to = Some(dec("300000"));
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_rejects_unbounded_bracket_before_last() {
        let mut settings = standard_settings();
        settings.paye_brackets.swap(1, 2);
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("is unbounded but is not the last"));
    }

    #[test]
    fn test_rejects_negative_rate() {
        let mut settings = standard_settings();
        settings.paye_brackets[0].rate = dec("-0.01");
        assert!(matches!(
            settings.validate(),
            Err(EngineError::InvalidPayrollSettings { .. })
        ));
    }

    #[test]
    fn test_rejects_rate_above_one() {
        let mut settings = standard_settings();
        settings.paye_brackets[2].rate = dec("1.5");
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_rejects_pension_rate_out_of_range() {
        let mut settings = standard_settings();
        settings.employee_pension_rate = dec("1.01");
        assert!(settings.validate().is_err());

        settings.employee_pension_rate = dec("-0.08");
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_ceiling() {
        let settings = PayrollSettings {
            employee_pension_rate: dec("0.08"),
            paye_brackets: vec![PayeBracket::bounded(dec("0.07"), Decimal::ZERO)],
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_deserialize_unbounded_bracket_from_null_or_missing() {
        let json = r#"{
            "employee_pension_rate": "0.08",
            "paye_brackets": [
                {"rate": "0.07", "up_to": "300000"},
                {"rate": "0.11", "up_to": null},
                {"rate": "0.24"}
            ]
        }"#;
        let settings: PayrollSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.paye_brackets[0].up_to, Some(dec("300000")));
        assert!(settings.paye_brackets[1].is_unbounded());
        assert!(settings.paye_brackets[2].is_unbounded());
    }
}
