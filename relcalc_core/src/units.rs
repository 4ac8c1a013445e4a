//! # Units and Formatting
//!
//! Time units for MTBF conversion plus the display formatting shared by
//! the calculators: grouped number formatting with a selectable decimal
//! separator, currency strings, and the hours/days/"years and days"
//! rendering of a calculated interval.
//!
//! Formatting follows the calculator convention of a 365-day year and
//! 24-hour day; thousands are always grouped with commas, only the
//! decimal character is configurable.
//!
//! ## Example
//!
//! ```rust
//! use relcalc_core::units::{format_interval, DecimalSeparator, TimeUnit};
//!
//! assert_eq!(TimeUnit::Weeks.hours(), 168.0);
//! assert_eq!(format_interval(1.0, DecimalSeparator::Point), "1 year");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Time units supported by the MTBF conversion table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Hours,
    Days,
    Weeks,
    Months,
    Years,
}

impl TimeUnit {
    /// All units, largest first (the order used for interval display)
    pub const DESCENDING: [TimeUnit; 5] = [
        TimeUnit::Years,
        TimeUnit::Months,
        TimeUnit::Weeks,
        TimeUnit::Days,
        TimeUnit::Hours,
    ];

    /// Hours per unit (730-hour month, 8760-hour year)
    pub fn hours(self) -> f64 {
        match self {
            TimeUnit::Hours => 1.0,
            TimeUnit::Days => 24.0,
            TimeUnit::Weeks => 168.0,
            TimeUnit::Months => 730.0,
            TimeUnit::Years => 8760.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimeUnit::Hours => "hours",
            TimeUnit::Days => "days",
            TimeUnit::Weeks => "weeks",
            TimeUnit::Months => "months",
            TimeUnit::Years => "years",
        }
    }
}

impl FromStr for TimeUnit {
    type Err = CalcError;

    fn from_str(s: &str) -> CalcResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "hours" | "hour" | "h" => Ok(TimeUnit::Hours),
            "days" | "day" | "d" => Ok(TimeUnit::Days),
            "weeks" | "week" | "w" => Ok(TimeUnit::Weeks),
            "months" | "month" | "mo" => Ok(TimeUnit::Months),
            "years" | "year" | "y" => Ok(TimeUnit::Years),
            other => Err(CalcError::invalid_input(
                "unit",
                other,
                "Expected one of hours/days/weeks/months/years",
            )),
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decimal separator preference, stored in settings as "." or ",".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DecimalSeparator {
    #[default]
    #[serde(rename = ".")]
    Point,
    #[serde(rename = ",")]
    Comma,
}

impl DecimalSeparator {
    pub fn as_char(self) -> char {
        match self {
            DecimalSeparator::Point => '.',
            DecimalSeparator::Comma => ',',
        }
    }
}

/// An interval value paired with the unit it is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FormattedInterval {
    pub value: f64,
    pub unit: TimeUnit,
}

impl fmt::Display for FormattedInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} {}", self.value, self.unit)
    }
}

/// Format a number with comma thousands grouping, at most two fractional
/// digits and the given decimal separator.
pub fn format_number(value: f64, separator: DecimalSeparator) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    let negative = rounded < 0.0;
    let abs = rounded.abs();
    let int_part = abs.trunc() as u64;
    let cents = ((abs - int_part as f64) * 100.0).round() as u64;

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if cents > 0 {
        out.push(separator.as_char());
        if cents % 10 == 0 {
            out.push_str(&format!("{}", cents / 10));
        } else {
            out.push_str(&format!("{cents:02}"));
        }
    }
    out
}

/// Format a currency amount as `CODE 1,234.56` (always two decimals).
pub fn format_currency(amount: f64, currency: &str) -> String {
    let rounded = (amount * 100.0).round() / 100.0;
    let negative = rounded < 0.0;
    let abs = rounded.abs();
    let int_part = abs.trunc() as u64;
    let cents = ((abs - int_part as f64) * 100.0).round() as u64;
    format!(
        "{} {}{}.{:02}",
        currency,
        if negative { "-" } else { "" },
        group_thousands(int_part),
        cents
    )
}

fn group_thousands(mut value: u64) -> String {
    if value < 1000 {
        return value.to_string();
    }
    let mut groups: Vec<String> = Vec::new();
    while value >= 1000 {
        groups.push(format!("{:03}", value % 1000));
        value /= 1000;
    }
    groups.push(value.to_string());
    groups.reverse();
    groups.join(",")
}

/// Render an interval given in years as a human string.
///
/// Under a day the interval is shown in whole hours, under a year in
/// whole days, otherwise as "Y years and D days" with the days clause
/// dropped when the remainder is zero.
pub fn format_interval(years: f64, separator: DecimalSeparator) -> String {
    let total_days = years * 365.0;
    let whole_years = years.floor();
    let remaining_days = (total_days % 365.0).floor();
    let total_hours = years * 365.0 * 24.0;

    if total_days < 1.0 {
        format!("{} hours", format_number(total_hours.round(), separator))
    } else if whole_years == 0.0 {
        format!("{} days", format_number(total_days.round(), separator))
    } else {
        let mut result = format!(
            "{} year{}",
            format_number(whole_years, separator),
            if whole_years > 1.0 { "s" } else { "" }
        );
        if remaining_days > 0.0 {
            result.push_str(&format!(
                " and {} day{}",
                format_number(remaining_days, separator),
                if remaining_days > 1.0 { "s" } else { "" }
            ));
        }
        result
    }
}

/// Express an interval given in hours in the largest unit whose value
/// lands in [1, 100]; falls back to raw hours.
pub fn format_optimal_interval(interval_hours: f64) -> FormattedInterval {
    for unit in TimeUnit::DESCENDING {
        if interval_hours >= unit.hours() || unit == TimeUnit::Hours {
            let value = interval_hours / unit.hours();
            if (1.0..=100.0).contains(&value) {
                return FormattedInterval { value, unit };
            }
        }
    }
    FormattedInterval {
        value: interval_hours,
        unit: TimeUnit::Hours,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_hours_table() {
        assert_eq!(TimeUnit::Hours.hours(), 1.0);
        assert_eq!(TimeUnit::Days.hours(), 24.0);
        assert_eq!(TimeUnit::Weeks.hours(), 168.0);
        assert_eq!(TimeUnit::Months.hours(), 730.0);
        assert_eq!(TimeUnit::Years.hours(), 8760.0);
    }

    #[test]
    fn test_unit_from_str() {
        assert_eq!("years".parse::<TimeUnit>().unwrap(), TimeUnit::Years);
        assert_eq!("Hours".parse::<TimeUnit>().unwrap(), TimeUnit::Hours);
        assert!("fortnights".parse::<TimeUnit>().is_err());
    }

    #[test]
    fn test_format_number_grouping() {
        assert_eq!(format_number(1234567.891, DecimalSeparator::Point), "1,234,567.89");
        assert_eq!(format_number(1000.0, DecimalSeparator::Point), "1,000");
        assert_eq!(format_number(0.5, DecimalSeparator::Point), "0.5");
        assert_eq!(format_number(0.05, DecimalSeparator::Point), "0.05");
        assert_eq!(format_number(12.5, DecimalSeparator::Comma), "12,5");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(1234.5, "EUR"), "EUR 1,234.50");
        assert_eq!(format_currency(-3.0, "GBP"), "GBP -3.00");
    }

    #[test]
    fn test_format_interval_hours() {
        // half a day
        let s = format_interval(0.5 / 365.0, DecimalSeparator::Point);
        assert_eq!(s, "12 hours");
    }

    #[test]
    fn test_format_interval_days() {
        let s = format_interval(100.0 / 365.0, DecimalSeparator::Point);
        assert_eq!(s, "100 days");
    }

    #[test]
    fn test_format_interval_one_year() {
        assert_eq!(format_interval(1.0, DecimalSeparator::Point), "1 year");
    }

    #[test]
    fn test_format_interval_years_and_days() {
        // 2.5 years = 2 years and 182 days
        let s = format_interval(2.5, DecimalSeparator::Point);
        assert_eq!(s, "2 years and 182 days");
    }

    #[test]
    fn test_format_optimal_interval_unit_selection() {
        let f = format_optimal_interval(8760.0);
        assert_eq!(f.unit, TimeUnit::Years);
        assert!((f.value - 1.0).abs() < 1e-9);

        let f = format_optimal_interval(500.0);
        assert_eq!(f.unit, TimeUnit::Weeks);
        assert!((f.value - 500.0 / 168.0).abs() < 1e-9);

        // too small for any unit window -> raw hours
        let f = format_optimal_interval(0.25);
        assert_eq!(f.unit, TimeUnit::Hours);
        assert!((f.value - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_separator_serde() {
        assert_eq!(serde_json::to_string(&DecimalSeparator::Comma).unwrap(), "\",\"");
        let sep: DecimalSeparator = serde_json::from_str("\".\"").unwrap();
        assert_eq!(sep, DecimalSeparator::Point);
    }
}
