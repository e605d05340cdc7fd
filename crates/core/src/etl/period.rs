//! Calendar attribute derivation from "MM/YYYY" period strings.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::EtlError;

/// English month names indexed by `month - 1`.
const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Calendar attributes derived from a "MM/YYYY" period string.
///
/// The original string (trimmed) is the period dimension's natural key;
/// everything else is derived and purely presentational.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodAttributes {
    /// The original period string; the dimension's natural key.
    pub original: String,
    /// Calendar year.
    pub year: i32,
    /// Calendar month (1-12).
    pub month: u32,
    /// Quarter of the year (1-4).
    pub quarter: u32,
    /// Half of the year (1 or 2).
    pub half: u32,
    /// English month name.
    pub month_name: String,
    /// Quarter label ("Q1".."Q4").
    pub quarter_label: String,
    /// First calendar day of the month.
    pub first_day: NaiveDate,
    /// Last calendar day of the month.
    pub last_day: NaiveDate,
}

impl PeriodAttributes {
    /// Parses a "MM/YYYY" period string into calendar attributes.
    ///
    /// Pure and deterministic. Quarter is `ceil(month / 3)`; half is 1 for
    /// months 1-6 and 2 otherwise.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the string is not two numeric
    /// components separated by `/`, or the month is outside 1-12.
    pub fn parse(value: &str) -> Result<Self, EtlError> {
        let trimmed = value.trim();
        let malformed = || EtlError::MalformedPeriod {
            value: trimmed.to_string(),
        };

        let (month_part, year_part) = trimmed.split_once('/').ok_or_else(malformed)?;
        if year_part.contains('/') {
            return Err(malformed());
        }

        let month: u32 = month_part.trim().parse().map_err(|_| malformed())?;
        let year: i32 = year_part.trim().parse().map_err(|_| malformed())?;

        if !(1..=12).contains(&month) {
            return Err(EtlError::MonthOutOfRange {
                value: trimmed.to_string(),
                month,
            });
        }

        let first_day = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(malformed)?;
        let last_day = last_day_of_month(year, month).ok_or_else(malformed)?;

        let quarter = month.div_ceil(3);
        let half = if month <= 6 { 1 } else { 2 };

        Ok(Self {
            original: trimmed.to_string(),
            year,
            month,
            quarter,
            half,
            month_name: MONTH_NAMES[(month - 1) as usize].to_string(),
            quarter_label: format!("Q{quarter}"),
            first_day,
            last_day,
        })
    }
}

/// Last calendar day of a month: the day before the first of the next month.
fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 {
        (year.checked_add(1)?, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
}

#[cfg(test)]
mod tests {
    use chrono::Datelike;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("01/2024", 1, 1, 1, "January")]
    #[case("03/2024", 3, 1, 1, "March")]
    #[case("04/2024", 4, 2, 1, "April")]
    #[case("06/2024", 6, 2, 1, "June")]
    #[case("07/2024", 7, 3, 2, "July")]
    #[case("09/2024", 9, 3, 2, "September")]
    #[case("10/2024", 10, 4, 2, "October")]
    #[case("12/2024", 12, 4, 2, "December")]
    fn test_quarter_and_half_boundaries(
        #[case] input: &str,
        #[case] month: u32,
        #[case] quarter: u32,
        #[case] half: u32,
        #[case] month_name: &str,
    ) {
        let period = PeriodAttributes::parse(input).unwrap();
        assert_eq!(period.month, month);
        assert_eq!(period.quarter, quarter);
        assert_eq!(period.half, half);
        assert_eq!(period.month_name, month_name);
        assert_eq!(period.quarter_label, format!("Q{quarter}"));
        assert_eq!(period.year, 2024);
    }

    #[rstest]
    #[case("00/2024")]
    #[case("13/2024")]
    fn test_month_out_of_range(#[case] input: &str) {
        assert!(matches!(
            PeriodAttributes::parse(input),
            Err(EtlError::MonthOutOfRange { .. })
        ));
    }

    #[rstest]
    #[case("")]
    #[case("032024")]
    #[case("ab/2024")]
    #[case("03/20x4")]
    #[case("3/20/24")]
    #[case("-1/2024")]
    fn test_malformed_periods(#[case] input: &str) {
        assert!(matches!(
            PeriodAttributes::parse(input),
            Err(EtlError::MalformedPeriod { .. })
        ));
    }

    #[test]
    fn test_calendar_bounds() {
        let march = PeriodAttributes::parse("03/2024").unwrap();
        assert_eq!(march.first_day, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(march.last_day, NaiveDate::from_ymd_opt(2024, 3, 31).unwrap());
    }

    #[test]
    fn test_february_leap_year() {
        let leap = PeriodAttributes::parse("02/2024").unwrap();
        assert_eq!(leap.last_day.day(), 29);

        let common = PeriodAttributes::parse("02/2023").unwrap();
        assert_eq!(common.last_day.day(), 28);
    }

    #[test]
    fn test_december_rolls_into_next_year() {
        let december = PeriodAttributes::parse("12/2024").unwrap();
        assert_eq!(
            december.last_day,
            NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()
        );
    }

    #[test]
    fn test_original_is_trimmed() {
        let period = PeriodAttributes::parse(" 03/2024 ").unwrap();
        assert_eq!(period.original, "03/2024");
    }

    #[test]
    fn test_unpadded_month_accepted() {
        let period = PeriodAttributes::parse("3/2024").unwrap();
        assert_eq!(period.month, 3);
        assert_eq!(period.quarter, 1);
    }
}
