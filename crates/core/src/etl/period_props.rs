//! Property tests for period derivation.

use proptest::prelude::*;

use super::error::EtlError;
use super::period::PeriodAttributes;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// *For any* valid month and year, parsing succeeds and the derived
    /// quarter and half are consistent with the month.
    #[test]
    fn prop_valid_months_derive_consistent_attributes(
        month in 1u32..=12,
        year in 1i32..=9999,
    ) {
        let period = PeriodAttributes::parse(&format!("{month:02}/{year}")).unwrap();

        prop_assert_eq!(period.month, month);
        prop_assert_eq!(period.year, year);
        prop_assert_eq!(period.quarter, month.div_ceil(3));
        prop_assert!((1..=4).contains(&period.quarter));
        prop_assert_eq!(period.half, if month <= 6 { 1 } else { 2 });
        prop_assert_eq!(period.quarter_label, format!("Q{}", period.quarter));
    }

    /// *For any* valid period, the calendar bounds span exactly the month.
    #[test]
    fn prop_calendar_bounds_span_the_month(
        month in 1u32..=12,
        year in 1i32..=9999,
    ) {
        use chrono::Datelike;

        let period = PeriodAttributes::parse(&format!("{month:02}/{year}")).unwrap();

        prop_assert!(period.first_day <= period.last_day);
        prop_assert_eq!(period.first_day.day(), 1);
        prop_assert_eq!(period.first_day.month(), month);
        prop_assert_eq!(period.last_day.month(), month);
        prop_assert!((28..=31).contains(&period.last_day.day()));
    }

    /// *For any* month outside 1-12, parsing reports the month range error.
    #[test]
    fn prop_out_of_range_months_rejected(
        month in prop_oneof![Just(0u32), 13u32..=999],
        year in 1i32..=9999,
    ) {
        let result = PeriodAttributes::parse(&format!("{month:02}/{year}"));
        let is_expected = matches!(result, Err(EtlError::MonthOutOfRange { .. }));
        prop_assert!(is_expected);
    }

    /// *For any* string without a separator, parsing reports a malformed
    /// period.
    #[test]
    fn prop_separatorless_strings_rejected(value in "[A-Za-z0-9 ]{0,16}") {
        prop_assume!(!value.contains('/'));
        let result = PeriodAttributes::parse(&value);
        let is_expected = matches!(result, Err(EtlError::MalformedPeriod { .. }));
        prop_assert!(is_expected);
    }
}
