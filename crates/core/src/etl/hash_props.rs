//! Property tests for the fact content hash.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::hash::{FACT_HASH_LEN, fact_hash};
use super::row::SourceRow;

fn arb_row() -> impl Strategy<Value = SourceRow> {
    (
        "[A-Z][A-Z0-9-]{0,8}",
        "[A-Z][a-z ]{0,12}",
        "[A-Z0-9.]{1,8}",
        "[A-Za-z ]{0,12}",
        1u32..=12,
        2000i32..=2030,
        -1_000_000_000i64..1_000_000_000,
        proptest::option::of("[A-Z0-9-]{1,6}"),
        proptest::option::of("[A-Za-z ]{1,12}"),
    )
        .prop_map(
            |(project, client, summary, name, month, year, cents, resource_id, resource_name)| {
                SourceRow {
                    project,
                    client,
                    account_summary: summary,
                    account_name: name,
                    period: format!("{month:02}/{year}"),
                    amount: Decimal::new(cents, 2),
                    resource_id,
                    resource_name,
                    ..SourceRow::default()
                }
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// *For any* row, hashing twice yields the identical digest of the
    /// stored length.
    #[test]
    fn prop_hash_is_deterministic(row in arb_row()) {
        let first = fact_hash(&row);
        let second = fact_hash(&row);

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.len(), FACT_HASH_LEN);
    }

    /// *For any* row, changing only non-key fields never changes the hash.
    #[test]
    fn prop_non_key_fields_never_affect_hash(
        row in arb_row(),
        nature in proptest::option::of("[A-Z]{1,8}"),
        business_type in proptest::option::of("[A-Za-z]{1,8}"),
        business_line in proptest::option::of("[A-Za-z]{1,8}"),
    ) {
        let baseline = fact_hash(&row);

        let mut changed = row;
        changed.nature = nature;
        changed.business_type = business_type;
        changed.business_line = business_line;

        prop_assert_eq!(fact_hash(&changed), baseline);
    }

    /// *For any* row, surrounding whitespace on key fields does not change
    /// the hash: logically identical rows dedupe regardless of padding.
    #[test]
    fn prop_padding_never_affects_hash(row in arb_row()) {
        let baseline = fact_hash(&row);

        let mut padded = row;
        padded.project = format!("  {}  ", padded.project);
        padded.client = format!("\t{}", padded.client);

        prop_assert_eq!(fact_hash(&padded), baseline);
    }
}
