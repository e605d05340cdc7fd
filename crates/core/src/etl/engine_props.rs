//! Property tests for the batch orchestrator.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::engine::{EtlEngine, EtlRequest};
use super::row::SourceRow;
use super::stats::ProcessingStats;
use super::testing::{MemoryDimensions, MemoryFacts, MemoryLedger};

/// A source row together with whether it should survive validation.
fn arb_tagged_row() -> impl Strategy<Value = (bool, SourceRow)> {
    let valid = ("[A-Z][A-Z0-9]{0,6}", 1u32..=12, -100_000i64..100_000).prop_map(
        |(project, month, cents)| {
            (
                true,
                SourceRow {
                    project,
                    client: "C1".to_string(),
                    account_summary: "A1".to_string(),
                    account_name: "Acct One".to_string(),
                    period: format!("{month:02}/2024"),
                    amount: Decimal::new(cents, 2),
                    ..SourceRow::default()
                },
            )
        },
    );

    // Invalid either way: blank project or out-of-range month.
    let invalid = (any::<bool>(), "[A-Z][A-Z0-9]{0,6}").prop_map(|(blank_project, project)| {
        let row = SourceRow {
            project: if blank_project { String::new() } else { project },
            client: "C1".to_string(),
            account_summary: "A1".to_string(),
            period: if blank_project {
                "03/2024".to_string()
            } else {
                "13/2024".to_string()
            },
            ..SourceRow::default()
        };
        (false, row)
    });

    prop_oneof![3 => valid, 1 => invalid]
}

fn run_engine(rows: Vec<SourceRow>, batch_size: usize) -> ProcessingStats {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime");

    runtime.block_on(async {
        let engine = EtlEngine::new(
            MemoryDimensions::default(),
            MemoryFacts::default(),
            MemoryLedger::default(),
        )
        .with_batch_size(batch_size);

        let outcome = engine
            .run(EtlRequest::with_rows(rows, "PROP_SOURCE", "PROP_REPORT"))
            .await;
        outcome.stats.expect("inline runs always produce stats")
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// *For any* mix of valid and invalid rows and any batch size,
    /// `processed + failed == seen` holds and each class of row lands in
    /// the expected counter.
    #[test]
    fn prop_row_accounting_is_conserved(
        tagged in proptest::collection::vec(arb_tagged_row(), 1..40),
        batch_size in 1usize..=10,
    ) {
        let expected_valid = tagged.iter().filter(|(valid, _)| *valid).count();
        let expected_invalid = tagged.len() - expected_valid;
        let rows: Vec<SourceRow> = tagged.into_iter().map(|(_, row)| row).collect();
        let seen = rows.len();

        let stats = run_engine(rows, batch_size);

        prop_assert!(stats.is_conserved());
        prop_assert_eq!(stats.rows_seen, seen);
        prop_assert_eq!(stats.rows_processed, expected_valid);
        prop_assert_eq!(stats.rows_failed, expected_invalid);
        prop_assert_eq!(stats.errors.len(), expected_invalid);
    }

    /// *For any* set of valid rows, resolving the same natural keys twice
    /// in one run creates each dimension row exactly once.
    #[test]
    fn prop_repeated_keys_create_once(
        projects in proptest::collection::vec("[A-Z]{1,4}", 1..12),
        batch_size in 1usize..=5,
    ) {
        let distinct: std::collections::HashSet<&String> = projects.iter().collect();
        let expected_projects = distinct.len();

        let rows: Vec<SourceRow> = projects
            .iter()
            .map(|project| SourceRow {
                project: project.clone(),
                client: "C1".to_string(),
                account_summary: "A1".to_string(),
                period: "03/2024".to_string(),
                amount: Decimal::ONE,
                ..SourceRow::default()
            })
            .collect();

        let stats = run_engine(rows, batch_size);

        prop_assert_eq!(stats.dimensions_created.projects, expected_projects);
        prop_assert_eq!(stats.dimensions_created.clients, 1);
        prop_assert_eq!(stats.dimensions_created.periods, 1);
        prop_assert_eq!(stats.dimensions_created.resources, 1);
    }
}
