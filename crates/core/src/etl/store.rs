//! Collaborator seams: dimension store, fact store, and raw ledger source.
//!
//! The engine is generic over these traits; the db crate provides the
//! PostgreSQL implementations and tests provide in-memory fakes.

use async_trait::async_trait;
use rust_decimal::Decimal;
use thiserror::Error;

use finstar_shared::types::{AccountId, ClientId, PeriodId, ProjectId, ResourceId};

use super::dimension::{DimensionRecord, NaturalKey};
use super::row::RawLedgerRecord;

/// Error reported by a store implementation.
///
/// Deliberately opaque: the engine only decides whether to skip a row,
/// fail a batch, or abort the run; the message travels into run stats for
/// diagnostics.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct StoreError {
    message: String,
}

impl StoreError {
    /// Wraps an underlying store failure.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Outcome of an idempotent dimension insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved {
    /// Surrogate id of the dimension row for the natural key.
    pub id: i64,
    /// True when this call created the row; false when an existing row
    /// (possibly inserted by a concurrent writer) was returned instead.
    pub created: bool,
}

/// Lookup-or-create access to the five dimension tables.
#[async_trait]
pub trait DimensionStore: Send + Sync {
    /// Finds the surrogate id for a natural key, if the row exists.
    async fn find(&self, key: &NaturalKey) -> Result<Option<i64>, StoreError>;

    /// Inserts a dimension row, or returns the existing row when the
    /// natural key is already present.
    ///
    /// Implementations must make this atomic with respect to concurrent
    /// writers racing on the same new key (unique constraint plus a
    /// conflict-ignoring insert), so a natural key maps to exactly one
    /// surrogate id and only the winning writer observes `created`.
    async fn insert_or_get(&self, record: &DimensionRecord) -> Result<Resolved, StoreError>;
}

/// A fact row ready for loading, with all five dimensions resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFact {
    /// Project dimension reference.
    pub project_id: ProjectId,
    /// Client dimension reference.
    pub client_id: ClientId,
    /// Account dimension reference.
    pub account_id: AccountId,
    /// Period dimension reference.
    pub period_id: PeriodId,
    /// Resource dimension reference (the sentinel row when unidentified).
    pub resource_id: ResourceId,
    /// Ledger amount.
    pub amount: Decimal,
    /// Label of the report this row was loaded from.
    pub source_report: String,
    /// Content hash over the row's natural-key fields; the load-time
    /// idempotency key.
    pub row_hash: String,
}

/// Bulk, hash-deduplicated access to the fact table.
#[async_trait]
pub trait FactStore: Send + Sync {
    /// Inserts facts, silently ignoring rows whose `row_hash` is already
    /// loaded. A batch consisting entirely of duplicates is a success,
    /// not an error.
    async fn load(&self, facts: &[NewFact]) -> Result<(), StoreError>;
}

/// The raw-ledger collaborator consulted when no inline rows are supplied.
#[async_trait]
pub trait LedgerSource: Send + Sync {
    /// Lists every raw ledger row, ordered ascending by primary key.
    async fn list_rows(&self) -> Result<Vec<RawLedgerRecord>, StoreError>;
}
