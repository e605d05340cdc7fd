//! ETL error types and failure-scope classification.
//!
//! The orchestrator recovers row- and batch-level errors locally; only
//! run-level errors propagate to the caller.

use thiserror::Error;

use super::dimension::DimensionKind;
use super::store::StoreError;

/// How much of a run an error invalidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureScope {
    /// The offending row is skipped and counted failed; the batch continues.
    Row,
    /// Every row buffered for the batch is counted failed; the run continues.
    Batch,
    /// The run aborts before producing stats.
    Run,
}

/// Errors that can occur during ETL processing.
#[derive(Debug, Error)]
pub enum EtlError {
    // ========== Row Validation Errors ==========
    /// A required field is missing or blank.
    #[error("required field missing: {field}")]
    MissingField {
        /// Canonical name of the absent field.
        field: &'static str,
    },

    /// The period string is not two numeric components in MM/YYYY form.
    #[error("invalid period '{value}': expected MM/YYYY")]
    MalformedPeriod {
        /// The rejected period string.
        value: String,
    },

    /// The period month is outside the calendar range.
    #[error("invalid period '{value}': month {month} out of range 1-12")]
    MonthOutOfRange {
        /// The rejected period string.
        value: String,
        /// The parsed month value.
        month: u32,
    },

    // ========== Row Resolution Errors ==========
    /// The dimension store failed while resolving a natural key.
    #[error("failed to resolve {kind} dimension for key '{key}': {source}")]
    Resolution {
        /// Which dimension was being resolved.
        kind: DimensionKind,
        /// The offending natural key.
        key: String,
        /// The underlying store failure.
        source: StoreError,
    },

    // ========== Batch Errors ==========
    /// The bulk fact load for a batch failed.
    #[error("batch {batch} fact load failed: {source}")]
    BatchLoad {
        /// One-based index of the failed batch.
        batch: usize,
        /// The underlying store failure.
        source: StoreError,
    },

    // ========== Run Errors ==========
    /// The raw ledger source could not be read.
    #[error("raw ledger source unavailable: {source}")]
    SourceUnavailable {
        /// The underlying source failure.
        source: StoreError,
    },

    /// The raw ledger source produced no rows to process.
    #[error("no ledger rows found to process")]
    EmptySource,
}

impl EtlError {
    /// Returns how much of the run this error invalidates.
    #[must_use]
    pub const fn scope(&self) -> FailureScope {
        match self {
            Self::MissingField { .. }
            | Self::MalformedPeriod { .. }
            | Self::MonthOutOfRange { .. }
            | Self::Resolution { .. } => FailureScope::Row,

            Self::BatchLoad { .. } => FailureScope::Batch,

            Self::SourceUnavailable { .. } | Self::EmptySource => FailureScope::Run,
        }
    }
}
