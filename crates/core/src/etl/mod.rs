//! Dimensional ETL: flat ledger rows into a star-schema warehouse.
//!
//! This module implements the load pipeline end to end:
//! - Row normalization onto one canonical shape
//! - Calendar attribute derivation from "MM/YYYY" period strings
//! - Idempotent lookup-or-create dimension resolution
//! - Content hashing for fact-level idempotency
//! - Batch orchestration with row- and batch-level failure isolation
//! - Run statistics
//!
//! Stores are consumed through the traits in [`store`]; the engine itself
//! has no database or transport dependencies.

pub mod defaults;
pub mod dimension;
pub mod engine;
pub mod error;
pub mod hash;
pub mod period;
pub mod row;
pub mod stats;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;

#[cfg(test)]
mod engine_props;
#[cfg(test)]
mod hash_props;
#[cfg(test)]
mod period_props;

pub use defaults::DefaultPolicy;
pub use dimension::{
    DimensionKind, DimensionRecord, NaturalKey, NewAccount, NewClient, NewProject, NewResource,
    ResourceType, normalize_natural_key,
};
pub use engine::{DEFAULT_BATCH_SIZE, EtlEngine, EtlOutcome, EtlRequest};
pub use error::{EtlError, FailureScope};
pub use hash::{FACT_HASH_LEN, fact_hash};
pub use period::PeriodAttributes;
pub use row::{RawLedgerRecord, SourceRow};
pub use stats::{DimensionCounts, ProcessingStats};
pub use store::{DimensionStore, FactStore, LedgerSource, NewFact, Resolved, StoreError};
