//! Repository implementations of the core store seams.
//!
//! Repositories adapt the `SeaORM` entities to the engine's
//! `DimensionStore`, `FactStore`, and `LedgerSource` traits, hiding the
//! database details from the rest of the application.

pub mod dimension;
pub mod fact;
pub mod ledger;

pub use dimension::DimensionRepository;
pub use fact::FactRepository;
pub use ledger::RawLedgerRepository;

use finstar_core::etl::StoreError;
use sea_orm::DbErr;

pub(crate) fn to_store_error(err: DbErr) -> StoreError {
    StoreError::new(err.to_string())
}
