//! Raw ledger source repository.

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};
use tracing::debug;

use finstar_core::etl::{LedgerSource, RawLedgerRecord, StoreError};
use finstar_shared::types::LedgerRowId;

use crate::entities::raw_ledger_rows;
use crate::repositories::to_store_error;

/// Read access to the raw ledger source table.
#[derive(Debug, Clone)]
pub struct RawLedgerRepository {
    db: DatabaseConnection,
}

impl RawLedgerRepository {
    /// Creates a new raw ledger repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LedgerSource for RawLedgerRepository {
    async fn list_rows(&self) -> Result<Vec<RawLedgerRecord>, StoreError> {
        let rows = raw_ledger_rows::Entity::find()
            .order_by_asc(raw_ledger_rows::Column::Id)
            .all(&self.db)
            .await
            .map_err(to_store_error)?;

        debug!(rows = rows.len(), "raw ledger rows fetched");
        Ok(rows.into_iter().map(to_record).collect())
    }
}

fn to_record(model: raw_ledger_rows::Model) -> RawLedgerRecord {
    RawLedgerRecord {
        id: LedgerRowId::new(model.id),
        project: model.project,
        client: model.client,
        account: model.account,
        amount: model.amount,
        // A negative month normalizes into an invalid period string and is
        // rejected downstream as a row failure.
        month: u32::try_from(model.month).unwrap_or(0),
        year: model.year,
        nature: model.nature,
    }
}
