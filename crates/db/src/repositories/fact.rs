//! Fact repository: bulk, hash-deduplicated loading.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{DatabaseConnection, DbErr, EntityTrait, Set};
use tracing::debug;

use finstar_core::etl::{FactStore, NewFact, StoreError};

use crate::entities::fact_ledger_entries;
use crate::repositories::to_store_error;

/// Bulk access to the fact table.
///
/// One insert per batch, with `ON CONFLICT (row_hash) DO NOTHING`:
/// resubmitting an already-loaded row, even in a later run, never creates
/// a duplicate fact and never errors.
#[derive(Debug, Clone)]
pub struct FactRepository {
    db: DatabaseConnection,
}

impl FactRepository {
    /// Creates a new fact repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FactStore for FactRepository {
    async fn load(&self, facts: &[NewFact]) -> Result<(), StoreError> {
        if facts.is_empty() {
            return Ok(());
        }

        let now = Utc::now().into();
        let models = facts.iter().map(|fact| fact_ledger_entries::ActiveModel {
            project_id: Set(fact.project_id.into_inner()),
            client_id: Set(fact.client_id.into_inner()),
            account_id: Set(fact.account_id.into_inner()),
            period_id: Set(fact.period_id.into_inner()),
            resource_id: Set(fact.resource_id.into_inner()),
            amount: Set(fact.amount),
            source_report: Set(fact.source_report.clone()),
            row_hash: Set(fact.row_hash.clone()),
            loaded_at: Set(now),
            ..Default::default()
        });

        let insert = fact_ledger_entries::Entity::insert_many(models).on_conflict(
            OnConflict::column(fact_ledger_entries::Column::RowHash)
                .do_nothing()
                .to_owned(),
        );

        match insert.exec(&self.db).await {
            Ok(_) => {
                debug!(facts = facts.len(), "fact batch loaded");
                Ok(())
            }
            // Every row in the batch was already loaded; resubmission is
            // success, not an error.
            Err(DbErr::RecordNotInserted) => {
                debug!(facts = facts.len(), "fact batch already loaded");
                Ok(())
            }
            Err(err) => Err(to_store_error(err)),
        }
    }
}
