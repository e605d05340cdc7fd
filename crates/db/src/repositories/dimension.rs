//! Dimension repository: idempotent lookup-or-create over the five
//! dimension tables.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
};
use tracing::debug;

use finstar_core::etl::{
    DimensionRecord, DimensionStore, NaturalKey, Resolved, StoreError,
};

use crate::entities::{dim_account, dim_client, dim_period, dim_project, dim_resource};
use crate::repositories::to_store_error;

/// Lookup-or-create access to the dimension tables.
///
/// Creation is atomic under concurrent writers: every natural key carries
/// a unique constraint and inserts go through `ON CONFLICT DO NOTHING`, so
/// two resolvers racing on the same new key converge on one row and only
/// the winner observes `created = true`. Existing rows are never updated;
/// first-seen attributes win.
#[derive(Debug, Clone)]
pub struct DimensionRepository {
    db: DatabaseConnection,
}

impl DimensionRepository {
    /// Creates a new dimension repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_key(&self, key: &NaturalKey) -> Result<Option<i64>, DbErr> {
        match key {
            NaturalKey::Project { code } => Ok(dim_project::Entity::find()
                .filter(dim_project::Column::Code.eq(code))
                .one(&self.db)
                .await?
                .map(|model| model.id)),
            NaturalKey::Client { name } => Ok(dim_client::Entity::find()
                .filter(dim_client::Column::Name.eq(name))
                .one(&self.db)
                .await?
                .map(|model| model.id)),
            NaturalKey::Account {
                summary_code,
                display_name,
            } => Ok(dim_account::Entity::find()
                .filter(dim_account::Column::SummaryCode.eq(summary_code))
                .filter(dim_account::Column::DisplayName.eq(display_name))
                .one(&self.db)
                .await?
                .map(|model| model.id)),
            NaturalKey::Period { original } => Ok(dim_period::Entity::find()
                .filter(dim_period::Column::Original.eq(original))
                .one(&self.db)
                .await?
                .map(|model| model.id)),
            NaturalKey::Resource { name } => Ok(dim_resource::Entity::find()
                .filter(dim_resource::Column::Name.eq(name))
                .one(&self.db)
                .await?
                .map(|model| model.id)),
        }
    }

    /// Conflict-ignoring insert; `Err(RecordNotInserted)` means another
    /// writer owns the key.
    #[allow(clippy::too_many_lines)]
    async fn insert_record(&self, record: &DimensionRecord) -> Result<i64, DbErr> {
        let now = Utc::now().into();
        match record {
            DimensionRecord::Project(project) => {
                let model = dim_project::ActiveModel {
                    code: Set(project.code.clone()),
                    name: Set(project.name.clone()),
                    business_type: Set(project.business_type.clone()),
                    business_line: Set(project.business_line.clone()),
                    created_at: Set(now),
                    ..Default::default()
                };
                let result = dim_project::Entity::insert(model)
                    .on_conflict(
                        OnConflict::column(dim_project::Column::Code)
                            .do_nothing()
                            .to_owned(),
                    )
                    .exec(&self.db)
                    .await?;
                Ok(result.last_insert_id)
            }
            DimensionRecord::Client(client) => {
                let model = dim_client::ActiveModel {
                    name: Set(client.name.clone()),
                    client_type: Set(client.client_type.clone()),
                    created_at: Set(now),
                    ..Default::default()
                };
                let result = dim_client::Entity::insert(model)
                    .on_conflict(
                        OnConflict::column(dim_client::Column::Name)
                            .do_nothing()
                            .to_owned(),
                    )
                    .exec(&self.db)
                    .await?;
                Ok(result.last_insert_id)
            }
            DimensionRecord::Account(account) => {
                let model = dim_account::ActiveModel {
                    summary_code: Set(account.summary_code.clone()),
                    display_name: Set(account.display_name.clone()),
                    nature: Set(account.nature.clone()),
                    created_at: Set(now),
                    ..Default::default()
                };
                let result = dim_account::Entity::insert(model)
                    .on_conflict(
                        OnConflict::columns([
                            dim_account::Column::SummaryCode,
                            dim_account::Column::DisplayName,
                        ])
                        .do_nothing()
                        .to_owned(),
                    )
                    .exec(&self.db)
                    .await?;
                Ok(result.last_insert_id)
            }
            DimensionRecord::Period(period) => {
                let model = dim_period::ActiveModel {
                    original: Set(period.original.clone()),
                    year: Set(period.year),
                    month: Set(i32::try_from(period.month).unwrap_or_default()),
                    quarter: Set(i32::try_from(period.quarter).unwrap_or_default()),
                    half: Set(i32::try_from(period.half).unwrap_or_default()),
                    month_name: Set(period.month_name.clone()),
                    quarter_label: Set(period.quarter_label.clone()),
                    first_day: Set(period.first_day),
                    last_day: Set(period.last_day),
                    created_at: Set(now),
                    ..Default::default()
                };
                let result = dim_period::Entity::insert(model)
                    .on_conflict(
                        OnConflict::column(dim_period::Column::Original)
                            .do_nothing()
                            .to_owned(),
                    )
                    .exec(&self.db)
                    .await?;
                Ok(result.last_insert_id)
            }
            DimensionRecord::Resource(resource) => {
                let model = dim_resource::ActiveModel {
                    name: Set(resource.name.clone()),
                    resource_type: Set(resource.resource_type.as_str().to_string()),
                    created_at: Set(now),
                    ..Default::default()
                };
                let result = dim_resource::Entity::insert(model)
                    .on_conflict(
                        OnConflict::column(dim_resource::Column::Name)
                            .do_nothing()
                            .to_owned(),
                    )
                    .exec(&self.db)
                    .await?;
                Ok(result.last_insert_id)
            }
        }
    }
}

#[async_trait]
impl DimensionStore for DimensionRepository {
    async fn find(&self, key: &NaturalKey) -> Result<Option<i64>, StoreError> {
        self.find_key(key).await.map_err(to_store_error)
    }

    async fn insert_or_get(&self, record: &DimensionRecord) -> Result<Resolved, StoreError> {
        match self.insert_record(record).await {
            Ok(id) => {
                debug!(kind = %record.kind(), id, "dimension row inserted");
                Ok(Resolved { id, created: true })
            }
            // Another writer created the key first; the conflict-ignoring
            // insert touched nothing, so return the existing row.
            Err(DbErr::RecordNotInserted) => {
                let key = record.natural_key();
                let id = self
                    .find_key(&key)
                    .await
                    .map_err(to_store_error)?
                    .ok_or_else(|| {
                        StoreError::new(format!(
                            "dimension row for '{key}' vanished after insert conflict"
                        ))
                    })?;
                Ok(Resolved { id, created: false })
            }
            Err(err) => Err(to_store_error(err)),
        }
    }
}
