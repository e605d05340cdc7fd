//! `SeaORM` Entity for the fact table.
//!
//! `row_hash` carries a unique constraint and is the load-time
//! idempotency key: conflicting inserts are silently ignored.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "fact_ledger_entries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub project_id: i64,
    pub client_id: i64,
    pub account_id: i64,
    pub period_id: i64,
    pub resource_id: i64,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))")]
    pub amount: Decimal,
    pub source_report: String,
    pub row_hash: String,
    pub loaded_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::dim_project::Entity",
        from = "Column::ProjectId",
        to = "super::dim_project::Column::Id"
    )]
    DimProject,
    #[sea_orm(
        belongs_to = "super::dim_client::Entity",
        from = "Column::ClientId",
        to = "super::dim_client::Column::Id"
    )]
    DimClient,
    #[sea_orm(
        belongs_to = "super::dim_account::Entity",
        from = "Column::AccountId",
        to = "super::dim_account::Column::Id"
    )]
    DimAccount,
    #[sea_orm(
        belongs_to = "super::dim_period::Entity",
        from = "Column::PeriodId",
        to = "super::dim_period::Column::Id"
    )]
    DimPeriod,
    #[sea_orm(
        belongs_to = "super::dim_resource::Entity",
        from = "Column::ResourceId",
        to = "super::dim_resource::Column::Id"
    )]
    DimResource,
}

impl Related<super::dim_project::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DimProject.def()
    }
}

impl Related<super::dim_client::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DimClient.def()
    }
}

impl Related<super::dim_account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DimAccount.def()
    }
}

impl Related<super::dim_period::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DimPeriod.def()
    }
}

impl Related<super::dim_resource::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DimResource.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
