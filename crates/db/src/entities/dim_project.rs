//! `SeaORM` Entity for the project dimension.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "dim_project")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub code: String,
    pub name: String,
    pub business_type: String,
    pub business_line: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::fact_ledger_entries::Entity")]
    FactLedgerEntries,
}

impl Related<super::fact_ledger_entries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FactLedgerEntries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
