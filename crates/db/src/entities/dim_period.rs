//! `SeaORM` Entity for the period dimension.
//!
//! Keyed by the original "MM/YYYY" string; the remaining columns are
//! derived calendar attributes.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "dim_period")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub original: String,
    pub year: i32,
    pub month: i32,
    pub quarter: i32,
    pub half: i32,
    pub month_name: String,
    pub quarter_label: String,
    pub first_day: Date,
    pub last_day: Date,
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
