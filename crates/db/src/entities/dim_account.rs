//! `SeaORM` Entity for the account dimension.
//!
//! Accounts are keyed by the (summary code, display name) pair: two
//! accounts sharing a summary code but differing display names are
//! distinct rows.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "dim_account")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub summary_code: String,
    pub display_name: String,
    pub nature: String,
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
