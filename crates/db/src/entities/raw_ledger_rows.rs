//! `SeaORM` Entity for the raw ledger source table.
//!
//! The external shape the engine normalizes from when no inline rows are
//! supplied; consumed in ascending id order.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "raw_ledger_rows")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub project: Option<String>,
    pub client: Option<String>,
    pub account: String,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))", nullable)]
    pub amount: Option<Decimal>,
    pub month: i32,
    pub year: i32,
    pub nature: Option<String>,
    pub recorded_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
