//! `SeaORM` entity definitions for the warehouse star schema.
//!
//! Five dimension tables, one fact table, and the raw ledger source table.

pub mod dim_account;
pub mod dim_client;
pub mod dim_period;
pub mod dim_project;
pub mod dim_resource;
pub mod fact_ledger_entries;
pub mod raw_ledger_rows;
