//! Core ETL engine for Finstar.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! It converts flat financial ledger rows into a star-schema warehouse model:
//! one fact table plus five dimension tables (project, client, account,
//! period, resource).
//!
//! # Modules
//!
//! - `etl` - Dimensional ETL: row normalization, period derivation,
//!   idempotent dimension resolution, content hashing, batch orchestration

pub mod etl;
