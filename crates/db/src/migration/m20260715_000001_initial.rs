//! Initial database migration.
//!
//! Creates the raw ledger source table, the five dimension tables, and the
//! fact table. Every dimension natural key and the fact `row_hash` carry
//! unique constraints: `INSERT .. ON CONFLICT DO NOTHING` against them is
//! the atomic creation primitive the repositories rely on.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: RAW LEDGER SOURCE
        // ============================================================
        db.execute_unprepared(RAW_LEDGER_ROWS_SQL).await?;

        // ============================================================
        // PART 2: DIMENSION TABLES
        // ============================================================
        db.execute_unprepared(DIM_PROJECT_SQL).await?;
        db.execute_unprepared(DIM_CLIENT_SQL).await?;
        db.execute_unprepared(DIM_ACCOUNT_SQL).await?;
        db.execute_unprepared(DIM_PERIOD_SQL).await?;
        db.execute_unprepared(DIM_RESOURCE_SQL).await?;

        // ============================================================
        // PART 3: FACT TABLE
        // ============================================================
        db.execute_unprepared(FACT_LEDGER_ENTRIES_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const RAW_LEDGER_ROWS_SQL: &str = r"
CREATE TABLE raw_ledger_rows (
    id              BIGSERIAL PRIMARY KEY,
    project         TEXT,
    client          TEXT,
    account         TEXT NOT NULL,
    amount          NUMERIC(15,2),
    month           INTEGER NOT NULL,
    year            INTEGER NOT NULL,
    nature          TEXT,
    recorded_at     TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const DIM_PROJECT_SQL: &str = r"
CREATE TABLE dim_project (
    id              BIGSERIAL PRIMARY KEY,
    code            TEXT NOT NULL,
    name            TEXT NOT NULL,
    business_type   TEXT NOT NULL,
    business_line   TEXT,
    created_at      TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT uq_dim_project_code UNIQUE (code)
);
";

const DIM_CLIENT_SQL: &str = r"
CREATE TABLE dim_client (
    id              BIGSERIAL PRIMARY KEY,
    name            TEXT NOT NULL,
    client_type     TEXT NOT NULL,
    created_at      TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT uq_dim_client_name UNIQUE (name)
);
";

const DIM_ACCOUNT_SQL: &str = r"
CREATE TABLE dim_account (
    id              BIGSERIAL PRIMARY KEY,
    summary_code    TEXT NOT NULL,
    display_name    TEXT NOT NULL,
    nature          TEXT NOT NULL,
    created_at      TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT uq_dim_account_key UNIQUE (summary_code, display_name)
);
";

const DIM_PERIOD_SQL: &str = r"
CREATE TABLE dim_period (
    id              BIGSERIAL PRIMARY KEY,
    original        TEXT NOT NULL,
    year            INTEGER NOT NULL,
    month           INTEGER NOT NULL,
    quarter         INTEGER NOT NULL,
    half            INTEGER NOT NULL,
    month_name      TEXT NOT NULL,
    quarter_label   TEXT NOT NULL,
    first_day       DATE NOT NULL,
    last_day        DATE NOT NULL,
    created_at      TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT uq_dim_period_original UNIQUE (original)
);
";

const DIM_RESOURCE_SQL: &str = r"
CREATE TABLE dim_resource (
    id              BIGSERIAL PRIMARY KEY,
    name            TEXT NOT NULL,
    resource_type   TEXT NOT NULL,
    created_at      TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT uq_dim_resource_name UNIQUE (name)
);
";

const FACT_LEDGER_ENTRIES_SQL: &str = r"
CREATE TABLE fact_ledger_entries (
    id              BIGSERIAL PRIMARY KEY,
    project_id      BIGINT NOT NULL REFERENCES dim_project(id),
    client_id       BIGINT NOT NULL REFERENCES dim_client(id),
    account_id      BIGINT NOT NULL REFERENCES dim_account(id),
    period_id       BIGINT NOT NULL REFERENCES dim_period(id),
    resource_id     BIGINT NOT NULL REFERENCES dim_resource(id),
    amount          NUMERIC(15,2) NOT NULL,
    source_report   TEXT NOT NULL,
    row_hash        VARCHAR(32) NOT NULL,
    loaded_at       TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT uq_fact_ledger_entries_row_hash UNIQUE (row_hash)
);

CREATE INDEX idx_fact_ledger_entries_project ON fact_ledger_entries(project_id);
CREATE INDEX idx_fact_ledger_entries_client ON fact_ledger_entries(client_id);
CREATE INDEX idx_fact_ledger_entries_account ON fact_ledger_entries(account_id);
CREATE INDEX idx_fact_ledger_entries_period ON fact_ledger_entries(period_id);
CREATE INDEX idx_fact_ledger_entries_resource ON fact_ledger_entries(resource_id);
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS fact_ledger_entries;
DROP TABLE IF EXISTS dim_resource;
DROP TABLE IF EXISTS dim_period;
DROP TABLE IF EXISTS dim_account;
DROP TABLE IF EXISTS dim_client;
DROP TABLE IF EXISTS dim_project;
DROP TABLE IF EXISTS raw_ledger_rows;
";
