//! Finstar ETL runner.
//!
//! Executes one dimensional ETL invocation: reads every raw ledger row,
//! resolves dimensions, loads hash-deduplicated facts, and prints the
//! stats envelope as JSON. Exits nonzero when the run cannot start.

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use finstar_core::etl::{EtlEngine, EtlRequest};
use finstar_db::{DimensionRepository, FactRepository, RawLedgerRepository, connect};
use finstar_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "finstar=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Connect to database
    let db = connect(&config.database.url).await?;
    info!("Connected to database");

    // Build the engine over the warehouse repositories
    let engine = EtlEngine::new(
        DimensionRepository::new(db.clone()),
        FactRepository::new(db.clone()),
        RawLedgerRepository::new(db),
    )
    .with_batch_size(config.etl.batch_size);

    let request = EtlRequest::from_ledger(config.etl.source_label, config.etl.report_label);
    let outcome = engine.run(request).await;

    println!("{}", serde_json::to_string_pretty(&outcome)?);

    if !outcome.success {
        std::process::exit(1);
    }
    Ok(())
}
