//! Database seeder for Finstar development and testing.
//!
//! Seeds sample raw ledger rows so the ETL runner has input. Idempotent:
//! skips seeding when the raw ledger already has rows.
//!
//! Usage: cargo run --bin seeder

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait, Set};

use finstar_db::entities::raw_ledger_rows;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = finstar_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding raw ledger rows...");
    seed_raw_ledger(&db).await;

    println!("Seeding complete!");
}

async fn seed_raw_ledger(db: &DatabaseConnection) {
    let existing = raw_ledger_rows::Entity::find()
        .count(db)
        .await
        .expect("Failed to count raw ledger rows");

    if existing > 0 {
        println!("Raw ledger already has {existing} rows, skipping");
        return;
    }

    let rows = sample_rows();
    let count = rows.len();
    raw_ledger_rows::Entity::insert_many(rows)
        .exec(db)
        .await
        .expect("Failed to seed raw ledger rows");

    println!("Inserted {count} raw ledger rows");
}

type SampleRow = (
    Option<&'static str>,
    Option<&'static str>,
    &'static str,
    &'static str,
    i32,
    i32,
    Option<&'static str>,
);

/// A year of postings across three projects, including rows with missing
/// project/client so the normalizer's fallbacks get exercised.
fn sample_rows() -> Vec<raw_ledger_rows::ActiveModel> {
    let samples: Vec<SampleRow> = vec![
        (Some("PRJ-1001"), Some("Acme Retail"), "4.1.1 Service Revenue", "125000.00", 1, 2026, Some("REVENUE")),
        (Some("PRJ-1001"), Some("Acme Retail"), "5.1.2 Payroll", "-78000.00", 1, 2026, Some("COST")),
        (Some("PRJ-1001"), Some("Acme Retail"), "4.1.1 Service Revenue", "131500.00", 2, 2026, Some("REVENUE")),
        (Some("PRJ-2002"), Some("Borealis Energy"), "4.2.1 License Revenue", "98000.00", 2, 2026, Some("REVENUE")),
        (Some("PRJ-2002"), Some("Borealis Energy"), "5.3.1 Subcontracting", "-41200.00", 3, 2026, Some("COST")),
        (Some("PRJ-3003"), Some("Citrus Bank"), "4.1.1 Service Revenue", "210000.00", 6, 2026, Some("REVENUE")),
        (Some("PRJ-3003"), Some("Citrus Bank"), "5.1.2 Payroll", "-115400.00", 7, 2026, Some("COST")),
        (None, Some("Citrus Bank"), "6.1.1 Travel Expenses", "-5300.00", 7, 2026, None),
        (Some("PRJ-2002"), None, "4.2.1 License Revenue", "98000.00", 12, 2026, Some("REVENUE")),
    ];

    samples
        .into_iter()
        .map(|(project, client, account, amount, month, year, nature)| {
            raw_ledger_rows::ActiveModel {
                project: Set(project.map(ToString::to_string)),
                client: Set(client.map(ToString::to_string)),
                account: Set(account.to_string()),
                amount: Set(Some(
                    Decimal::from_str_exact(amount).expect("seed amounts are valid decimals"),
                )),
                month: Set(month),
                year: Set(year),
                nature: Set(nature.map(ToString::to_string)),
                recorded_at: Set(Utc::now().into()),
                ..Default::default()
            }
        })
        .collect()
}
