//! # Seed Data Generator
//!
//! Populates the database with sample vouchers for development.
//!
//! ## Usage
//! ```bash
//! # Generate 200 vouchers (default)
//! cargo run -p voucher-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p voucher-db --bin seed -- --count 1000
//!
//! # Specify database path
//! cargo run -p voucher-db --bin seed -- --db ./data/vouchers.db
//! ```
//!
//! ## Generated Vouchers
//! Each voucher has:
//! - Unique code: `{CAMPAIGN}{PERCENT}-{INDEX}`, e.g. `SUMMER15-0042`
//! - Discount picked from a fixed ladder (5% .. 100%)
//! - Expiry spread over the next year
//! - Creation times one second apart, so listings have a stable order

use chrono::{Duration, Utc};
use clap::Parser;
use voucher_core::{NewVoucher, VoucherFilter};
use voucher_db::{Database, DbConfig};

/// Campaign prefixes for realistic test data
const CAMPAIGNS: &[&str] = &[
    "WELCOME", "SUMMER", "WINTER", "SPRING", "AUTUMN", "FLASH", "VIP", "LOYAL", "BDAY", "FREESHIP",
];

/// Discount ladder in percent
const DISCOUNTS: &[i32] = &[5, 10, 15, 20, 25, 30, 40, 50, 75, 100];

#[derive(Debug, Parser)]
#[command(name = "seed", about = "Voucher seed data generator")]
struct Args {
    /// Number of vouchers to generate
    #[arg(short, long, default_value_t = 200)]
    count: usize,

    /// Database file path
    #[arg(short, long, default_value = "./vouchers_dev.db")]
    db: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    println!("🌱 Voucher Seed Data Generator");
    println!("==============================");
    println!("Database: {}", args.db);
    println!("Vouchers: {}", args.count);
    println!();

    let db = Database::new(DbConfig::new(&args.db)).await?;
    let repo = db.vouchers();

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Check existing vouchers
    let (_, existing) = repo.list(1, 0, &VoucherFilter::default()).await?;
    if existing > 0 {
        println!("⚠ Database already has {} vouchers", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Generating vouchers...");

    let start = std::time::Instant::now();
    let base = Utc::now();
    let mut generated = 0;

    for seed in 0..args.count {
        let voucher = generate_voucher(seed, base + Duration::seconds(seed as i64));

        if let Err(e) = repo.create(voucher.clone()).await {
            eprintln!("Failed to insert {}: {}", voucher.code, e);
            continue;
        }

        generated += 1;

        if generated % 100 == 0 {
            println!("  Generated {} vouchers...", generated);
        }
    }

    let elapsed = start.elapsed();
    println!();
    println!("✓ Generated {} vouchers in {:?}", generated, elapsed);

    // Verify search
    println!();
    println!("Verifying code search...");
    for campaign in ["summer", "VIP"] {
        let (_, matches) = repo
            .list(1, 0, &VoucherFilter::new(campaign, Default::default()))
            .await?;
        println!("  Search '{}': {} results", campaign, matches);
    }

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Generates a single voucher with realistic data.
fn generate_voucher(seed: usize, created_at: chrono::DateTime<Utc>) -> NewVoucher {
    let campaign = CAMPAIGNS[seed % CAMPAIGNS.len()];
    let percent = DISCOUNTS[(seed * 7) % DISCOUNTS.len()];

    let code = format!("{}{}-{:04}", campaign, percent, seed);

    // Expiry 30..=395 days out
    let expiry_date = (created_at + Duration::days(30 + (seed % 366) as i64)).date_naive();

    NewVoucher::new(code, percent, expiry_date, created_at)
}
