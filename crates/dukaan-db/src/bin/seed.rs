//! # Seed Data Generator
//!
//! Populates the database with test catalog data for development.
//!
//! ## Usage
//! ```bash
//! # Seed the default database
//! cargo run -p dukaan-db --bin seed
//!
//! # Custom product count and database path
//! cargo run -p dukaan-db --bin seed -- --count 500 --db ./data/dukaan.db
//! ```
//!
//! ## Generated Data
//! Creates categories, manufacturers, and products with unique 8-digit
//! barcodes, varied prices, and varied stock levels.

use std::env;

use dukaan_core::NewProduct;
use dukaan_db::{Database, DbConfig};

const CATEGORIES: &[&str] = &[
    "Grocery",
    "Beverages",
    "Snacks",
    "Dairy",
    "Personal Care",
    "Stationery",
    "Household",
];

const MANUFACTURERS: &[&str] = &[
    "Amul",
    "Britannia",
    "Parle",
    "Haldiram",
    "Dabur",
    "ITC",
    "Nestle",
    "Patanjali",
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    let count = arg_value(&args, "--count")
        .map(|v| v.parse::<usize>())
        .transpose()?
        .unwrap_or(200);
    let db_path = arg_value(&args, "--db").unwrap_or_else(|| "./dukaan.db".to_string());

    println!("Seeding {} products into {}", count, db_path);

    let db = Database::new(DbConfig::new(&db_path)).await?;

    let mut categories = Vec::new();
    for name in CATEGORIES {
        categories.push(db.categories().get_or_create(name).await?);
    }

    let mut manufacturers = Vec::new();
    for name in MANUFACTURERS {
        manufacturers.push(db.manufacturers().get_or_create(name).await?);
    }

    let mut created = 0;
    for i in 0..count {
        let category = &categories[i % categories.len()];
        let manufacturer = &manufacturers[i % manufacturers.len()];

        // Deterministic but varied: barcode space starts at 50000000
        let barcode = format!("{:08}", 50_000_000 + i);
        let cost = 500 + ((i * 137) % 9500) as i64;
        let margin = 100 + ((i * 53) % 900) as i64;

        let product = NewProduct {
            barcode,
            category_id: category.id.clone(),
            manufacturer_id: manufacturer.id.clone(),
            quantity: ((i * 7) % 100) as i64,
            cost_price_paise: cost,
            sale_price_paise: cost + margin,
        };

        match db.products().upsert_by_barcode(&product).await {
            Ok(()) => created += 1,
            Err(e) => eprintln!("row {}: {}", i, e),
        }
    }

    println!(
        "Done: {} products ({} categories, {} manufacturers)",
        created,
        categories.len(),
        manufacturers.len()
    );

    db.close().await;
    Ok(())
}

fn arg_value(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}
