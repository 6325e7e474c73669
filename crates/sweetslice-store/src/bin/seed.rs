//! # Seed Data Generator
//!
//! Creates (or inspects) a store file with the default fixture: two accounts
//! and a small bakery catalog.
//!
//! ## Usage
//! ```bash
//! # Seed the default path (./store.json)
//! cargo run -p sweetslice-store --bin seed
//!
//! # Specify the store file path
//! cargo run -p sweetslice-store --bin seed -- --db ./data/store.json
//! ```
//!
//! Opening an existing file is a no-op for the data; the catalog summary is
//! printed either way, so this doubles as a quick inspection tool.

use std::env;
use std::sync::Arc;

use sweetslice_store::Store;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./store.json");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Sweet Slice Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Store file path (default: ./store.json)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Sweet Slice Seed Data Generator");
    println!("==================================");
    println!("Store: {}", db_path);
    println!();

    let store = Arc::new(Store::open(&db_path)?);

    let (users, products, orders) = store.read(|snap| {
        (snap.users.len(), snap.products.len(), snap.orders.len())
    });

    println!("✓ Store ready");
    println!();
    println!("  Users:    {}", users);
    println!("  Products: {}", products);
    println!("  Orders:   {}", orders);
    println!();
    println!("Catalog:");

    let catalog = store.read(|snap| snap.products.clone());
    for product in &catalog {
        println!(
            "  {:<22} {:>8}   stock {:>3}   [{}]",
            product.name,
            product.price.to_string(),
            product.stock,
            product.category
        );
    }

    println!();
    println!("Default accounts:");
    println!("  admin@shop.com / admin123  (admin)");
    println!("  ali@example.com / pass     (customer)");

    Ok(())
}
