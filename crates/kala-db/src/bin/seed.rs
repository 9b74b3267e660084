//! # Seed Data Writer
//!
//! Writes the launch catalog and default settings into a database file,
//! optionally with a few sample inquiries for trying out the admin views.
//!
//! ## Usage
//! ```bash
//! # Seed ./drik-kala-dev.db
//! cargo run -p kala-db --bin seed
//!
//! # Specify database path, add sample inquiries
//! cargo run -p kala-db --bin seed -- --db ./data/drik-kala.db --inquiries
//!
//! # Overwrite records that already exist
//! cargo run -p kala-db --bin seed -- --force
//! ```

use chrono::{TimeZone, Utc};
use kala_core::seed::initial_products;
use kala_core::{NewInquiry, WebsiteSettings};
use kala_db::store::{INQUIRIES_KEY, PRODUCTS_KEY, SETTINGS_KEY};
use kala_db::{Database, DbConfig, InquiryStore, KvRepository};
use std::env;

/// `(name, email, subject, message, day of January 2024)`
const SAMPLE_INQUIRIES: &[(&str, &str, &str, &str, u32)] = &[
    (
        "Meera Iyer",
        "meera.iyer@example.com",
        "Custom sizing",
        "Could the Festive Silk Dress be tailored to custom measurements?",
        14,
    ),
    (
        "Ritika Kapoor",
        "ritika.k@example.com",
        "Bulk order",
        "I'd like six co-ord sets for a bridal party. Is a group discount possible?",
        15,
    ),
    (
        "Ananya Rao",
        "ananya.rao@example.com",
        "Shipping",
        "Do you ship to Bengaluru, and how long does delivery take?",
        15,
    ),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./drik-kala-dev.db");
    let mut with_inquiries = false;
    let mut force = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--inquiries" | "-i" => with_inquiries = true,
            "--force" | "-f" => force = true,
            "--help" | "-h" => {
                println!("Drik Kala Seed Data Writer");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./drik-kala-dev.db)");
                println!("  -i, --inquiries    Also write sample inquiries");
                println!("  -f, --force        Overwrite records that already exist");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            other => eprintln!("Ignoring unknown argument: {}", other),
        }
        i += 1;
    }

    println!("🌱 Drik Kala Seed Data Writer");
    println!("=============================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    let kv = db.kv();

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Catalog
    if kv.get(PRODUCTS_KEY).await?.is_some() && !force {
        println!("⚠ Catalog already stored, skipping (use --force to overwrite)");
    } else {
        let products = initial_products();
        kv.put_json(PRODUCTS_KEY, &products).await?;
        println!("✓ Wrote {} products", products.len());
    }

    // Settings
    if kv.get(SETTINGS_KEY).await?.is_some() && !force {
        println!("⚠ Settings already stored, skipping");
    } else {
        kv.put_json(SETTINGS_KEY, &WebsiteSettings::default()).await?;
        println!("✓ Wrote default settings");
    }

    // Inquiries
    if with_inquiries {
        match seed_inquiries(&kv, force).await? {
            0 => println!("⚠ Inquiries already stored, skipping"),
            written => println!("✓ Wrote {} sample inquiries", written),
        }
    }

    db.close().await;

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Writes the sample inquiries unless inquiries are already stored.
///
/// Returns how many were written, 0 when skipped.
async fn seed_inquiries(
    kv: &KvRepository,
    force: bool,
) -> Result<usize, Box<dyn std::error::Error>> {
    if kv.get(INQUIRIES_KEY).await?.is_some() {
        if !force {
            return Ok(0);
        }
        kv.remove(INQUIRIES_KEY).await?;
    }

    let mut inquiries = InquiryStore::load(kv.clone()).await?;
    for (idx, (name, email, subject, message, day)) in SAMPLE_INQUIRIES.iter().enumerate() {
        let timestamp = Utc
            .with_ymd_and_hms(2024, 1, *day, 10 + idx as u32, 30, 0)
            .single()
            .ok_or("invalid sample timestamp")?;

        inquiries
            .add_at(
                NewInquiry {
                    name: name.to_string(),
                    email: email.to_string(),
                    phone: None,
                    subject: Some(subject.to_string()),
                    message: message.to_string(),
                },
                timestamp,
            )
            .await?;
    }

    Ok(SAMPLE_INQUIRIES.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_inquiries_seeded_once_unless_forced() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let kv = db.kv();

        assert_eq!(seed_inquiries(&kv, false).await.unwrap(), 3);
        assert_eq!(seed_inquiries(&kv, false).await.unwrap(), 0);
        assert_eq!(InquiryStore::load(kv.clone()).await.unwrap().list().len(), 3);

        assert_eq!(seed_inquiries(&kv, true).await.unwrap(), 3);
        assert_eq!(InquiryStore::load(kv).await.unwrap().list().len(), 3);
    }
}
