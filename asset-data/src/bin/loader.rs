use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use asset_data::AssetLoader;
use asset_db_sqlite::SqliteStore;
use clap::Parser;

/// Load an asset register from a CSV file into the database.
///
/// The CSV file should have the following columns:
/// - tag: Inventory tag, unique per organization
/// - name: Asset name
/// - category: Category name (created if it does not exist)
/// - value: Declared value
/// - purchase_price: Cost basis (empty to use value)
/// - purchase_date: YYYY-MM-DD (empty when unknown)
/// - useful_life_years: Whole years (empty to use the category default)
/// - serial_number: Optional serial number
#[derive(Parser, Debug)]
#[command(name = "asset-data-loader")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the CSV file containing the asset register
    #[arg(short, long)]
    file: PathBuf,

    /// SQLite database URL (e.g., sqlite:assets.db?mode=rwc to create if missing)
    #[arg(short, long, default_value = "sqlite:assets.db?mode=rwc")]
    database: String,

    /// Run database migrations before loading data
    #[arg(short, long, default_value_t = false)]
    migrate: bool,

    /// Run seed files from the specified directory after migrations
    #[arg(short, long)]
    seeds: Option<PathBuf>,

    /// Name recorded as the creator of imported records
    #[arg(short, long, default_value = "asset-data-loader")]
    actor: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let store = SqliteStore::new(&args.database)
        .await
        .with_context(|| format!("Failed to connect to database: {}", args.database))?;

    if args.migrate {
        println!("Running migrations...");
        store
            .run_migrations()
            .await
            .context("Failed to run migrations")?;
        println!("Migrations complete.");
    }

    if let Some(seeds_dir) = &args.seeds {
        println!("Running seeds from: {}", seeds_dir.display());
        store
            .run_seeds(seeds_dir)
            .await
            .with_context(|| format!("Failed to run seeds from: {}", seeds_dir.display()))?;
        println!("Seeds complete.");
    }

    println!("Loading assets from: {}", args.file.display());

    let file = File::open(&args.file)
        .with_context(|| format!("Failed to open: {}", args.file.display()))?;

    let records = AssetLoader::parse(file)
        .with_context(|| format!("Failed to parse CSV: {}", args.file.display()))?;

    println!("Parsed {} records from CSV", records.len());

    let summary = AssetLoader::load(&store, &records, &args.actor)
        .await
        .context("Failed to load assets into database")?;

    println!(
        "Loaded {} new and {} updated assets ({} categories created).",
        summary.assets_created, summary.assets_updated, summary.categories_created
    );

    Ok(())
}
