//! Integration tests for asset register loading against the SQLite backend.

use std::path::Path;

use asset_core::db::ListFilter;
use asset_core::reports::DepreciationRegister;
use asset_core::{Asset, DepreciationPolicy, InventoryStore};
use asset_data::{AssetLoader, AssetLoaderError, LoadSummary};
use asset_db_sqlite::SqliteStore;
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use sqlx::sqlite::SqlitePoolOptions;

const TEST_CSV: &str = include_str!("../test-data/assets.csv");

/// Sets up a test database with migrations run but NO seed data.
async fn setup_test_db_without_seeds() -> SqliteStore {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");

    let store = SqliteStore::new_with_pool(pool);
    store
        .run_migrations()
        .await
        .expect("Failed to run migrations");

    store
}

/// Same as above, plus the default categories.
async fn setup_test_db() -> SqliteStore {
    let store = setup_test_db_without_seeds().await;
    let seeds = Path::new(env!("CARGO_MANIFEST_DIR")).join("../asset-db-sqlite/seeds");
    store
        .run_seeds(&seeds)
        .await
        .expect("Failed to run seeds");
    store
}

async fn asset_by_tag(
    store: &SqliteStore,
    tag: &str,
) -> Asset {
    store
        .assets()
        .list(ListFilter::ALL)
        .await
        .expect("Failed to list assets")
        .into_iter()
        .find(|a| a.tag == tag)
        .unwrap_or_else(|| panic!("asset {tag} not loaded"))
}

fn date(
    y: i32,
    m: u32,
    d: u32,
) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn test_load_into_seeded_database_reuses_categories() {
    let store = setup_test_db().await;

    let records = AssetLoader::parse(TEST_CSV.as_bytes()).expect("Failed to parse CSV");
    let summary = AssetLoader::load(&store, &records, "importer")
        .await
        .expect("Failed to load assets");

    assert_eq!(
        summary,
        LoadSummary {
            assets_created: 6,
            assets_updated: 0,
            categories_created: 0,
        }
    );
    assert_eq!(
        store.categories().list(ListFilter::ALL).await.unwrap().len(),
        3
    );

    // Blank useful life falls back to the seeded Electronics default.
    let printer = asset_by_tag(&store, "AST-0006").await;
    assert_eq!(printer.useful_life_years, Some(3));
    assert_eq!(printer.purchase_date, None);
    assert_eq!(printer.serial_number, None);

    let pallet_jack = asset_by_tag(&store, "AST-0005").await;
    assert_eq!(pallet_jack.value, dec!(2400));
    assert_eq!(pallet_jack.serial_number.as_deref(), Some("PJ-00991"));
}

#[tokio::test]
async fn test_load_without_seeds_creates_categories() {
    let store = setup_test_db_without_seeds().await;

    let records = AssetLoader::parse(TEST_CSV.as_bytes()).expect("Failed to parse CSV");
    let summary = AssetLoader::load(&store, &records, "importer")
        .await
        .expect("Failed to load assets");

    assert_eq!(summary.categories_created, 3);
    let names: Vec<String> = store
        .categories()
        .list(ListFilter::ALL)
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["Furniture", "Electronics", "Equipment"]);

    // No category default to inherit here.
    let printer = asset_by_tag(&store, "AST-0006").await;
    assert_eq!(printer.useful_life_years, None);
}

#[tokio::test]
async fn test_loading_twice_is_idempotent() {
    let store = setup_test_db().await;
    let records = AssetLoader::parse(TEST_CSV.as_bytes()).expect("Failed to parse CSV");

    AssetLoader::load(&store, &records, "importer").await.unwrap();
    let first = store.assets().list(ListFilter::ALL).await.unwrap();
    let summary = AssetLoader::load(&store, &records, "importer").await.unwrap();
    let second = store.assets().list(ListFilter::ALL).await.unwrap();

    assert_eq!(summary.assets_created, 0);
    assert_eq!(summary.assets_updated, 6);
    assert_eq!(
        first.iter().map(|a| (&a.tag, a.value)).collect::<Vec<_>>(),
        second.iter().map(|a| (&a.tag, a.value)).collect::<Vec<_>>()
    );
}

#[tokio::test]
async fn test_reload_keeps_archived_asset_archived() {
    let store = setup_test_db().await;
    let records = AssetLoader::parse(TEST_CSV.as_bytes()).expect("Failed to parse CSV");
    AssetLoader::load(&store, &records, "importer").await.unwrap();

    let monitor = asset_by_tag(&store, "AST-0004").await;
    store
        .assets()
        .toggle_archived(monitor.id, "admin")
        .await
        .unwrap();

    AssetLoader::load(&store, &records, "importer").await.unwrap();

    let monitor = asset_by_tag(&store, "AST-0004").await;
    assert!(monitor.audit.archived_at.is_some());
    assert_eq!(
        store.assets().list(ListFilter::ACTIVE).await.unwrap().len(),
        5
    );
}

#[tokio::test]
async fn test_loaded_assets_depreciate() {
    let store = setup_test_db().await;
    let records = AssetLoader::parse(TEST_CSV.as_bytes()).expect("Failed to parse CSV");
    AssetLoader::load(&store, &records, "importer").await.unwrap();
    let policy = DepreciationPolicy::default();
    let as_of = date(2025, 6, 15);

    let desk = asset_by_tag(&store, "AST-0001").await;
    let snapshot = desk.depreciation(&policy, as_of).unwrap();
    assert_eq!(snapshot.age_in_months, 29);
    assert_eq!(snapshot.monthly_depreciation, dec!(20));
    assert_eq!(snapshot.accumulated_depreciation, dec!(580));
    assert_eq!(snapshot.current_book_value, dec!(620));

    let table = asset_by_tag(&store, "AST-0002").await;
    let snapshot = table.depreciation(&policy, as_of).unwrap();
    assert_eq!(snapshot.monthly_depreciation, dec!(26.67));
    assert_eq!(snapshot.current_book_value, dec!(3200));

    let assets = store.assets().list(ListFilter::ACTIVE).await.unwrap();
    let register = DepreciationRegister::build(&assets, &policy, as_of).unwrap();
    let monitor = asset_by_tag(&store, "AST-0004").await;
    assert_eq!(register.rows.len(), 6);
    assert_eq!(register.fully_depreciated, vec![monitor.id]);
}

#[tokio::test]
async fn test_invalid_date_is_reported_with_line() {
    let store = setup_test_db().await;
    let csv = "tag,name,category,value,purchase_price,purchase_date\n\
               AST-1,Chair,Furniture,150,,2024-01-05\n\
               AST-2,Desk,Furniture,400,,05/01/2024\n";
    let records = AssetLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

    let err = AssetLoader::load(&store, &records, "importer")
        .await
        .expect_err("Should reject the bad date");

    assert_eq!(
        err.to_string(),
        "Invalid record on line 3: Purchase date must be a date in YYYY-MM-DD form."
    );
    assert!(matches!(err, AssetLoaderError::InvalidRecord { line: 3, .. }));
    assert!(
        store
            .assets()
            .list(ListFilter::ALL)
            .await
            .unwrap()
            .is_empty()
    );
}
