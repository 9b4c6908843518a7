//! End-to-end command tests against the in-memory and SQLite backends.

use asset_cli::app::{build_registry, run};
use asset_cli::cli::Cli;
use asset_cli::config::AppConfig;
use asset_core::InventoryStore;
use asset_core::db::DbConfig;
use chrono::NaiveDate;
use clap::Parser;
use pretty_assertions::assert_eq;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
}

fn memory_config() -> AppConfig {
    AppConfig {
        actor: "tester".to_string(),
        database: DbConfig::memory(),
        ..AppConfig::default()
    }
}

async fn open(config: &AppConfig) -> Box<dyn InventoryStore> {
    build_registry()
        .create(&config.database)
        .await
        .expect("Failed to open store")
}

async fn exec(
    store: &dyn InventoryStore,
    config: &AppConfig,
    args: &[&str],
) -> anyhow::Result<String> {
    let cli = Cli::try_parse_from(std::iter::once("asset-ledger").chain(args.iter().copied()))?;
    run(store, config, cli.command, today()).await
}

/// Runs a command that must succeed.
async fn ok(
    store: &dyn InventoryStore,
    config: &AppConfig,
    args: &[&str],
) -> String {
    exec(store, config, args)
        .await
        .unwrap_or_else(|e| panic!("{args:?} failed: {e:#}"))
}

// ============================================================================
// Registry
// ============================================================================

#[test]
fn test_registry_ships_memory_and_sqlite() {
    assert_eq!(build_registry().available_backends(), vec!["memory", "sqlite"]);
}

#[tokio::test]
async fn test_unknown_backend_is_a_configuration_error() {
    let config = DbConfig {
        backend: "postgres".to_string(),
        connection_string: String::new(),
    };

    let err = match build_registry().create(&config).await {
        Ok(_) => panic!("postgres is not registered"),
        Err(e) => e,
    };

    assert!(err.to_string().contains("unknown backend 'postgres'"));
}

// ============================================================================
// Assets
// ============================================================================

#[tokio::test]
async fn test_register_and_show_asset() {
    let config = memory_config();
    let store = open(&config).await;

    ok(&*store, &config, &["category", "add", "--name", "Furniture", "--life", "10"]).await;
    let added = ok(
        &*store,
        &config,
        &[
            "asset", "add", "--tag", "AST-0001", "--name", "Desk", "--category", "1", "--value",
            "1,200", "--purchase-date", "2023-01-15", "--life", "5",
        ],
    )
    .await;
    assert_eq!(added, "Registered asset #1 AST-0001\n");

    let shown = ok(&*store, &config, &["asset", "show", "1"]).await;
    assert!(shown.contains("  Category:     Furniture\n"), "{shown}");
    assert!(shown.contains("  Created:      "), "{shown}");
    assert!(shown.contains("  Monthly:      20.00\n"), "{shown}");
    assert!(shown.contains("  Accumulated:  480.00\n"), "{shown}");
    assert!(shown.contains("  Book value:   720.00\n"), "{shown}");
}

#[tokio::test]
async fn test_asset_inherits_category_life() {
    let config = memory_config();
    let store = open(&config).await;

    ok(&*store, &config, &["category", "add", "--name", "Electronics", "--life", "3"]).await;
    ok(
        &*store,
        &config,
        &["asset", "add", "--tag", "LT-1", "--name", "Laptop", "--category", "1", "--value", "1800"],
    )
    .await;

    let report = ok(&*store, &config, &["asset", "depreciation", "1"]).await;
    assert!(report.contains("  Useful life:  3 years\n"), "{report}");
    assert!(report.contains("  Monthly:      50.00\n"), "{report}");
}

#[tokio::test]
async fn test_invalid_asset_reports_every_problem() {
    let config = memory_config();
    let store = open(&config).await;

    let err = exec(
        &*store,
        &config,
        &["asset", "add", "--tag", "bad tag!", "--name", " ", "--value=-1"],
    )
    .await
    .unwrap_err();

    assert_eq!(
        err.to_string(),
        "invalid form: Tag may only contain letters, digits, '.', '_' or '-' (max 32). \
         Name is required. Value cannot be negative."
    );
}

#[tokio::test]
async fn test_archive_restore_round_trip() {
    let config = memory_config();
    let store = open(&config).await;
    ok(&*store, &config, &["asset", "add", "--tag", "AST-1", "--name", "Chair", "--value", "150"]).await;

    assert_eq!(ok(&*store, &config, &["asset", "archive", "1"]).await, "Archived asset #1\n");
    assert_eq!(ok(&*store, &config, &["asset", "list"]).await, "No records.\n");
    let all = ok(&*store, &config, &["asset", "list", "--all"]).await;
    assert!(all.contains("AST-1"), "{all}");
    assert!(all.contains("Archived"), "{all}");

    let err = exec(&*store, &config, &["asset", "archive", "1"]).await.unwrap_err();
    assert_eq!(err.to_string(), "asset #1 is already archived");

    assert_eq!(ok(&*store, &config, &["asset", "restore", "1"]).await, "Restored asset #1\n");
    let shown = ok(&*store, &config, &["asset", "show", "1"]).await;
    assert!(shown.contains("  Status:       Available\n"), "{shown}");
}

#[tokio::test]
async fn test_reference_data_archive_hides_from_default_list() {
    let config = memory_config();
    let store = open(&config).await;
    ok(&*store, &config, &["room", "add", "--name", "Lab", "--floor", "-1"]).await;
    ok(&*store, &config, &["tenant", "add", "--name", "Acme", "--slug", "acme"]).await;

    ok(&*store, &config, &["room", "archive", "1"]).await;
    ok(&*store, &config, &["tenant", "archive", "1"]).await;

    assert_eq!(ok(&*store, &config, &["room", "list"]).await, "No records.\n");
    let rooms = ok(&*store, &config, &["room", "list", "--all"]).await;
    assert!(rooms.contains("Lab"), "{rooms}");
    assert!(rooms.contains("-1 [archived]"), "{rooms}");
    assert_eq!(ok(&*store, &config, &["tenant", "list"]).await, "No records.\n");

    let err = exec(&*store, &config, &["tenant", "restore", "2"]).await.unwrap_err();
    assert_eq!(format!("{err:#}"), "tenant #2: Record not found");
}

#[tokio::test]
async fn test_assign_and_release() {
    let config = memory_config();
    let store = open(&config).await;
    ok(
        &*store,
        &config,
        &["employee", "add", "--name", "Ana", "--email", "ana@example.com", "--role", "manager"],
    )
    .await;
    ok(&*store, &config, &["asset", "add", "--tag", "AST-1", "--name", "Laptop", "--value", "900"]).await;

    assert_eq!(
        ok(&*store, &config, &["asset", "assign", "1", "--employee", "1"]).await,
        "Assigned asset #1 AST-1 (In Use)\n"
    );
    assert!(
        ok(&*store, &config, &["asset", "show", "1"])
            .await
            .contains("  Assigned to:  Ana\n")
    );
    assert_eq!(
        ok(&*store, &config, &["asset", "release", "1"]).await,
        "Released asset #1 AST-1 (Available)\n"
    );
}

// ============================================================================
// Orders and maintenance
// ============================================================================

#[tokio::test]
async fn test_place_order_registers_asset() {
    let config = memory_config();
    let store = open(&config).await;

    let placed = ok(
        &*store,
        &config,
        &[
            "order", "place", "--number", "PO-1001", "--supplier", "Oak & Co", "--item",
            "Conference table", "--unit-cost", "3200", "--date", "2025-01-15", "--life", "10",
        ],
    )
    .await;

    assert!(placed.starts_with("Placed purchase order #1 PO-1001 (Pending)\n"), "{placed}");
    assert!(placed.contains("Registered asset #1 PO-1001\n"), "{placed}");
    assert!(placed.contains("  Monthly:      26.67\n"), "{placed}");
    assert!(placed.contains("  Book value:   3200.00\n"), "{placed}");

    assert_eq!(
        ok(&*store, &config, &["order", "receive", "1"]).await,
        "Purchase order #1 PO-1001 is now Received\n"
    );
    let err = exec(&*store, &config, &["order", "cancel", "1"]).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "cannot cancel purchase order #1 while it is Received"
    );
}

#[tokio::test]
async fn test_maintenance_windows() {
    let config = memory_config();
    let store = open(&config).await;
    ok(&*store, &config, &["asset", "add", "--tag", "FL-1", "--name", "Forklift", "--value", "25000"]).await;
    ok(
        &*store,
        &config,
        &["maintenance", "schedule", "--asset", "1", "--title", "Brake check", "--date", "2025-01-20"],
    )
    .await;
    ok(
        &*store,
        &config,
        &["maintenance", "schedule", "--asset", "1", "--title", "Oil change", "--date", "2025-01-02"],
    )
    .await;

    let upcoming = ok(&*store, &config, &["maintenance", "upcoming", "--days", "7"]).await;
    assert!(upcoming.contains("Brake check"), "{upcoming}");
    assert!(!upcoming.contains("Oil change"), "{upcoming}");

    let overdue = ok(&*store, &config, &["maintenance", "overdue"]).await;
    assert!(overdue.contains("Oil change"), "{overdue}");
    assert!(overdue.contains("FL-1"), "{overdue}");

    ok(&*store, &config, &["maintenance", "start", "2"]).await;
    assert!(
        ok(&*store, &config, &["asset", "show", "1"])
            .await
            .contains("  Status:       Maintenance\n")
    );
    assert_eq!(
        ok(&*store, &config, &["maintenance", "complete", "2", "--cost", "85.50"]).await,
        "Maintenance #2 on asset #1 is now Completed\n"
    );
    assert!(
        ok(&*store, &config, &["asset", "show", "1"])
            .await
            .contains("  Status:       Available\n")
    );
}

// ============================================================================
// Reports
// ============================================================================

#[tokio::test]
async fn test_report_totals_and_flags() {
    let config = memory_config();
    let store = open(&config).await;
    ok(
        &*store,
        &config,
        &[
            "asset", "add", "--tag", "AST-0001", "--name", "Desk", "--value", "1200",
            "--purchase-date", "2023-01-15", "--life", "5",
        ],
    )
    .await;
    ok(
        &*store,
        &config,
        &[
            "asset", "add", "--tag", "AST-0002", "--name", "Monitor", "--value", "300",
            "--purchase-date", "2021-09-10", "--life", "3",
        ],
    )
    .await;
    ok(&*store, &config, &["asset", "add", "--tag", "AST-0003", "--name", "Old", "--value", "50"]).await;
    ok(&*store, &config, &["asset", "archive", "3"]).await;

    let report = ok(&*store, &config, &["report"]).await;

    assert!(report.starts_with("Depreciation register as of 2025-01-15\n"), "{report}");
    assert!(
        report.contains("Totals: cost 1500.00, accumulated 780.00, book value 720.00\n"),
        "{report}"
    );
    assert!(report.contains("By status: Available 2\n"), "{report}");
    assert!(report.contains("Fully depreciated: AST-0002\n"), "{report}");
    assert!(report.contains("Near end of life: none\n"), "{report}");
    assert!(!report.contains("AST-0003"), "{report}");
}

// ============================================================================
// SQLite backend
// ============================================================================

#[tokio::test]
async fn test_sqlite_backend_is_seeded() {
    let config = AppConfig {
        database: DbConfig {
            backend: "sqlite".to_string(),
            connection_string: ":memory:".to_string(),
        },
        ..memory_config()
    };
    let store = open(&config).await;

    let categories = ok(&*store, &config, &["category", "list"]).await;
    assert!(categories.contains("Furniture"), "{categories}");
    assert!(categories.contains("10 years"), "{categories}");

    ok(
        &*store,
        &config,
        &["asset", "add", "--tag", "AST-1", "--name", "Desk", "--category", "1", "--value", "1000"],
    )
    .await;
    ok(&*store, &config, &["asset", "archive", "1"]).await;
    assert_eq!(ok(&*store, &config, &["asset", "list"]).await, "No records.\n");
    assert_eq!(ok(&*store, &config, &["asset", "restore", "1"]).await, "Restored asset #1\n");
}
