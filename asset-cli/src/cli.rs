use std::path::PathBuf;

use asset_core::{AssetStatus, EmployeeRole};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;

use crate::config::{DEFAULT_CONFIG_FILE, Overrides};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Asset register with straight-line depreciation.
///
/// Records are never deleted: `archive` hides them from listings and
/// `restore` brings them back.
#[derive(Debug, Parser)]
#[command(name = "asset-ledger", version, about)]
pub struct Cli {
    /// Path to the TOML configuration file. A missing file means defaults.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Database backend to use (overrides the config file).
    #[arg(long, global = true)]
    pub backend: Option<String>,

    /// Database connection string (overrides the config file).
    /// For SQLite this is a file path (e.g. `assets.db`) or `:memory:`.
    #[arg(long, global = true)]
    pub db: Option<String>,

    /// Name recorded on created and changed records.
    #[arg(long, global = true)]
    pub actor: Option<String>,

    /// Log filter used when RUST_LOG is not set (e.g. `debug`).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            backend: self.backend.clone(),
            db: self.db.clone(),
            actor: self.actor.clone(),
            log_level: self.log_level.clone(),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Register, move and depreciate assets.
    #[command(subcommand)]
    Asset(AssetCommand),
    /// Asset categories and their default useful life.
    #[command(subcommand)]
    Category(CategoryCommand),
    #[command(subcommand)]
    Room(RoomCommand),
    #[command(subcommand)]
    Employee(EmployeeCommand),
    #[command(subcommand)]
    Tenant(TenantCommand),
    #[command(subcommand)]
    Task(TaskCommand),
    /// Purchase orders; placing one registers the asset it buys.
    #[command(subcommand)]
    Order(OrderCommand),
    #[command(subcommand)]
    Maintenance(MaintenanceCommand),
    /// Depreciation register of every active asset.
    Report {
        /// Valuation date (YYYY-MM-DD); today when omitted.
        #[arg(long)]
        as_of: Option<NaiveDate>,
    },
}

/// Flags shared by every `list` command.
#[derive(Debug, Clone, Copy, Args)]
pub struct ListArgs {
    /// Include archived records.
    #[arg(long)]
    pub all: bool,
}

#[derive(Debug, Subcommand)]
pub enum AssetCommand {
    Add(AssetAddArgs),
    List {
        #[command(flatten)]
        list: ListArgs,
        /// Only assets with this status (e.g. "In Use").
        #[arg(long, value_parser = parse_status)]
        status: Option<AssetStatus>,
    },
    Show {
        id: i64,
    },
    Archive {
        id: i64,
    },
    Restore {
        id: i64,
    },
    /// Move an asset to a room.
    Move {
        id: i64,
        #[arg(long)]
        room: i64,
    },
    /// Hand an asset to an employee.
    Assign {
        id: i64,
        #[arg(long)]
        employee: i64,
    },
    /// Take an asset back from its employee.
    Release {
        id: i64,
    },
    Dispose {
        id: i64,
    },
    Depreciation {
        id: i64,
        /// Valuation date (YYYY-MM-DD); today when omitted.
        #[arg(long)]
        as_of: Option<NaiveDate>,
        /// Print the month-by-month schedule.
        #[arg(long)]
        schedule: bool,
    },
}

/// Values are taken as typed and validated together, so every problem is
/// reported at once.
#[derive(Debug, Clone, Default, Args)]
pub struct AssetAddArgs {
    #[arg(long)]
    pub tag: String,
    #[arg(long)]
    pub name: String,
    #[arg(long, default_value = "")]
    pub description: String,
    #[arg(long, default_value = "")]
    pub serial: String,
    #[arg(long)]
    pub category: Option<i64>,
    #[arg(long)]
    pub room: Option<i64>,
    #[arg(long)]
    pub value: String,
    #[arg(long, default_value = "")]
    pub purchase_price: String,
    #[arg(long, default_value = "")]
    pub purchase_date: String,
    /// Useful life in years; the category default applies when omitted.
    #[arg(long, default_value = "")]
    pub life: String,
    #[arg(long, default_value = "")]
    pub status: String,
}

#[derive(Debug, Subcommand)]
pub enum CategoryCommand {
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
        /// Default useful life in years for assets in this category.
        #[arg(long)]
        life: Option<u32>,
    },
    List(ListArgs),
    Archive { id: i64 },
    Restore { id: i64 },
}

#[derive(Debug, Subcommand)]
pub enum RoomCommand {
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        building: Option<String>,
        #[arg(long, allow_negative_numbers = true)]
        floor: Option<i32>,
        #[arg(long)]
        capacity: Option<u32>,
    },
    List(ListArgs),
    Archive { id: i64 },
    Restore { id: i64 },
}

#[derive(Debug, Subcommand)]
pub enum EmployeeCommand {
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        department: Option<String>,
        /// Admin, Manager, Staff or Viewer.
        #[arg(long, default_value = "staff", value_parser = parse_role)]
        role: EmployeeRole,
    },
    List(ListArgs),
    Archive { id: i64 },
    Restore { id: i64 },
}

#[derive(Debug, Subcommand)]
pub enum TenantCommand {
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        slug: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        plan: Option<String>,
    },
    List(ListArgs),
    Archive { id: i64 },
    Restore { id: i64 },
}

#[derive(Debug, Subcommand)]
pub enum TaskCommand {
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        assignee: Option<i64>,
        #[arg(long)]
        asset: Option<i64>,
        #[arg(long)]
        due: Option<NaiveDate>,
    },
    List(ListArgs),
    Archive { id: i64 },
    Restore { id: i64 },
}

#[derive(Debug, Subcommand)]
pub enum OrderCommand {
    Place(OrderPlaceArgs),
    List(ListArgs),
    Approve { id: i64 },
    Receive { id: i64 },
    Cancel { id: i64 },
    Archive { id: i64 },
    Restore { id: i64 },
}

#[derive(Debug, Clone, Default, Args)]
pub struct OrderPlaceArgs {
    #[arg(long)]
    pub number: String,
    #[arg(long)]
    pub supplier: String,
    #[arg(long)]
    pub item: String,
    #[arg(long)]
    pub category: Option<i64>,
    #[arg(long, default_value = "")]
    pub quantity: String,
    #[arg(long)]
    pub unit_cost: String,
    /// Order date (YYYY-MM-DD).
    #[arg(long)]
    pub date: String,
    #[arg(long, default_value = "")]
    pub expected: String,
    #[arg(long, default_value = "")]
    pub life: String,
}

#[derive(Debug, Subcommand)]
pub enum MaintenanceCommand {
    Schedule(MaintenanceScheduleArgs),
    List(ListArgs),
    Start {
        id: i64,
    },
    Complete {
        id: i64,
        /// Completion date (YYYY-MM-DD); today when omitted.
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Final cost; the scheduled estimate is kept when omitted.
        #[arg(long)]
        cost: Option<Decimal>,
    },
    Cancel {
        id: i64,
    },
    /// Open work scheduled within the next `--days` days.
    Upcoming {
        #[arg(long, default_value_t = 30)]
        days: u32,
        #[arg(long)]
        as_of: Option<NaiveDate>,
    },
    /// Open work whose scheduled date has passed.
    Overdue {
        #[arg(long)]
        as_of: Option<NaiveDate>,
    },
    Archive {
        id: i64,
    },
    Restore {
        id: i64,
    },
}

#[derive(Debug, Clone, Default, Args)]
pub struct MaintenanceScheduleArgs {
    #[arg(long)]
    pub asset: i64,
    #[arg(long)]
    pub title: String,
    /// Scheduled date (YYYY-MM-DD).
    #[arg(long)]
    pub date: String,
    #[arg(long, default_value = "")]
    pub description: String,
    #[arg(long, default_value = "")]
    pub cost: String,
    #[arg(long, default_value = "")]
    pub technician: String,
}

fn parse_status(s: &str) -> Result<AssetStatus, String> {
    AssetStatus::parse(s).ok_or_else(|| {
        let known: Vec<&str> = AssetStatus::all().iter().map(|s| s.as_str()).collect();
        format!("unknown status '{s}'; expected one of {known:?}")
    })
}

fn parse_role(s: &str) -> Result<EmployeeRole, String> {
    EmployeeRole::parse(s).ok_or_else(|| format!("unknown role '{s}'"))
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "asset-ledger",
            "asset",
            "list",
            "--all",
            "--backend",
            "memory",
            "--status",
            "in use",
        ])
        .unwrap();

        assert_eq!(cli.backend.as_deref(), Some("memory"));
        assert_eq!(cli.config, PathBuf::from(DEFAULT_CONFIG_FILE));
        let Command::Asset(AssetCommand::List { list, status }) = cli.command else {
            panic!("expected asset list, got {:?}", cli.command);
        };
        assert!(list.all);
        assert_eq!(status, Some(AssetStatus::InUse));
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let err = Cli::try_parse_from(["asset-ledger", "asset", "list", "--status", "Lost"])
            .unwrap_err();

        assert!(err.to_string().contains("unknown status 'Lost'"));
    }

    #[test]
    fn test_dates_parse_as_iso() {
        let cli = Cli::try_parse_from(["asset-ledger", "report", "--as-of", "2025-01-31"]).unwrap();

        let Command::Report { as_of } = cli.command else {
            panic!("expected report");
        };
        assert_eq!(as_of, NaiveDate::from_ymd_opt(2025, 1, 31));
        assert!(Cli::try_parse_from(["asset-ledger", "report", "--as-of", "31/01/2025"]).is_err());
    }

    #[test]
    fn test_overrides_carry_flags() {
        let cli = Cli::try_parse_from([
            "asset-ledger",
            "--db",
            ":memory:",
            "--actor",
            "jo",
            "category",
            "list",
        ])
        .unwrap();

        assert_eq!(
            cli.overrides(),
            Overrides {
                backend: None,
                db: Some(":memory:".to_string()),
                actor: Some("jo".to_string()),
                log_level: None,
            }
        );
    }
}
