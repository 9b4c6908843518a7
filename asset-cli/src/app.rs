use std::fmt::Write;

use anyhow::{Context, Result, bail};
use asset_core::db::{Entity, ListFilter, MemoryRepositoryFactory, RepositoryRegistry};
use asset_core::drafts::{AssetDraft, MaintenanceDraft, PurchaseOrderDraft};
use asset_core::reports::{DepreciationRegister, label_or_id};
use asset_core::services;
use asset_core::{
    Archivable, Asset, DepreciationSnapshot, InventoryStore, NewCategory, NewEmployee, NewRoom,
    NewTask, NewTenant, Repository,
};
use asset_db_sqlite::SqliteRepositoryFactory;
use chrono::NaiveDate;
use tracing::debug;

use crate::cli::{
    AssetAddArgs, AssetCommand, CategoryCommand, Command, EmployeeCommand, ListArgs,
    MaintenanceCommand, MaintenanceScheduleArgs, OrderCommand, OrderPlaceArgs, RoomCommand,
    TaskCommand, TenantCommand,
};
use crate::config::AppConfig;

/// Registry with every backend this binary ships with.
pub fn build_registry() -> RepositoryRegistry {
    let mut registry = RepositoryRegistry::new();
    registry.register(Box::new(MemoryRepositoryFactory));
    registry.register(Box::new(SqliteRepositoryFactory));
    registry
}

/// Runs one command against `store` and returns what should be printed.
///
/// `today` stands in for any date the user leaves out.
pub async fn run(
    store: &dyn InventoryStore,
    config: &AppConfig,
    command: Command,
    today: NaiveDate,
) -> Result<String> {
    let actor = config.actor.as_str();
    debug!(?command, actor, "running command");
    match command {
        Command::Asset(cmd) => asset_command(store, config, cmd, today).await,
        Command::Category(cmd) => category_command(store, cmd, actor).await,
        Command::Room(cmd) => room_command(store, cmd, actor).await,
        Command::Employee(cmd) => employee_command(store, cmd, actor).await,
        Command::Tenant(cmd) => tenant_command(store, cmd, actor).await,
        Command::Task(cmd) => task_command(store, cmd, actor).await,
        Command::Order(cmd) => order_command(store, config, cmd, today).await,
        Command::Maintenance(cmd) => maintenance_command(store, cmd, actor, today).await,
        Command::Report { as_of } => report(store, config, as_of.unwrap_or(today)).await,
    }
}

// ─── shared helpers ──────────────────────────────────────────────────────────

fn filter(list: ListArgs) -> ListFilter {
    if list.all {
        ListFilter::ALL
    } else {
        ListFilter::ACTIVE
    }
}

fn archived_mark<E: Archivable>(entity: &E) -> &'static str {
    if entity.is_archived() { " [archived]" } else { "" }
}

fn or_dash(value: Option<&str>) -> &str {
    value.unwrap_or("—")
}

/// Archives (`archive == true`) or restores one record, refusing a no-op.
async fn set_archived<E: Entity>(
    repo: &dyn Repository<E>,
    id: i64,
    archive: bool,
    actor: &str,
) -> Result<String> {
    let current = repo
        .get(id)
        .await
        .with_context(|| format!("{} #{id}", E::KIND))?;
    if current.is_archived() == archive {
        let state = if archive { "archived" } else { "active" };
        bail!("{} #{id} is already {state}", E::KIND);
    }
    let toggled = repo.toggle_archived(id, actor).await?;
    let verb = if toggled.is_archived() { "Archived" } else { "Restored" };
    Ok(format!("{verb} {} #{id}\n", E::KIND))
}

fn list_output<E>(
    records: &[E],
    header: &str,
    line: impl Fn(&E) -> String,
) -> Result<String> {
    let mut out = String::new();
    if records.is_empty() {
        writeln!(out, "No records.")?;
        return Ok(out);
    }
    writeln!(out, "{header}")?;
    for record in records {
        writeln!(out, "{}", line(record))?;
    }
    Ok(out)
}

fn write_snapshot(
    out: &mut String,
    snapshot: &DepreciationSnapshot,
) -> std::fmt::Result {
    writeln!(out, "  Cost basis:   {:.2}", snapshot.cost)?;
    writeln!(out, "  Useful life:  {} years", snapshot.useful_life_years)?;
    writeln!(out, "  Age:          {} months", snapshot.age_in_months)?;
    writeln!(out, "  Monthly:      {:.2}", snapshot.monthly_depreciation)?;
    writeln!(out, "  Accumulated:  {:.2}", snapshot.accumulated_depreciation)?;
    writeln!(out, "  Book value:   {:.2}", snapshot.current_book_value)?;
    writeln!(out, "  Remaining:    {} months", snapshot.remaining_months)?;
    let flags: Vec<&str> = [
        (snapshot.is_fully_depreciated(), "fully depreciated"),
        (snapshot.is_near_end_of_life(), "near end of life"),
        (snapshot.is_low_value(), "low value"),
    ]
    .into_iter()
    .filter_map(|(set, label)| set.then_some(label))
    .collect();
    if !flags.is_empty() {
        writeln!(out, "  Flags:        {}", flags.join(", "))?;
    }
    Ok(())
}

// ─── assets ──────────────────────────────────────────────────────────────────

async fn asset_command(
    store: &dyn InventoryStore,
    config: &AppConfig,
    cmd: AssetCommand,
    today: NaiveDate,
) -> Result<String> {
    let actor = config.actor.as_str();
    let asset = |asset: Asset, action: &str| -> String {
        format!("{action} asset #{} {} ({})\n", asset.id, asset.tag, asset.status)
    };

    match cmd {
        AssetCommand::Add(args) => add_asset(store, args, actor).await,
        AssetCommand::List { list, status } => {
            let assets: Vec<Asset> = store
                .assets()
                .list(filter(list))
                .await?
                .into_iter()
                .filter(|a| status.is_none_or(|s| a.status == s))
                .collect();
            let categories = store.categories().list(ListFilter::ALL).await?;
            let rooms = store.rooms().list(ListFilter::ALL).await?;
            list_output(
                &assets,
                &format!(
                    "{:>4}  {:<12} {:<24} {:<12} {:<14} {}",
                    "ID", "Tag", "Name", "Status", "Category", "Room"
                ),
                |a| {
                    format!(
                        "{:>4}  {:<12} {:<24} {:<12} {:<14} {}",
                        a.id,
                        a.tag,
                        a.name,
                        a.status.as_str(),
                        label_or_id(a.category_id, &categories, |c| &c.name),
                        label_or_id(a.room_id, &rooms, |r| &r.name),
                    )
                },
            )
        }
        AssetCommand::Show { id } => show_asset(store, config, id, today).await,
        AssetCommand::Archive { id } => set_archived(store.assets(), id, true, actor).await,
        AssetCommand::Restore { id } => set_archived(store.assets(), id, false, actor).await,
        AssetCommand::Move { id, room } => Ok(asset(
            services::assign_room(store, id, room, actor).await?,
            "Moved",
        )),
        AssetCommand::Assign { id, employee } => Ok(asset(
            services::assign_employee(store, id, employee, actor).await?,
            "Assigned",
        )),
        AssetCommand::Release { id } => {
            Ok(asset(services::release(store, id, actor).await?, "Released"))
        }
        AssetCommand::Dispose { id } => {
            Ok(asset(services::dispose(store, id, actor).await?, "Disposed"))
        }
        AssetCommand::Depreciation {
            id,
            as_of,
            schedule,
        } => {
            let asset = store.assets().get(id).await.with_context(|| format!("asset #{id}"))?;
            let as_of = as_of.unwrap_or(today);
            let snapshot = asset.depreciation(&config.depreciation, as_of)?;

            let mut out = String::new();
            writeln!(out, "Asset #{} {} {} as of {as_of}", asset.id, asset.tag, asset.name)?;
            write_snapshot(&mut out, &snapshot)?;
            if schedule {
                writeln!(out, "{:>6}  {:<10} {:>14} {:>14}", "Period", "Month", "Accumulated", "Book value")?;
                for row in asset.depreciation_schedule(&config.depreciation)? {
                    let month = row.month.map(|m| m.format("%Y-%m").to_string());
                    writeln!(
                        out,
                        "{:>6}  {:<10} {:>14.2} {:>14.2}",
                        row.period,
                        or_dash(month.as_deref()),
                        row.accumulated_depreciation,
                        row.book_value
                    )?;
                }
            }
            Ok(out)
        }
    }
}

async fn add_asset(
    store: &dyn InventoryStore,
    args: AssetAddArgs,
    actor: &str,
) -> Result<String> {
    let draft = AssetDraft {
        tag: args.tag,
        name: args.name,
        description: args.description,
        serial_number: args.serial,
        category_id: args.category,
        room_id: args.room,
        assigned_to: None,
        value: args.value,
        purchase_price: args.purchase_price,
        purchase_date: args.purchase_date,
        useful_life_years: args.life,
        status: args.status,
    };
    let mut new_asset = draft.validate()?;

    if let Some(category_id) = new_asset.category_id {
        let category = store
            .categories()
            .get(category_id)
            .await
            .with_context(|| format!("category #{category_id}"))?;
        if category.is_archived() {
            bail!("category #{category_id} is archived");
        }
        if new_asset.useful_life_years.is_none() {
            new_asset.useful_life_years = category.default_useful_life_years;
        }
    }
    if let Some(room_id) = new_asset.room_id {
        let room = store
            .rooms()
            .get(room_id)
            .await
            .with_context(|| format!("room #{room_id}"))?;
        if room.is_archived() {
            bail!("room #{room_id} is archived");
        }
    }

    let asset = store.assets().create(new_asset, actor).await?;
    Ok(format!("Registered asset #{} {}\n", asset.id, asset.tag))
}

async fn show_asset(
    store: &dyn InventoryStore,
    config: &AppConfig,
    id: i64,
    today: NaiveDate,
) -> Result<String> {
    let asset = store.assets().get(id).await.with_context(|| format!("asset #{id}"))?;
    let categories = store.categories().list(ListFilter::ALL).await?;
    let rooms = store.rooms().list(ListFilter::ALL).await?;
    let employees = store.employees().list(ListFilter::ALL).await?;

    let mut out = String::new();
    writeln!(out, "Asset #{} {}{}", asset.id, asset.tag, archived_mark(&asset))?;
    writeln!(out, "  Name:         {}", asset.name)?;
    writeln!(out, "  Description:  {}", or_dash(asset.description.as_deref()))?;
    writeln!(out, "  Serial:       {}", or_dash(asset.serial_number.as_deref()))?;
    writeln!(out, "  Status:       {}", asset.status)?;
    writeln!(out, "  Category:     {}", label_or_id(asset.category_id, &categories, |c| &c.name))?;
    writeln!(out, "  Room:         {}", label_or_id(asset.room_id, &rooms, |r| &r.name))?;
    writeln!(out, "  Assigned to:  {}", label_or_id(asset.assigned_to, &employees, |e| &e.name))?;
    writeln!(out, "  Value:        {:.2}", asset.value)?;
    let purchase_date = asset.purchase_date.map(|d| d.to_string());
    writeln!(out, "  Purchased:    {}", or_dash(purchase_date.as_deref()))?;
    writeln!(
        out,
        "  Created:      {} by {}",
        asset.audit.created_at.format("%Y-%m-%d %H:%M"),
        asset.audit.created_by
    )?;
    if let (Some(at), Some(by)) = (asset.audit.archived_at, asset.audit.archived_by.as_deref()) {
        writeln!(out, "  Archived:     {} by {by}", at.format("%Y-%m-%d %H:%M"))?;
    }
    writeln!(out, "Depreciation as of {today}")?;
    write_snapshot(&mut out, &asset.depreciation(&config.depreciation, today)?)?;
    Ok(out)
}

// ─── reference data ──────────────────────────────────────────────────────────

async fn category_command(
    store: &dyn InventoryStore,
    cmd: CategoryCommand,
    actor: &str,
) -> Result<String> {
    match cmd {
        CategoryCommand::Add {
            name,
            description,
            life,
        } => {
            let category = store
                .categories()
                .create(
                    NewCategory {
                        name,
                        description,
                        default_useful_life_years: life,
                    },
                    actor,
                )
                .await?;
            Ok(format!("Added category #{} {}\n", category.id, category.name))
        }
        CategoryCommand::List(list) => {
            let categories = store.categories().list(filter(list)).await?;
            list_output(
                &categories,
                &format!("{:>4}  {:<20} {}", "ID", "Name", "Default life"),
                |c| {
                    let life = c.default_useful_life_years.map(|y| format!("{y} years"));
                    format!("{:>4}  {:<20} {}{}", c.id, c.name, or_dash(life.as_deref()), archived_mark(c))
                },
            )
        }
        CategoryCommand::Archive { id } => set_archived(store.categories(), id, true, actor).await,
        CategoryCommand::Restore { id } => {
            set_archived(store.categories(), id, false, actor).await
        }
    }
}

async fn room_command(
    store: &dyn InventoryStore,
    cmd: RoomCommand,
    actor: &str,
) -> Result<String> {
    match cmd {
        RoomCommand::Add {
            name,
            building,
            floor,
            capacity,
        } => {
            let room = store
                .rooms()
                .create(
                    NewRoom {
                        name,
                        building,
                        floor,
                        capacity,
                    },
                    actor,
                )
                .await?;
            Ok(format!("Added room #{} {}\n", room.id, room.name))
        }
        RoomCommand::List(list) => {
            let rooms = store.rooms().list(filter(list)).await?;
            list_output(
                &rooms,
                &format!("{:>4}  {:<20} {:<16} {}", "ID", "Name", "Building", "Floor"),
                |r| {
                    let floor = r.floor.map(|f| f.to_string());
                    format!(
                        "{:>4}  {:<20} {:<16} {}{}",
                        r.id,
                        r.name,
                        or_dash(r.building.as_deref()),
                        or_dash(floor.as_deref()),
                        archived_mark(r)
                    )
                },
            )
        }
        RoomCommand::Archive { id } => set_archived(store.rooms(), id, true, actor).await,
        RoomCommand::Restore { id } => set_archived(store.rooms(), id, false, actor).await,
    }
}

async fn employee_command(
    store: &dyn InventoryStore,
    cmd: EmployeeCommand,
    actor: &str,
) -> Result<String> {
    match cmd {
        EmployeeCommand::Add {
            name,
            email,
            department,
            role,
        } => {
            let employee = store
                .employees()
                .create(
                    NewEmployee {
                        name,
                        email,
                        department,
                        role,
                    },
                    actor,
                )
                .await?;
            Ok(format!("Added employee #{} {}\n", employee.id, employee.name))
        }
        EmployeeCommand::List(list) => {
            let employees = store.employees().list(filter(list)).await?;
            list_output(
                &employees,
                &format!("{:>4}  {:<20} {:<28} {}", "ID", "Name", "Email", "Role"),
                |e| {
                    format!(
                        "{:>4}  {:<20} {:<28} {}{}",
                        e.id,
                        e.name,
                        e.email,
                        e.role.as_str(),
                        archived_mark(e)
                    )
                },
            )
        }
        EmployeeCommand::Archive { id } => set_archived(store.employees(), id, true, actor).await,
        EmployeeCommand::Restore { id } => {
            set_archived(store.employees(), id, false, actor).await
        }
    }
}

async fn tenant_command(
    store: &dyn InventoryStore,
    cmd: TenantCommand,
    actor: &str,
) -> Result<String> {
    match cmd {
        TenantCommand::Add {
            name,
            slug,
            email,
            plan,
        } => {
            let tenant = store
                .tenants()
                .create(
                    NewTenant {
                        name,
                        slug,
                        contact_email: email,
                        plan,
                    },
                    actor,
                )
                .await?;
            Ok(format!("Added tenant #{} {}\n", tenant.id, tenant.slug))
        }
        TenantCommand::List(list) => {
            let tenants = store.tenants().list(filter(list)).await?;
            list_output(
                &tenants,
                &format!("{:>4}  {:<16} {:<24} {}", "ID", "Slug", "Name", "Plan"),
                |t| {
                    format!(
                        "{:>4}  {:<16} {:<24} {}{}",
                        t.id,
                        t.slug,
                        t.name,
                        or_dash(t.plan.as_deref()),
                        archived_mark(t)
                    )
                },
            )
        }
        TenantCommand::Archive { id } => set_archived(store.tenants(), id, true, actor).await,
        TenantCommand::Restore { id } => set_archived(store.tenants(), id, false, actor).await,
    }
}

async fn task_command(
    store: &dyn InventoryStore,
    cmd: TaskCommand,
    actor: &str,
) -> Result<String> {
    match cmd {
        TaskCommand::Add {
            title,
            description,
            assignee,
            asset,
            due,
        } => {
            let task = store
                .tasks()
                .create(
                    NewTask {
                        title,
                        description,
                        assignee_id: assignee,
                        asset_id: asset,
                        due_date: due,
                    },
                    actor,
                )
                .await?;
            Ok(format!("Added task #{} {}\n", task.id, task.title))
        }
        TaskCommand::List(list) => {
            let tasks = store.tasks().list(filter(list)).await?;
            list_output(
                &tasks,
                &format!("{:>4}  {:<32} {:<12} {}", "ID", "Title", "Status", "Due"),
                |t| {
                    let due = t.due_date.map(|d| d.to_string());
                    format!(
                        "{:>4}  {:<32} {:<12} {}{}",
                        t.id,
                        t.title,
                        t.status.as_str(),
                        or_dash(due.as_deref()),
                        archived_mark(t)
                    )
                },
            )
        }
        TaskCommand::Archive { id } => set_archived(store.tasks(), id, true, actor).await,
        TaskCommand::Restore { id } => set_archived(store.tasks(), id, false, actor).await,
    }
}

// ─── procurement ─────────────────────────────────────────────────────────────

async fn order_command(
    store: &dyn InventoryStore,
    config: &AppConfig,
    cmd: OrderCommand,
    today: NaiveDate,
) -> Result<String> {
    let actor = config.actor.as_str();
    let order_state = |order: asset_core::PurchaseOrder| -> String {
        format!(
            "Purchase order #{} {} is now {}\n",
            order.id,
            order.order_number,
            order.status.as_str()
        )
    };

    match cmd {
        OrderCommand::Place(args) => place_order(store, config, args, today).await,
        OrderCommand::List(list) => {
            let orders = store.purchase_orders().list(filter(list)).await?;
            list_output(
                &orders,
                &format!(
                    "{:>4}  {:<12} {:<20} {:<20} {:>4} {:>10}  {}",
                    "ID", "Number", "Supplier", "Item", "Qty", "Unit cost", "Status"
                ),
                |o| {
                    format!(
                        "{:>4}  {:<12} {:<20} {:<20} {:>4} {:>10.2}  {}{}",
                        o.id,
                        o.order_number,
                        o.supplier,
                        o.item_name,
                        o.quantity,
                        o.unit_cost,
                        o.status.as_str(),
                        archived_mark(o)
                    )
                },
            )
        }
        OrderCommand::Approve { id } => {
            Ok(order_state(services::approve_order(store, id, actor).await?))
        }
        OrderCommand::Receive { id } => {
            Ok(order_state(services::receive_order(store, id, actor).await?))
        }
        OrderCommand::Cancel { id } => {
            Ok(order_state(services::cancel_order(store, id, actor).await?))
        }
        OrderCommand::Archive { id } => {
            set_archived(store.purchase_orders(), id, true, actor).await
        }
        OrderCommand::Restore { id } => {
            set_archived(store.purchase_orders(), id, false, actor).await
        }
    }
}

async fn place_order(
    store: &dyn InventoryStore,
    config: &AppConfig,
    args: OrderPlaceArgs,
    today: NaiveDate,
) -> Result<String> {
    let draft = PurchaseOrderDraft {
        order_number: args.number,
        supplier: args.supplier,
        item_name: args.item,
        category_id: args.category,
        quantity: args.quantity,
        unit_cost: args.unit_cost,
        order_date: args.date,
        expected_delivery: args.expected,
        useful_life_years: args.life,
    };
    let placed =
        services::place_order(store, &draft, &config.actor, &config.depreciation, today).await?;

    let mut out = String::new();
    writeln!(
        out,
        "Placed purchase order #{} {} ({})",
        placed.order.id,
        placed.order.order_number,
        placed.order.status.as_str()
    )?;
    writeln!(out, "Registered asset #{} {}", placed.asset.id, placed.asset.tag)?;
    write_snapshot(&mut out, &placed.depreciation)?;
    Ok(out)
}

// ─── maintenance ─────────────────────────────────────────────────────────────

async fn maintenance_command(
    store: &dyn InventoryStore,
    cmd: MaintenanceCommand,
    actor: &str,
    today: NaiveDate,
) -> Result<String> {
    let record_state = |record: asset_core::MaintenanceRecord| -> String {
        format!(
            "Maintenance #{} on asset #{} is now {}\n",
            record.id,
            record.asset_id,
            record.status.as_str()
        )
    };

    match cmd {
        MaintenanceCommand::Schedule(args) => schedule(store, args, actor).await,
        MaintenanceCommand::List(list) => {
            let records = store.maintenance().list(filter(list)).await?;
            maintenance_table(store, records.iter().collect()).await
        }
        MaintenanceCommand::Start { id } => Ok(record_state(
            services::start_maintenance(store, id, actor).await?,
        )),
        MaintenanceCommand::Complete { id, date, cost } => Ok(record_state(
            services::complete_maintenance(store, id, date.unwrap_or(today), cost, actor).await?,
        )),
        MaintenanceCommand::Cancel { id } => Ok(record_state(
            services::cancel_maintenance(store, id, actor).await?,
        )),
        MaintenanceCommand::Upcoming { days, as_of } => {
            let records = store.maintenance().list(ListFilter::ACTIVE).await?;
            let due = services::upcoming_maintenance(&records, as_of.unwrap_or(today), days);
            maintenance_table(store, due).await
        }
        MaintenanceCommand::Overdue { as_of } => {
            let records = store.maintenance().list(ListFilter::ACTIVE).await?;
            let late = services::overdue_maintenance(&records, as_of.unwrap_or(today));
            maintenance_table(store, late).await
        }
        MaintenanceCommand::Archive { id } => {
            set_archived(store.maintenance(), id, true, actor).await
        }
        MaintenanceCommand::Restore { id } => {
            set_archived(store.maintenance(), id, false, actor).await
        }
    }
}

async fn schedule(
    store: &dyn InventoryStore,
    args: MaintenanceScheduleArgs,
    actor: &str,
) -> Result<String> {
    let draft = MaintenanceDraft {
        asset_id: Some(args.asset),
        title: args.title,
        description: args.description,
        scheduled_date: args.date,
        cost: args.cost,
        technician: args.technician,
    };
    let record = services::schedule_maintenance(store, &draft, actor).await?;
    Ok(format!(
        "Scheduled maintenance #{} on asset #{} for {}\n",
        record.id, record.asset_id, record.scheduled_date
    ))
}

async fn maintenance_table(
    store: &dyn InventoryStore,
    records: Vec<&asset_core::MaintenanceRecord>,
) -> Result<String> {
    let assets = store.assets().list(ListFilter::ALL).await?;
    list_output(
        &records,
        &format!(
            "{:>4}  {:<10}  {:<12} {:<28} {}",
            "ID", "Date", "Asset", "Title", "Status"
        ),
        |m| {
            format!(
                "{:>4}  {:<10}  {:<12} {:<28} {}{}",
                m.id,
                m.scheduled_date,
                label_or_id(Some(m.asset_id), &assets, |a| &a.tag),
                m.title,
                m.status.as_str(),
                archived_mark(*m)
            )
        },
    )
}

// ─── reports ─────────────────────────────────────────────────────────────────

async fn report(
    store: &dyn InventoryStore,
    config: &AppConfig,
    as_of: NaiveDate,
) -> Result<String> {
    let assets = store.assets().list(ListFilter::ACTIVE).await?;
    let register = DepreciationRegister::build(&assets, &config.depreciation, as_of)?;
    let tag_of = |id: i64| label_or_id(Some(id), &assets, |a| &a.tag);
    let tags = |ids: &[i64]| -> String {
        if ids.is_empty() {
            "none".to_string()
        } else {
            ids.iter().map(|&id| tag_of(id)).collect::<Vec<_>>().join(", ")
        }
    };

    let mut out = String::new();
    writeln!(out, "Depreciation register as of {}", register.as_of)?;
    writeln!(
        out,
        "{:>4}  {:<12} {:<24} {:<12} {:>12} {:>12} {:>12}",
        "ID", "Tag", "Name", "Status", "Cost", "Accumulated", "Book value"
    )?;
    for row in &register.rows {
        writeln!(
            out,
            "{:>4}  {:<12} {:<24} {:<12} {:>12.2} {:>12.2} {:>12.2}",
            row.asset_id,
            row.tag,
            row.name,
            row.status.as_str(),
            row.snapshot.cost,
            row.snapshot.accumulated_depreciation,
            row.snapshot.current_book_value
        )?;
    }
    writeln!(
        out,
        "Totals: cost {:.2}, accumulated {:.2}, book value {:.2}",
        register.total_cost, register.total_accumulated, register.total_book_value
    )?;
    let counts: Vec<String> = register
        .status_counts
        .iter()
        .map(|(status, count)| format!("{status} {count}"))
        .collect();
    writeln!(out, "By status: {}", counts.join(", "))?;
    writeln!(out, "Fully depreciated: {}", tags(&register.fully_depreciated))?;
    writeln!(out, "Near end of life: {}", tags(&register.near_end_of_life))?;
    writeln!(out, "Low value: {}", tags(&register.low_value))?;
    Ok(out)
}
