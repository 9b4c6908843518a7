//! Column layout of each inventory table and the row mapping for its model.

use asset_core::db::Entity;
use asset_core::{
    Asset, AssetStatus, AuditInfo, Category, Employee, EmployeeRole, MaintenanceRecord,
    MaintenanceStatus, OrderStatus, PurchaseOrder, RepositoryError, Room, Task, TaskStatus,
    Tenant,
};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::query::Query;
use sqlx::sqlite::{Sqlite, SqliteArguments, SqliteRow};
use sqlx::{Decode, Row, Type};

use crate::decimal::{decimal_to_text, get_decimal, get_optional_decimal};

/// Audit columns shared by every table, in the order [`audit_values`] yields them.
pub const AUDIT_COLUMNS: [&str; 5] = [
    "created_at",
    "created_by",
    "updated_at",
    "archived_at",
    "archived_by",
];

/// A value bound to a statement placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Text(String),
    Date(NaiveDate),
    Timestamp(DateTime<Utc>),
}

impl SqlValue {
    pub fn bind_to<'q>(
        self,
        query: Query<'q, Sqlite, SqliteArguments<'q>>,
    ) -> Query<'q, Sqlite, SqliteArguments<'q>> {
        match self {
            Self::Null => query.bind(None::<String>),
            Self::Integer(v) => query.bind(v),
            Self::Text(v) => query.bind(v),
            Self::Date(v) => query.bind(v),
            Self::Timestamp(v) => query.bind(v),
        }
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<i32> for SqlValue {
    fn from(v: i32) -> Self {
        Self::Integer(i64::from(v))
    }
}

impl From<u32> for SqlValue {
    fn from(v: u32) -> Self {
        Self::Integer(i64::from(v))
    }
}

impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        Self::Integer(i64::from(v))
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<Decimal> for SqlValue {
    fn from(v: Decimal) -> Self {
        Self::Text(decimal_to_text(v))
    }
}

impl From<NaiveDate> for SqlValue {
    fn from(v: NaiveDate) -> Self {
        Self::Date(v)
    }
}

impl From<DateTime<Utc>> for SqlValue {
    fn from(v: DateTime<Utc>) -> Self {
        Self::Timestamp(v)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

/// An [`Entity`] stored in its own SQLite table.
pub trait SqliteEntity: Entity {
    const TABLE: &'static str;

    /// Data columns (everything but `id` and the audit columns), in the
    /// order [`SqliteEntity::values`] yields them.
    const COLUMNS: &'static [&'static str];

    /// `WHERE` condition selecting records that are not archived.
    const ACTIVE_FILTER: &'static str = "archived = 0";

    fn values(&self) -> Vec<SqlValue>;

    fn from_row(row: &SqliteRow) -> Result<Self, RepositoryError>;
}

pub fn audit_values(audit: &AuditInfo) -> Vec<SqlValue> {
    vec![
        audit.created_at.into(),
        audit.created_by.as_str().into(),
        audit.updated_at.into(),
        audit.archived_at.into(),
        audit.archived_by.clone().into(),
    ]
}

fn col<'r, T>(
    row: &'r SqliteRow,
    column: &str,
) -> Result<T, RepositoryError>
where
    T: Decode<'r, Sqlite> + Type<Sqlite>,
{
    row.try_get(column)
        .map_err(|e| RepositoryError::Database(format!("Failed to get '{}': {}", column, e)))
}

fn col_u32(
    row: &SqliteRow,
    column: &str,
) -> Result<u32, RepositoryError> {
    let value: i64 = col(row, column)?;
    u32::try_from(value).map_err(|_| {
        RepositoryError::Database(format!("Value {} in '{}' is out of range", value, column))
    })
}

fn col_opt_u32(
    row: &SqliteRow,
    column: &str,
) -> Result<Option<u32>, RepositoryError> {
    let value: Option<i64> = col(row, column)?;
    value
        .map(|v| {
            u32::try_from(v).map_err(|_| {
                RepositoryError::Database(format!("Value {} in '{}' is out of range", v, column))
            })
        })
        .transpose()
}

fn col_label<T>(
    row: &SqliteRow,
    column: &str,
    parse: fn(&str) -> Option<T>,
) -> Result<T, RepositoryError> {
    let label: String = col(row, column)?;
    parse(&label).ok_or_else(|| {
        RepositoryError::Database(format!("Invalid value '{}' in '{}'", label, column))
    })
}

fn audit_from_row(row: &SqliteRow) -> Result<AuditInfo, RepositoryError> {
    Ok(AuditInfo {
        created_at: col(row, "created_at")?,
        created_by: col(row, "created_by")?,
        updated_at: col(row, "updated_at")?,
        archived_at: col(row, "archived_at")?,
        archived_by: col(row, "archived_by")?,
    })
}

impl SqliteEntity for Asset {
    const TABLE: &'static str = "assets";
    const COLUMNS: &'static [&'static str] = &[
        "tag",
        "name",
        "description",
        "serial_number",
        "category_id",
        "room_id",
        "assigned_to",
        "value",
        "purchase_price",
        "purchase_date",
        "useful_life_years",
        "status",
        "status_before_archive",
    ];
    const ACTIVE_FILTER: &'static str = "status <> 'Archived'";

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.tag.as_str().into(),
            self.name.as_str().into(),
            self.description.clone().into(),
            self.serial_number.clone().into(),
            self.category_id.into(),
            self.room_id.into(),
            self.assigned_to.into(),
            self.value.into(),
            self.purchase_price.into(),
            self.purchase_date.into(),
            self.useful_life_years.into(),
            self.status.as_str().into(),
            self.status_before_archive.map(|s| s.as_str()).into(),
        ]
    }

    fn from_row(row: &SqliteRow) -> Result<Self, RepositoryError> {
        let status_before_archive: Option<String> = col(row, "status_before_archive")?;
        Ok(Asset {
            id: col(row, "id")?,
            tag: col(row, "tag")?,
            name: col(row, "name")?,
            description: col(row, "description")?,
            serial_number: col(row, "serial_number")?,
            category_id: col(row, "category_id")?,
            room_id: col(row, "room_id")?,
            assigned_to: col(row, "assigned_to")?,
            value: get_decimal(row, "value")?,
            purchase_price: get_optional_decimal(row, "purchase_price")?,
            purchase_date: col(row, "purchase_date")?,
            useful_life_years: col_opt_u32(row, "useful_life_years")?,
            status: col_label(row, "status", AssetStatus::parse)?,
            status_before_archive: status_before_archive
                .as_deref()
                .and_then(AssetStatus::parse),
            audit: audit_from_row(row)?,
        })
    }
}

impl SqliteEntity for Category {
    const TABLE: &'static str = "categories";
    const COLUMNS: &'static [&'static str] =
        &["name", "description", "default_useful_life_years", "archived"];

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.name.as_str().into(),
            self.description.clone().into(),
            self.default_useful_life_years.into(),
            self.archived.into(),
        ]
    }

    fn from_row(row: &SqliteRow) -> Result<Self, RepositoryError> {
        Ok(Category {
            id: col(row, "id")?,
            name: col(row, "name")?,
            description: col(row, "description")?,
            default_useful_life_years: col_opt_u32(row, "default_useful_life_years")?,
            archived: col(row, "archived")?,
            audit: audit_from_row(row)?,
        })
    }
}

impl SqliteEntity for Room {
    const TABLE: &'static str = "rooms";
    const COLUMNS: &'static [&'static str] = &["name", "building", "floor", "capacity", "archived"];

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.name.as_str().into(),
            self.building.clone().into(),
            self.floor.into(),
            self.capacity.into(),
            self.archived.into(),
        ]
    }

    fn from_row(row: &SqliteRow) -> Result<Self, RepositoryError> {
        Ok(Room {
            id: col(row, "id")?,
            name: col(row, "name")?,
            building: col(row, "building")?,
            floor: col(row, "floor")?,
            capacity: col_opt_u32(row, "capacity")?,
            archived: col(row, "archived")?,
            audit: audit_from_row(row)?,
        })
    }
}

impl SqliteEntity for Employee {
    const TABLE: &'static str = "employees";
    const COLUMNS: &'static [&'static str] = &["name", "email", "department", "role", "archived"];

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.name.as_str().into(),
            self.email.as_str().into(),
            self.department.clone().into(),
            self.role.as_str().into(),
            self.archived.into(),
        ]
    }

    fn from_row(row: &SqliteRow) -> Result<Self, RepositoryError> {
        Ok(Employee {
            id: col(row, "id")?,
            name: col(row, "name")?,
            email: col(row, "email")?,
            department: col(row, "department")?,
            role: col_label(row, "role", EmployeeRole::parse)?,
            archived: col(row, "archived")?,
            audit: audit_from_row(row)?,
        })
    }
}

impl SqliteEntity for MaintenanceRecord {
    const TABLE: &'static str = "maintenance_records";
    const COLUMNS: &'static [&'static str] = &[
        "asset_id",
        "title",
        "description",
        "scheduled_date",
        "completed_date",
        "cost",
        "technician",
        "status",
        "archived",
    ];

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.asset_id.into(),
            self.title.as_str().into(),
            self.description.clone().into(),
            self.scheduled_date.into(),
            self.completed_date.into(),
            self.cost.into(),
            self.technician.clone().into(),
            self.status.as_str().into(),
            self.archived.into(),
        ]
    }

    fn from_row(row: &SqliteRow) -> Result<Self, RepositoryError> {
        Ok(MaintenanceRecord {
            id: col(row, "id")?,
            asset_id: col(row, "asset_id")?,
            title: col(row, "title")?,
            description: col(row, "description")?,
            scheduled_date: col(row, "scheduled_date")?,
            completed_date: col(row, "completed_date")?,
            cost: get_optional_decimal(row, "cost")?,
            technician: col(row, "technician")?,
            status: col_label(row, "status", MaintenanceStatus::parse)?,
            archived: col(row, "archived")?,
            audit: audit_from_row(row)?,
        })
    }
}

impl SqliteEntity for PurchaseOrder {
    const TABLE: &'static str = "purchase_orders";
    const COLUMNS: &'static [&'static str] = &[
        "order_number",
        "supplier",
        "item_name",
        "category_id",
        "quantity",
        "unit_cost",
        "order_date",
        "expected_delivery",
        "useful_life_years",
        "asset_id",
        "status",
        "archived",
    ];

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.order_number.as_str().into(),
            self.supplier.as_str().into(),
            self.item_name.as_str().into(),
            self.category_id.into(),
            self.quantity.into(),
            self.unit_cost.into(),
            self.order_date.into(),
            self.expected_delivery.into(),
            self.useful_life_years.into(),
            self.asset_id.into(),
            self.status.as_str().into(),
            self.archived.into(),
        ]
    }

    fn from_row(row: &SqliteRow) -> Result<Self, RepositoryError> {
        Ok(PurchaseOrder {
            id: col(row, "id")?,
            order_number: col(row, "order_number")?,
            supplier: col(row, "supplier")?,
            item_name: col(row, "item_name")?,
            category_id: col(row, "category_id")?,
            quantity: col_u32(row, "quantity")?,
            unit_cost: get_decimal(row, "unit_cost")?,
            order_date: col(row, "order_date")?,
            expected_delivery: col(row, "expected_delivery")?,
            useful_life_years: col_opt_u32(row, "useful_life_years")?,
            asset_id: col(row, "asset_id")?,
            status: col_label(row, "status", OrderStatus::parse)?,
            archived: col(row, "archived")?,
            audit: audit_from_row(row)?,
        })
    }
}

impl SqliteEntity for Tenant {
    const TABLE: &'static str = "tenants";
    const COLUMNS: &'static [&'static str] = &["name", "slug", "contact_email", "plan", "archived"];

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.name.as_str().into(),
            self.slug.as_str().into(),
            self.contact_email.clone().into(),
            self.plan.clone().into(),
            self.archived.into(),
        ]
    }

    fn from_row(row: &SqliteRow) -> Result<Self, RepositoryError> {
        Ok(Tenant {
            id: col(row, "id")?,
            name: col(row, "name")?,
            slug: col(row, "slug")?,
            contact_email: col(row, "contact_email")?,
            plan: col(row, "plan")?,
            archived: col(row, "archived")?,
            audit: audit_from_row(row)?,
        })
    }
}

impl SqliteEntity for Task {
    const TABLE: &'static str = "tasks";
    const COLUMNS: &'static [&'static str] = &[
        "title",
        "description",
        "assignee_id",
        "asset_id",
        "due_date",
        "status",
        "archived",
    ];

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.title.as_str().into(),
            self.description.clone().into(),
            self.assignee_id.into(),
            self.asset_id.into(),
            self.due_date.into(),
            self.status.as_str().into(),
            self.archived.into(),
        ]
    }

    fn from_row(row: &SqliteRow) -> Result<Self, RepositoryError> {
        Ok(Task {
            id: col(row, "id")?,
            title: col(row, "title")?,
            description: col(row, "description")?,
            assignee_id: col(row, "assignee_id")?,
            asset_id: col(row, "asset_id")?,
            due_date: col(row, "due_date")?,
            status: col_label(row, "status", TaskStatus::parse)?,
            archived: col(row, "archived")?,
            audit: audit_from_row(row)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn assert_layout<E: SqliteEntity>(sample: &E) {
        assert_eq!(
            sample.values().len(),
            E::COLUMNS.len(),
            "{} values must line up with its columns",
            E::TABLE
        );
    }

    #[test]
    fn option_values_map_to_null() {
        assert_eq!(SqlValue::from(None::<i64>), SqlValue::Null);
        assert_eq!(SqlValue::from(Some(3_u32)), SqlValue::Integer(3));
        assert_eq!(SqlValue::from(Some(dec!(12.50))), SqlValue::Text("12.5".to_string()));
        assert_eq!(SqlValue::from(true), SqlValue::Integer(1));
    }

    #[test]
    fn every_table_binds_one_value_per_column() {
        let audit = AuditInfo::created("test", Utc::now());
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();

        assert_layout(&Asset {
            id: 1,
            tag: "T-1".to_string(),
            name: "Chair".to_string(),
            description: None,
            serial_number: None,
            category_id: None,
            room_id: None,
            assigned_to: None,
            value: dec!(10),
            purchase_price: None,
            purchase_date: None,
            useful_life_years: None,
            status: AssetStatus::Available,
            status_before_archive: None,
            audit: audit.clone(),
        });
        assert_layout(&Category {
            id: 1,
            name: "Furniture".to_string(),
            description: None,
            default_useful_life_years: None,
            archived: false,
            audit: audit.clone(),
        });
        assert_layout(&Room {
            id: 1,
            name: "A".to_string(),
            building: None,
            floor: None,
            capacity: None,
            archived: false,
            audit: audit.clone(),
        });
        assert_layout(&Employee {
            id: 1,
            name: "Jo".to_string(),
            email: "jo@example.com".to_string(),
            department: None,
            role: EmployeeRole::Viewer,
            archived: false,
            audit: audit.clone(),
        });
        assert_layout(&MaintenanceRecord {
            id: 1,
            asset_id: 1,
            title: "Check".to_string(),
            description: None,
            scheduled_date: date,
            completed_date: None,
            cost: None,
            technician: None,
            status: MaintenanceStatus::Scheduled,
            archived: false,
            audit: audit.clone(),
        });
        assert_layout(&PurchaseOrder {
            id: 1,
            order_number: "PO-1".to_string(),
            supplier: "S".to_string(),
            item_name: "I".to_string(),
            category_id: None,
            quantity: 1,
            unit_cost: dec!(1),
            order_date: date,
            expected_delivery: None,
            useful_life_years: None,
            asset_id: None,
            status: OrderStatus::Pending,
            archived: false,
            audit: audit.clone(),
        });
        assert_layout(&Tenant {
            id: 1,
            name: "Acme".to_string(),
            slug: "acme".to_string(),
            contact_email: None,
            plan: None,
            archived: false,
            audit: audit.clone(),
        });
        assert_layout(&Task {
            id: 1,
            title: "Label".to_string(),
            description: None,
            assignee_id: None,
            asset_id: None,
            due_date: None,
            status: TaskStatus::Todo,
            archived: false,
            audit,
        });
        assert_eq!(audit_values(&AuditInfo::created("x", Utc::now())).len(), AUDIT_COLUMNS.len());
    }
}
