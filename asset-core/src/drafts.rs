//! Editable form state for the records users type in by hand.
//!
//! A draft holds raw text exactly as entered. [`AssetDraft::validate`] and
//! friends check every field and either return the complete `New*` record
//! or every problem found, so a caller can report them all at once.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{AssetStatus, NewAsset, NewMaintenanceRecord, NewPurchaseOrder};

static TAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]{0,31}$").unwrap_or_else(|e| panic!("tag regex: {e}"))
});

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("invalid form: {}", .0.join(" "))]
    Invalid(Vec<String>),
}

impl DraftError {
    pub fn messages(&self) -> &[String] {
        match self {
            Self::Invalid(messages) => messages,
        }
    }
}

/// Collects field errors while a draft is checked.
#[derive(Default)]
struct Problems(Vec<String>);

impl Problems {
    fn push(
        &mut self,
        message: impl Into<String>,
    ) {
        self.0.push(message.into());
    }

    fn required(
        &mut self,
        field: &str,
        value: &str,
    ) -> Option<String> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            self.push(format!("{field} is required."));
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    fn amount(
        &mut self,
        field: &str,
        value: &str,
    ) -> Option<Decimal> {
        match parse_amount(value) {
            Some(Ok(amount)) if amount < Decimal::ZERO => {
                self.push(format!("{field} cannot be negative."));
                None
            }
            Some(Ok(amount)) => Some(amount),
            Some(Err(())) => {
                self.push(format!("{field} must be a number."));
                None
            }
            None => None,
        }
    }

    fn date(
        &mut self,
        field: &str,
        value: &str,
    ) -> Option<NaiveDate> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return None;
        }
        match NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(_) => {
                self.push(format!("{field} must be a date in YYYY-MM-DD form."));
                None
            }
        }
    }

    fn whole_number(
        &mut self,
        field: &str,
        value: &str,
    ) -> Option<u32> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return None;
        }
        match trimmed.parse::<u32>() {
            Ok(n) => Some(n),
            Err(_) => {
                self.push(format!("{field} must be a whole number of zero or more."));
                None
            }
        }
    }

    fn finish<T>(
        self,
        build: impl FnOnce() -> Option<T>,
    ) -> Result<T, DraftError> {
        if !self.0.is_empty() {
            return Err(DraftError::Invalid(self.0));
        }
        build().ok_or_else(|| DraftError::Invalid(vec!["Form is incomplete.".to_string()]))
    }
}

/// Parses a typed amount. Commas are thousands separators; blank input is
/// `None`.
fn parse_amount(value: &str) -> Option<Result<Decimal, ()>> {
    let normalized = value.trim().replace(',', "");
    if normalized.is_empty() {
        return None;
    }
    Some(normalized.parse::<Decimal>().map_err(|_| ()))
}

fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Form values for registering an asset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetDraft {
    pub tag: String,
    pub name: String,
    pub description: String,
    pub serial_number: String,
    pub category_id: Option<i64>,
    pub room_id: Option<i64>,
    pub assigned_to: Option<i64>,
    pub value: String,
    pub purchase_price: String,
    pub purchase_date: String,
    pub useful_life_years: String,
    /// Blank means `Available`.
    pub status: String,
}

impl AssetDraft {
    /// Rules:
    /// - tag and name are required; the tag is 1-32 letters, digits, `.`, `_` or `-`
    /// - value is required; value and purchase price are non-negative numbers
    /// - purchase date, when given, is `YYYY-MM-DD`
    /// - useful life, when given, is a whole number of years
    /// - status, when given, is an asset status other than `Archived`
    pub fn validate(&self) -> Result<NewAsset, DraftError> {
        let mut problems = Problems::default();

        let tag = problems.required("Tag", &self.tag);
        if tag.as_deref().is_some_and(|tag| !TAG_PATTERN.is_match(tag)) {
            problems.push("Tag may only contain letters, digits, '.', '_' or '-' (max 32).");
        }
        let name = problems.required("Name", &self.name);

        if self.value.trim().is_empty() {
            problems.push("Value is required.");
        }
        let value = problems.amount("Value", &self.value);
        let purchase_price = problems.amount("Purchase price", &self.purchase_price);
        let purchase_date = problems.date("Purchase date", &self.purchase_date);
        let useful_life_years = problems.whole_number("Useful life", &self.useful_life_years);

        let status = match self.status.trim() {
            "" => Some(AssetStatus::Available),
            label => match AssetStatus::parse(label) {
                Some(AssetStatus::Archived) => {
                    problems.push("New assets cannot start archived.");
                    None
                }
                Some(status) => Some(status),
                None => {
                    problems.push(format!("Unknown status '{label}'."));
                    None
                }
            },
        };

        problems.finish(|| {
            Some(NewAsset {
                tag: tag?,
                name: name?,
                description: optional_text(&self.description),
                serial_number: optional_text(&self.serial_number),
                category_id: self.category_id,
                room_id: self.room_id,
                assigned_to: self.assigned_to,
                value: value?,
                purchase_price,
                purchase_date,
                useful_life_years,
                status: status?,
            })
        })
    }
}

/// Form values for placing a purchase order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PurchaseOrderDraft {
    pub order_number: String,
    pub supplier: String,
    pub item_name: String,
    pub category_id: Option<i64>,
    /// Blank means 1.
    pub quantity: String,
    pub unit_cost: String,
    pub order_date: String,
    pub expected_delivery: String,
    pub useful_life_years: String,
}

impl PurchaseOrderDraft {
    /// Rules:
    /// - order number, supplier, item name, unit cost and order date are required
    /// - quantity is at least 1
    /// - expected delivery, when given, is not before the order date
    pub fn validate(&self) -> Result<NewPurchaseOrder, DraftError> {
        let mut problems = Problems::default();

        let order_number = problems.required("Order number", &self.order_number);
        let supplier = problems.required("Supplier", &self.supplier);
        let item_name = problems.required("Item name", &self.item_name);

        let quantity = if self.quantity.trim().is_empty() {
            Some(1)
        } else {
            problems.whole_number("Quantity", &self.quantity)
        };
        if quantity == Some(0) {
            problems.push("Quantity must be at least 1.");
        }

        if self.unit_cost.trim().is_empty() {
            problems.push("Unit cost is required.");
        }
        let unit_cost = problems.amount("Unit cost", &self.unit_cost);

        if self.order_date.trim().is_empty() {
            problems.push("Order date is required.");
        }
        let order_date = problems.date("Order date", &self.order_date);
        let expected_delivery = problems.date("Expected delivery", &self.expected_delivery);
        if matches!((order_date, expected_delivery), (Some(ordered), Some(expected)) if expected < ordered) {
            problems.push("Expected delivery cannot be before the order date.");
        }
        let useful_life_years = problems.whole_number("Useful life", &self.useful_life_years);

        problems.finish(|| {
            Some(NewPurchaseOrder {
                order_number: order_number?,
                supplier: supplier?,
                item_name: item_name?,
                category_id: self.category_id,
                quantity: quantity?,
                unit_cost: unit_cost?,
                order_date: order_date?,
                expected_delivery,
                useful_life_years,
                asset_id: None,
            })
        })
    }
}

/// Form values for scheduling maintenance on an asset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaintenanceDraft {
    pub asset_id: Option<i64>,
    pub title: String,
    pub description: String,
    pub scheduled_date: String,
    pub cost: String,
    pub technician: String,
}

impl MaintenanceDraft {
    /// Rules:
    /// - an asset, a title and a scheduled date are required
    /// - cost, when given, is a non-negative number
    pub fn validate(&self) -> Result<NewMaintenanceRecord, DraftError> {
        let mut problems = Problems::default();

        if self.asset_id.is_none() {
            problems.push("Asset is required.");
        }
        let title = problems.required("Title", &self.title);
        if self.scheduled_date.trim().is_empty() {
            problems.push("Scheduled date is required.");
        }
        let scheduled_date = problems.date("Scheduled date", &self.scheduled_date);
        let cost = problems.amount("Cost", &self.cost);

        problems.finish(|| {
            Some(NewMaintenanceRecord {
                asset_id: self.asset_id?,
                title: title?,
                description: optional_text(&self.description),
                scheduled_date: scheduled_date?,
                cost,
                technician: optional_text(&self.technician),
            })
        })
    }
}
