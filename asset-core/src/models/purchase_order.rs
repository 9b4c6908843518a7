use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::AuditInfo;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    Approved,
    Received,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Received => "Received",
            Self::Cancelled => "Cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Pending" => Some(Self::Pending),
            "Approved" => Some(Self::Approved),
            "Received" => Some(Self::Received),
            "Cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    pub id: i64,
    pub order_number: String,
    pub supplier: String,
    pub item_name: String,
    pub category_id: Option<i64>,
    pub quantity: u32,
    pub unit_cost: Decimal,
    pub order_date: NaiveDate,
    pub expected_delivery: Option<NaiveDate>,
    pub useful_life_years: Option<u32>,
    /// Asset registered when the order was placed.
    pub asset_id: Option<i64>,
    pub status: OrderStatus,
    pub archived: bool,
    pub audit: AuditInfo,
}

impl PurchaseOrder {
    pub fn total_cost(&self) -> Decimal {
        self.unit_cost * Decimal::from(self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPurchaseOrder {
    pub order_number: String,
    pub supplier: String,
    pub item_name: String,
    pub category_id: Option<i64>,
    pub quantity: u32,
    pub unit_cost: Decimal,
    pub order_date: NaiveDate,
    pub expected_delivery: Option<NaiveDate>,
    pub useful_life_years: Option<u32>,
    pub asset_id: Option<i64>,
}
