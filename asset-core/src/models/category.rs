use serde::{Deserialize, Serialize};

use crate::models::AuditInfo;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    /// Useful life suggested for assets registered under this category.
    pub default_useful_life_years: Option<u32>,
    pub archived: bool,
    pub audit: AuditInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCategory {
    pub name: String,
    pub description: Option<String>,
    pub default_useful_life_years: Option<u32>,
}
