use serde::{Deserialize, Serialize};

use crate::models::AuditInfo;

/// An organization administered from this ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenant {
    pub id: i64,
    pub name: String,
    /// URL-safe unique identifier (e.g. `north-campus`).
    pub slug: String,
    pub contact_email: Option<String>,
    pub plan: Option<String>,
    pub archived: bool,
    pub audit: AuditInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTenant {
    pub name: String,
    pub slug: String,
    pub contact_email: Option<String>,
    pub plan: Option<String>,
}
