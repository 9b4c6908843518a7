use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Creation, modification and archive stamps shared by every entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditInfo {
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    pub updated_at: DateTime<Utc>,
    pub archived_at: Option<DateTime<Utc>>,
    pub archived_by: Option<String>,
}

impl AuditInfo {
    /// Stamps a freshly created record.
    pub fn created(
        actor: &str,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            created_at: at,
            created_by: actor.to_string(),
            updated_at: at,
            archived_at: None,
            archived_by: None,
        }
    }
}
