use serde::{Deserialize, Serialize};

use crate::models::AuditInfo;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmployeeRole {
    Admin,
    Manager,
    Staff,
    Viewer,
}

impl EmployeeRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Manager => "Manager",
            Self::Staff => "Staff",
            Self::Viewer => "Viewer",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Some(Self::Admin),
            "manager" => Some(Self::Manager),
            "staff" => Some(Self::Staff),
            "viewer" => Some(Self::Viewer),
            _ => None,
        }
    }

    /// Whether this role may approve purchase orders and archive records.
    pub fn can_manage(&self) -> bool {
        matches!(self, Self::Admin | Self::Manager)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub department: Option<String>,
    pub role: EmployeeRole,
    pub archived: bool,
    pub audit: AuditInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEmployee {
    pub name: String,
    pub email: String,
    pub department: Option<String>,
    pub role: EmployeeRole,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parse_is_case_insensitive() {
        assert_eq!(EmployeeRole::parse("MANAGER"), Some(EmployeeRole::Manager));
        assert_eq!(EmployeeRole::parse(" staff "), Some(EmployeeRole::Staff));
        assert_eq!(EmployeeRole::parse("intern"), None);
    }

    #[test]
    fn only_admins_and_managers_manage() {
        assert!(EmployeeRole::Admin.can_manage());
        assert!(EmployeeRole::Manager.can_manage());
        assert!(!EmployeeRole::Staff.can_manage());
        assert!(!EmployeeRole::Viewer.can_manage());
    }
}
