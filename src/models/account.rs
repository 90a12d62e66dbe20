//! Modelo de Account
//!
//! Este módulo contiene el struct Account para las cuentas de acceso
//! y el enum de roles de la plataforma.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Rol de la cuenta - mapea al ENUM account_role
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "account_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AccountRole {
    Admin,
    Staff,
    Technician,
}

impl AccountRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountRole::Admin => "admin",
            AccountRole::Staff => "staff",
            AccountRole::Technician => "technician",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "admin" => Some(AccountRole::Admin),
            "staff" => Some(AccountRole::Staff),
            "technician" => Some(AccountRole::Technician),
            _ => None,
        }
    }

    /// Solo STAFF y TECHNICIAN son elegibles para asignación de turnos
    pub fn is_schedulable(&self) -> bool {
        matches!(self, AccountRole::Staff | AccountRole::Technician)
    }
}

/// Account principal - mapea exactamente a la tabla accounts
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: AccountRole,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_schedulable() {
        assert!(AccountRole::Staff.is_schedulable());
        assert!(AccountRole::Technician.is_schedulable());
        assert!(!AccountRole::Admin.is_schedulable());
    }

    #[test]
    fn test_role_round_trip() {
        for role in [AccountRole::Admin, AccountRole::Staff, AccountRole::Technician] {
            assert_eq!(AccountRole::from_str(role.as_str()), Some(role));
        }
        assert_eq!(AccountRole::from_str("manager"), None);
    }
}
