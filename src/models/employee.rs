//! Modelo de Employee
//!
//! Este módulo contiene el struct Employee y sus variantes para CRUD
//! operations. El rol vive en la cuenta asociada y se incorpora por join
//! en las respuestas de detalle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::models::account::AccountRole;

/// Employee principal - mapea exactamente a la tabla employees
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Employee {
    pub id: Uuid,
    pub account_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Employee con los datos de su cuenta (rol y email)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EmployeeDetail {
    pub id: Uuid,
    pub account_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub email: String,
    pub role: AccountRole,
}

impl EmployeeDetail {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Request para crear un empleado junto con su cuenta
#[derive(Debug, Deserialize, Validate)]
pub struct CreateEmployeeRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 8, max = 72))]
    pub password: String,

    pub role: AccountRole,

    #[validate(length(min = 1, max = 100))]
    pub first_name: String,

    #[validate(length(min = 1, max = 100))]
    pub last_name: String,

    #[validate(length(min = 8, max = 20))]
    pub phone: Option<String>,
}

/// Request para actualizar un empleado existente
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateEmployeeRequest {
    #[validate(length(min = 1, max = 100))]
    pub first_name: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub last_name: Option<String>,

    #[validate(length(min = 8, max = 20))]
    pub phone: Option<String>,
}

/// Response de empleado para la API
#[derive(Debug, Clone, Serialize)]
pub struct EmployeeResponse {
    pub id: Uuid,
    pub account_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub email: String,
    pub role: AccountRole,
}

impl From<EmployeeDetail> for EmployeeResponse {
    fn from(employee: EmployeeDetail) -> Self {
        Self {
            id: employee.id,
            account_id: employee.account_id,
            first_name: employee.first_name,
            last_name: employee.last_name,
            phone: employee.phone,
            email: employee.email,
            role: employee.role,
        }
    }
}
