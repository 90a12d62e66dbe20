//! Modelo de ServiceCenter
//!
//! Este módulo contiene el struct ServiceCenter y sus variantes para CRUD
//! operations. Mapea exactamente al schema PostgreSQL con primary key 'id'.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;
use validator::Validate;

/// Estado del centro - mapea al ENUM center_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "center_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CenterStatus {
    Open,
    Closed,
}

/// ServiceCenter principal - mapea exactamente a la tabla service_centers
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ServiceCenter {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub status: CenterStatus,
    pub created_at: DateTime<Utc>,
}

/// Request para crear un nuevo centro de servicio
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCenterRequest {
    #[validate(length(min = 2, max = 255))]
    pub name: String,

    #[validate(length(min = 5, max = 500))]
    pub address: String,
}

/// Request para actualizar un centro existente
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCenterRequest {
    #[validate(length(min = 2, max = 255))]
    pub name: Option<String>,

    #[validate(length(min = 5, max = 500))]
    pub address: Option<String>,

    pub status: Option<CenterStatus>,
}

/// Response de centro para la API
#[derive(Debug, Clone, Serialize)]
pub struct CenterResponse {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub status: CenterStatus,
    pub created_at: DateTime<Utc>,
}

impl From<ServiceCenter> for CenterResponse {
    fn from(center: ServiceCenter) -> Self {
        Self {
            id: center.id,
            name: center.name,
            address: center.address,
            status: center.status,
            created_at: center.created_at,
        }
    }
}

/// Filtros para búsqueda de centros
#[derive(Debug, Deserialize)]
pub struct CenterFilters {
    pub status: Option<CenterStatus>,
    pub name: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
