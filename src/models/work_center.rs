//! Modelo de WorkCenter
//!
//! Este módulo contiene el struct WorkCenter: la relación con fechas entre
//! un empleado y un centro de servicio. La baja es lógica (end_date = hoy),
//! nunca física.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// WorkCenter principal - mapea exactamente a la tabla work_centers
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WorkCenter {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub center_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl WorkCenter {
    /// Una asignación sin end_date sigue vigente
    pub fn is_open_ended(&self) -> bool {
        self.end_date.is_none()
    }
}

/// Request para asignar un empleado a un centro
#[derive(Debug, Deserialize, Validate)]
pub struct CreateWorkCenterRequest {
    pub employee_id: Uuid,

    pub center_id: Uuid,

    /// Fecha de inicio en formato YYYY-MM-DD
    pub start_date: String,

    /// Fecha de fin en formato YYYY-MM-DD (ausente = indefinida)
    pub end_date: Option<String>,
}

/// Request para actualizar una asignación existente
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateWorkCenterRequest {
    pub employee_id: Option<Uuid>,

    pub center_id: Option<Uuid>,

    pub start_date: Option<String>,

    pub end_date: Option<String>,
}

/// Response de asignación para la API
#[derive(Debug, Clone, Serialize)]
pub struct WorkCenterResponse {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub center_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl From<WorkCenter> for WorkCenterResponse {
    fn from(assignment: WorkCenter) -> Self {
        Self {
            id: assignment.id,
            employee_id: assignment.employee_id,
            center_id: assignment.center_id,
            start_date: assignment.start_date,
            end_date: assignment.end_date,
            created_at: assignment.created_at,
        }
    }
}

/// Filtros para búsqueda de asignaciones
#[derive(Debug, Deserialize)]
pub struct WorkCenterFilters {
    pub employee_id: Option<Uuid>,
    pub center_id: Option<Uuid>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
