//! Modelo de WorkSchedule
//!
//! Este módulo contiene el struct WorkSchedule: la asignación concreta de un
//! empleado a un turno en una fecha de calendario. Invariante: única por
//! (employee_id, shift_id, date) y acotada por maximum_slot del turno.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// WorkSchedule principal - mapea exactamente a la tabla work_schedules
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WorkSchedule {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub shift_id: Uuid,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// Request para asignar empleados a un turno en una fecha concreta
#[derive(Debug, Deserialize, Validate)]
pub struct CreateWorkScheduleRequest {
    pub shift_id: Uuid,

    #[validate(length(min = 1, max = 200))]
    pub employee_ids: Vec<Uuid>,

    /// Fecha objetivo en formato YYYY-MM-DD
    pub date: String,
}

/// Request para expandir la recurrencia de un turno
#[derive(Debug, Deserialize, Validate)]
pub struct GenerateWorkScheduleRequest {
    pub shift_id: Uuid,

    #[validate(length(min = 1, max = 200))]
    pub employee_ids: Vec<Uuid>,
}

/// Request para reemplazar los asignados de un (turno, fecha)
#[derive(Debug, Deserialize, Validate)]
pub struct ReplaceWorkScheduleRequest {
    #[validate(length(max = 200))]
    pub employee_ids: Vec<Uuid>,
}

/// Filtros para búsqueda de asignaciones de turno
#[derive(Debug, Deserialize)]
pub struct WorkScheduleFilters {
    pub shift_id: Option<Uuid>,
    pub employee_id: Option<Uuid>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
