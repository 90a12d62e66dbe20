//! DTOs de horarios con detalle
//!
//! Respuestas de work schedule con los datos de empleado, turno y centro
//! incorporados por join.

use chrono::NaiveDate;
use chrono::NaiveTime;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::account::AccountRole;

/// Fila de asignación con detalle de empleado, turno y centro
#[derive(Debug, Clone, FromRow)]
pub struct WorkScheduleDetail {
    pub id: Uuid,
    pub date: NaiveDate,
    pub employee_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub role: AccountRole,
    pub shift_id: Uuid,
    pub shift_name: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub center_id: Uuid,
    pub center_name: String,
}

/// Response de asignación con detalle para la API
#[derive(Debug, Clone, Serialize)]
pub struct WorkScheduleDetailResponse {
    pub id: Uuid,
    pub date: NaiveDate,
    pub employee_id: Uuid,
    pub employee_name: String,
    pub role: AccountRole,
    pub shift_id: Uuid,
    pub shift_name: String,
    pub start_time: String,
    pub end_time: String,
    pub center_id: Uuid,
    pub center_name: String,
}

impl From<WorkScheduleDetail> for WorkScheduleDetailResponse {
    fn from(row: WorkScheduleDetail) -> Self {
        Self {
            id: row.id,
            date: row.date,
            employee_id: row.employee_id,
            employee_name: format!("{} {}", row.first_name, row.last_name),
            role: row.role,
            shift_id: row.shift_id,
            shift_name: row.shift_name,
            start_time: row.start_time.format("%H:%M:%S").to_string(),
            end_time: row.end_time.format("%H:%M:%S").to_string(),
            center_id: row.center_id,
            center_name: row.center_name,
        }
    }
}
