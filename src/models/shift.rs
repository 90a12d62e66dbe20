//! Modelo de Shift
//!
//! Este módulo contiene el struct Shift y sus variantes para CRUD operations.
//! Un turno define una ventana de trabajo (hora de inicio/fin, capacidad y
//! patrón de recurrencia opcional) de un centro de servicio.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;
use validator::Validate;

/// Estado del turno - mapea al ENUM shift_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "shift_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ShiftStatus {
    Active,
    Inactive,
}

/// Shift principal - mapea exactamente a la tabla shifts
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Shift {
    pub id: Uuid,
    pub center_id: Uuid,
    pub name: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub repeat_days: Option<Vec<i32>>,
    pub maximum_slot: i32,
    pub status: ShiftStatus,
    pub created_at: DateTime<Utc>,
}

impl Shift {
    /// Un turno es recurrente cuando tiene rango de fechas y días de repetición
    pub fn is_recurring(&self) -> bool {
        self.start_date.is_some() && self.end_date.is_some() && self.repeat_days.is_some()
    }
}

/// Request para crear un nuevo turno
#[derive(Debug, Deserialize, Validate)]
pub struct CreateShiftRequest {
    pub center_id: Uuid,

    #[validate(length(min = 2, max = 255))]
    pub name: String,

    /// Hora de inicio en formato HH:MM:SS
    pub start_time: String,

    /// Hora de fin en formato HH:MM:SS
    pub end_time: String,

    /// Fecha de inicio de recurrencia en formato YYYY-MM-DD
    pub start_date: Option<String>,

    /// Fecha de fin de recurrencia en formato YYYY-MM-DD
    pub end_date: Option<String>,

    /// Días de la semana de recurrencia (0=domingo..6=sábado)
    pub repeat_days: Option<Vec<i32>>,

    #[validate(range(min = 1, max = 200))]
    pub maximum_slot: i32,
}

/// Request para actualizar un turno existente
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateShiftRequest {
    pub center_id: Option<Uuid>,

    #[validate(length(min = 2, max = 255))]
    pub name: Option<String>,

    pub start_time: Option<String>,

    pub end_time: Option<String>,

    pub start_date: Option<String>,

    pub end_date: Option<String>,

    pub repeat_days: Option<Vec<i32>>,

    #[validate(range(min = 1, max = 200))]
    pub maximum_slot: Option<i32>,

    pub status: Option<ShiftStatus>,
}

/// Response de turno para la API
#[derive(Debug, Clone, Serialize)]
pub struct ShiftResponse {
    pub id: Uuid,
    pub center_id: Uuid,
    pub name: String,
    pub start_time: String,
    pub end_time: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub repeat_days: Option<Vec<i32>>,
    pub maximum_slot: i32,
    pub status: ShiftStatus,
    pub created_at: DateTime<Utc>,
}

impl From<Shift> for ShiftResponse {
    fn from(shift: Shift) -> Self {
        Self {
            id: shift.id,
            center_id: shift.center_id,
            name: shift.name,
            start_time: shift.start_time.format("%H:%M:%S").to_string(),
            end_time: shift.end_time.format("%H:%M:%S").to_string(),
            start_date: shift.start_date,
            end_date: shift.end_date,
            repeat_days: shift.repeat_days,
            maximum_slot: shift.maximum_slot,
            status: shift.status,
            created_at: shift.created_at,
        }
    }
}

/// Filtros para búsqueda de turnos
#[derive(Debug, Deserialize)]
pub struct ShiftFilters {
    pub center_id: Option<Uuid>,
    pub status: Option<ShiftStatus>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
