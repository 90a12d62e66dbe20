//! Servicio de turnos
//!
//! Valida la ventana horaria de un turno (incluyendo turnos nocturnos que
//! cruzan medianoche) y orquesta sus operaciones CRUD.

use chrono::{NaiveDate, NaiveTime};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::models::service_center::CenterStatus;
use crate::models::shift::{CreateShiftRequest, Shift, ShiftFilters, UpdateShiftRequest};
use crate::repositories::center_repository::CenterRepository;
use crate::repositories::shift_repository::ShiftRepository;
use crate::utils::errors::{field_validation_error, not_found_error, AppError};
use crate::utils::validation::{validate_date, validate_repeat_days, validate_time};

/// Duración mínima de un turno
const MIN_SHIFT_MINUTES: i64 = 60;
/// Duración máxima de un turno
const MAX_SHIFT_MINUTES: i64 = 16 * 60;
/// Hora mínima de inicio para turnos nocturnos
const OVERNIGHT_EARLIEST_START: (u32, u32) = (17, 0);
/// Hora máxima de fin para turnos nocturnos
const OVERNIGHT_LATEST_END: (u32, u32) = (12, 0);

/// Validar la ventana (inicio, fin) de un turno.
///
/// Un fin anterior al inicio solo es válido para turnos nocturnos: el inicio
/// debe caer en la tarde (>= 17:00) y el fin en la mañana (<= 12:00). La
/// duración resultante, con o sin cruce de medianoche, debe ser de 1 a 16
/// horas.
pub fn validate_shift_window(start: NaiveTime, end: NaiveTime) -> Result<(), AppError> {
    if start == end {
        return Err(AppError::BadRequest(
            "Shift start and end times must not be equal".to_string(),
        ));
    }

    let duration_minutes = if end > start {
        (end - start).num_minutes()
    } else {
        let evening = NaiveTime::from_hms_opt(OVERNIGHT_EARLIEST_START.0, OVERNIGHT_EARLIEST_START.1, 0).unwrap();
        let morning = NaiveTime::from_hms_opt(OVERNIGHT_LATEST_END.0, OVERNIGHT_LATEST_END.1, 0).unwrap();

        if start < evening {
            return Err(AppError::BadRequest(format!(
                "Overnight shifts must start in the evening (17:00:00 or later), got {}",
                start.format("%H:%M:%S")
            )));
        }
        if end > morning {
            return Err(AppError::BadRequest(format!(
                "Overnight shifts must end by noon (12:00:00), got {}",
                end.format("%H:%M:%S")
            )));
        }

        let until_midnight = 24 * 60 - (start - NaiveTime::from_hms_opt(0, 0, 0).unwrap()).num_minutes();
        until_midnight + (end - NaiveTime::from_hms_opt(0, 0, 0).unwrap()).num_minutes()
    };

    if duration_minutes < MIN_SHIFT_MINUTES {
        return Err(AppError::BadRequest(format!(
            "Shift duration must be at least 1 hour, got {} minutes",
            duration_minutes
        )));
    }
    if duration_minutes > MAX_SHIFT_MINUTES {
        return Err(AppError::BadRequest(format!(
            "Shift duration must not exceed 16 hours, got {} minutes",
            duration_minutes
        )));
    }

    Ok(())
}

/// Patrón de recurrencia ya validado de un turno
struct RecurrencePattern {
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    repeat_days: Option<Vec<i32>>,
}

/// Validar que los campos de recurrencia vengan todos o ninguno,
/// con rango de fechas coherente y días de semana válidos.
fn validate_recurrence(
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    repeat_days: Option<Vec<i32>>,
) -> Result<RecurrencePattern, AppError> {
    let any = start_date.is_some() || end_date.is_some() || repeat_days.is_some();
    let all = start_date.is_some() && end_date.is_some() && repeat_days.is_some();

    if any && !all {
        return Err(AppError::BadRequest(
            "Recurrence requires start_date, end_date and repeat_days together".to_string(),
        ));
    }

    if let (Some(from), Some(to)) = (start_date, end_date) {
        if from > to {
            return Err(AppError::BadRequest(format!(
                "Recurrence start_date {} must not be after end_date {}",
                from, to
            )));
        }
    }

    if let Some(ref days) = repeat_days {
        validate_repeat_days(days).map_err(|e| field_validation_error("repeat_days", e))?;
    }

    Ok(RecurrencePattern {
        start_date,
        end_date,
        repeat_days,
    })
}

pub struct ShiftService {
    shift_repo: ShiftRepository,
    center_repo: CenterRepository,
}

impl ShiftService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            shift_repo: ShiftRepository::new(pool.clone()),
            center_repo: CenterRepository::new(pool),
        }
    }

    pub async fn create(&self, request: CreateShiftRequest) -> Result<Shift, AppError> {
        request.validate()?;

        let start_time = validate_time(&request.start_time)
            .map_err(|e| field_validation_error("start_time", e))?;
        let end_time =
            validate_time(&request.end_time).map_err(|e| field_validation_error("end_time", e))?;
        validate_shift_window(start_time, end_time)?;

        let start_date = parse_optional_date(request.start_date.as_deref(), "start_date")?;
        let end_date = parse_optional_date(request.end_date.as_deref(), "end_date")?;
        let recurrence = validate_recurrence(start_date, end_date, request.repeat_days)?;

        let center = self
            .center_repo
            .find_by_id(request.center_id)
            .await?
            .ok_or_else(|| not_found_error("Service center", &request.center_id.to_string()))?;

        if center.status == CenterStatus::Closed {
            return Err(AppError::BadRequest(format!(
                "Service center '{}' is closed",
                center.name
            )));
        }

        if self
            .shift_repo
            .name_exists_in_center(center.id, &request.name, None)
            .await?
        {
            return Err(AppError::Conflict(format!(
                "Shift with name '{}' already exists in center '{}'",
                request.name, center.name
            )));
        }

        self.shift_repo
            .create(
                Uuid::new_v4(),
                center.id,
                &request.name,
                start_time,
                end_time,
                recurrence.start_date,
                recurrence.end_date,
                recurrence.repeat_days.as_deref(),
                request.maximum_slot,
            )
            .await
    }

    pub async fn get(&self, id: Uuid) -> Result<Shift, AppError> {
        self.shift_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Shift", &id.to_string()))
    }

    pub async fn list(&self, filters: &ShiftFilters) -> Result<Vec<Shift>, AppError> {
        self.shift_repo.list(filters).await
    }

    /// Actualizar un turno re-validando la ventana sobre los valores
    /// combinados (existentes + patch).
    pub async fn update(&self, id: Uuid, request: UpdateShiftRequest) -> Result<Shift, AppError> {
        request.validate()?;

        let existing = self.get(id).await?;

        let start_time = match request.start_time.as_deref() {
            Some(value) => {
                validate_time(value).map_err(|e| field_validation_error("start_time", e))?
            }
            None => existing.start_time,
        };
        let end_time = match request.end_time.as_deref() {
            Some(value) => validate_time(value).map_err(|e| field_validation_error("end_time", e))?,
            None => existing.end_time,
        };
        validate_shift_window(start_time, end_time)?;

        let start_date = match request.start_date.as_deref() {
            Some(value) => Some(validate_date(value).map_err(|e| field_validation_error("start_date", e))?),
            None => existing.start_date,
        };
        let end_date = match request.end_date.as_deref() {
            Some(value) => Some(validate_date(value).map_err(|e| field_validation_error("end_date", e))?),
            None => existing.end_date,
        };
        let repeat_days = request.repeat_days.or(existing.repeat_days);
        let recurrence = validate_recurrence(start_date, end_date, repeat_days)?;

        let center_id = request.center_id.unwrap_or(existing.center_id);
        let center_changed = center_id != existing.center_id;
        let name = request.name.unwrap_or_else(|| existing.name.clone());
        let name_changed = name != existing.name;

        // Cambio de centro o de nombre: re-chequear unicidad en el centro destino
        if center_changed || name_changed {
            let center = self
                .center_repo
                .find_by_id(center_id)
                .await?
                .ok_or_else(|| not_found_error("Service center", &center_id.to_string()))?;

            if self
                .shift_repo
                .name_exists_in_center(center.id, &name, Some(id))
                .await?
            {
                return Err(AppError::Conflict(format!(
                    "Shift with name '{}' already exists in center '{}'",
                    name, center.name
                )));
            }
        }

        self.shift_repo
            .update(
                id,
                center_id,
                &name,
                start_time,
                end_time,
                recurrence.start_date,
                recurrence.end_date,
                recurrence.repeat_days.as_deref(),
                request.maximum_slot.unwrap_or(existing.maximum_slot),
                request.status.unwrap_or(existing.status),
            )
            .await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let shift = self.get(id).await?;

        if self.shift_repo.has_schedules(shift.id).await? {
            return Err(AppError::Conflict(format!(
                "Shift '{}' has work schedule entries and cannot be deleted",
                shift.name
            )));
        }

        self.shift_repo.delete(shift.id).await
    }
}

fn parse_optional_date(
    value: Option<&str>,
    field: &'static str,
) -> Result<Option<NaiveDate>, AppError> {
    match value {
        Some(raw) => Ok(Some(
            validate_date(raw).map_err(|e| field_validation_error(field, e))?,
        )),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn test_equal_times_rejected() {
        let result = validate_shift_window(time(8, 0, 0), time(8, 0, 0));
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_regular_shift_valid() {
        assert!(validate_shift_window(time(8, 0, 0), time(17, 0, 0)).is_ok());
        assert!(validate_shift_window(time(6, 30, 0), time(7, 30, 0)).is_ok());
    }

    #[test]
    fn test_short_shift_rejected() {
        let result = validate_shift_window(time(8, 0, 0), time(8, 30, 0));
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_long_shift_rejected() {
        // 17 horas en el mismo día
        let result = validate_shift_window(time(5, 0, 0), time(22, 0, 0));
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_overnight_shift_valid() {
        // 22:00 a 06:00 = 8 horas cruzando medianoche
        assert!(validate_shift_window(time(22, 0, 0), time(6, 0, 0)).is_ok());
        // Caso límite: 17:00 a 09:00 = 16 horas
        assert!(validate_shift_window(time(17, 0, 0), time(9, 0, 0)).is_ok());
    }

    #[test]
    fn test_overnight_must_start_in_evening() {
        // 10:00 a 08:00 cruza medianoche pero no empieza por la tarde
        let result = validate_shift_window(time(10, 0, 0), time(8, 0, 0));
        match result {
            Err(AppError::BadRequest(msg)) => {
                assert!(msg.contains("must start in the evening"), "got: {}", msg)
            }
            other => panic!("expected BadRequest, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_overnight_must_end_by_noon() {
        let result = validate_shift_window(time(18, 0, 0), time(13, 0, 0));
        match result {
            Err(AppError::BadRequest(msg)) => {
                assert!(msg.contains("must end by noon"), "got: {}", msg)
            }
            other => panic!("expected BadRequest, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_overnight_too_long_rejected() {
        // 17:00 a 10:00 = 17 horas
        let result = validate_shift_window(time(17, 0, 0), time(10, 0, 0));
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_recurrence_all_or_none() {
        let from = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        let to = NaiveDate::from_ymd_opt(2025, 1, 19).unwrap();

        assert!(validate_recurrence(Some(from), Some(to), Some(vec![1, 3])).is_ok());
        assert!(validate_recurrence(None, None, None).is_ok());
        assert!(validate_recurrence(Some(from), None, None).is_err());
        assert!(validate_recurrence(Some(to), Some(from), Some(vec![1])).is_err());
        assert!(validate_recurrence(Some(from), Some(to), Some(vec![9])).is_err());
    }
}
