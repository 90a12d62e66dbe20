//! Servicio de horarios de trabajo
//!
//! Asigna empleados a turnos en fechas de calendario sujeto a capacidad
//! (maximum_slot), duplicados por (empleado, turno, fecha) y elegibilidad de
//! rol. Todas las mutaciones se ejecutan en una transacción que bloquea la
//! fila del turno (SELECT ... FOR UPDATE), serializando los chequeos de
//! capacidad concurrentes sobre el mismo turno.

use std::collections::{HashMap, HashSet};

use chrono::{Datelike, NaiveDate};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::schedule_dto::{WorkScheduleDetail, WorkScheduleDetailResponse};
use crate::models::employee::EmployeeDetail;
use crate::models::service_center::CenterStatus;
use crate::models::shift::{Shift, ShiftStatus};
use crate::models::work_schedule::{
    CreateWorkScheduleRequest, GenerateWorkScheduleRequest, ReplaceWorkScheduleRequest,
    WorkScheduleFilters,
};
use crate::repositories::center_repository::CenterRepository;
use crate::repositories::employee_repository::EmployeeRepository;
use crate::repositories::shift_repository::ShiftRepository;
use crate::repositories::work_center_repository::WorkCenterRepository;
use crate::repositories::work_schedule_repository::WorkScheduleRepository;
use crate::services::authorization_service::Scope;
use crate::utils::errors::{field_validation_error, not_found_error, AppError};
use crate::utils::timezone::today_local;
use crate::utils::validation::validate_date;

/// Expandir el patrón de recurrencia de un turno a fechas concretas.
/// repeat_days usa 0=domingo..6=sábado.
pub fn expand_recurring_dates(
    start_date: NaiveDate,
    end_date: NaiveDate,
    repeat_days: &[i32],
) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    let mut current = start_date;

    while current <= end_date {
        let weekday = current.weekday().num_days_from_sunday() as i32;
        if repeat_days.contains(&weekday) {
            dates.push(current);
        }
        match current.succ_opt() {
            Some(next) => current = next,
            None => break,
        }
    }

    dates
}

/// Detectar ids repetidos dentro de la propia lista de entrada
pub fn find_duplicate_ids(ids: &[Uuid]) -> Vec<Uuid> {
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();

    for id in ids {
        if !seen.insert(*id) && !duplicates.contains(id) {
            duplicates.push(*id);
        }
    }

    duplicates
}

pub struct WorkScheduleService {
    pool: PgPool,
    schedule_repo: WorkScheduleRepository,
    employee_repo: EmployeeRepository,
    shift_repo: ShiftRepository,
    center_repo: CenterRepository,
    work_center_repo: WorkCenterRepository,
}

impl WorkScheduleService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            schedule_repo: WorkScheduleRepository::new(pool.clone()),
            employee_repo: EmployeeRepository::new(pool.clone()),
            shift_repo: ShiftRepository::new(pool.clone()),
            center_repo: CenterRepository::new(pool.clone()),
            work_center_repo: WorkCenterRepository::new(pool.clone()),
            pool,
        }
    }

    /// Asignar un conjunto de empleados a un turno en una fecha concreta.
    ///
    /// Rechaza antes de escribir: capacidad excedida (indicando máximo,
    /// ocupación actual e intento) y empleados ya asignados en esa fecha.
    pub async fn create_assignment(
        &self,
        request: CreateWorkScheduleRequest,
    ) -> Result<Vec<WorkScheduleDetailResponse>, AppError> {
        request.validate()?;

        let date =
            validate_date(&request.date).map_err(|e| field_validation_error("date", e))?;
        let employees = self.load_schedulable_employees(&request.employee_ids).await?;

        let mut tx = self.pool.begin().await?;

        let shift = ShiftRepository::find_by_id_for_update(&mut tx, request.shift_id)
            .await?
            .ok_or_else(|| not_found_error("Shift", &request.shift_id.to_string()))?;

        let existing_count =
            WorkScheduleRepository::count_for_shift_date(&mut tx, shift.id, date).await?;
        check_capacity(&shift, existing_count, employees.len())?;

        let existing =
            WorkScheduleRepository::find_for_shift_date(&mut tx, shift.id, date).await?;
        let already_assigned: Vec<&EmployeeDetail> = employees
            .iter()
            .filter(|e| existing.iter().any(|ws| ws.employee_id == e.id))
            .collect();

        if !already_assigned.is_empty() {
            let names: Vec<String> =
                already_assigned.iter().map(|e| e.full_name()).collect();
            return Err(AppError::Conflict(format!(
                "Already scheduled on {} for this shift: {}",
                date,
                names.join(", ")
            )));
        }

        let mut created_ids = Vec::with_capacity(employees.len());
        for employee in &employees {
            let row = WorkScheduleRepository::insert(
                &mut tx,
                Uuid::new_v4(),
                employee.id,
                shift.id,
                date,
            )
            .await?;
            created_ids.push(row.id);
        }

        tx.commit().await?;

        tracing::info!(
            "{} empleados asignados al turno {} el {}",
            created_ids.len(),
            shift.name,
            date
        );

        self.load_details(&created_ids).await
    }

    /// Expandir la recurrencia de un turno a asignaciones concretas.
    ///
    /// El barrido completo se valida antes de insertar: una violación de
    /// capacidad en cualquier fecha aborta toda la expansión, y el conjunto
    /// expandido se contrasta con las filas ya persistidas listando todos
    /// los duplicados. La inserción es un único lote transaccional.
    pub async fn expand_recurring(
        &self,
        request: GenerateWorkScheduleRequest,
    ) -> Result<Vec<WorkScheduleDetailResponse>, AppError> {
        request.validate()?;

        let employees = self.load_schedulable_employees(&request.employee_ids).await?;

        let mut tx = self.pool.begin().await?;

        let shift = ShiftRepository::find_by_id_for_update(&mut tx, request.shift_id)
            .await?
            .ok_or_else(|| not_found_error("Shift", &request.shift_id.to_string()))?;

        if shift.status != ShiftStatus::Active {
            return Err(AppError::BadRequest(format!(
                "Shift '{}' is inactive and cannot be expanded",
                shift.name
            )));
        }

        let (start_date, end_date, repeat_days) = match (
            shift.start_date,
            shift.end_date,
            shift.repeat_days.as_deref(),
        ) {
            (Some(from), Some(to), Some(days)) => (from, to, days),
            _ => {
                return Err(AppError::BadRequest(format!(
                    "Shift '{}' has no recurrence pattern (start_date, end_date, repeat_days)",
                    shift.name
                )))
            }
        };

        let center = self
            .center_repo
            .find_by_id(shift.center_id)
            .await?
            .ok_or_else(|| not_found_error("Service center", &shift.center_id.to_string()))?;

        if center.status != CenterStatus::Open {
            return Err(AppError::BadRequest(format!(
                "Service center '{}' is closed",
                center.name
            )));
        }

        let dates = expand_recurring_dates(start_date, end_date, repeat_days);
        if dates.is_empty() {
            return Err(AppError::BadRequest(format!(
                "No valid dates between {} and {} for the configured repeat days",
                start_date, end_date
            )));
        }

        let persisted =
            WorkScheduleRepository::find_for_shift_in_range(&mut tx, shift.id, start_date, end_date)
                .await?;

        let mut count_by_date: HashMap<NaiveDate, i64> = HashMap::new();
        for row in &persisted {
            *count_by_date.entry(row.date).or_insert(0) += 1;
        }

        // Toda fecha del barrido debe tener hueco antes de insertar nada
        for date in &dates {
            let existing_count = count_by_date.get(date).copied().unwrap_or(0);
            check_capacity_on(&shift, existing_count, employees.len(), *date)?;
        }

        let persisted_pairs: HashSet<(Uuid, NaiveDate)> = persisted
            .iter()
            .map(|row| (row.employee_id, row.date))
            .collect();

        let mut conflicts = Vec::new();
        for date in &dates {
            for employee in &employees {
                if persisted_pairs.contains(&(employee.id, *date)) {
                    conflicts.push(format!("{} on {}", employee.full_name(), date));
                }
            }
        }

        if !conflicts.is_empty() {
            return Err(AppError::Conflict(format!(
                "Already scheduled for this shift: {}",
                conflicts.join(", ")
            )));
        }

        let mut created_ids = Vec::with_capacity(dates.len() * employees.len());
        for date in &dates {
            for employee in &employees {
                let row = WorkScheduleRepository::insert(
                    &mut tx,
                    Uuid::new_v4(),
                    employee.id,
                    shift.id,
                    *date,
                )
                .await?;
                created_ids.push(row.id);
            }
        }

        tx.commit().await?;

        tracing::info!(
            "Recurrencia del turno {} expandida: {} fechas, {} asignaciones",
            shift.name,
            dates.len(),
            created_ids.len()
        );

        self.load_details(&created_ids).await
    }

    /// Reemplazar el conjunto de asignados de un (turno, fecha).
    ///
    /// Diff contra los asignados actuales: si el conjunto nuevo es idéntico
    /// la operación es un no-op; en otro caso bajas y altas se aplican en
    /// una única transacción validando capacidad sobre el total nuevo.
    pub async fn replace_for_shift_date(
        &self,
        shift_id: Uuid,
        date: NaiveDate,
        request: ReplaceWorkScheduleRequest,
    ) -> Result<Vec<WorkScheduleDetailResponse>, AppError> {
        request.validate()?;

        let new_set: HashSet<Uuid> = request.employee_ids.iter().copied().collect();

        let mut tx = self.pool.begin().await?;

        let shift = ShiftRepository::find_by_id_for_update(&mut tx, shift_id)
            .await?
            .ok_or_else(|| not_found_error("Shift", &shift_id.to_string()))?;

        let current = WorkScheduleRepository::find_for_shift_date(&mut tx, shift.id, date).await?;
        let current_set: HashSet<Uuid> = current.iter().map(|ws| ws.employee_id).collect();

        if new_set == current_set {
            // Conjunto idéntico: no se escribe nada
            let ids: Vec<Uuid> = current.iter().map(|ws| ws.id).collect();
            drop(tx);
            return self.load_details(&ids).await;
        }

        if new_set.len() as i64 > shift.maximum_slot as i64 {
            return Err(AppError::Conflict(format!(
                "Shift capacity exceeded: maximum {} slots, attempted to assign {}",
                shift.maximum_slot,
                new_set.len()
            )));
        }

        let to_add: Vec<Uuid> = new_set.difference(&current_set).copied().collect();
        let to_remove: Vec<Uuid> = current_set.difference(&new_set).copied().collect();

        if !to_add.is_empty() {
            // Solo las altas requieren chequeo de existencia y rol
            self.load_schedulable_employees(&to_add).await?;
        }

        if !to_remove.is_empty() {
            WorkScheduleRepository::delete_for_shift_date(&mut tx, shift.id, date, &to_remove)
                .await?;
        }

        let mut final_ids: Vec<Uuid> = current
            .iter()
            .filter(|ws| new_set.contains(&ws.employee_id))
            .map(|ws| ws.id)
            .collect();

        for employee_id in &to_add {
            let row = WorkScheduleRepository::insert(
                &mut tx,
                Uuid::new_v4(),
                *employee_id,
                shift.id,
                date,
            )
            .await?;
            final_ids.push(row.id);
        }

        tx.commit().await?;

        tracing::info!(
            "Asignados del turno {} el {} reemplazados: +{} -{}",
            shift.name,
            date,
            to_add.len(),
            to_remove.len()
        );

        self.load_details(&final_ids).await
    }

    /// Borrado físico de una asignación concreta
    pub async fn delete_assignment(&self, id: Uuid) -> Result<(), AppError> {
        let deleted = self.schedule_repo.delete(id).await?;
        if deleted == 0 {
            return Err(not_found_error("Work schedule entry", &id.to_string()));
        }
        Ok(())
    }

    /// Listar asignaciones con detalle respetando el scope del llamador
    pub async fn list(
        &self,
        filters: WorkScheduleFilters,
        scope: &Scope,
    ) -> Result<Vec<WorkScheduleDetailResponse>, AppError> {
        let rows = match scope {
            Scope::All => self.schedule_repo.list_details(&filters, None, None).await?,
            Scope::OwnEmployee(employee_id) => {
                self.schedule_repo
                    .list_details(&filters, Some(*employee_id), None)
                    .await?
            }
            Scope::OwnEmployeeAndCenters(employee_id) => {
                let centers = self
                    .work_center_repo
                    .active_center_ids_for_employee(*employee_id, today_local())
                    .await?;
                self.schedule_repo
                    .list_details(&filters, Some(*employee_id), Some(&centers))
                    .await?
            }
        };

        Ok(rows.into_iter().map(WorkScheduleDetailResponse::from).collect())
    }

    /// Cargar y validar los empleados de una petición de asignación:
    /// sin ids repetidos, todos existentes y con rol elegible.
    async fn load_schedulable_employees(
        &self,
        employee_ids: &[Uuid],
    ) -> Result<Vec<EmployeeDetail>, AppError> {
        let duplicated = find_duplicate_ids(employee_ids);
        if !duplicated.is_empty() {
            let ids: Vec<String> = duplicated.iter().map(|id| id.to_string()).collect();
            return Err(AppError::BadRequest(format!(
                "Duplicate employee ids in request: {}",
                ids.join(", ")
            )));
        }

        let employees = self.employee_repo.find_details_by_ids(employee_ids).await?;

        if employees.len() != employee_ids.len() {
            let found: HashSet<Uuid> = employees.iter().map(|e| e.id).collect();
            let missing: Vec<String> = employee_ids
                .iter()
                .filter(|id| !found.contains(id))
                .map(|id| id.to_string())
                .collect();
            return Err(AppError::NotFound(format!(
                "Employees not found: {}",
                missing.join(", ")
            )));
        }

        let ineligible: Vec<String> = employees
            .iter()
            .filter(|e| !e.role.is_schedulable())
            .map(|e| format!("{} ({})", e.full_name(), e.role.as_str()))
            .collect();

        if !ineligible.is_empty() {
            return Err(AppError::BadRequest(format!(
                "Only STAFF and TECHNICIAN employees can be scheduled: {}",
                ineligible.join(", ")
            )));
        }

        Ok(employees)
    }

    async fn load_details(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<WorkScheduleDetailResponse>, AppError> {
        let rows: Vec<WorkScheduleDetail> = self.schedule_repo.find_details_by_ids(ids).await?;
        Ok(rows.into_iter().map(WorkScheduleDetailResponse::from).collect())
    }
}

fn check_capacity(shift: &Shift, existing: i64, attempted: usize) -> Result<(), AppError> {
    if existing + attempted as i64 > shift.maximum_slot as i64 {
        return Err(AppError::Conflict(format!(
            "Shift capacity exceeded: maximum {} slots, {} already assigned, attempted to add {}",
            shift.maximum_slot, existing, attempted
        )));
    }
    Ok(())
}

fn check_capacity_on(
    shift: &Shift,
    existing: i64,
    attempted: usize,
    date: NaiveDate,
) -> Result<(), AppError> {
    if existing + attempted as i64 > shift.maximum_slot as i64 {
        return Err(AppError::Conflict(format!(
            "Shift capacity exceeded on {}: maximum {} slots, {} already assigned, attempted to add {}",
            date, shift.maximum_slot, existing, attempted
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_expand_recurring_dates_mondays_and_wednesdays() {
        // 2025-01-06 es lunes; repeat [1, 3] = lunes y miércoles
        let dates = expand_recurring_dates(date(2025, 1, 6), date(2025, 1, 19), &[1, 3]);

        assert_eq!(
            dates,
            vec![
                date(2025, 1, 6),
                date(2025, 1, 8),
                date(2025, 1, 13),
                date(2025, 1, 15),
            ]
        );
    }

    #[test]
    fn test_expand_recurring_dates_inclusive_bounds() {
        // Inicio y fin caen en días de repetición
        let dates = expand_recurring_dates(date(2025, 1, 5), date(2025, 1, 12), &[0]);
        assert_eq!(dates, vec![date(2025, 1, 5), date(2025, 1, 12)]);
    }

    #[test]
    fn test_expand_recurring_dates_no_matches() {
        // Rango de tres días sin sábados
        let dates = expand_recurring_dates(date(2025, 1, 6), date(2025, 1, 8), &[6]);
        assert!(dates.is_empty());
    }

    #[test]
    fn test_expand_recurring_single_day_range() {
        let monday = date(2025, 1, 6);
        assert_eq!(expand_recurring_dates(monday, monday, &[1]), vec![monday]);
        assert!(expand_recurring_dates(monday, monday, &[2]).is_empty());
    }

    #[test]
    fn test_find_duplicate_ids() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        assert!(find_duplicate_ids(&[a, b]).is_empty());
        assert_eq!(find_duplicate_ids(&[a, b, a, a]), vec![a]);
    }

    fn sample_shift(maximum_slot: i32) -> Shift {
        Shift {
            id: Uuid::new_v4(),
            center_id: Uuid::new_v4(),
            name: "Turno de mañana".to_string(),
            start_time: chrono::NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            end_time: chrono::NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            start_date: None,
            end_date: None,
            repeat_days: None,
            maximum_slot,
            status: ShiftStatus::Active,
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_capacity_within_limit() {
        let shift = sample_shift(5);
        assert!(check_capacity(&shift, 3, 2).is_ok());
        assert!(check_capacity(&shift, 0, 5).is_ok());
    }

    #[test]
    fn test_capacity_exceeded_reports_numbers() {
        let shift = sample_shift(5);
        let result = check_capacity(&shift, 4, 3);

        match result {
            Err(AppError::Conflict(msg)) => {
                assert!(msg.contains("maximum 5"), "got: {}", msg);
                assert!(msg.contains("4 already assigned"), "got: {}", msg);
                assert!(msg.contains("add 3"), "got: {}", msg);
            }
            other => panic!("expected Conflict, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_capacity_exceeded_on_date_names_the_date() {
        let shift = sample_shift(2);
        let result = check_capacity_on(&shift, 2, 1, date(2025, 1, 8));

        match result {
            Err(AppError::Conflict(msg)) => {
                assert!(msg.contains("2025-01-08"), "got: {}", msg)
            }
            other => panic!("expected Conflict, got {:?}", other.map(|_| ())),
        }
    }
}
