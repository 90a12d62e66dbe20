//! Servicio de asignaciones empleado-centro
//!
//! Mantiene el invariante de no-solapamiento: para un par (empleado, centro)
//! los rangos de fechas de sus asignaciones no pueden intersectarse. La baja
//! es siempre lógica (end_date = hoy en hora local), nunca física.

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::models::work_center::{
    CreateWorkCenterRequest, UpdateWorkCenterRequest, WorkCenter, WorkCenterFilters,
};
use crate::repositories::center_repository::CenterRepository;
use crate::repositories::employee_repository::EmployeeRepository;
use crate::repositories::work_center_repository::WorkCenterRepository;
use crate::services::authorization_service::Scope;
use crate::utils::errors::{field_validation_error, not_found_error, AppError};
use crate::utils::timezone::today_local;
use crate::utils::validation::validate_date;

/// Fin efectivo de las asignaciones sin end_date, para comparar intervalos
fn open_ended_sentinel() -> NaiveDate {
    NaiveDate::from_ymd_opt(2099, 12, 31).unwrap()
}

/// ¿Intersecta una asignación existente con el intervalo propuesto?
///
/// Intervalos cerrados [start, end]; un end ausente se trata como el
/// centinela de fin abierto.
pub fn overlaps(
    existing_start: NaiveDate,
    existing_end: Option<NaiveDate>,
    proposed_start: NaiveDate,
    proposed_end: Option<NaiveDate>,
) -> bool {
    let effective_proposed_end = proposed_end.unwrap_or_else(open_ended_sentinel);

    match existing_end {
        Some(end) => existing_start <= effective_proposed_end && proposed_start <= end,
        None => existing_start <= effective_proposed_end,
    }
}

pub struct WorkCenterService {
    pool: PgPool,
    work_center_repo: WorkCenterRepository,
    employee_repo: EmployeeRepository,
    center_repo: CenterRepository,
}

impl WorkCenterService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            work_center_repo: WorkCenterRepository::new(pool.clone()),
            employee_repo: EmployeeRepository::new(pool.clone()),
            center_repo: CenterRepository::new(pool.clone()),
            pool,
        }
    }

    /// Asignar un empleado a un centro, rechazando cualquier solapamiento
    /// con sus asignaciones existentes al mismo centro.
    pub async fn assign(&self, request: CreateWorkCenterRequest) -> Result<WorkCenter, AppError> {
        request.validate()?;

        let start_date = validate_date(&request.start_date)
            .map_err(|e| field_validation_error("start_date", e))?;
        let end_date = match request.end_date.as_deref() {
            Some(raw) => Some(validate_date(raw).map_err(|e| field_validation_error("end_date", e))?),
            None => None,
        };

        if let Some(end) = end_date {
            if start_date > end {
                return Err(AppError::BadRequest(format!(
                    "Assignment start_date {} must not be after end_date {}",
                    start_date, end
                )));
            }
        }

        let employee = self
            .employee_repo
            .find_detail_by_id(request.employee_id)
            .await?
            .ok_or_else(|| not_found_error("Employee", &request.employee_id.to_string()))?;

        let center = self
            .center_repo
            .find_by_id(request.center_id)
            .await?
            .ok_or_else(|| not_found_error("Service center", &request.center_id.to_string()))?;

        let mut tx = self.pool.begin().await?;

        let existing = WorkCenterRepository::find_for_pair_for_update(
            &mut tx,
            employee.id,
            center.id,
            None,
        )
        .await?;

        if let Some(conflict) = existing
            .iter()
            .find(|a| overlaps(a.start_date, a.end_date, start_date, end_date))
        {
            return Err(conflict_for(&employee.full_name(), conflict));
        }

        let created = WorkCenterRepository::create(
            &mut tx,
            Uuid::new_v4(),
            employee.id,
            center.id,
            start_date,
            end_date,
        )
        .await?;

        tx.commit().await?;

        tracing::info!(
            "Empleado {} asignado al centro {} desde {}",
            employee.full_name(),
            center.name,
            start_date
        );

        Ok(created)
    }

    /// Actualizar una asignación re-ejecutando el chequeo de solapamiento
    /// sobre los valores combinados, excluyendo la propia fila.
    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateWorkCenterRequest,
    ) -> Result<WorkCenter, AppError> {
        request.validate()?;

        let existing = self.get(id).await?;

        let employee_id = request.employee_id.unwrap_or(existing.employee_id);
        let center_id = request.center_id.unwrap_or(existing.center_id);
        let start_date = match request.start_date.as_deref() {
            Some(raw) => validate_date(raw).map_err(|e| field_validation_error("start_date", e))?,
            None => existing.start_date,
        };
        let end_date = match request.end_date.as_deref() {
            Some(raw) => Some(validate_date(raw).map_err(|e| field_validation_error("end_date", e))?),
            None => existing.end_date,
        };

        if let Some(end) = end_date {
            if start_date > end {
                return Err(AppError::BadRequest(format!(
                    "Assignment start_date {} must not be after end_date {}",
                    start_date, end
                )));
            }
        }

        let employee = self
            .employee_repo
            .find_detail_by_id(employee_id)
            .await?
            .ok_or_else(|| not_found_error("Employee", &employee_id.to_string()))?;

        self.center_repo
            .find_by_id(center_id)
            .await?
            .ok_or_else(|| not_found_error("Service center", &center_id.to_string()))?;

        let mut tx = self.pool.begin().await?;

        let others = WorkCenterRepository::find_for_pair_for_update(
            &mut tx,
            employee_id,
            center_id,
            Some(id),
        )
        .await?;

        if let Some(conflict) = others
            .iter()
            .find(|a| overlaps(a.start_date, a.end_date, start_date, end_date))
        {
            return Err(conflict_for(&employee.full_name(), conflict));
        }

        let updated = WorkCenterRepository::update(
            &mut tx,
            id,
            employee_id,
            center_id,
            start_date,
            end_date,
        )
        .await?;

        tx.commit().await?;

        Ok(updated)
    }

    /// Baja lógica de una asignación: fija end_date = hoy (hora local).
    /// Una asignación ya finalizada no puede finalizarse de nuevo.
    pub async fn end(&self, id: Uuid) -> Result<WorkCenter, AppError> {
        let existing = self.get(id).await?;
        let today = today_local();

        if let Some(end) = existing.end_date {
            if end <= today {
                return Err(AppError::BadRequest(format!(
                    "Assignment already ended on {}",
                    end
                )));
            }
        }

        self.work_center_repo.set_end_date(id, today).await
    }

    pub async fn get(&self, id: Uuid) -> Result<WorkCenter, AppError> {
        self.work_center_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Work center assignment", &id.to_string()))
    }

    /// Listar asignaciones respetando el scope de filas del llamador
    pub async fn list(
        &self,
        mut filters: WorkCenterFilters,
        scope: &Scope,
    ) -> Result<Vec<WorkCenter>, AppError> {
        match scope {
            Scope::All => {}
            Scope::OwnEmployee(employee_id) | Scope::OwnEmployeeAndCenters(employee_id) => {
                filters.employee_id = Some(*employee_id);
            }
        }

        self.work_center_repo.list(&filters).await
    }
}

fn conflict_for(employee_name: &str, conflict: &WorkCenter) -> AppError {
    let range_end = conflict
        .end_date
        .map(|d| d.to_string())
        .unwrap_or_else(|| "open-ended".to_string());

    AppError::Conflict(format!(
        "Employee {} already has an assignment to this center from {} to {}",
        employee_name, conflict.start_date, range_end
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_bounded_intervals_overlap() {
        // [ene, mar] contra [feb, abr]
        assert!(overlaps(
            date(2025, 1, 1),
            Some(date(2025, 3, 31)),
            date(2025, 2, 1),
            Some(date(2025, 4, 30)),
        ));
    }

    #[test]
    fn test_bounded_intervals_disjoint() {
        assert!(!overlaps(
            date(2025, 1, 1),
            Some(date(2025, 1, 31)),
            date(2025, 2, 1),
            Some(date(2025, 2, 28)),
        ));
    }

    #[test]
    fn test_touching_edges_overlap() {
        // Intervalos cerrados: compartir un día es solapamiento
        assert!(overlaps(
            date(2025, 1, 1),
            Some(date(2025, 1, 31)),
            date(2025, 1, 31),
            Some(date(2025, 2, 28)),
        ));
    }

    #[test]
    fn test_open_ended_existing_conflicts_with_later_bounded() {
        assert!(overlaps(
            date(2025, 1, 1),
            None,
            date(2026, 5, 1),
            Some(date(2026, 6, 1)),
        ));
    }

    #[test]
    fn test_bounded_existing_conflicts_with_open_ended_proposal() {
        // Propuesta sin fin que arranca antes de que termine la existente
        assert!(overlaps(
            date(2025, 6, 1),
            Some(date(2025, 12, 31)),
            date(2025, 1, 1),
            None,
        ));
    }

    #[test]
    fn test_open_ended_proposal_after_bounded_existing() {
        // La existente terminó antes del inicio propuesto: sin conflicto
        assert!(!overlaps(
            date(2024, 1, 1),
            Some(date(2024, 12, 31)),
            date(2025, 1, 1),
            None,
        ));
    }
}
