use crate::models::account::AccountRole;
use crate::models::employee::{
    CreateEmployeeRequest, EmployeeResponse, UpdateEmployeeRequest,
};
use crate::repositories::account_repository::AccountRepository;
use crate::repositories::employee_repository::EmployeeRepository;
use crate::utils::errors::{not_found_error, AppError};
use bcrypt::{hash, DEFAULT_COST};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

pub struct EmployeeController {
    pool: PgPool,
    account_repo: AccountRepository,
    employee_repo: EmployeeRepository,
}

impl EmployeeController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            account_repo: AccountRepository::new(pool.clone()),
            employee_repo: EmployeeRepository::new(pool.clone()),
            pool,
        }
    }

    /// Crear la cuenta y el perfil del empleado en una sola transacción
    pub async fn create(&self, request: CreateEmployeeRequest) -> Result<EmployeeResponse, AppError> {
        request.validate()?;

        if request.role == AccountRole::Admin {
            return Err(AppError::BadRequest(
                "Employees must have role staff or technician".to_string(),
            ));
        }

        if self.account_repo.email_exists(&request.email).await? {
            return Err(AppError::Conflict(format!(
                "Account with email '{}' already exists",
                request.email
            )));
        }

        let password_hash = hash(&request.password, DEFAULT_COST)
            .map_err(|e| AppError::Internal(format!("Error hashing password: {}", e)))?;

        let mut tx = self.pool.begin().await?;

        let account = AccountRepository::create(
            &mut tx,
            Uuid::new_v4(),
            &request.email,
            &password_hash,
            request.role,
        )
        .await?;

        let employee = EmployeeRepository::create(
            &mut tx,
            Uuid::new_v4(),
            account.id,
            &request.first_name,
            &request.last_name,
            request.phone.as_deref(),
        )
        .await?;

        tx.commit().await?;

        tracing::info!("Empleado {} creado con rol {}", employee.full_name(), account.role.as_str());

        Ok(EmployeeResponse {
            id: employee.id,
            account_id: account.id,
            first_name: employee.first_name,
            last_name: employee.last_name,
            phone: employee.phone,
            email: account.email,
            role: account.role,
        })
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<EmployeeResponse, AppError> {
        let employee = self
            .employee_repo
            .find_detail_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Employee", &id.to_string()))?;

        Ok(EmployeeResponse::from(employee))
    }

    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<EmployeeResponse>, AppError> {
        let employees = self.employee_repo.list(limit.min(100), offset).await?;
        Ok(employees.into_iter().map(EmployeeResponse::from).collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateEmployeeRequest,
    ) -> Result<EmployeeResponse, AppError> {
        request.validate()?;

        let existing = self
            .employee_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Employee", &id.to_string()))?;

        let first_name = request.first_name.unwrap_or(existing.first_name);
        let last_name = request.last_name.unwrap_or(existing.last_name);
        let phone = request.phone.or(existing.phone);

        self.employee_repo
            .update(id, &first_name, &last_name, phone.as_deref())
            .await?;

        self.get_by_id(id).await
    }

    /// Borrar un empleado y su cuenta. Se rechaza mientras tenga
    /// asignaciones de horario registradas.
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let employee = self
            .employee_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Employee", &id.to_string()))?;

        if self.employee_repo.has_schedules(id).await? {
            return Err(AppError::Conflict(format!(
                "Employee {} has work schedule entries and cannot be deleted",
                employee.full_name()
            )));
        }

        self.employee_repo.delete(id).await?;
        self.account_repo.delete(employee.account_id).await?;

        Ok(())
    }
}
