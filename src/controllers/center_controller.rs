use crate::models::service_center::{
    CenterFilters, CenterResponse, CreateCenterRequest, UpdateCenterRequest,
};
use crate::repositories::center_repository::CenterRepository;
use crate::utils::errors::{conflict_error, not_found_error, AppError};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

pub struct CenterController {
    repository: CenterRepository,
}

impl CenterController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: CenterRepository::new(pool),
        }
    }

    pub async fn create(&self, request: CreateCenterRequest) -> Result<CenterResponse, AppError> {
        request.validate()?;

        if self.repository.name_exists(&request.name, None).await? {
            return Err(conflict_error("Service center", "name", &request.name));
        }

        let center = self
            .repository
            .create(Uuid::new_v4(), &request.name, &request.address)
            .await?;

        tracing::info!("Centro de servicio '{}' creado", center.name);

        Ok(CenterResponse::from(center))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<CenterResponse, AppError> {
        let center = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Service center", &id.to_string()))?;

        Ok(CenterResponse::from(center))
    }

    pub async fn list(&self, filters: CenterFilters) -> Result<Vec<CenterResponse>, AppError> {
        let centers = self.repository.list(&filters).await?;
        Ok(centers.into_iter().map(CenterResponse::from).collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateCenterRequest,
    ) -> Result<CenterResponse, AppError> {
        request.validate()?;

        let existing = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Service center", &id.to_string()))?;

        let name = request.name.unwrap_or_else(|| existing.name.clone());
        if name != existing.name && self.repository.name_exists(&name, Some(id)).await? {
            return Err(conflict_error("Service center", "name", &name));
        }

        let address = request.address.unwrap_or(existing.address);
        let status = request.status.unwrap_or(existing.status);

        let center = self.repository.update(id, &name, &address, status).await?;

        Ok(CenterResponse::from(center))
    }

    /// Borrar un centro. Se rechaza mientras tenga turnos definidos.
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let center = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Service center", &id.to_string()))?;

        if self.repository.has_shifts(id).await? {
            return Err(AppError::Conflict(format!(
                "Service center '{}' has shifts and cannot be deleted",
                center.name
            )));
        }

        self.repository.delete(id).await
    }
}
