use crate::models::service_center::{CenterFilters, CenterStatus, ServiceCenter};
use crate::utils::errors::AppError;
use sqlx::PgPool;
use uuid::Uuid;

pub struct CenterRepository {
    pool: PgPool,
}

impl CenterRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        id: Uuid,
        name: &str,
        address: &str,
    ) -> Result<ServiceCenter, AppError> {
        let result = sqlx::query_as::<_, ServiceCenter>(
            r#"
            INSERT INTO service_centers (id, name, address, status, created_at)
            VALUES ($1, $2, $3, 'open', NOW())
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(address)
        .fetch_one(&self.pool)
        .await?;

        Ok(result)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<ServiceCenter>, AppError> {
        let result =
            sqlx::query_as::<_, ServiceCenter>("SELECT * FROM service_centers WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(result)
    }

    pub async fn list(&self, filters: &CenterFilters) -> Result<Vec<ServiceCenter>, AppError> {
        let limit = filters.limit.unwrap_or(50).min(100);
        let offset = filters.offset.unwrap_or(0);

        let result = sqlx::query_as::<_, ServiceCenter>(
            r#"
            SELECT * FROM service_centers
            WHERE ($1::center_status IS NULL OR status = $1)
            AND ($2::text IS NULL OR name ILIKE '%' || $2 || '%')
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(filters.status)
        .bind(filters.name.as_deref())
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(result)
    }

    pub async fn update(
        &self,
        id: Uuid,
        name: &str,
        address: &str,
        status: CenterStatus,
    ) -> Result<ServiceCenter, AppError> {
        let result = sqlx::query_as::<_, ServiceCenter>(
            r#"
            UPDATE service_centers
            SET name = $2, address = $3, status = $4
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(address)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        Ok(result)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM service_centers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn name_exists(&self, name: &str, exclude: Option<Uuid>) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM service_centers
                WHERE name = $1 AND ($2::uuid IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(name)
        .bind(exclude)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    pub async fn has_shifts(&self, id: Uuid) -> Result<bool, AppError> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM shifts WHERE center_id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(result.0)
    }
}
