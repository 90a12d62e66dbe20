use crate::models::work_center::{WorkCenter, WorkCenterFilters};
use crate::utils::errors::AppError;
use chrono::NaiveDate;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

pub struct WorkCenterRepository {
    pool: PgPool,
}

impl WorkCenterRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Asignaciones existentes del par (empleado, centro), bloqueadas dentro
    /// de la transacción para serializar el chequeo de solapamiento.
    pub async fn find_for_pair_for_update(
        conn: &mut PgConnection,
        employee_id: Uuid,
        center_id: Uuid,
        exclude: Option<Uuid>,
    ) -> Result<Vec<WorkCenter>, AppError> {
        let result = sqlx::query_as::<_, WorkCenter>(
            r#"
            SELECT * FROM work_centers
            WHERE employee_id = $1 AND center_id = $2
            AND ($3::uuid IS NULL OR id <> $3)
            FOR UPDATE
            "#,
        )
        .bind(employee_id)
        .bind(center_id)
        .bind(exclude)
        .fetch_all(conn)
        .await?;

        Ok(result)
    }

    pub async fn create(
        conn: &mut PgConnection,
        id: Uuid,
        employee_id: Uuid,
        center_id: Uuid,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
    ) -> Result<WorkCenter, AppError> {
        let result = sqlx::query_as::<_, WorkCenter>(
            r#"
            INSERT INTO work_centers (id, employee_id, center_id, start_date, end_date, created_at)
            VALUES ($1, $2, $3, $4, $5, NOW())
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(employee_id)
        .bind(center_id)
        .bind(start_date)
        .bind(end_date)
        .fetch_one(conn)
        .await?;

        Ok(result)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<WorkCenter>, AppError> {
        let result = sqlx::query_as::<_, WorkCenter>("SELECT * FROM work_centers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(result)
    }

    pub async fn list(&self, filters: &WorkCenterFilters) -> Result<Vec<WorkCenter>, AppError> {
        let limit = filters.limit.unwrap_or(50).min(100);
        let offset = filters.offset.unwrap_or(0);

        let result = sqlx::query_as::<_, WorkCenter>(
            r#"
            SELECT * FROM work_centers
            WHERE ($1::uuid IS NULL OR employee_id = $1)
            AND ($2::uuid IS NULL OR center_id = $2)
            ORDER BY start_date DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(filters.employee_id)
        .bind(filters.center_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(result)
    }

    pub async fn update(
        conn: &mut PgConnection,
        id: Uuid,
        employee_id: Uuid,
        center_id: Uuid,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
    ) -> Result<WorkCenter, AppError> {
        let result = sqlx::query_as::<_, WorkCenter>(
            r#"
            UPDATE work_centers
            SET employee_id = $2, center_id = $3, start_date = $4, end_date = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(employee_id)
        .bind(center_id)
        .bind(start_date)
        .bind(end_date)
        .fetch_one(conn)
        .await?;

        Ok(result)
    }

    /// Baja lógica: fija end_date sin borrar la fila
    pub async fn set_end_date(&self, id: Uuid, end_date: NaiveDate) -> Result<WorkCenter, AppError> {
        let result = sqlx::query_as::<_, WorkCenter>(
            r#"
            UPDATE work_centers
            SET end_date = $2
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(end_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(result)
    }

    /// Centros con asignación vigente del empleado en una fecha
    pub async fn active_center_ids_for_employee(
        &self,
        employee_id: Uuid,
        on_date: NaiveDate,
    ) -> Result<Vec<Uuid>, AppError> {
        let rows: Vec<(Uuid,)> = sqlx::query_as(
            r#"
            SELECT center_id FROM work_centers
            WHERE employee_id = $1
            AND start_date <= $2
            AND (end_date IS NULL OR end_date >= $2)
            "#,
        )
        .bind(employee_id)
        .bind(on_date)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|(id,)| id).collect())
    }
}
