use crate::models::shift::{Shift, ShiftFilters, ShiftStatus};
use crate::utils::errors::AppError;
use chrono::{NaiveDate, NaiveTime};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

pub struct ShiftRepository {
    pool: PgPool,
}

#[allow(clippy::too_many_arguments)]
impl ShiftRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        id: Uuid,
        center_id: Uuid,
        name: &str,
        start_time: NaiveTime,
        end_time: NaiveTime,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        repeat_days: Option<&[i32]>,
        maximum_slot: i32,
    ) -> Result<Shift, AppError> {
        let result = sqlx::query_as::<_, Shift>(
            r#"
            INSERT INTO shifts (
                id, center_id, name, start_time, end_time,
                start_date, end_date, repeat_days, maximum_slot, status, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 'active', NOW())
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(center_id)
        .bind(name)
        .bind(start_time)
        .bind(end_time)
        .bind(start_date)
        .bind(end_date)
        .bind(repeat_days)
        .bind(maximum_slot)
        .fetch_one(&self.pool)
        .await?;

        Ok(result)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Shift>, AppError> {
        let result = sqlx::query_as::<_, Shift>("SELECT * FROM shifts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(result)
    }

    /// Buscar un turno bloqueando su fila dentro de la transacción.
    /// Serializa los chequeos de capacidad concurrentes sobre el mismo turno.
    pub async fn find_by_id_for_update(
        conn: &mut PgConnection,
        id: Uuid,
    ) -> Result<Option<Shift>, AppError> {
        let result = sqlx::query_as::<_, Shift>("SELECT * FROM shifts WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(conn)
            .await?;

        Ok(result)
    }

    pub async fn list(&self, filters: &ShiftFilters) -> Result<Vec<Shift>, AppError> {
        let limit = filters.limit.unwrap_or(50).min(100);
        let offset = filters.offset.unwrap_or(0);

        let result = sqlx::query_as::<_, Shift>(
            r#"
            SELECT * FROM shifts
            WHERE ($1::uuid IS NULL OR center_id = $1)
            AND ($2::shift_status IS NULL OR status = $2)
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(filters.center_id)
        .bind(filters.status)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(result)
    }

    pub async fn update(
        &self,
        id: Uuid,
        center_id: Uuid,
        name: &str,
        start_time: NaiveTime,
        end_time: NaiveTime,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        repeat_days: Option<&[i32]>,
        maximum_slot: i32,
        status: ShiftStatus,
    ) -> Result<Shift, AppError> {
        let result = sqlx::query_as::<_, Shift>(
            r#"
            UPDATE shifts
            SET center_id = $2, name = $3, start_time = $4, end_time = $5,
                start_date = $6, end_date = $7, repeat_days = $8,
                maximum_slot = $9, status = $10
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(center_id)
        .bind(name)
        .bind(start_time)
        .bind(end_time)
        .bind(start_date)
        .bind(end_date)
        .bind(repeat_days)
        .bind(maximum_slot)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        Ok(result)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM shifts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn name_exists_in_center(
        &self,
        center_id: Uuid,
        name: &str,
        exclude: Option<Uuid>,
    ) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM shifts
                WHERE center_id = $1 AND name = $2
                AND ($3::uuid IS NULL OR id <> $3)
            )
            "#,
        )
        .bind(center_id)
        .bind(name)
        .bind(exclude)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    pub async fn has_schedules(&self, id: Uuid) -> Result<bool, AppError> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM work_schedules WHERE shift_id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(result.0)
    }
}
