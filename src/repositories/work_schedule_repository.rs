use crate::dto::schedule_dto::WorkScheduleDetail;
use crate::models::work_schedule::{WorkSchedule, WorkScheduleFilters};
use crate::utils::errors::AppError;
use chrono::NaiveDate;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

const DETAIL_QUERY: &str = r#"
    SELECT ws.id, ws.date, ws.employee_id, e.first_name, e.last_name, a.role,
           ws.shift_id, s.name AS shift_name, s.start_time, s.end_time,
           c.id AS center_id, c.name AS center_name
    FROM work_schedules ws
    JOIN employees e ON e.id = ws.employee_id
    JOIN accounts a ON a.id = e.account_id
    JOIN shifts s ON s.id = ws.shift_id
    JOIN service_centers c ON c.id = s.center_id
"#;

pub struct WorkScheduleRepository {
    pool: PgPool,
}

impl WorkScheduleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn count_for_shift_date(
        conn: &mut PgConnection,
        shift_id: Uuid,
        date: NaiveDate,
    ) -> Result<i64, AppError> {
        let result: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM work_schedules WHERE shift_id = $1 AND date = $2")
                .bind(shift_id)
                .bind(date)
                .fetch_one(conn)
                .await?;

        Ok(result.0)
    }

    pub async fn find_for_shift_date(
        conn: &mut PgConnection,
        shift_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<WorkSchedule>, AppError> {
        let result = sqlx::query_as::<_, WorkSchedule>(
            "SELECT * FROM work_schedules WHERE shift_id = $1 AND date = $2",
        )
        .bind(shift_id)
        .bind(date)
        .fetch_all(conn)
        .await?;

        Ok(result)
    }

    /// Asignaciones ya persistidas de un turno dentro de un rango de fechas
    pub async fn find_for_shift_in_range(
        conn: &mut PgConnection,
        shift_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<WorkSchedule>, AppError> {
        let result = sqlx::query_as::<_, WorkSchedule>(
            "SELECT * FROM work_schedules WHERE shift_id = $1 AND date BETWEEN $2 AND $3",
        )
        .bind(shift_id)
        .bind(from)
        .bind(to)
        .fetch_all(conn)
        .await?;

        Ok(result)
    }

    pub async fn insert(
        conn: &mut PgConnection,
        id: Uuid,
        employee_id: Uuid,
        shift_id: Uuid,
        date: NaiveDate,
    ) -> Result<WorkSchedule, AppError> {
        let result = sqlx::query_as::<_, WorkSchedule>(
            r#"
            INSERT INTO work_schedules (id, employee_id, shift_id, date, created_at)
            VALUES ($1, $2, $3, $4, NOW())
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(employee_id)
        .bind(shift_id)
        .bind(date)
        .fetch_one(conn)
        .await?;

        Ok(result)
    }

    pub async fn delete_for_shift_date(
        conn: &mut PgConnection,
        shift_id: Uuid,
        date: NaiveDate,
        employee_ids: &[Uuid],
    ) -> Result<u64, AppError> {
        let result = sqlx::query(
            "DELETE FROM work_schedules WHERE shift_id = $1 AND date = $2 AND employee_id = ANY($3)",
        )
        .bind(shift_id)
        .bind(date)
        .bind(employee_ids)
        .execute(conn)
        .await?;

        Ok(result.rows_affected())
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<WorkSchedule>, AppError> {
        let result = sqlx::query_as::<_, WorkSchedule>("SELECT * FROM work_schedules WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(result)
    }

    pub async fn delete(&self, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM work_schedules WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn find_details_by_ids(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<WorkScheduleDetail>, AppError> {
        let query = format!("{} WHERE ws.id = ANY($1) ORDER BY ws.date, e.last_name", DETAIL_QUERY);
        let result = sqlx::query_as::<_, WorkScheduleDetail>(&query)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;

        Ok(result)
    }

    /// Listado con detalle, restringido por el scope de filas del llamador:
    /// un empleado concreto y/o los centros que puede consultar.
    pub async fn list_details(
        &self,
        filters: &WorkScheduleFilters,
        scope_employee: Option<Uuid>,
        scope_centers: Option<&[Uuid]>,
    ) -> Result<Vec<WorkScheduleDetail>, AppError> {
        let limit = filters.limit.unwrap_or(50).min(200);
        let offset = filters.offset.unwrap_or(0);

        let query = format!(
            r#"{}
            WHERE ($1::uuid IS NULL OR ws.shift_id = $1)
            AND ($2::uuid IS NULL OR ws.employee_id = $2)
            AND ($3::date IS NULL OR ws.date >= $3)
            AND ($4::date IS NULL OR ws.date <= $4)
            AND (($5::uuid IS NULL AND $6::uuid[] IS NULL)
                 OR ws.employee_id = $5
                 OR c.id = ANY($6))
            ORDER BY ws.date, s.start_time, e.last_name
            LIMIT $7 OFFSET $8
            "#,
            DETAIL_QUERY
        );

        let result = sqlx::query_as::<_, WorkScheduleDetail>(&query)
            .bind(filters.shift_id)
            .bind(filters.employee_id)
            .bind(filters.date_from)
            .bind(filters.date_to)
            .bind(scope_employee)
            .bind(scope_centers)
            .fetch_all(&self.pool)
            .await?;

        Ok(result)
    }
}
