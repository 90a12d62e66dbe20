use crate::models::employee::{Employee, EmployeeDetail};
use crate::utils::errors::AppError;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

const DETAIL_QUERY: &str = r#"
    SELECT e.id, e.account_id, e.first_name, e.last_name, e.phone,
           a.email, a.role
    FROM employees e
    JOIN accounts a ON a.id = e.account_id
"#;

pub struct EmployeeRepository {
    pool: PgPool,
}

impl EmployeeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        conn: &mut PgConnection,
        id: Uuid,
        account_id: Uuid,
        first_name: &str,
        last_name: &str,
        phone: Option<&str>,
    ) -> Result<Employee, AppError> {
        let result = sqlx::query_as::<_, Employee>(
            r#"
            INSERT INTO employees (id, account_id, first_name, last_name, phone, created_at)
            VALUES ($1, $2, $3, $4, $5, NOW())
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(account_id)
        .bind(first_name)
        .bind(last_name)
        .bind(phone)
        .fetch_one(conn)
        .await?;

        Ok(result)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Employee>, AppError> {
        let result = sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(result)
    }

    pub async fn find_by_account_id(&self, account_id: Uuid) -> Result<Option<Employee>, AppError> {
        let result = sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE account_id = $1")
            .bind(account_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(result)
    }

    pub async fn find_detail_by_id(&self, id: Uuid) -> Result<Option<EmployeeDetail>, AppError> {
        let query = format!("{} WHERE e.id = $1", DETAIL_QUERY);
        let result = sqlx::query_as::<_, EmployeeDetail>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(result)
    }

    /// Buscar el detalle de varios empleados de una sola vez
    pub async fn find_details_by_ids(&self, ids: &[Uuid]) -> Result<Vec<EmployeeDetail>, AppError> {
        let query = format!("{} WHERE e.id = ANY($1)", DETAIL_QUERY);
        let result = sqlx::query_as::<_, EmployeeDetail>(&query)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;

        Ok(result)
    }

    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<EmployeeDetail>, AppError> {
        let query = format!(
            "{} ORDER BY e.created_at DESC LIMIT $1 OFFSET $2",
            DETAIL_QUERY
        );
        let result = sqlx::query_as::<_, EmployeeDetail>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(result)
    }

    pub async fn update(
        &self,
        id: Uuid,
        first_name: &str,
        last_name: &str,
        phone: Option<&str>,
    ) -> Result<Employee, AppError> {
        let result = sqlx::query_as::<_, Employee>(
            r#"
            UPDATE employees
            SET first_name = $2, last_name = $3, phone = $4
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(first_name)
        .bind(last_name)
        .bind(phone)
        .fetch_one(&self.pool)
        .await?;

        Ok(result)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn has_schedules(&self, id: Uuid) -> Result<bool, AppError> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM work_schedules WHERE employee_id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(result.0)
    }
}
