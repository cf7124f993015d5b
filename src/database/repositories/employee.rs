use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::utils::sql;
use crate::services::leave_balance::EmploymentStatusLookup;

const EMPLOYEE_STATUS_QUERY: &str = r#"
    SELECT
        employment_status
    FROM
        employees
    WHERE
        employee_code = ?
        OR id::text = ?
        OR username = ?
    LIMIT
        1
"#;

const JOB_STATUS_QUERY: &str = r#"
    SELECT
        employment_status
    FROM
        employee_jobs
    WHERE
        employee_id::text = ?
    LIMIT
        1
"#;

/// Primary employee table. An identifier can be an employee code, the
/// numeric id or a username.
#[derive(Clone)]
pub struct EmployeeRepository {
    pool: PgPool,
}

impl EmployeeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Employment status of the first matching employee. `None` when no
    /// employee matches or the matching row has no status.
    pub async fn find_employment_status(&self, employee_id: &str) -> Result<Option<String>> {
        let status = sqlx::query_scalar::<_, Option<String>>(&sql(EMPLOYEE_STATUS_QUERY))
            .bind(employee_id)
            .bind(employee_id)
            .bind(employee_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(status.flatten())
    }
}

#[async_trait]
impl EmploymentStatusLookup for EmployeeRepository {
    async fn lookup_status(&self, employee_id: &str) -> Result<Option<String>> {
        self.find_employment_status(employee_id).await
    }
}

/// Per-employee job records, consulted when the employee table has no status.
#[derive(Clone)]
pub struct EmployeeJobRepository {
    pool: PgPool,
}

impl EmployeeJobRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_employment_status(&self, employee_id: &str) -> Result<Option<String>> {
        let status = sqlx::query_scalar::<_, Option<String>>(&sql(JOB_STATUS_QUERY))
            .bind(employee_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(status.flatten())
    }
}

#[async_trait]
impl EmploymentStatusLookup for EmployeeJobRepository {
    async fn lookup_status(&self, employee_id: &str) -> Result<Option<String>> {
        self.find_employment_status(employee_id).await
    }
}
