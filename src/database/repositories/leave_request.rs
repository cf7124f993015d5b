use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::{
    models::{APPROVED_STATUS, LeaveRequest},
    utils::sql,
};
use crate::services::leave_balance::ApprovedLeaveSource;

const LEAVES_BY_EMPLOYEE_AND_STATUS_QUERY: &str = r#"
    SELECT
        id::text AS id,
        employee_id::text AS employee_id,
        leave_category,
        total_days::text AS total_days,
        status
    FROM
        leave_requests
    WHERE
        employee_id::text = ?
        AND status = ?
    ORDER BY
        leave_requests.id
"#;

#[derive(Clone)]
pub struct LeaveRequestRepository {
    pool: PgPool,
}

impl LeaveRequestRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All leave requests for an employee with the given status, oldest first.
    /// The employee id is compared as text so rows keyed by a numeric column
    /// match the same identifier as rows keyed by a string column.
    pub async fn find_by_employee_and_status(
        &self,
        employee_id: &str,
        status: &str,
    ) -> Result<Vec<LeaveRequest>> {
        let requests =
            sqlx::query_as::<_, LeaveRequest>(&sql(LEAVES_BY_EMPLOYEE_AND_STATUS_QUERY))
                .bind(employee_id)
                .bind(status)
                .fetch_all(&self.pool)
                .await?;

        Ok(requests)
    }
}

#[async_trait]
impl ApprovedLeaveSource for LeaveRequestRepository {
    async fn approved_leaves(&self, employee_id: &str) -> Result<Vec<LeaveRequest>> {
        self.find_by_employee_and_status(employee_id, APPROVED_STATUS)
            .await
    }
}
