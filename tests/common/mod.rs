#![allow(dead_code)]

use std::collections::HashMap;
use std::env;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use actix_web::{App, body::MessageBody, dev::{ServiceFactory, ServiceRequest, ServiceResponse}, web};
use anyhow::{Result, anyhow};
use sqlx::PgPool;
use async_trait::async_trait;

use hrm::database::init_database;
use hrm::database::models::LeaveRequest;
use hrm::middleware::RequestIdMiddleware;
use hrm::routes;
use hrm::services::{
    ApprovedLeaveSource, EmploymentStatusLookup, FallbackStatusLookup, LeaveBalanceService,
};

// Test database wrapper. Needs a reachable Postgres named by
// TEST_DATABASE_URL (or DATABASE_URL). Tables are created as temporary
// tables on a single-connection pool, so nothing outlives the test and
// they shadow any real tables of the same name.
pub struct TestDb {
    pub pool: PgPool,
}

impl TestDb {
    pub async fn new() -> Result<Self> {
        let database_url = env::var("TEST_DATABASE_URL")
            .or_else(|_| env::var("DATABASE_URL"))
            .map_err(|_| anyhow!("TEST_DATABASE_URL is not set"))?;
        let pool = init_database(&database_url, 1).await?;

        for statement in [
            r#"
            CREATE TEMPORARY TABLE employees (
                id BIGSERIAL PRIMARY KEY,
                employee_code TEXT,
                username TEXT,
                employment_status TEXT
            )
            "#,
            r#"
            CREATE TEMPORARY TABLE employee_jobs (
                employee_id BIGINT NOT NULL,
                employment_status TEXT
            )
            "#,
            r#"
            CREATE TEMPORARY TABLE leave_requests (
                id BIGSERIAL PRIMARY KEY,
                employee_id BIGINT NOT NULL,
                leave_category TEXT NOT NULL,
                total_days INTEGER,
                status TEXT NOT NULL
            )
            "#,
        ] {
            sqlx::query(statement).execute(&pool).await?;
        }

        Ok(TestDb { pool })
    }

    /// Insert an employee and return its generated id.
    pub async fn insert_employee(
        &self,
        employee_code: &str,
        username: &str,
        employment_status: Option<&str>,
    ) -> Result<i64> {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO employees (employee_code, username, employment_status) \
             VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(employee_code)
        .bind(username)
        .bind(employment_status)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    pub async fn insert_job(&self, employee_id: i64, employment_status: Option<&str>) -> Result<()> {
        sqlx::query("INSERT INTO employee_jobs (employee_id, employment_status) VALUES ($1, $2)")
            .bind(employee_id)
            .bind(employment_status)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn insert_leave(
        &self,
        employee_id: i64,
        leave_category: &str,
        total_days: Option<i32>,
        status: &str,
    ) -> Result<()> {
        sqlx::query(
            "INSERT INTO leave_requests (employee_id, leave_category, total_days, status) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(employee_id)
        .bind(leave_category)
        .bind(total_days)
        .bind(status)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

/// In-memory stand-in for one employment-status table.
#[derive(Default)]
pub struct InMemoryStatusTable {
    statuses: HashMap<String, Option<String>>,
    pub calls: AtomicUsize,
    fail: bool,
}

impl InMemoryStatusTable {
    pub fn with_status(mut self, employee_id: &str, status: Option<&str>) -> Self {
        self.statuses
            .insert(employee_id.to_string(), status.map(str::to_string));
        self
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }
}

#[async_trait]
impl EmploymentStatusLookup for InMemoryStatusTable {
    async fn lookup_status(&self, employee_id: &str) -> Result<Option<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(anyhow!("connection refused"));
        }
        Ok(self.statuses.get(employee_id).cloned().flatten())
    }
}

/// In-memory leave-request table. Filters on status the way the SQL does.
#[derive(Default)]
pub struct InMemoryLeaveTable {
    rows: Vec<LeaveRequest>,
    pub calls: AtomicUsize,
}

impl InMemoryLeaveTable {
    pub fn with_leave(mut self, employee_id: &str, category: &str, days: &str, status: &str) -> Self {
        self.rows.push(LeaveRequest {
            id: (self.rows.len() + 1).to_string(),
            employee_id: employee_id.to_string(),
            leave_category: category.to_string(),
            total_days: Some(days.to_string()),
            status: status.to_string(),
        });
        self
    }
}

#[async_trait]
impl ApprovedLeaveSource for InMemoryLeaveTable {
    async fn approved_leaves(&self, employee_id: &str) -> Result<Vec<LeaveRequest>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .rows
            .iter()
            .filter(|row| row.employee_id == employee_id && row.is_approved())
            .cloned()
            .collect())
    }
}

/// Stores behind a service, kept around so tests can inspect call counts.
pub struct TestStores {
    pub employees: Arc<InMemoryStatusTable>,
    pub jobs: Arc<InMemoryStatusTable>,
    pub leaves: Arc<InMemoryLeaveTable>,
}

impl TestStores {
    pub fn new(
        employees: InMemoryStatusTable,
        jobs: InMemoryStatusTable,
        leaves: InMemoryLeaveTable,
    ) -> Self {
        Self {
            employees: Arc::new(employees),
            jobs: Arc::new(jobs),
            leaves: Arc::new(leaves),
        }
    }

    pub fn service(&self) -> LeaveBalanceService {
        let status_lookup = FallbackStatusLookup::new(self.employees.clone(), self.jobs.clone());
        LeaveBalanceService::new(Arc::new(status_lookup), self.leaves.clone())
    }

    pub fn total_calls(&self) -> usize {
        self.employees.calls.load(Ordering::SeqCst)
            + self.jobs.calls.load(Ordering::SeqCst)
            + self.leaves.calls.load(Ordering::SeqCst)
    }
}

/// Application wired the same way as the server binary.
pub fn create_app(
    service: LeaveBalanceService,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(service))
        .wrap(RequestIdMiddleware)
        .configure(routes::configure)
}

pub fn setup_test_env() {
    unsafe {
        env::set_var("RUST_LOG", "debug");
    }
    let _ = env_logger::builder().is_test(true).try_init();
}
