use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware::Logger, web};
use anyhow::Result;

use hrm::database::{
    init_database,
    repositories::{EmployeeJobRepository, EmployeeRepository, LeaveRequestRepository},
};
use hrm::middleware::RequestIdMiddleware;
use hrm::routes;
use hrm::services::{FallbackStatusLookup, LeaveBalanceService};
use hrm::Config;

#[actix_web::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logger
    env_logger::init();

    println!("🚀 Starting HRM API server...");

    // Load configuration
    let config = Config::from_env()?;
    println!(
        "📋 Configuration loaded (environment: {})",
        config.environment
    );

    // Initialize database
    let pool = init_database(&config.database_url, config.database_max_connections).await?;
    println!("✅ Database initialized");

    // Initialize repositories and services
    let status_lookup = FallbackStatusLookup::new(
        Arc::new(EmployeeRepository::new(pool.clone())),
        Arc::new(EmployeeJobRepository::new(pool.clone())),
    );
    let leave_balance_service = LeaveBalanceService::new(
        Arc::new(status_lookup),
        Arc::new(LeaveRequestRepository::new(pool.clone())),
    );

    let leave_balance_service_data = web::Data::new(leave_balance_service);

    let server_address = config.server_address();
    println!("🌐 Server starting on http://{}", server_address);

    // Start HTTP server
    HttpServer::new(move || {
        App::new()
            .app_data(leave_balance_service_data.clone())
            .wrap(
                Cors::default()
                    .allowed_origin(&config.client_base_url)
                    .allowed_methods(vec!["GET", "OPTIONS"])
                    .allowed_headers(vec![
                        "Content-Type",
                        "Accept",
                        "X-Requested-With",
                        "X-Correlation-ID",
                    ])
                    .max_age(3600),
            )
            .wrap(RequestIdMiddleware)
            .wrap(Logger::new(
                r#"%a "%r" %s %b "%{Referer}i" "%{User-Agent}i" %T correlation_id=%{x-correlation-id}o"#,
            ))
            .configure(routes::configure)
    })
    .bind(&server_address)?
    .run()
    .await
    .map_err(|e| anyhow::anyhow!("Server error: {}", e))
}
