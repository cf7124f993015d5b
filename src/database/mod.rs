use anyhow::Result;
use sqlx::{PgPool, postgres::PgPoolOptions};

pub mod models;
pub mod repositories;
pub mod utils;

/// Connect to the HR database. The schema is owned by the wider HRM system;
/// this service only reads from it.
pub async fn init_database(database_url: &str, max_connections: u32) -> Result<PgPool> {
    println!("Connecting to database...");

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    println!("Database connection pool ready ({} max connections)", max_connections);

    Ok(pool)
}
