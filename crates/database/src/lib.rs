// In crates/database/src/lib.rs

use app_config::types::DatabaseSettings;
use sqlx::{postgres::PgPoolOptions, PgPool};

pub mod error;
pub mod memory;
pub mod postgres;
pub mod report;
pub mod store;

// Re-export the most important types for easy access.
pub use error::{Error, Result};
pub use memory::MemoryStore;
pub use report::build_report;
pub use store::TradeStore;

/// A wrapper around the `sqlx` connection pool.
#[derive(Debug, Clone)]
pub struct Db(PgPool);

/// Establishes a connection pool to the PostgreSQL database and runs migrations.
///
/// # Arguments
///
/// * `settings`: The database configuration settings.
///
/// # Returns
///
/// A `Result` containing the `Db` wrapper on success, or an `Error` on failure.
pub async fn connect(settings: &DatabaseSettings) -> Result<Db> {
    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .connect(&settings.url)
        .await?;

    // Run database migrations. This ensures the database schema is up-to-date.
    sqlx::migrate!("../../migrations").run(&pool).await?;
    tracing::info!(max_connections = settings.max_connections, "Database connected and migrated.");

    Ok(Db(pool))
}

impl Db {
    pub fn pool(&self) -> &PgPool {
        &self.0
    }
}
