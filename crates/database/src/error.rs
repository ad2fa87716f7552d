// In crates/database/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to connect to the database")]
    ConnectionError(#[from] sqlx::Error),
    #[error("Database migration failed: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),
    #[error("Database operation failed")]
    OperationFailed(sqlx::Error),
    #[error("Trade {id} could not be read: {source}")]
    InvalidRow {
        id: String,
        #[source]
        source: core_types::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
