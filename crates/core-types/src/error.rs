// In crates/core-types/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Unknown trade direction: {0}")]
    InvalidDirection(String),

    #[error("Unknown trading session: {0}")]
    InvalidSession(String),

    #[error("Unknown trade status: {0}")]
    InvalidStatus(String),

    #[error("Unknown trade outcome: {0} (expected `win` or `loss`)")]
    InvalidOutcome(String),
}

pub type Result<T> = std::result::Result<T, Error>;
