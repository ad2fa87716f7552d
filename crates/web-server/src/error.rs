// In crates/web-server/src/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Failed to load trades: {0}")]
    Database(#[from] database::Error),
    #[error("Failed to bind server address: {0}")]
    ServerBindError(std::io::Error),
    #[error("Server stopped unexpectedly: {0}")]
    ServerError(std::io::Error),
}

impl From<core_types::Error> for Error {
    fn from(err: core_types::Error) -> Self {
        Error::BadRequest(err.to_string())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::BadRequest(_) => StatusCode::BAD_REQUEST,
            Error::Database(err) => {
                tracing::error!(error = %err, "Trade store request failed.");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Error::ServerBindError(_) | Error::ServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(serde_json::json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, Error>;
