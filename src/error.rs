//! Error taxonomy shared by the stores, services, and REST layer.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Referenced app or resource does not exist. Maps to 404.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Malformed review input. Rejected before any write. Maps to 400.
    #[error("{0}")]
    Validation(String),

    /// Underlying store failure or constraint violation. Maps to 500.
    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Error::NotFound(what) => (StatusCode::NOT_FOUND, format!("{what} not found")),
            Error::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Error::Storage(e) => {
                tracing::error!(err = %e, "store operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };
        (status, Json(json!({ "message": message }))).into_response()
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_the_resource() {
        let e = Error::NotFound("App");
        assert_eq!(e.to_string(), "App not found");
    }

    #[test]
    fn validation_keeps_its_message() {
        let e = Error::validation("rating must be between 1 and 5");
        assert_eq!(e.to_string(), "rating must be between 1 and 5");
    }
}
