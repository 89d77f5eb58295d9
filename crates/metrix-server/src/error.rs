use thiserror::Error;

use metrix_core::MetricsError;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("config: {0}")]
    Config(String),

    #[error("intensity must be a positive number")]
    InvalidIntensity(String),

    #[error("metrics: {0}")]
    Metrics(#[from] MetricsError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ServerError {
    pub fn client_code(&self) -> &'static str {
        match self {
            ServerError::Config(_) => "CONFIG",
            ServerError::InvalidIntensity(_) => "BAD_REQUEST",
            ServerError::Metrics(e) => e.client_code().as_str(),
            ServerError::Internal(_) => "INTERNAL",
        }
    }
}

// HTTP polish (non-metrics handlers).
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match self {
            ServerError::InvalidIntensity(_) => StatusCode::BAD_REQUEST,
            ServerError::Config(_) | ServerError::Metrics(_) | ServerError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let mut body = json!({
            "error": self.client_code(),
            "message": self.to_string(),
        });
        if let ServerError::InvalidIntensity(provided) = &self {
            body["provided"] = json!(provided);
        }
        (status, Json(body)).into_response()
    }
}
