use axum::{
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::response::{ApiResponse, Meta};

/// Failures of the catalogue pipeline and its data source.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogueError {
    #[error("Catalogue data unavailable: {0}")]
    DataUnavailable(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Catalogue runtime stopped")]
    Closed,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not Found")]
    NotFound,

    #[error("Too Many Requests")]
    TooManyRequests { retry_after_secs: u64 },

    #[error("Service Unavailable")]
    Unavailable(#[from] CatalogueError),
}

#[derive(Serialize)]
struct ErrorData {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, detail) = match &self {
            AppError::NotFound => (StatusCode::NOT_FOUND, self.to_string(), self.to_string()),
            AppError::TooManyRequests { .. } => {
                (StatusCode::TOO_MANY_REQUESTS, self.to_string(), self.to_string())
            }
            AppError::Unavailable(err) => {
                tracing::warn!(error = %err, "catalogue source failed");
                (StatusCode::SERVICE_UNAVAILABLE, self.to_string(), err.to_string())
            }
        };

        let body = ApiResponse {
            message,
            data: Some(ErrorData { error: detail }),
            meta: Some(Meta::empty()),
        };

        let mut response = (status, axum::Json(body)).into_response();
        if let AppError::TooManyRequests { retry_after_secs } = self {
            if let Ok(value) = HeaderValue::from_str(&retry_after_secs.to_string()) {
                response.headers_mut().insert(header::RETRY_AFTER, value);
            }
        }
        response
    }
}

pub type AppResult<T> = Result<T, AppError>;
