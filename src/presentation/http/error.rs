use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::errors::ServiceError;

/// Body of every non-2xx answer.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub status_code: u16,
    pub error: String,
    pub message: String,
}

pub(crate) fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    let body = ErrorBody {
        status_code: status.as_u16(),
        error: status.canonical_reason().unwrap_or("Error").to_string(),
        message: message.into(),
    };
    (status, Json(body)).into_response()
}

pub(crate) fn status_of(err: &ServiceError) -> StatusCode {
    match err {
        ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        ServiceError::Conflict(_) => StatusCode::CONFLICT,
        ServiceError::BadRequest(_) => StatusCode::BAD_REQUEST,
        ServiceError::Forbidden(_) => StatusCode::FORBIDDEN,
        ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = status_of(&self);
        match self {
            ServiceError::Internal(e) => {
                tracing::error!(error = ?e, "request_failed");
                error_response(status, "Internal server error")
            }
            other => error_response(status, other.to_string()),
        }
    }
}

pub type ApiResult<T> = Result<T, ServiceError>;
