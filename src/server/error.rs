//! Mapping of service failures onto HTTP responses

use super::models::ErrorBody;
use crate::analysis::ServiceError;
use crate::repo::FetchError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{error, warn};

/// An error response: a status code and a human-readable detail
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        let status = match &err {
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::Fetch(FetchError::Unauthorized) => StatusCode::UNAUTHORIZED,
            ServiceError::Fetch(FetchError::NotFound) => StatusCode::NOT_FOUND,
            ServiceError::Fetch(FetchError::Upstream { .. }) => StatusCode::BAD_GATEWAY,
            ServiceError::Fetch(FetchError::Transport(_))
            | ServiceError::Backend(_)
            | ServiceError::Parse(_)
            | ServiceError::EmptyResponse => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = self.status.as_u16(), "{}", self.detail);
        } else {
            warn!(status = self.status.as_u16(), "{}", self.detail);
        }

        (self.status, Json(ErrorBody { detail: self.detail })).into_response()
    }
}
