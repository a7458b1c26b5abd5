use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use verconf_protocol::{ErrorBody, ProtocolError};
use verconf_store::StoreError;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// Unknown configuration on an endpoint that reports it as a bad request.
    #[error("config not found: {0}")]
    UnknownConfig(String),

    #[error("invalid json: {0}")]
    InvalidJson(String),

    #[error("request body too large: {0}")]
    PayloadTooLarge(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServerResult<T> = Result<T, ServerError>;

impl ServerError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Store(err) => match err {
                StoreError::Validation(_) | StoreError::InvalidVersion { .. } => {
                    StatusCode::BAD_REQUEST
                }
                StoreError::NotFound(_) | StoreError::VersionNotFound { .. } => {
                    StatusCode::NOT_FOUND
                }
                StoreError::AlreadyExists(_) => StatusCode::CONFLICT,
                StoreError::Model(_) | StoreError::LockPoisoned => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Protocol(_) | Self::UnknownConfig(_) | Self::InvalidJson(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Config(_) | Self::Io(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Stable machine-readable code carried in the error body.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Store(err) => match err {
                StoreError::Validation(_) => "validation_error",
                StoreError::NotFound(_) => "not_found",
                StoreError::AlreadyExists(_) => "already_exists",
                StoreError::InvalidVersion { .. } => "invalid_version",
                StoreError::VersionNotFound { .. } => "version_not_found",
                StoreError::Model(_) | StoreError::LockPoisoned => "internal_error",
            },
            Self::Protocol(ProtocolError::MissingName) => "name_required",
            Self::Protocol(ProtocolError::InvalidVersionFormat(_)) => "invalid_version_format",
            Self::UnknownConfig(_) => "not_found",
            Self::InvalidJson(_) => "invalid_json",
            Self::PayloadTooLarge(_) => "payload_too_large",
            Self::Config(_) | Self::Io(_) | Self::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::warn!(code = self.code(), error = %self, "request rejected");
        }
        (status, Json(ErrorBody::new(self.code(), self.to_string()))).into_response()
    }
}
