use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;
use thiserror::Error;

use idreg_service::RegistryError;
use idreg_store::StoreError;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServerResult<T> = Result<T, ServerError>;

/// JSON error envelope returned on every failure path.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

fn registry_status(err: &RegistryError) -> StatusCode {
    match err {
        RegistryError::InvalidOwner(_) => StatusCode::BAD_REQUEST,
        RegistryError::NotFound(_) => StatusCode::NOT_FOUND,
        RegistryError::Unauthorized => StatusCode::UNAUTHORIZED,
        RegistryError::Suspended => StatusCode::SERVICE_UNAVAILABLE,
        RegistryError::Config(_)
        | RegistryError::Exhausted { .. }
        | RegistryError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            Self::Registry(err) => (registry_status(err), err.kind()),
            Self::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "configuration"),
            Self::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, "storage"),
            Self::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "io"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = ErrorBody {
            error: code.to_string(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
