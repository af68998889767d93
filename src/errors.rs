use crate::word::WordError;
use axum::http::StatusCode;
use thiserror::Error;

/// Faults raised by the key-value backing store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to access storage file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize storage payload: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        tracing::error!("storage failure: {err}");
        Self::internal(err)
    }
}

impl From<WordError> for AppError {
    fn from(err: WordError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
