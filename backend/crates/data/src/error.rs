//! Data Error Types
//!
//! Backend failures pass through unchanged (same message, same kind); the
//! other variants cover what is rejected before any backend call.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::firebase::FirebaseError;
use thiserror::Error;

/// Data-specific result type alias
pub type DataResult<T> = Result<T, DataError>;

#[derive(Debug, Error)]
pub enum DataError {
    #[error(transparent)]
    Backend(#[from] FirebaseError),

    #[error("Document {resource}/{id} not found")]
    NotFound { resource: String, id: String },

    #[error("Invalid resource: {0}")]
    InvalidResource(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),
}

impl DataError {
    pub fn not_found(resource: impl Into<String>, id: impl Into<String>) -> Self {
        DataError::NotFound {
            resource: resource.into(),
            id: id.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            DataError::Backend(e) => e.kind(),
            DataError::NotFound { .. } => ErrorKind::NotFound,
            DataError::InvalidResource(_) | DataError::InvalidQuery(_) => ErrorKind::BadRequest,
        }
    }

    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            DataError::Backend(e) if e.kind().is_server_error() => {
                tracing::error!(error = %e, code = ?e.code(), "Firestore error");
            }
            DataError::Backend(e) => {
                tracing::warn!(error = %e, code = ?e.code(), "Firestore rejected request");
            }
            _ => {
                tracing::debug!(error = %self, "Data error");
            }
        }
    }
}

impl IntoResponse for DataError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_error_is_not_reworded() {
        let backend = FirebaseError::Api {
            status: 403,
            code: "PERMISSION_DENIED".to_string(),
            message: "Missing or insufficient permissions.".to_string(),
        };
        let expected = backend.to_string();
        let err = DataError::from(backend);

        assert_eq!(err.to_string(), expected);
        assert_eq!(err.kind(), ErrorKind::Forbidden);
    }

    #[test]
    fn test_local_rejections_are_bad_requests() {
        assert_eq!(
            DataError::InvalidResource("a/b".into()).to_app_error().status_code(),
            400
        );
        assert_eq!(DataError::not_found("todos", "x").kind(), ErrorKind::NotFound);
    }
}
