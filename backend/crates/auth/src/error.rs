//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, envelope::ErrorEnvelope, kind::ErrorKind};
use platform::firebase::FirebaseError;
use platform::password::PasswordPolicyError;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Rejected or failed inside the authentication service
    #[error(transparent)]
    Backend(FirebaseError),

    /// Sign-in succeeded but no identity could be resolved
    #[error("User is not found")]
    UserNotFound,

    /// Sign-up answered without a user record
    #[error("User credential not found after registration.")]
    MissingCredential,

    #[error("No user is currently authenticated")]
    NoCurrentUser,

    /// Session state did not become known in time
    #[error("Timed out waiting for the session to resolve")]
    SessionUnresolved,

    #[error("{0}")]
    InvalidEmail(String),

    #[error(transparent)]
    PasswordPolicy(#[from] PasswordPolicyError),

    #[error("Passwords do not match")]
    PasswordMismatch,
}

impl AuthError {
    /// Stable code (`auth/...`) when the service supplied one
    pub fn code(&self) -> Option<&str> {
        match self {
            AuthError::Backend(e) => e.code(),
            _ => None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Backend(e) => e.kind(),
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::MissingCredential => ErrorKind::BadGateway,
            AuthError::NoCurrentUser => ErrorKind::Unauthorized,
            AuthError::SessionUnresolved => ErrorKind::RequestTimeout,
            AuthError::InvalidEmail(_)
            | AuthError::PasswordPolicy(_)
            | AuthError::PasswordMismatch => ErrorKind::BadRequest,
        }
    }

    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// `{name, message}` for the frontend
    pub fn to_envelope(&self, name: &str) -> ErrorEnvelope {
        ErrorEnvelope::from_error(name, self)
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            AuthError::Backend(e) if e.kind().is_server_error() => {
                tracing::error!(error = %e, code = ?e.code(), "Auth backend error");
            }
            AuthError::Backend(e) => {
                tracing::warn!(error = %e, code = ?e.code(), "Auth backend rejected request");
            }
            AuthError::MissingCredential => {
                tracing::error!("Sign-up returned no user record");
            }
            AuthError::SessionUnresolved => {
                tracing::warn!("Session resolution timed out");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl From<FirebaseError> for AuthError {
    fn from(err: FirebaseError) -> Self {
        match err {
            FirebaseError::NoCurrentUser => AuthError::NoCurrentUser,
            FirebaseError::Timeout => AuthError::SessionUnresolved,
            other => AuthError::Backend(other),
        }
    }
}

/// E-mail validation rejections
impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        AuthError::InvalidEmail(err.message().to_string())
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
