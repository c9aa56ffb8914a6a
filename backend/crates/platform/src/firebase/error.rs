//! Firebase Error Types
//!
//! Every failure of the REST bindings is a `FirebaseError`. Service
//! failures keep the HTTP status and a stable code (`auth/...` for the
//! authentication APIs, the canonical Google status for Firestore) so the
//! adapters can surface them unchanged.

use kernel::error::app_error::AppError;
use kernel::error::kind::ErrorKind;
use serde::Deserialize;
use thiserror::Error;

use crate::crypto::TokenDecodeError;

#[derive(Debug, Error)]
pub enum FirebaseError {
    /// The service answered with an error body
    #[error("{message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    #[error("Failed to reach the backend: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected backend response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("No user is currently authenticated")]
    NoCurrentUser,

    #[error("Timed out waiting for the authentication state to resolve")]
    Timeout,

    #[error("Firebase app has not been initialized")]
    NotInitialized,

    #[error("Firebase app is already initialized with a different configuration")]
    AlreadyInitialized,

    #[error("Invalid ID token: {0}")]
    InvalidToken(#[from] TokenDecodeError),

    #[error("Session persistence failed: {0}")]
    Persistence(#[from] std::io::Error),

    #[error("Invalid Firebase configuration: {0}")]
    Config(String),
}

/// Which API family produced an error body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Service {
    Auth,
    Firestore,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: Option<String>,
}

impl FirebaseError {
    /// Firestore-style "not found" error for a document path
    pub fn document_not_found(name: &str) -> Self {
        FirebaseError::Api {
            status: 404,
            code: "NOT_FOUND".to_string(),
            message: format!("No document to update: {name}"),
        }
    }

    /// Build an error from a non-2xx response body
    pub(crate) fn from_error_body(status: u16, body: &str, service: Service) -> Self {
        // runQuery streams errors inside a one-element array
        let detail = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .map(|value| match value {
                serde_json::Value::Array(items) => {
                    items.into_iter().next().unwrap_or(serde_json::Value::Null)
                }
                other => other,
            })
            .and_then(|value| serde_json::from_value::<ErrorBody>(value).ok())
            .map(|b| b.error);

        match (detail, service) {
            (Some(detail), Service::Auth) => from_identity_message(status, &detail.message),
            (Some(detail), Service::Firestore) => FirebaseError::Api {
                status,
                code: detail.status.unwrap_or_else(|| "UNKNOWN".to_string()),
                message: detail.message,
            },
            (None, _) => FirebaseError::Api {
                status,
                code: "UNKNOWN".to_string(),
                message: format!("Backend responded with HTTP {status}"),
            },
        }
    }

    /// Stable error code, if the service supplied one
    pub fn code(&self) -> Option<&str> {
        match self {
            FirebaseError::Api { code, .. } => Some(code),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, FirebaseError::Api { status: 404, .. })
            || self.code() == Some("NOT_FOUND")
    }

    /// Errors after which the stored refresh token is useless
    pub fn invalidates_session(&self) -> bool {
        matches!(
            self.code(),
            Some(
                "auth/user-token-expired"
                    | "auth/invalid-user-token"
                    | "auth/user-disabled"
                    | "auth/user-not-found"
            )
        )
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            FirebaseError::Api { status, code, .. } => auth_code_kind(code).unwrap_or_else(|| {
                match ErrorKind::from_google_status(code) {
                    ErrorKind::InternalServerError => ErrorKind::from_status(*status),
                    kind => kind,
                }
            }),
            FirebaseError::Transport(e) if e.is_timeout() => ErrorKind::RequestTimeout,
            FirebaseError::Transport(_) | FirebaseError::Decode(_) => ErrorKind::BadGateway,
            FirebaseError::NoCurrentUser | FirebaseError::InvalidToken(_) => {
                ErrorKind::Unauthorized
            }
            FirebaseError::Timeout => ErrorKind::RequestTimeout,
            FirebaseError::NotInitialized
            | FirebaseError::AlreadyInitialized
            | FirebaseError::Persistence(_)
            | FirebaseError::Config(_) => ErrorKind::InternalServerError,
        }
    }

    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }
}

/// Identity Toolkit error codes and the client-facing code/message pair
const AUTH_CODES: &[(&str, &str, &str)] = &[
    (
        "INVALID_LOGIN_CREDENTIALS",
        "auth/invalid-credential",
        "The supplied auth credential is incorrect, malformed or has expired.",
    ),
    (
        "EMAIL_NOT_FOUND",
        "auth/user-not-found",
        "There is no user record corresponding to this identifier.",
    ),
    (
        "INVALID_PASSWORD",
        "auth/wrong-password",
        "The password is invalid or the user does not have a password.",
    ),
    (
        "EMAIL_EXISTS",
        "auth/email-already-in-use",
        "The email address is already in use by another account.",
    ),
    (
        "INVALID_EMAIL",
        "auth/invalid-email",
        "The email address is badly formatted.",
    ),
    (
        "MISSING_EMAIL",
        "auth/missing-email",
        "An email address must be provided.",
    ),
    (
        "MISSING_PASSWORD",
        "auth/missing-password",
        "A non-empty password must be provided.",
    ),
    (
        "WEAK_PASSWORD",
        "auth/weak-password",
        "Password should be at least 6 characters.",
    ),
    (
        "USER_DISABLED",
        "auth/user-disabled",
        "The user account has been disabled by an administrator.",
    ),
    (
        "USER_NOT_FOUND",
        "auth/user-token-expired",
        "The user's credential is no longer valid. The user must sign in again.",
    ),
    (
        "TOKEN_EXPIRED",
        "auth/user-token-expired",
        "The user's credential is no longer valid. The user must sign in again.",
    ),
    (
        "INVALID_REFRESH_TOKEN",
        "auth/invalid-user-token",
        "This user's credential isn't valid for this project.",
    ),
    (
        "INVALID_ID_TOKEN",
        "auth/invalid-user-token",
        "This user's credential isn't valid for this project.",
    ),
    (
        "CREDENTIAL_TOO_OLD_LOGIN_AGAIN",
        "auth/requires-recent-login",
        "This operation is sensitive and requires recent authentication. Log in again before retrying this request.",
    ),
    (
        "TOO_MANY_ATTEMPTS_TRY_LATER",
        "auth/too-many-requests",
        "Access to this account has been temporarily disabled due to many failed login attempts. Try again later.",
    ),
    (
        "OPERATION_NOT_ALLOWED",
        "auth/operation-not-allowed",
        "The given sign-in provider is disabled for this Firebase project.",
    ),
    (
        "PASSWORD_LOGIN_DISABLED",
        "auth/operation-not-allowed",
        "The given sign-in provider is disabled for this Firebase project.",
    ),
];

/// `"WEAK_PASSWORD : Password should be at least 6 characters"` -> `auth/weak-password`
fn from_identity_message(status: u16, raw: &str) -> FirebaseError {
    let (raw_code, detail) = match raw.split_once(" : ") {
        Some((code, detail)) => (code.trim(), Some(detail.trim())),
        None => (raw.trim(), None),
    };

    if let Some((_, code, message)) = AUTH_CODES.iter().find(|(r, _, _)| *r == raw_code) {
        return FirebaseError::Api {
            status,
            code: code.to_string(),
            message: detail.unwrap_or(message).to_string(),
        };
    }

    let looks_like_code = !raw_code.is_empty()
        && raw_code
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_');

    if looks_like_code {
        FirebaseError::Api {
            status,
            code: format!("auth/{}", raw_code.to_ascii_lowercase().replace('_', "-")),
            message: detail.unwrap_or(raw_code).to_string(),
        }
    } else {
        FirebaseError::Api {
            status,
            code: "auth/internal-error".to_string(),
            message: raw.to_string(),
        }
    }
}

fn auth_code_kind(code: &str) -> Option<ErrorKind> {
    let kind = match code {
        "auth/invalid-credential"
        | "auth/wrong-password"
        | "auth/user-not-found"
        | "auth/user-token-expired"
        | "auth/invalid-user-token" => ErrorKind::Unauthorized,
        "auth/email-already-in-use" => ErrorKind::Conflict,
        "auth/invalid-email"
        | "auth/missing-email"
        | "auth/missing-password"
        | "auth/weak-password" => ErrorKind::BadRequest,
        "auth/user-disabled" | "auth/operation-not-allowed" => ErrorKind::Forbidden,
        "auth/requires-recent-login" => ErrorKind::PreconditionFailed,
        "auth/too-many-requests" => ErrorKind::TooManyRequests,
        _ => return None,
    };
    Some(kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_toolkit_error_is_mapped() {
        let body = r#"{"error":{"code":400,"message":"EMAIL_EXISTS","status":"INVALID_ARGUMENT"}}"#;
        let err = FirebaseError::from_error_body(400, body, Service::Auth);
        assert_eq!(err.code(), Some("auth/email-already-in-use"));
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(
            err.to_string(),
            "The email address is already in use by another account."
        );
    }

    #[test]
    fn test_identity_toolkit_detail_wins() {
        let body = r#"{"error":{"code":400,"message":"WEAK_PASSWORD : Password should be at least 6 characters"}}"#;
        let err = FirebaseError::from_error_body(400, body, Service::Auth);
        assert_eq!(err.code(), Some("auth/weak-password"));
        assert_eq!(err.to_string(), "Password should be at least 6 characters");
    }

    #[test]
    fn test_unknown_identity_code() {
        let body = r#"{"error":{"code":400,"message":"QUOTA_EXCEEDED"}}"#;
        let err = FirebaseError::from_error_body(400, body, Service::Auth);
        assert_eq!(err.code(), Some("auth/quota-exceeded"));

        let body = r#"{"error":{"code":400,"message":"API key not valid. Please pass a valid API key."}}"#;
        let err = FirebaseError::from_error_body(400, body, Service::Auth);
        assert_eq!(err.code(), Some("auth/internal-error"));
        assert_eq!(err.kind(), ErrorKind::BadRequest);
    }

    #[test]
    fn test_firestore_error_keeps_status() {
        let body = r#"{"error":{"code":404,"message":"Document not found","status":"NOT_FOUND"}}"#;
        let err = FirebaseError::from_error_body(404, body, Service::Firestore);
        assert!(err.is_not_found());
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_firestore_streamed_error() {
        let body = r#"[{"error":{"code":400,"message":"bad query","status":"INVALID_ARGUMENT"}}]"#;
        let err = FirebaseError::from_error_body(400, body, Service::Firestore);
        assert_eq!(err.code(), Some("INVALID_ARGUMENT"));
        assert_eq!(err.kind(), ErrorKind::BadRequest);
        assert_eq!(err.to_string(), "bad query");
    }

    #[test]
    fn test_streamed_aggregation_error_keeps_message() {
        let body = r#"[{"error":{"code":400,"message":"The query requires an index.","status":"FAILED_PRECONDITION"}}]"#;
        let err = FirebaseError::from_error_body(400, body, Service::Firestore);
        assert_eq!(err.code(), Some("FAILED_PRECONDITION"));
        assert_eq!(err.to_string(), "The query requires an index.");

        let err = FirebaseError::from_error_body(500, "[]", Service::Firestore);
        assert_eq!(err.code(), Some("UNKNOWN"));
    }

    #[test]
    fn test_unparseable_body() {
        let err = FirebaseError::from_error_body(502, "<html>", Service::Firestore);
        assert_eq!(err.code(), Some("UNKNOWN"));
        assert_eq!(err.kind(), ErrorKind::BadGateway);
    }

    #[test]
    fn test_session_invalidating_codes() {
        let body = r#"{"error":{"code":400,"message":"TOKEN_EXPIRED"}}"#;
        assert!(FirebaseError::from_error_body(400, body, Service::Auth).invalidates_session());
        assert!(!FirebaseError::Timeout.invalidates_session());
    }
}
