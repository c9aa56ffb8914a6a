use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Refresh ID tokens this long before they expire
pub(crate) const REFRESH_MARGIN_MS: i64 = 5 * 60 * 1000;

/// Lifetime assumed when the service omits `expiresIn`
const DEFAULT_TOKEN_LIFETIME_SECS: i64 = 3600;

/// Signed-in user profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    #[serde(default)]
    pub email_verified: bool,
}

/// Observable authentication state
///
/// Starts as `Unknown` until a persisted session has been restored (or
/// found absent); afterwards it is always `SignedOut` or `SignedIn`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthState {
    #[default]
    Unknown,
    SignedOut,
    SignedIn(User),
}

impl AuthState {
    pub fn is_known(&self) -> bool {
        !matches!(self, AuthState::Unknown)
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            AuthState::SignedIn(user) => Some(user),
            _ => None,
        }
    }
}

/// Result of a sign-in or sign-up call
///
/// `user` is `None` when the service answered without an identity; the
/// caller decides whether that is an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCredential {
    pub user: Option<User>,
    pub id_token: Option<String>,
}

impl UserCredential {
    pub(crate) fn empty() -> Self {
        Self {
            user: None,
            id_token: None,
        }
    }
}

/// Decoded ID token of the current user
#[derive(Debug, Clone, PartialEq)]
pub struct IdTokenResult {
    pub token: String,
    pub claims: Map<String, Value>,
    /// Milliseconds since the Unix epoch
    pub expiration_time: Option<i64>,
    pub sign_in_provider: Option<String>,
}

impl IdTokenResult {
    pub(crate) fn new(token: String, claims: Map<String, Value>) -> Self {
        let expiration_time = claims
            .get("exp")
            .and_then(Value::as_i64)
            .map(|secs| secs * 1000);
        let sign_in_provider = claims
            .get("firebase")
            .and_then(|f| f.get("sign_in_provider"))
            .and_then(Value::as_str)
            .map(String::from);
        Self {
            token,
            claims,
            expiration_time,
            sign_in_provider,
        }
    }
}

/// Tokens backing the signed-in user
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Session {
    pub user: User,
    pub id_token: String,
    pub refresh_token: String,
    /// Milliseconds since the Unix epoch
    pub expires_at: i64,
}

impl Session {
    pub fn needs_refresh(&self, now_ms: i64) -> bool {
        now_ms + REFRESH_MARGIN_MS >= self.expires_at
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("user", &self.user)
            .field("id_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

pub(crate) fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// `expiresIn` is a decimal string of seconds
pub(crate) fn expiry_from_now(expires_in: Option<&str>) -> i64 {
    let secs = expires_in
        .and_then(|s| s.trim().parse::<i64>().ok())
        .unwrap_or(DEFAULT_TOKEN_LIFETIME_SECS);
    now_ms().saturating_add(secs.saturating_mul(1000))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(expires_at: i64) -> Session {
        Session {
            user: User {
                uid: "u1".to_string(),
                email: None,
                display_name: None,
                email_verified: false,
            },
            id_token: "id".to_string(),
            refresh_token: "refresh".to_string(),
            expires_at,
        }
    }

    #[test]
    fn test_refresh_window() {
        let now = 1_000_000_000;
        assert!(!session(now + REFRESH_MARGIN_MS + 1).needs_refresh(now));
        assert!(session(now + REFRESH_MARGIN_MS).needs_refresh(now));
        assert!(session(now - 1).needs_refresh(now));
    }

    #[test]
    fn test_session_debug_hides_tokens() {
        let debug = format!("{:?}", session(0));
        assert!(!debug.contains("refresh\""));
        assert!(debug.contains("REDACTED"));
    }

    #[test]
    fn test_expiry_defaults_to_an_hour() {
        let before = now_ms();
        let expiry = expiry_from_now(None);
        assert!(expiry >= before + 3_600_000);
        assert!(expiry_from_now(Some("60")) < before + 3_600_000);
    }

    #[test]
    fn test_huge_expiry_saturates() {
        assert_eq!(expiry_from_now(Some("9223372036854775807")), i64::MAX);
    }

    #[test]
    fn test_id_token_result_reads_standard_claims() {
        let claims = serde_json::json!({
            "exp": 1700000000,
            "firebase": {"sign_in_provider": "password"},
            "role": "admin"
        });
        let Value::Object(claims) = claims else {
            unreachable!()
        };
        let result = IdTokenResult::new("t".to_string(), claims);
        assert_eq!(result.expiration_time, Some(1_700_000_000_000));
        assert_eq!(result.sign_in_provider.as_deref(), Some("password"));
        assert_eq!(result.claims["role"], "admin");
    }

    #[test]
    fn test_auth_state_accessors() {
        assert!(!AuthState::Unknown.is_known());
        assert!(AuthState::SignedOut.is_known());
        assert!(AuthState::SignedOut.user().is_none());
    }
}
