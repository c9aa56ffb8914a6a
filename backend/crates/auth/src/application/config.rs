//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Where a successful login sends the user
    pub login_redirect: String,
    /// Where a failed logout sends the user
    pub logout_redirect: String,
    /// Where the generic error handler sends the user
    pub error_redirect: String,
    /// Upper bound for waiting on the session state to become known
    pub session_resolve_timeout: Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            login_redirect: "/".to_string(),
            logout_redirect: "/".to_string(),
            error_redirect: "/".to_string(),
            session_resolve_timeout: Duration::from_secs(10),
        }
    }
}

impl AuthConfig {
    /// Create config for development (emulators can be slow to answer)
    pub fn development() -> Self {
        Self {
            session_resolve_timeout: Duration::from_secs(30),
            ..Default::default()
        }
    }

    pub fn with_login_redirect(mut self, to: impl Into<String>) -> Self {
        self.login_redirect = to.into();
        self
    }

    pub fn with_session_resolve_timeout(mut self, timeout: Duration) -> Self {
        self.session_resolve_timeout = timeout;
        self
    }
}
