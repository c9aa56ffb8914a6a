//! Check Session Use Case
//!
//! Answers "is a user signed in" with a bounded wait on the session state.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::AuthUser;
use crate::domain::repository::AuthBackend;
use crate::error::AuthResult;

pub struct CheckSessionUseCase<B>
where
    B: AuthBackend,
{
    backend: Arc<B>,
    config: Arc<AuthConfig>,
}

impl<B> CheckSessionUseCase<B>
where
    B: AuthBackend,
{
    pub fn new(backend: Arc<B>, config: Arc<AuthConfig>) -> Self {
        Self { backend, config }
    }

    /// The signed-in user, if any
    pub async fn execute(&self) -> AuthResult<Option<AuthUser>> {
        self.backend
            .current_user(self.config.session_resolve_timeout)
            .await
    }

    /// Just check if a session is active; failures count as "no"
    pub async fn is_authenticated(&self) -> bool {
        match self.execute().await {
            Ok(user) => user.is_some(),
            Err(e) => {
                tracing::debug!(error = %e, "Session check failed");
                false
            }
        }
    }
}
