//! Identity Use Cases

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::contract::Identity;
use crate::domain::repository::AuthBackend;
use crate::domain::value_object::claims::Claims;
use crate::error::{AuthError, AuthResult};

/// Best-effort projection of the signed-in user
pub struct GetIdentityUseCase<B>
where
    B: AuthBackend,
{
    backend: Arc<B>,
    config: Arc<AuthConfig>,
}

impl<B> GetIdentityUseCase<B>
where
    B: AuthBackend,
{
    pub fn new(backend: Arc<B>, config: Arc<AuthConfig>) -> Self {
        Self { backend, config }
    }

    /// Never fails: an unresolvable user yields an empty identity
    pub async fn execute(&self) -> Identity {
        match self
            .backend
            .current_user(self.config.session_resolve_timeout)
            .await
        {
            Ok(Some(user)) => Identity {
                email: user.email,
                name: user.display_name,
            },
            Ok(None) => Identity::default(),
            Err(e) => {
                tracing::debug!(error = %e, "Identity lookup failed");
                Identity::default()
            }
        }
    }
}

/// Claims issued for the signed-in user
pub struct GetPermissionsUseCase<B>
where
    B: AuthBackend,
{
    backend: Arc<B>,
    config: Arc<AuthConfig>,
}

impl<B> GetPermissionsUseCase<B>
where
    B: AuthBackend,
{
    pub fn new(backend: Arc<B>, config: Arc<AuthConfig>) -> Self {
        Self { backend, config }
    }

    pub async fn execute(&self) -> AuthResult<Claims> {
        self.backend
            .current_user(self.config.session_resolve_timeout)
            .await?
            .ok_or(AuthError::NoCurrentUser)?;
        self.backend.claims().await
    }
}
