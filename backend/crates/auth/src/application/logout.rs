//! Logout Use Case

use std::sync::Arc;

use crate::application::hooks::AuthHooks;
use crate::domain::repository::AuthBackend;
use crate::error::AuthResult;

pub struct LogoutUseCase<B>
where
    B: AuthBackend,
{
    backend: Arc<B>,
    hooks: Arc<dyn AuthHooks>,
}

impl<B> LogoutUseCase<B>
where
    B: AuthBackend,
{
    pub fn new(backend: Arc<B>, hooks: Arc<dyn AuthHooks>) -> Self {
        Self { backend, hooks }
    }

    pub async fn execute(&self) -> AuthResult<()> {
        self.backend.sign_out().await?;
        self.hooks.on_logout();
        tracing::info!("User signed out");
        Ok(())
    }
}
