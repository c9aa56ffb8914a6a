//! Update Account Use Case
//!
//! Applies password, e-mail and display-name changes for the signed-in
//! user, skipping values that are already current.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::application::contract::UpdateAccountParams;
use crate::domain::repository::AuthBackend;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

pub struct UpdateAccountUseCase<B>
where
    B: AuthBackend,
{
    backend: Arc<B>,
    config: Arc<AuthConfig>,
}

impl<B> UpdateAccountUseCase<B>
where
    B: AuthBackend,
{
    pub fn new(backend: Arc<B>, config: Arc<AuthConfig>) -> Self {
        Self { backend, config }
    }

    pub async fn execute(&self, params: UpdateAccountParams) -> AuthResult<()> {
        // validate everything before the first backend write
        let password = params
            .password
            .filter(|p| !p.is_empty())
            .map(ClearTextPassword::new)
            .transpose()?;
        let email = params
            .email
            .as_deref()
            .filter(|e| !e.trim().is_empty())
            .map(Email::new)
            .transpose()?;
        let display_name = params
            .display_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty());

        let user = self
            .backend
            .current_user(self.config.session_resolve_timeout)
            .await?
            .ok_or(AuthError::NoCurrentUser)?;

        if let Some(password) = &password {
            self.backend.update_password(password).await?;
        }

        if let Some(email) = email.filter(|e| !e.matches(user.email.as_deref())) {
            self.backend.update_email(&email).await?;
        }

        if let Some(name) = display_name.filter(|n| user.display_name.as_deref() != Some(*n)) {
            self.backend.update_profile(Some(name)).await?;
        }

        tracing::info!(uid = %user.uid, "Account updated");
        Ok(())
    }
}
