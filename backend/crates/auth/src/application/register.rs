//! Register Use Case
//!
//! Creates the account, then sends the verification e-mail and sets the
//! display name. Once the account exists those follow-ups only log on
//! failure.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::contract::RegisterParams;
use crate::application::hooks::AuthHooks;
use crate::domain::entity::user::AuthUser;
use crate::domain::repository::AuthBackend;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

pub struct RegisterUseCase<B>
where
    B: AuthBackend,
{
    backend: Arc<B>,
    hooks: Arc<dyn AuthHooks>,
}

impl<B> RegisterUseCase<B>
where
    B: AuthBackend,
{
    pub fn new(backend: Arc<B>, hooks: Arc<dyn AuthHooks>) -> Self {
        Self { backend, hooks }
    }

    pub async fn execute(&self, params: RegisterParams) -> AuthResult<AuthUser> {
        let email = Email::new(&params.email)?;
        let password = ClearTextPassword::new(params.password)?;

        let mut user = self
            .backend
            .create_user(&email, &password)
            .await?
            .user
            .ok_or(AuthError::MissingCredential)?;

        if let Err(e) = self.backend.send_email_verification().await {
            tracing::warn!(uid = %user.uid, error = %e, "Failed to send verification e-mail");
        }

        let display_name = params
            .display_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty());
        if let Some(name) = display_name {
            match self.backend.update_profile(Some(name)).await {
                Ok(()) => user.display_name = Some(name.to_string()),
                Err(e) => {
                    tracing::warn!(uid = %user.uid, error = %e, "Failed to set display name")
                }
            }
        }

        self.hooks.on_register(&user);

        tracing::info!(uid = %user.uid, "User registered");

        Ok(user)
    }
}
