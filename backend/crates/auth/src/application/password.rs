//! Password Use Cases
//!
//! Reset e-mail for a forgotten password, and password change for the
//! signed-in user.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::contract::{ForgotPasswordParams, UpdatePasswordParams};
use crate::domain::repository::AuthBackend;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

pub struct ForgotPasswordUseCase<B>
where
    B: AuthBackend,
{
    backend: Arc<B>,
}

impl<B> ForgotPasswordUseCase<B>
where
    B: AuthBackend,
{
    pub fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }

    pub async fn execute(&self, params: ForgotPasswordParams) -> AuthResult<()> {
        let email = Email::new(&params.email)?;
        self.backend.send_password_reset(&email).await?;
        tracing::info!(domain = %email.domain(), "Password reset e-mail requested");
        Ok(())
    }
}

pub struct UpdatePasswordUseCase<B>
where
    B: AuthBackend,
{
    backend: Arc<B>,
}

impl<B> UpdatePasswordUseCase<B>
where
    B: AuthBackend,
{
    pub fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }

    pub async fn execute(&self, params: UpdatePasswordParams) -> AuthResult<()> {
        if params
            .confirm_password
            .as_ref()
            .is_some_and(|confirm| *confirm != params.password)
        {
            return Err(AuthError::PasswordMismatch);
        }

        let password = ClearTextPassword::new(params.password)?;
        self.backend.update_password(&password).await?;
        tracing::info!("Password updated");
        Ok(())
    }
}
