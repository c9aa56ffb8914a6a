//! Login Use Case
//!
//! Signs in with email + password and confirms the session resolves to a
//! user before reporting success.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::application::contract::LoginParams;
use crate::application::hooks::AuthHooks;
use crate::domain::entity::user::AuthUser;
use crate::domain::repository::AuthBackend;
use crate::domain::value_object::{email::Email, persistence::SessionPersistence};
use crate::error::{AuthError, AuthResult};

pub struct LoginOutput {
    pub user: AuthUser,
    pub redirect_to: String,
}

pub struct LoginUseCase<B>
where
    B: AuthBackend,
{
    backend: Arc<B>,
    config: Arc<AuthConfig>,
    hooks: Arc<dyn AuthHooks>,
}

impl<B> LoginUseCase<B>
where
    B: AuthBackend,
{
    pub fn new(backend: Arc<B>, config: Arc<AuthConfig>, hooks: Arc<dyn AuthHooks>) -> Self {
        Self {
            backend,
            config,
            hooks,
        }
    }

    pub async fn execute(&self, params: LoginParams) -> AuthResult<LoginOutput> {
        let email = Email::new(&params.email)?;
        let password = ClearTextPassword::for_sign_in(params.password)?;
        let persistence = SessionPersistence::from_remember(params.remember);

        self.backend.set_persistence(persistence).await?;

        let user = self
            .backend
            .sign_in(&email, &password)
            .await?
            .authenticated_user()
            .ok_or(AuthError::UserNotFound)?;

        // The credential alone is not enough: the session must be observable
        let resolved = self
            .backend
            .current_user(self.config.session_resolve_timeout)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        tracing::info!(
            uid = %resolved.uid,
            %persistence,
            "User signed in"
        );

        self.hooks.on_login(&user);

        Ok(LoginOutput {
            user,
            redirect_to: self.config.login_redirect.clone(),
        })
    }
}
