//! Auth Adapter
//!
//! Implements the provider contract on top of any `AuthBackend` by running
//! the use cases and folding their errors into the result envelopes.

use std::sync::Arc;

use kernel::error::envelope::ErrorEnvelope;

use crate::application::check_session::CheckSessionUseCase;
use crate::application::config::AuthConfig;
use crate::application::contract::{
    AuthActionResponse, AuthProvider, CheckResponse, ForgotPasswordParams, Identity, LoginParams,
    OnErrorResponse, RegisterParams, UpdateAccountParams, UpdatePasswordParams,
};
use crate::application::hooks::{AuthHooks, NoHooks};
use crate::application::identity::{GetIdentityUseCase, GetPermissionsUseCase};
use crate::application::login::LoginUseCase;
use crate::application::logout::LogoutUseCase;
use crate::application::password::{ForgotPasswordUseCase, UpdatePasswordUseCase};
use crate::application::register::RegisterUseCase;
use crate::application::update_account::UpdateAccountUseCase;
use crate::domain::repository::AuthBackend;
use crate::domain::value_object::claims::Claims;
use crate::error::{AuthError, AuthResult};

const LOGIN_ERROR: &str = "Login Error";
const REGISTRATION_ERROR: &str = "Registration Error";
const LOGOUT_ERROR: &str = "Logout Error";
const FORGOT_PASSWORD_ERROR: &str = "Forgot Password Error";
const UPDATE_PASSWORD_ERROR: &str = "Update Password Error";
const UPDATE_ACCOUNT_ERROR: &str = "Update Account Error";

pub struct AuthAdapter<B>
where
    B: AuthBackend,
{
    backend: Arc<B>,
    config: Arc<AuthConfig>,
    hooks: Arc<dyn AuthHooks>,
}

impl<B> Clone for AuthAdapter<B>
where
    B: AuthBackend,
{
    fn clone(&self) -> Self {
        Self {
            backend: self.backend.clone(),
            config: self.config.clone(),
            hooks: self.hooks.clone(),
        }
    }
}

impl<B> AuthAdapter<B>
where
    B: AuthBackend,
{
    pub fn new(backend: Arc<B>, config: AuthConfig) -> Self {
        Self {
            backend,
            config: Arc::new(config),
            hooks: Arc::new(NoHooks),
        }
    }

    pub fn with_hooks(mut self, hooks: impl AuthHooks + 'static) -> Self {
        self.hooks = Arc::new(hooks);
        self
    }

    pub fn backend(&self) -> &Arc<B> {
        &self.backend
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }
}

/// Fold a use case result into the action envelope
fn action(result: AuthResult<()>, error_name: &str) -> AuthActionResponse {
    match result {
        Ok(()) => AuthActionResponse::ok(),
        Err(e) => {
            e.log();
            AuthActionResponse::failed(e.to_envelope(error_name))
        }
    }
}

impl<B> AuthProvider for AuthAdapter<B>
where
    B: AuthBackend + Send + Sync + 'static,
{
    async fn login(&self, params: LoginParams) -> AuthActionResponse {
        let use_case =
            LoginUseCase::new(self.backend.clone(), self.config.clone(), self.hooks.clone());
        match use_case.execute(params).await {
            Ok(output) => AuthActionResponse::ok().with_redirect(output.redirect_to),
            Err(e) => action(Err(e), LOGIN_ERROR),
        }
    }

    async fn register(&self, params: RegisterParams) -> AuthActionResponse {
        let use_case = RegisterUseCase::new(self.backend.clone(), self.hooks.clone());
        action(use_case.execute(params).await.map(|_| ()), REGISTRATION_ERROR)
    }

    async fn check(&self) -> CheckResponse {
        let use_case = CheckSessionUseCase::new(self.backend.clone(), self.config.clone());
        CheckResponse {
            authenticated: use_case.is_authenticated().await,
        }
    }

    async fn logout(&self) -> AuthActionResponse {
        let use_case = LogoutUseCase::new(self.backend.clone(), self.hooks.clone());
        let response = action(use_case.execute().await, LOGOUT_ERROR);
        if response.success {
            response
        } else {
            response.with_redirect(self.config.logout_redirect.clone())
        }
    }

    async fn forgot_password(&self, params: ForgotPasswordParams) -> AuthActionResponse {
        let use_case = ForgotPasswordUseCase::new(self.backend.clone());
        action(use_case.execute(params).await, FORGOT_PASSWORD_ERROR)
    }

    async fn update_password(&self, params: UpdatePasswordParams) -> AuthActionResponse {
        let use_case = UpdatePasswordUseCase::new(self.backend.clone());
        action(use_case.execute(params).await, UPDATE_PASSWORD_ERROR)
    }

    async fn update_account(&self, params: UpdateAccountParams) -> AuthActionResponse {
        let use_case = UpdateAccountUseCase::new(self.backend.clone(), self.config.clone());
        action(use_case.execute(params).await, UPDATE_ACCOUNT_ERROR)
    }

    async fn get_identity(&self) -> Identity {
        GetIdentityUseCase::new(self.backend.clone(), self.config.clone())
            .execute()
            .await
    }

    async fn get_permissions(&self) -> AuthResult<Claims> {
        GetPermissionsUseCase::new(self.backend.clone(), self.config.clone())
            .execute()
            .await
            .inspect_err(AuthError::log)
    }

    async fn on_error(&self) -> OnErrorResponse {
        OnErrorResponse {
            redirect_to: self.config.error_redirect.clone(),
            logout: false,
            error: ErrorEnvelope::new("Error", "An error occurred").with_stack("Error stack"),
        }
    }
}
