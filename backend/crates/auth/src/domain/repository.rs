//! Backend Seam
//!
//! The operations the auth adapter needs from an authentication service.
//! `infra::firebase` implements it over the Firebase client; `infra::memory`
//! is an in-process stand-in.

use std::time::Duration;

use platform::password::ClearTextPassword;

use crate::domain::entity::{credential::Credential, user::AuthUser};
use crate::domain::value_object::{
    claims::Claims, email::Email, persistence::SessionPersistence,
};
use crate::error::AuthResult;

#[trait_variant::make(AuthBackend: Send)]
pub trait LocalAuthBackend {
    /// Persistence mode for the next sign-in
    async fn set_persistence(&self, persistence: SessionPersistence) -> AuthResult<()>;

    async fn sign_in(&self, email: &Email, password: &ClearTextPassword) -> AuthResult<Credential>;

    /// Create an account and sign it in
    async fn create_user(&self, email: &Email, password: &ClearTextPassword)
    -> AuthResult<Credential>;

    /// Verification e-mail for the signed-in user
    async fn send_email_verification(&self) -> AuthResult<()>;

    /// Set or clear the signed-in user's display name
    async fn update_profile(&self, display_name: Option<&str>) -> AuthResult<()>;

    async fn sign_out(&self) -> AuthResult<()>;

    async fn send_password_reset(&self, email: &Email) -> AuthResult<()>;

    async fn update_password(&self, password: &ClearTextPassword) -> AuthResult<()>;

    async fn update_email(&self, email: &Email) -> AuthResult<()>;

    /// Resolve the signed-in user, waiting at most `wait` for the session
    /// state to become known
    async fn current_user(&self, wait: Duration) -> AuthResult<Option<AuthUser>>;

    /// Claims of the signed-in user's ID token
    async fn claims(&self) -> AuthResult<Claims>;
}
