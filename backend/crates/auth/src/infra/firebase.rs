//! Firebase Authentication backend

use std::sync::Arc;
use std::time::Duration;

use platform::firebase::{FirebaseApp, FirebaseAuth};
use platform::password::ClearTextPassword;

use crate::domain::entity::{credential::Credential, user::AuthUser};
use crate::domain::repository::AuthBackend;
use crate::domain::value_object::{
    claims::Claims, email::Email, persistence::SessionPersistence,
};
use crate::error::AuthResult;

#[derive(Clone)]
pub struct FirebaseAuthBackend {
    auth: Arc<FirebaseAuth>,
}

impl FirebaseAuthBackend {
    pub fn new(auth: Arc<FirebaseAuth>) -> Self {
        Self { auth }
    }

    pub fn from_app(app: &FirebaseApp) -> Self {
        Self::new(app.auth())
    }
}

impl AuthBackend for FirebaseAuthBackend {
    async fn set_persistence(&self, persistence: SessionPersistence) -> AuthResult<()> {
        Ok(self.auth.set_persistence(persistence.into()).await?)
    }

    async fn sign_in(&self, email: &Email, password: &ClearTextPassword) -> AuthResult<Credential> {
        let credential = self
            .auth
            .sign_in_with_email_and_password(email.as_str(), password)
            .await?;
        Ok(credential.into())
    }

    async fn create_user(
        &self,
        email: &Email,
        password: &ClearTextPassword,
    ) -> AuthResult<Credential> {
        let credential = self
            .auth
            .create_user_with_email_and_password(email.as_str(), password)
            .await?;
        Ok(credential.into())
    }

    async fn send_email_verification(&self) -> AuthResult<()> {
        Ok(self.auth.send_email_verification().await?)
    }

    async fn update_profile(&self, display_name: Option<&str>) -> AuthResult<()> {
        Ok(self.auth.update_profile(display_name).await?)
    }

    async fn sign_out(&self) -> AuthResult<()> {
        Ok(self.auth.sign_out().await?)
    }

    async fn send_password_reset(&self, email: &Email) -> AuthResult<()> {
        Ok(self.auth.send_password_reset_email(email.as_str()).await?)
    }

    async fn update_password(&self, password: &ClearTextPassword) -> AuthResult<()> {
        Ok(self.auth.update_password(password).await?)
    }

    async fn update_email(&self, email: &Email) -> AuthResult<()> {
        Ok(self.auth.update_email(email.as_str()).await?)
    }

    async fn current_user(&self, wait: Duration) -> AuthResult<Option<AuthUser>> {
        let user = self.auth.resolve_current_user(wait).await?;
        Ok(user.map(AuthUser::from))
    }

    async fn claims(&self) -> AuthResult<Claims> {
        let result = self.auth.id_token_result().await?;
        Ok(Claims::new(result.claims))
    }
}
