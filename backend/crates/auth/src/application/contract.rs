//! Auth Provider Contract
//!
//! The operations a frontend framework drives for authentication, with the
//! result shapes it renders. Expected failures are reported inside the
//! result (`success: false` plus an error envelope); only
//! `get_permissions` returns an error outright.

use kernel::error::envelope::ErrorEnvelope;
use serde::Serialize;

use crate::domain::value_object::claims::Claims;
use crate::error::AuthResult;

/// Login arguments
#[derive(Debug, Clone, Default)]
pub struct LoginParams {
    pub email: String,
    pub password: String,
    /// Keep the session across restarts
    pub remember: bool,
}

#[derive(Debug, Clone, Default)]
pub struct RegisterParams {
    pub email: String,
    pub password: String,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ForgotPasswordParams {
    pub email: String,
}

#[derive(Debug, Clone, Default)]
pub struct UpdatePasswordParams {
    pub password: String,
    /// Must equal `password` when given
    pub confirm_password: Option<String>,
}

/// Profile changes; `None` leaves a value untouched
#[derive(Debug, Clone, Default)]
pub struct UpdateAccountParams {
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub password: Option<String>,
}

/// Discriminated result of login/register/logout/password operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthActionResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorEnvelope>,
}

impl AuthActionResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            redirect_to: None,
            error: None,
        }
    }

    pub fn failed(error: ErrorEnvelope) -> Self {
        Self {
            success: false,
            redirect_to: None,
            error: Some(error),
        }
    }

    pub fn with_redirect(mut self, to: impl Into<String>) -> Self {
        self.redirect_to = Some(to.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CheckResponse {
    pub authenticated: bool,
}

/// Projected profile; `email` is always present in the JSON (`null` when
/// nobody is signed in)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Identity {
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Fixed answer of the generic error handler
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OnErrorResponse {
    pub redirect_to: String,
    pub logout: bool,
    pub error: ErrorEnvelope,
}

#[trait_variant::make(AuthProvider: Send)]
pub trait LocalAuthProvider {
    async fn login(&self, params: LoginParams) -> AuthActionResponse;

    async fn register(&self, params: RegisterParams) -> AuthActionResponse;

    async fn check(&self) -> CheckResponse;

    async fn logout(&self) -> AuthActionResponse;

    async fn forgot_password(&self, params: ForgotPasswordParams) -> AuthActionResponse;

    async fn update_password(&self, params: UpdatePasswordParams) -> AuthActionResponse;

    async fn update_account(&self, params: UpdateAccountParams) -> AuthActionResponse;

    async fn get_identity(&self) -> Identity;

    async fn get_permissions(&self) -> AuthResult<Claims>;

    async fn on_error(&self) -> OnErrorResponse;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_action_response_shapes() {
        assert_eq!(
            serde_json::to_value(AuthActionResponse::ok().with_redirect("/")).unwrap(),
            json!({"success": true, "redirectTo": "/"})
        );
        assert_eq!(
            serde_json::to_value(AuthActionResponse::failed(ErrorEnvelope::new(
                "Login Error",
                "bad"
            )))
            .unwrap(),
            json!({"success": false, "error": {"name": "Login Error", "message": "bad"}})
        );
    }

    #[test]
    fn test_empty_identity_serializes_null_email() {
        assert_eq!(
            serde_json::to_value(Identity::default()).unwrap(),
            json!({"email": null})
        );
    }
}
