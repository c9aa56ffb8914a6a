//! HTTP Handlers
//!
//! Thin wrappers: decode the body, call the provider, encode its result.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;

use crate::application::contract::{
    AuthActionResponse, AuthProvider, CheckResponse, Identity, OnErrorResponse,
};
use crate::domain::value_object::claims::Claims;
use crate::error::AuthResult;
use crate::presentation::dto::{
    ForgotPasswordRequest, LoginRequest, RegisterRequest, UpdateAccountRequest,
    UpdatePasswordRequest,
};

/// Shared state for auth handlers
pub struct AuthAppState<P> {
    pub provider: Arc<P>,
}

impl<P> Clone for AuthAppState<P> {
    fn clone(&self) -> Self {
        Self {
            provider: self.provider.clone(),
        }
    }
}

/// POST /api/auth/login
pub async fn login<P>(
    State(state): State<AuthAppState<P>>,
    Json(req): Json<LoginRequest>,
) -> Json<AuthActionResponse>
where
    P: AuthProvider + Sync + 'static,
{
    Json(state.provider.login(req.into()).await)
}

/// POST /api/auth/register
pub async fn register<P>(
    State(state): State<AuthAppState<P>>,
    Json(req): Json<RegisterRequest>,
) -> Json<AuthActionResponse>
where
    P: AuthProvider + Sync + 'static,
{
    Json(state.provider.register(req.into()).await)
}

/// POST /api/auth/logout
pub async fn logout<P>(State(state): State<AuthAppState<P>>) -> Json<AuthActionResponse>
where
    P: AuthProvider + Sync + 'static,
{
    Json(state.provider.logout().await)
}

/// GET /api/auth/check
pub async fn check<P>(State(state): State<AuthAppState<P>>) -> Json<CheckResponse>
where
    P: AuthProvider + Sync + 'static,
{
    Json(state.provider.check().await)
}

/// POST /api/auth/forgot-password
pub async fn forgot_password<P>(
    State(state): State<AuthAppState<P>>,
    Json(req): Json<ForgotPasswordRequest>,
) -> Json<AuthActionResponse>
where
    P: AuthProvider + Sync + 'static,
{
    Json(state.provider.forgot_password(req.into()).await)
}

/// POST /api/auth/update-password
pub async fn update_password<P>(
    State(state): State<AuthAppState<P>>,
    Json(req): Json<UpdatePasswordRequest>,
) -> Json<AuthActionResponse>
where
    P: AuthProvider + Sync + 'static,
{
    Json(state.provider.update_password(req.into()).await)
}

/// POST /api/auth/account
pub async fn update_account<P>(
    State(state): State<AuthAppState<P>>,
    Json(req): Json<UpdateAccountRequest>,
) -> Json<AuthActionResponse>
where
    P: AuthProvider + Sync + 'static,
{
    Json(state.provider.update_account(req.into()).await)
}

/// GET /api/auth/identity
pub async fn identity<P>(State(state): State<AuthAppState<P>>) -> Json<Identity>
where
    P: AuthProvider + Sync + 'static,
{
    Json(state.provider.get_identity().await)
}

/// GET /api/auth/permissions
pub async fn permissions<P>(State(state): State<AuthAppState<P>>) -> AuthResult<Json<Claims>>
where
    P: AuthProvider + Sync + 'static,
{
    Ok(Json(state.provider.get_permissions().await?))
}

/// POST /api/auth/error
pub async fn on_error<P>(State(state): State<AuthAppState<P>>) -> Json<OnErrorResponse>
where
    P: AuthProvider + Sync + 'static,
{
    Json(state.provider.on_error().await)
}
