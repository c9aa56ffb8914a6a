//! Auth Router

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use crate::application::contract::AuthProvider;
use crate::presentation::handlers::{self, AuthAppState};

/// Create the Auth router for any provider implementation
pub fn auth_router<P>(provider: P) -> Router
where
    P: AuthProvider + Sync + 'static,
{
    auth_router_shared(Arc::new(provider))
}

/// Create the Auth router around an already shared provider
pub fn auth_router_shared<P>(provider: Arc<P>) -> Router
where
    P: AuthProvider + Sync + 'static,
{
    let state = AuthAppState { provider };

    Router::new()
        .route("/login", post(handlers::login::<P>))
        .route("/register", post(handlers::register::<P>))
        .route("/logout", post(handlers::logout::<P>))
        .route("/check", get(handlers::check::<P>))
        .route("/forgot-password", post(handlers::forgot_password::<P>))
        .route("/update-password", post(handlers::update_password::<P>))
        .route("/account", post(handlers::update_account::<P>))
        .route("/identity", get(handlers::identity::<P>))
        .route("/permissions", get(handlers::permissions::<P>))
        .route("/error", post(handlers::on_error::<P>))
        .with_state(state)
}
