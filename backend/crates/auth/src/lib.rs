//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - User, claims and value objects, the `AuthBackend` seam
//! - `application/` - Use cases, the `AuthProvider` contract and `AuthAdapter`
//! - `infra/` - Firebase-backed and in-memory backends
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Email/password login with "remember me" session persistence
//! - Registration with verification e-mail and display name
//! - Session check and identity lookup with a bounded wait
//! - Password reset e-mail, password and account updates
//! - ID-token claims as the permission set
//!
//! ## Error Model
//! Expected failures come back inside the result as `{success: false,
//! error: {name, message}}`; the use cases never panic on backend errors.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::adapter::AuthAdapter;
pub use application::config::AuthConfig;
pub use application::contract::AuthProvider;
pub use application::hooks::AuthHooks;
pub use error::{AuthError, AuthResult};
pub use infra::{FirebaseAuthBackend, InMemoryAuthBackend};
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::application::contract::{
        AuthActionResponse, CheckResponse, Identity, OnErrorResponse,
    };
    pub use crate::domain::entity::{credential::Credential, user::AuthUser};
    pub use crate::domain::value_object::{
        claims::Claims, email::Email, persistence::SessionPersistence,
    };
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod router {
    pub use crate::presentation::router::*;
}

#[cfg(test)]
mod tests;
