//! Lifecycle callbacks
//!
//! Invoked after the corresponding backend call succeeded. Hooks run
//! inline on the request path and cannot fail the operation.

use crate::domain::entity::user::AuthUser;

pub trait AuthHooks: Send + Sync {
    fn on_login(&self, _user: &AuthUser) {}

    fn on_register(&self, _user: &AuthUser) {}

    fn on_logout(&self) {}
}

/// No callbacks
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHooks;

impl AuthHooks for NoHooks {}
