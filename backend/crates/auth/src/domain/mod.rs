//! Domain Layer
//!
//! Contains entities, value objects, and the backend seam.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{credential::Credential, user::AuthUser};
pub use repository::{AuthBackend, LocalAuthBackend};
pub use value_object::{claims::Claims, email::Email, persistence::SessionPersistence};
