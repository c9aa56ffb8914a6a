//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" of vocabulary shared by the
//! auth adapter, the data adapter and the bridge binary:
//! - Common error types and result aliases
//! - The user-facing error envelope (`{name, message}`)
//! - Opaque, backend-assigned identifier types
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all domains.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod envelope;
    pub mod kind;
}
pub mod id;
