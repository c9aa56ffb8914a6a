//! Infrastructure Layer
//!
//! Backend implementations of the auth seam.

pub mod firebase;
pub mod memory;

pub use firebase::FirebaseAuthBackend;
pub use memory::InMemoryAuthBackend;
