//! Infrastructure Layer
//!
//! Backend implementations of the document store seam.

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreDocumentStore;
pub use memory::InMemoryDocumentStore;
