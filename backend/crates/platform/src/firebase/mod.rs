//! Firebase REST bindings
//!
//! - `app` - process-wide bootstrap holding the shared client handles
//! - `auth` - authentication client with observable session state
//! - `firestore` - document database client
//! - `error` - unified backend error type

pub mod app;
pub mod auth;
pub mod error;
pub mod firestore;

mod http;

pub use app::{FirebaseApp, app, initialize};
pub use auth::{AuthState, FirebaseAuth, IdTokenResult, Persistence, User, UserCredential};
pub use error::FirebaseError;
pub use firestore::{Document, FirestoreClient};
