//! Process-wide Firebase bootstrap
//!
//! The backend is initialized exactly once per process. Both adapters
//! obtain the same auth and Firestore handles from [`app`].

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use tracing::info;

use crate::config::FirebaseConfig;
use crate::firebase::auth::FirebaseAuth;
use crate::firebase::error::FirebaseError;
use crate::firebase::firestore::FirestoreClient;

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

static APP: OnceLock<FirebaseApp> = OnceLock::new();

/// Shared client handles for one Firebase project
#[derive(Clone)]
pub struct FirebaseApp {
    config: Arc<FirebaseConfig>,
    auth: Arc<FirebaseAuth>,
    firestore: Arc<FirestoreClient>,
}

impl FirebaseApp {
    /// Build the clients without registering them globally
    pub fn new(config: FirebaseConfig) -> Result<Self, FirebaseError> {
        config.validate()?;
        let http = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()?;

        let config = Arc::new(config);
        let auth = Arc::new(FirebaseAuth::new(http.clone(), config.clone()));
        let firestore = Arc::new(FirestoreClient::new(http, config.clone()).with_auth(auth.clone()));

        Ok(Self {
            config,
            auth,
            firestore,
        })
    }

    pub fn config(&self) -> &FirebaseConfig {
        &self.config
    }

    pub fn auth(&self) -> Arc<FirebaseAuth> {
        self.auth.clone()
    }

    pub fn firestore(&self) -> Arc<FirestoreClient> {
        self.firestore.clone()
    }
}

/// Initialize the process-wide app
///
/// Calling again with an equal configuration returns the existing app; a
/// different configuration is rejected with `AlreadyInitialized`.
pub fn initialize(config: FirebaseConfig) -> Result<&'static FirebaseApp, FirebaseError> {
    if let Some(existing) = APP.get() {
        return check_same(existing, &config);
    }

    let candidate = FirebaseApp::new(config.clone())?;
    let mut created = false;
    let app = APP.get_or_init(|| {
        created = true;
        candidate
    });

    if created {
        info!(project_id = %app.config.project_id, "Firebase app initialized");
        Ok(app)
    } else {
        // lost a race with another initializer
        check_same(app, &config)
    }
}

/// The initialized app
pub fn app() -> Result<&'static FirebaseApp, FirebaseError> {
    APP.get().ok_or(FirebaseError::NotInitialized)
}

fn check_same(
    existing: &'static FirebaseApp,
    config: &FirebaseConfig,
) -> Result<&'static FirebaseApp, FirebaseError> {
    if *existing.config == *config {
        Ok(existing)
    } else {
        Err(FirebaseError::AlreadyInitialized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // One test owns the global so ordering between tests cannot matter
    #[test]
    fn test_initialize_once() {
        assert!(matches!(app(), Err(FirebaseError::NotInitialized)));

        let config = FirebaseConfig::new("key", "demo-project");
        let first = initialize(config.clone()).unwrap();
        let second = initialize(config).unwrap();
        assert!(std::ptr::eq(first, second));
        assert!(std::ptr::eq(first, app().unwrap()));

        let other = FirebaseConfig::new("key", "other-project");
        assert!(matches!(
            initialize(other),
            Err(FirebaseError::AlreadyInitialized)
        ));
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        assert!(matches!(
            FirebaseApp::new(FirebaseConfig::new("", "p")),
            Err(FirebaseError::Config(_))
        ));
    }
}
