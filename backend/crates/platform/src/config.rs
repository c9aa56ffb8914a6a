//! Firebase Configuration
//!
//! The single backend-configuration object supplied once at process start.
//! Mirrors the web SDK's `firebaseConfig` plus the knobs a server-side
//! process needs (emulators, session file, locale).

use std::env;
use std::path::PathBuf;

use serde::Deserialize;

use crate::firebase::error::FirebaseError;

/// Production endpoints
const IDENTITY_TOOLKIT_URL: &str = "https://identitytoolkit.googleapis.com/v1";
const SECURE_TOKEN_URL: &str = "https://securetoken.googleapis.com/v1";
const FIRESTORE_URL: &str = "https://firestore.googleapis.com/v1";

/// Firestore database used when none is configured
pub const DEFAULT_DATABASE_ID: &str = "(default)";

/// Firebase project configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirebaseConfig {
    /// Web API key (required)
    pub api_key: String,
    pub auth_domain: Option<String>,
    /// Project id (required)
    pub project_id: String,
    pub storage_bucket: Option<String>,
    pub messaging_sender_id: Option<String>,
    pub app_id: Option<String>,
    /// Firestore database id
    #[serde(default = "default_database_id")]
    pub database_id: String,
    /// `host:port` of the Auth emulator
    #[serde(default)]
    pub auth_emulator_host: Option<String>,
    /// `host:port` of the Firestore emulator
    #[serde(default)]
    pub firestore_emulator_host: Option<String>,
    /// Where `Persistence::Local` sessions are written
    #[serde(default)]
    pub session_file: Option<PathBuf>,
    /// Language for auth e-mails (`X-Firebase-Locale`)
    #[serde(default)]
    pub locale: Option<String>,
}

fn default_database_id() -> String {
    DEFAULT_DATABASE_ID.to_string()
}

impl FirebaseConfig {
    /// Minimal configuration (API key + project id)
    pub fn new(api_key: impl Into<String>, project_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            auth_domain: None,
            project_id: project_id.into(),
            storage_bucket: None,
            messaging_sender_id: None,
            app_id: None,
            database_id: default_database_id(),
            auth_emulator_host: None,
            firestore_emulator_host: None,
            session_file: None,
            locale: None,
        }
    }

    /// Read the configuration from `FIREBASE_*` environment variables.
    ///
    /// `FIREBASE_API_KEY` and `FIREBASE_PROJECT_ID` are required. Emulator
    /// hosts use the names the Firebase tooling exports.
    pub fn from_env() -> Result<Self, FirebaseError> {
        let api_key = env::var("FIREBASE_API_KEY")
            .map_err(|_| FirebaseError::Config("FIREBASE_API_KEY must be set".to_string()))?;
        let project_id = env::var("FIREBASE_PROJECT_ID")
            .map_err(|_| FirebaseError::Config("FIREBASE_PROJECT_ID must be set".to_string()))?;

        let config = Self {
            auth_domain: env::var("FIREBASE_AUTH_DOMAIN").ok(),
            storage_bucket: env::var("FIREBASE_STORAGE_BUCKET").ok(),
            messaging_sender_id: env::var("FIREBASE_MESSAGING_SENDER_ID").ok(),
            app_id: env::var("FIREBASE_APP_ID").ok(),
            database_id: env::var("FIREBASE_DATABASE_ID").unwrap_or_else(|_| default_database_id()),
            auth_emulator_host: env::var("FIREBASE_AUTH_EMULATOR_HOST").ok(),
            firestore_emulator_host: env::var("FIRESTORE_EMULATOR_HOST").ok(),
            session_file: env::var("FIREBASE_SESSION_FILE").ok().map(PathBuf::from),
            locale: env::var("FIREBASE_LOCALE")
                .ok()
                .or_else(|| env::var("LANG").ok().and_then(|lang| locale_from_lang(&lang))),
            ..Self::new(api_key, project_id)
        };

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that cannot reach any backend
    pub fn validate(&self) -> Result<(), FirebaseError> {
        if self.api_key.trim().is_empty() {
            return Err(FirebaseError::Config("apiKey must not be empty".to_string()));
        }
        if self.project_id.trim().is_empty() {
            return Err(FirebaseError::Config("projectId must not be empty".to_string()));
        }
        Ok(())
    }

    /// Base URL of the Identity Toolkit v1 API
    pub fn identity_toolkit_url(&self) -> String {
        match &self.auth_emulator_host {
            Some(host) => format!("http://{host}/identitytoolkit.googleapis.com/v1"),
            None => IDENTITY_TOOLKIT_URL.to_string(),
        }
    }

    /// Base URL of the Secure Token v1 API
    pub fn secure_token_url(&self) -> String {
        match &self.auth_emulator_host {
            Some(host) => format!("http://{host}/securetoken.googleapis.com/v1"),
            None => SECURE_TOKEN_URL.to_string(),
        }
    }

    /// `projects/{project}/databases/{database}/documents`
    pub fn documents_path(&self) -> String {
        format!(
            "projects/{}/databases/{}/documents",
            self.project_id, self.database_id
        )
    }

    /// Full URL of the Firestore documents root
    pub fn documents_url(&self) -> String {
        let base = match &self.firestore_emulator_host {
            Some(host) => format!("http://{host}/v1"),
            None => FIRESTORE_URL.to_string(),
        };
        format!("{}/{}", base, self.documents_path())
    }
}

/// `en_US.UTF-8` -> `en-US`
fn locale_from_lang(lang: &str) -> Option<String> {
    let tag = lang.split('.').next()?.replace('_', "-");
    if tag.is_empty() || tag == "C" || tag == "POSIX" {
        return None;
    }
    Some(tag)
}
