//! Authentication Client
//!
//! Email/password accounts over the Identity Toolkit v1 REST API, with ID
//! tokens refreshed through the Secure Token API.
//!
//! ## Session state
//! The current user is published on a `tokio::sync::watch` channel. The
//! state starts `Unknown` and becomes known once the persisted session (if
//! any) has been restored. Callers that need an answer use
//! [`FirebaseAuth::resolve_current_user`], which waits for a known state
//! for at most the given duration; long-lived observers use
//! [`FirebaseAuth::on_auth_state_changed`].

mod persistence;
mod rest;
mod state;

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::{OnceCell, RwLock, watch};
use tracing::{debug, info, warn};

use crate::config::FirebaseConfig;
use crate::crypto::decode_jwt_claims;
use crate::firebase::error::{FirebaseError, Service};
use crate::firebase::http::read_json;
use crate::password::ClearTextPassword;

pub use persistence::Persistence;
pub use state::{AuthState, IdTokenResult, User, UserCredential};

use persistence::SessionFile;
use rest::{
    LookupRequest, LookupResponse, OobCodeRequest, PasswordRequest, RefreshRequest,
    RefreshResponse, TokenResponse, UpdateAccountRequest,
};
use state::{Session, expiry_from_now, now_ms};

const LOCALE_HEADER: &str = "X-Firebase-Locale";

pub struct FirebaseAuth {
    http: reqwest::Client,
    config: Arc<FirebaseConfig>,
    state: watch::Sender<AuthState>,
    session: RwLock<Option<Session>>,
    persistence: RwLock<Persistence>,
    store: SessionFile,
    restored: OnceCell<()>,
}

impl FirebaseAuth {
    pub fn new(http: reqwest::Client, config: Arc<FirebaseConfig>) -> Self {
        let (state, _) = watch::channel(AuthState::Unknown);
        Self {
            store: SessionFile::new(config.session_file.clone()),
            http,
            config,
            state,
            session: RwLock::new(None),
            persistence: RwLock::new(Persistence::default()),
            restored: OnceCell::new(),
        }
    }

    // ========================================================================
    // State
    // ========================================================================

    /// Snapshot of the current user; `None` while the state is unknown
    pub fn current_user(&self) -> Option<User> {
        self.state.borrow().user().cloned()
    }

    /// Standing subscription to auth state changes
    ///
    /// The receiver observes the current value immediately and every
    /// transition afterwards, for as long as it is held.
    pub fn on_auth_state_changed(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    /// Wait (bounded) until the auth state is known and return the user
    ///
    /// Returns `FirebaseError::Timeout` if the state is still unknown after
    /// `wait`. The subscription is dropped on every path.
    pub async fn resolve_current_user(&self, wait: Duration) -> Result<Option<User>, FirebaseError> {
        let mut rx = self.state.subscribe();
        let resolved = tokio::time::timeout(wait, async {
            self.ensure_restored().await;
            rx.wait_for(AuthState::is_known)
                .await
                .map(|state| state.user().cloned())
        })
        .await;

        match resolved {
            Ok(Ok(user)) => Ok(user),
            // The sender lives as long as `self`
            Ok(Err(_)) => Ok(None),
            Err(_) => {
                debug!(?wait, "Auth state did not resolve in time");
                Err(FirebaseError::Timeout)
            }
        }
    }

    pub async fn persistence(&self) -> Persistence {
        *self.persistence.read().await
    }

    /// Choose how the next (and current) session is kept
    pub async fn set_persistence(&self, persistence: Persistence) -> Result<(), FirebaseError> {
        if persistence == Persistence::Local && !self.store.is_configured() {
            warn!("Local persistence requested without a session file; session will not survive restarts");
        }

        *self.persistence.write().await = persistence;

        let session = self.session.read().await.clone();
        match (persistence, session) {
            (Persistence::Local, Some(session)) => self.store.save(&session).await?,
            (Persistence::Session, _) => self.store.clear().await?,
            (Persistence::Local, None) => {}
        }
        Ok(())
    }

    // ========================================================================
    // Account operations
    // ========================================================================

    pub async fn sign_in_with_email_and_password(
        &self,
        email: &str,
        password: &ClearTextPassword,
    ) -> Result<UserCredential, FirebaseError> {
        self.ensure_restored().await;
        let response: TokenResponse = self
            .post_identity(
                "signInWithPassword",
                &PasswordRequest {
                    email,
                    password: password.expose(),
                    return_secure_token: true,
                },
            )
            .await?;
        self.establish(response).await
    }

    pub async fn create_user_with_email_and_password(
        &self,
        email: &str,
        password: &ClearTextPassword,
    ) -> Result<UserCredential, FirebaseError> {
        self.ensure_restored().await;
        let response: TokenResponse = self
            .post_identity(
                "signUp",
                &PasswordRequest {
                    email,
                    password: password.expose(),
                    return_secure_token: true,
                },
            )
            .await?;
        self.establish(response).await
    }

    /// Send a verification e-mail to the current user
    pub async fn send_email_verification(&self) -> Result<(), FirebaseError> {
        let session = self.fresh_session().await?;
        let _: serde_json::Value = self
            .post_identity(
                "sendOobCode",
                &OobCodeRequest {
                    request_type: "VERIFY_EMAIL",
                    id_token: Some(&session.id_token),
                    email: None,
                },
            )
            .await?;
        Ok(())
    }

    pub async fn send_password_reset_email(&self, email: &str) -> Result<(), FirebaseError> {
        let _: serde_json::Value = self
            .post_identity(
                "sendOobCode",
                &OobCodeRequest {
                    request_type: "PASSWORD_RESET",
                    id_token: None,
                    email: Some(email),
                },
            )
            .await?;
        Ok(())
    }

    /// Set (`Some`) or remove (`None`) the current user's display name
    pub async fn update_profile(&self, display_name: Option<&str>) -> Result<(), FirebaseError> {
        let session = self.fresh_session().await?;
        let request = UpdateAccountRequest {
            id_token: &session.id_token,
            display_name,
            delete_attribute: if display_name.is_none() {
                vec!["DISPLAY_NAME"]
            } else {
                Vec::new()
            },
            ..Default::default()
        };
        let _: TokenResponse = self.post_identity("update", &request).await?;

        let display_name = display_name.filter(|n| !n.is_empty()).map(String::from);
        self.amend_session(session, |s| s.user.display_name = display_name)
            .await;
        Ok(())
    }

    pub async fn update_password(&self, password: &ClearTextPassword) -> Result<(), FirebaseError> {
        let session = self.fresh_session().await?;
        let request = UpdateAccountRequest {
            id_token: &session.id_token,
            password: Some(password.expose()),
            return_secure_token: true,
            ..Default::default()
        };
        let response: TokenResponse = self.post_identity("update", &request).await?;
        self.amend_session(session, |s| apply_rotated_tokens(s, response))
            .await;
        Ok(())
    }

    pub async fn update_email(&self, email: &str) -> Result<(), FirebaseError> {
        let session = self.fresh_session().await?;
        let request = UpdateAccountRequest {
            id_token: &session.id_token,
            email: Some(email),
            return_secure_token: true,
            ..Default::default()
        };
        let response: TokenResponse = self.post_identity("update", &request).await?;
        let email = response.email.clone().unwrap_or_else(|| email.to_string());
        let verified = response.email_verified.unwrap_or(false);
        self.amend_session(session, |s| {
            s.user.email = Some(email);
            s.user.email_verified = verified;
            apply_rotated_tokens(s, response);
        })
        .await;
        Ok(())
    }

    /// Forget the current session locally
    pub async fn sign_out(&self) -> Result<(), FirebaseError> {
        self.ensure_restored().await;
        self.apply_session(None).await;
        Ok(())
    }

    /// Current ID token, refreshed when close to expiry
    ///
    /// `Ok(None)` when nobody is signed in.
    pub async fn id_token(&self, force_refresh: bool) -> Result<Option<String>, FirebaseError> {
        self.ensure_restored().await;
        let Some(session) = self.session.read().await.clone() else {
            return Ok(None);
        };
        let session = if force_refresh || session.needs_refresh(now_ms()) {
            self.refresh(session).await?
        } else {
            session
        };
        Ok(Some(session.id_token))
    }

    pub async fn id_token_result(&self) -> Result<IdTokenResult, FirebaseError> {
        let session = self.fresh_session().await?;
        let claims = decode_jwt_claims(&session.id_token)?;
        Ok(IdTokenResult::new(session.id_token, claims))
    }

    // ========================================================================
    // Internals
    // ========================================================================

    async fn ensure_restored(&self) {
        self.restored.get_or_init(|| self.restore()).await;
    }

    async fn restore(&self) {
        if self.state.borrow().is_known() {
            return;
        }

        let restored = match self.store.load().await {
            Ok(Some(session)) if session.needs_refresh(now_ms()) => {
                self.exchange(session).await.map(Some)
            }
            other => other,
        };

        let session = match restored {
            Ok(Some(session)) => {
                info!(uid = %session.user.uid, "Restored persisted session");
                Some(session)
            }
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "Discarding persisted session");
                None
            }
        };

        if !self.state.borrow().is_known() {
            self.apply_session(session).await;
        }
    }

    /// The current session with a usable ID token
    async fn fresh_session(&self) -> Result<Session, FirebaseError> {
        self.ensure_restored().await;
        let session = self
            .session
            .read()
            .await
            .clone()
            .ok_or(FirebaseError::NoCurrentUser)?;
        if session.needs_refresh(now_ms()) {
            self.refresh(session).await
        } else {
            Ok(session)
        }
    }

    async fn refresh(&self, session: Session) -> Result<Session, FirebaseError> {
        match self.exchange(session).await {
            Ok(refreshed) => {
                self.apply_session(Some(refreshed.clone())).await;
                Ok(refreshed)
            }
            Err(e) if e.invalidates_session() => {
                warn!(error = %e, "Refresh token rejected; signing out");
                self.apply_session(None).await;
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    /// Trade the refresh token for a new ID token
    async fn exchange(&self, session: Session) -> Result<Session, FirebaseError> {
        let url = format!("{}/token", self.config.secure_token_url());
        let response = self
            .http
            .post(url)
            .query(&[("key", self.config.api_key.as_str())])
            .json(&RefreshRequest {
                grant_type: "refresh_token",
                refresh_token: &session.refresh_token,
            })
            .send()
            .await?;
        let refreshed: RefreshResponse = read_json(response, Service::Auth).await?;

        if let Some(uid) = &refreshed.user_id
            && *uid != session.user.uid
        {
            return Err(FirebaseError::Api {
                status: 400,
                code: "auth/user-mismatch".to_string(),
                message: "The refreshed token belongs to a different user.".to_string(),
            });
        }

        debug!(uid = %session.user.uid, "ID token refreshed");
        Ok(Session {
            expires_at: expiry_from_now(refreshed.expires_in.as_deref()),
            id_token: refreshed.id_token,
            refresh_token: refreshed.refresh_token,
            user: session.user,
        })
    }

    /// Turn a sign-in/sign-up response into the current session
    async fn establish(&self, response: TokenResponse) -> Result<UserCredential, FirebaseError> {
        let (Some(uid), Some(id_token), Some(refresh_token)) =
            (response.local_id, response.id_token, response.refresh_token)
        else {
            return Ok(UserCredential::empty());
        };

        let user = match self.lookup(&id_token).await? {
            Some(user) => user,
            None => User {
                uid,
                email: response.email,
                display_name: response.display_name.filter(|n| !n.is_empty()),
                email_verified: false,
            },
        };

        let session = Session {
            user: user.clone(),
            id_token: id_token.clone(),
            refresh_token,
            expires_at: expiry_from_now(response.expires_in.as_deref()),
        };
        self.apply_session(Some(session)).await;

        Ok(UserCredential {
            user: Some(user),
            id_token: Some(id_token),
        })
    }

    async fn lookup(&self, id_token: &str) -> Result<Option<User>, FirebaseError> {
        let response: LookupResponse = self
            .post_identity("lookup", &LookupRequest { id_token })
            .await?;
        Ok(response.users.into_iter().next().map(User::from))
    }

    /// Modify the session `base` was taken from, unless it changed meanwhile
    async fn amend_session(&self, base: Session, amend: impl FnOnce(&mut Session)) {
        let current = self.session.read().await.clone();
        let Some(mut session) = current.filter(|s| s.user.uid == base.user.uid) else {
            return;
        };
        amend(&mut session);
        self.apply_session(Some(session)).await;
    }

    /// Install `session` (or sign out), persist it and publish the new state
    async fn apply_session(&self, session: Option<Session>) {
        let persistence = *self.persistence.read().await;
        let stored = match &session {
            Some(s) if persistence == Persistence::Local => self.store.save(s).await,
            _ => self.store.clear().await,
        };
        if let Err(e) = stored {
            warn!(error = %e, "Failed to update the persisted session");
        }

        let state = match &session {
            Some(s) => AuthState::SignedIn(s.user.clone()),
            None => AuthState::SignedOut,
        };
        *self.session.write().await = session;
        self.state.send_if_modified(|current| {
            if *current == state {
                false
            } else {
                *current = state;
                true
            }
        });
    }

    async fn post_identity<B, R>(&self, endpoint: &str, body: &B) -> Result<R, FirebaseError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!(
            "{}/accounts:{}",
            self.config.identity_toolkit_url(),
            endpoint
        );
        let mut request = self
            .http
            .post(url)
            .query(&[("key", self.config.api_key.as_str())])
            .json(body);
        if let Some(locale) = &self.config.locale {
            request = request.header(LOCALE_HEADER, locale);
        }
        let response = request.send().await?;
        read_json(response, Service::Auth).await
    }

    /// Test hook: install a session as if the user had just signed in
    #[cfg(test)]
    pub(crate) async fn install_session(&self, session: Session) {
        self.restored.get_or_init(|| async {}).await;
        self.apply_session(Some(session)).await;
    }
}

fn apply_rotated_tokens(session: &mut Session, response: TokenResponse) {
    if let (Some(id_token), Some(refresh_token)) = (response.id_token, response.refresh_token) {
        session.id_token = id_token;
        session.refresh_token = refresh_token;
        session.expires_at = expiry_from_now(response.expires_in.as_deref());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth_with_file(path: Option<std::path::PathBuf>) -> FirebaseAuth {
        let config = FirebaseConfig {
            session_file: path,
            ..FirebaseConfig::new("key", "demo-project")
        };
        FirebaseAuth::new(reqwest::Client::new(), Arc::new(config))
    }

    fn session(uid: &str) -> Session {
        Session {
            user: User {
                uid: uid.to_string(),
                email: Some(format!("{uid}@example.com")),
                display_name: None,
                email_verified: false,
            },
            id_token: "header.eyJzdWIiOiJ1MSJ9.sig".to_string(),
            refresh_token: "refresh".to_string(),
            expires_at: now_ms() + 3_600_000,
        }
    }

    #[tokio::test]
    async fn test_resolves_signed_out_without_persisted_session() {
        let auth = auth_with_file(None);
        assert_eq!(auth.current_user(), None);
        let user = auth
            .resolve_current_user(Duration::from_secs(1))
            .await
            .unwrap();
        assert_eq!(user, None);
        assert_eq!(*auth.on_auth_state_changed().borrow(), AuthState::SignedOut);
    }

    #[tokio::test]
    async fn test_restores_persisted_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, serde_json::to_vec(&session("u1")).unwrap()).unwrap();

        let auth = auth_with_file(Some(path));
        let user = auth
            .resolve_current_user(Duration::from_secs(1))
            .await
            .unwrap();
        assert_eq!(user.map(|u| u.uid).as_deref(), Some("u1"));
        assert_eq!(
            auth.id_token(false).await.unwrap().as_deref(),
            Some("header.eyJzdWIiOiJ1MSJ9.sig")
        );
    }

    #[tokio::test]
    async fn test_corrupt_session_file_resolves_signed_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, b"{").unwrap();

        let auth = auth_with_file(Some(path));
        let user = auth
            .resolve_current_user(Duration::from_secs(1))
            .await
            .unwrap();
        assert_eq!(user, None);
    }

    #[tokio::test]
    async fn test_sign_out_notifies_observers_and_clears_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let auth = auth_with_file(Some(path.clone()));
        auth.install_session(session("u1")).await;
        assert!(path.exists());

        let mut rx = auth.on_auth_state_changed();
        assert!(rx.borrow_and_update().user().is_some());

        auth.sign_out().await.unwrap();
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), AuthState::SignedOut);
        assert!(!path.exists());
        assert_eq!(auth.id_token(false).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_session_persistence_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let auth = auth_with_file(Some(path.clone()));
        auth.install_session(session("u1")).await;
        assert!(path.exists());

        auth.set_persistence(Persistence::Session).await.unwrap();
        assert!(!path.exists());
        assert_eq!(auth.persistence().await, Persistence::Session);

        // still signed in for this process
        assert!(auth.current_user().is_some());
    }

    #[tokio::test]
    async fn test_operations_without_user_fail() {
        let auth = auth_with_file(None);
        assert!(matches!(
            auth.send_email_verification().await,
            Err(FirebaseError::NoCurrentUser)
        ));
        assert!(matches!(
            auth.id_token_result().await,
            Err(FirebaseError::NoCurrentUser)
        ));
    }

    #[tokio::test]
    async fn test_id_token_result_decodes_claims() {
        let auth = auth_with_file(None);
        auth.install_session(session("u1")).await;
        let result = auth.id_token_result().await.unwrap();
        assert_eq!(result.claims["sub"], "u1");
    }
}
