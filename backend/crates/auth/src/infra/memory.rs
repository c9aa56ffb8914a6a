//! In-memory authentication backend
//!
//! Behaves like the hosted service for email/password accounts (one
//! signed-in user per backend, service-style error codes) without any
//! network. Used by tests and by the bridge's offline mode.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use nid::Nanoid;
use nid::alphabet::Base62Alphabet;
use platform::firebase::FirebaseError;
use platform::password::ClearTextPassword;
use serde_json::{Map, Value};

use crate::domain::entity::{credential::Credential, user::AuthUser};
use crate::domain::repository::AuthBackend;
use crate::domain::value_object::{
    claims::Claims, email::Email, persistence::SessionPersistence,
};
use crate::error::{AuthError, AuthResult};

/// Length of service-assigned user ids
type UidGen = Nanoid<28, Base62Alphabet>;

/// An e-mail the backend would have sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SentEmail {
    Verification { email: String },
    PasswordReset { email: String },
}

#[derive(Debug, Clone)]
struct Account {
    uid: String,
    password: String,
    display_name: Option<String>,
    email_verified: bool,
    custom_claims: Map<String, Value>,
}

#[derive(Debug, Default)]
struct State {
    /// Keyed by normalized e-mail
    accounts: HashMap<String, Account>,
    current: Option<String>,
    persistence: SessionPersistence,
    sent: Vec<SentEmail>,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryAuthBackend {
    state: Arc<Mutex<State>>,
    unresolved: bool,
    failing_side_effects: bool,
}

fn rejected(status: u16, code: &str, message: &str) -> AuthError {
    AuthError::Backend(FirebaseError::Api {
        status,
        code: code.to_string(),
        message: message.to_string(),
    })
}

fn invalid_credential() -> AuthError {
    rejected(
        400,
        "auth/invalid-credential",
        "The supplied auth credential is incorrect, malformed or has expired.",
    )
}

impl InMemoryAuthBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a verified account
    pub fn with_user(self, email: &str, password: &str) -> Self {
        {
            let mut state = self.lock();
            state.accounts.insert(
                email.trim().to_lowercase(),
                Account {
                    uid: UidGen::new().as_str().to_string(),
                    password: password.to_string(),
                    display_name: None,
                    email_verified: true,
                    custom_claims: Map::new(),
                },
            );
        }
        self
    }

    pub fn with_claims(self, email: &str, claims: Map<String, Value>) -> Self {
        if let Some(account) = self.lock().accounts.get_mut(&email.trim().to_lowercase()) {
            account.custom_claims = claims;
        }
        self
    }

    /// Session state never becomes known; `current_user` times out
    pub fn unresolved(mut self) -> Self {
        self.unresolved = true;
        self
    }

    /// Verification e-mails and profile updates fail
    pub fn with_failing_side_effects(mut self) -> Self {
        self.failing_side_effects = true;
        self
    }

    pub fn sent_emails(&self) -> Vec<SentEmail> {
        self.lock().sent.clone()
    }

    pub fn persistence(&self) -> SessionPersistence {
        self.lock().persistence
    }

    pub fn display_name_of(&self, email: &str) -> Option<String> {
        self.lock()
            .accounts
            .get(&email.trim().to_lowercase())
            .and_then(|a| a.display_name.clone())
    }

    pub fn has_account(&self, email: &str) -> bool {
        self.lock()
            .accounts
            .contains_key(&email.trim().to_lowercase())
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn user_of(email: &str, account: &Account) -> AuthUser {
        AuthUser {
            uid: account.uid.as_str().into(),
            email: Some(email.to_string()),
            display_name: account.display_name.clone(),
            email_verified: account.email_verified,
        }
    }

    /// Run `f` against the signed-in account
    fn with_current<T>(
        &self,
        f: impl FnOnce(&mut State, String) -> AuthResult<T>,
    ) -> AuthResult<T> {
        let mut state = self.lock();
        let email = state.current.clone().ok_or(AuthError::NoCurrentUser)?;
        f(&mut state, email)
    }

    fn side_effect_failure(&self) -> AuthResult<()> {
        if self.failing_side_effects {
            return Err(rejected(
                500,
                "auth/internal-error",
                "An internal error has occurred.",
            ));
        }
        Ok(())
    }
}

impl AuthBackend for InMemoryAuthBackend {
    async fn set_persistence(&self, persistence: SessionPersistence) -> AuthResult<()> {
        self.lock().persistence = persistence;
        Ok(())
    }

    async fn sign_in(&self, email: &Email, password: &ClearTextPassword) -> AuthResult<Credential> {
        let mut state = self.lock();
        let account = state
            .accounts
            .get(email.as_str())
            .filter(|a| a.password == password.expose())
            .ok_or_else(invalid_credential)?;

        let user = Self::user_of(email.as_str(), account);
        let id_token = format!("memory-token-{}", account.uid);
        state.current = Some(email.as_str().to_string());

        Ok(Credential {
            user: Some(user),
            id_token: Some(id_token),
        })
    }

    async fn create_user(
        &self,
        email: &Email,
        password: &ClearTextPassword,
    ) -> AuthResult<Credential> {
        let mut state = self.lock();
        if state.accounts.contains_key(email.as_str()) {
            return Err(rejected(
                400,
                "auth/email-already-in-use",
                "The email address is already in use by another account.",
            ));
        }

        let account = Account {
            uid: UidGen::new().as_str().to_string(),
            password: password.expose().to_string(),
            display_name: None,
            email_verified: false,
            custom_claims: Map::new(),
        };
        let user = Self::user_of(email.as_str(), &account);
        let id_token = format!("memory-token-{}", account.uid);
        state.accounts.insert(email.as_str().to_string(), account);
        state.current = Some(email.as_str().to_string());

        Ok(Credential {
            user: Some(user),
            id_token: Some(id_token),
        })
    }

    async fn send_email_verification(&self) -> AuthResult<()> {
        self.side_effect_failure()?;
        self.with_current(|state, email| {
            state.sent.push(SentEmail::Verification { email });
            Ok(())
        })
    }

    async fn update_profile(&self, display_name: Option<&str>) -> AuthResult<()> {
        self.side_effect_failure()?;
        self.with_current(|state, email| {
            if let Some(account) = state.accounts.get_mut(&email) {
                account.display_name = display_name.map(String::from);
            }
            Ok(())
        })
    }

    async fn sign_out(&self) -> AuthResult<()> {
        self.lock().current = None;
        Ok(())
    }

    async fn send_password_reset(&self, email: &Email) -> AuthResult<()> {
        let mut state = self.lock();
        if !state.accounts.contains_key(email.as_str()) {
            return Err(rejected(
                400,
                "auth/user-not-found",
                "There is no user record corresponding to this identifier.",
            ));
        }
        state.sent.push(SentEmail::PasswordReset {
            email: email.as_str().to_string(),
        });
        Ok(())
    }

    async fn update_password(&self, password: &ClearTextPassword) -> AuthResult<()> {
        self.with_current(|state, email| {
            if let Some(account) = state.accounts.get_mut(&email) {
                account.password = password.expose().to_string();
            }
            Ok(())
        })
    }

    async fn update_email(&self, new_email: &Email) -> AuthResult<()> {
        self.with_current(|state, email| {
            if state.accounts.contains_key(new_email.as_str()) {
                return Err(rejected(
                    400,
                    "auth/email-already-in-use",
                    "The email address is already in use by another account.",
                ));
            }
            let mut account = state
                .accounts
                .remove(&email)
                .ok_or(AuthError::NoCurrentUser)?;
            account.email_verified = false;
            state.accounts.insert(new_email.as_str().to_string(), account);
            state.current = Some(new_email.as_str().to_string());
            Ok(())
        })
    }

    async fn current_user(&self, wait: Duration) -> AuthResult<Option<AuthUser>> {
        if self.unresolved {
            tokio::time::sleep(wait).await;
            return Err(AuthError::SessionUnresolved);
        }
        let state = self.lock();
        Ok(state.current.as_ref().and_then(|email| {
            state
                .accounts
                .get(email)
                .map(|account| Self::user_of(email, account))
        }))
    }

    async fn claims(&self) -> AuthResult<Claims> {
        self.with_current(|state, email| {
            let account = state.accounts.get(&email).ok_or(AuthError::NoCurrentUser)?;
            let mut claims = account.custom_claims.clone();
            claims.insert("sub".to_string(), Value::from(account.uid.clone()));
            claims.insert("user_id".to_string(), Value::from(account.uid.clone()));
            claims.insert("email".to_string(), Value::from(email));
            claims.insert(
                "email_verified".to_string(),
                Value::from(account.email_verified),
            );
            Ok(Claims::new(claims))
        })
    }
}
