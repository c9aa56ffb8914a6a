//! Authenticated User Entity
//!
//! Projection of the account owned by the authentication service. The
//! adapter never persists it; it is re-read from the backend on demand.

use kernel::id::Uid;
use platform::firebase::User;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub uid: Uid,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub email_verified: bool,
}

impl AuthUser {
    pub fn new(uid: impl Into<Uid>, email: Option<String>) -> Self {
        Self {
            uid: uid.into(),
            email,
            display_name: None,
            email_verified: false,
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }
}

impl From<User> for AuthUser {
    fn from(user: User) -> Self {
        Self {
            uid: Uid::new(user.uid),
            email: user.email,
            display_name: user.display_name,
            email_verified: user.email_verified,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_backend_user() {
        let user = AuthUser::from(User {
            uid: "u1".to_string(),
            email: Some("a@example.com".to_string()),
            display_name: Some("Alice".to_string()),
            email_verified: true,
        });
        assert_eq!(user.uid.as_str(), "u1");
        assert_eq!(user.display_name.as_deref(), Some("Alice"));
        assert!(user.email_verified);
    }
}
