//! Credential returned by sign-in and sign-up

use platform::firebase::UserCredential;

use crate::domain::entity::user::AuthUser;

/// Outcome of a credential exchange
///
/// Either part may be missing when the backend answered without an
/// identity; use cases treat that as "user not found".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Credential {
    pub user: Option<AuthUser>,
    pub id_token: Option<String>,
}

impl Credential {
    /// The user, if the backend issued a token for them
    pub fn authenticated_user(self) -> Option<AuthUser> {
        self.id_token.as_ref()?;
        self.user
    }
}

impl From<UserCredential> for Credential {
    fn from(credential: UserCredential) -> Self {
        Self {
            user: credential.user.map(AuthUser::from),
            id_token: credential.id_token,
        }
    }
}
