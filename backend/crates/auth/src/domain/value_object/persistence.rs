//! Session Persistence Mode

use derive_more::Display;
use platform::firebase::Persistence;

/// Whether a session outlives the current process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
pub enum SessionPersistence {
    /// Current process only
    #[default]
    #[display("session")]
    Session,
    /// Survives restarts
    #[display("local")]
    Local,
}

impl SessionPersistence {
    /// "Remember me" maps to durable persistence
    pub fn from_remember(remember: bool) -> Self {
        if remember {
            SessionPersistence::Local
        } else {
            SessionPersistence::Session
        }
    }
}

impl From<SessionPersistence> for Persistence {
    fn from(p: SessionPersistence) -> Self {
        match p {
            SessionPersistence::Session => Persistence::Session,
            SessionPersistence::Local => Persistence::Local,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_remember() {
        assert_eq!(SessionPersistence::from_remember(true), SessionPersistence::Local);
        assert_eq!(SessionPersistence::from_remember(false), SessionPersistence::Session);
        assert_eq!(SessionPersistence::Local.to_string(), "local");
    }
}
