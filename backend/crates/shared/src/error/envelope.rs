//! Error Envelope - the `{name, message}` shape rendered by the frontend
//!
//! Every expected, user-facing failure of the adapters (bad credentials,
//! unresolvable identity, backend rejection) is reported in this shape.

use serde::{Deserialize, Serialize};

/// フロントエンドに返すエラーの外形
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// 見出し ("Login Error", "Registration Error" ...)
    pub name: String,
    /// 人間向けメッセージ
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

impl ErrorEnvelope {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            stack: None,
        }
    }

    /// Build an envelope from any displayable error.
    pub fn from_error(name: impl Into<String>, error: &impl std::fmt::Display) -> Self {
        Self::new(name, error.to_string())
    }

    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }
}

impl std::fmt::Display for ErrorEnvelope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.name, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_without_stack() {
        let envelope = ErrorEnvelope::new("Login Error", "Invalid credentials");
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "Login Error", "message": "Invalid credentials"})
        );
    }

    #[test]
    fn test_serialize_with_stack() {
        let envelope = ErrorEnvelope::new("Error", "An error occurred").with_stack("Error stack");
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["stack"], "Error stack");
    }

    #[test]
    fn test_from_error() {
        let io_err = std::io::Error::other("disk full");
        let envelope = ErrorEnvelope::from_error("Logout Error", &io_err);
        assert_eq!(envelope.to_string(), "Logout Error: disk full");
    }
}
