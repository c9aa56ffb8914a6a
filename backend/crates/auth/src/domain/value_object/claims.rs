//! ID Token Claims
//!
//! The permission set the authentication service issued for the user:
//! registered JWT claims plus any custom claims set by an administrator.

use serde::Serialize;
use serde_json::{Map, Value};

/// Claims every Firebase ID token carries
const REGISTERED_CLAIMS: &[&str] = &[
    "iss",
    "aud",
    "auth_time",
    "user_id",
    "sub",
    "iat",
    "exp",
    "email",
    "email_verified",
    "firebase",
    "name",
    "picture",
];

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Claims(Map<String, Value>);

impl Claims {
    pub fn new(claims: Map<String, Value>) -> Self {
        Self(claims)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Claims an administrator added (roles, flags ...)
    pub fn custom(&self) -> Map<String, Value> {
        self.0
            .iter()
            .filter(|(k, _)| !REGISTERED_CLAIMS.contains(&k.as_str()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_claims() {
        let serde_json::Value::Object(map) = serde_json::json!({
            "sub": "u1",
            "exp": 1,
            "admin": true,
            "roles": ["editor"]
        }) else {
            unreachable!()
        };
        let claims = Claims::new(map);
        let custom = claims.custom();
        assert_eq!(custom.len(), 2);
        assert_eq!(custom["admin"], true);
        assert_eq!(claims.get("sub").and_then(Value::as_str), Some("u1"));
    }
}
