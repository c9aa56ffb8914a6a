//! Token Decoding Utilities
//!
//! ID tokens are only *decoded* here, never verified: the token came
//! straight from the Secure Token service over TLS and is forwarded to
//! Google APIs, which do the verification.

use base64::{Engine, engine::general_purpose};
use serde_json::{Map, Value};

/// Error when decoding a JWT payload
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenDecodeError {
    #[error("Token does not have three segments")]
    Malformed,
    #[error("Token payload is not valid base64url")]
    InvalidEncoding,
    #[error("Token payload is not a JSON object")]
    InvalidPayload,
}

/// Decode base64url with or without padding
pub fn from_base64_url(s: &str) -> Result<Vec<u8>, base64::DecodeError> {
    general_purpose::URL_SAFE_NO_PAD.decode(s.trim_end_matches('='))
}

/// Encode bytes as unpadded base64url
pub fn to_base64_url(bytes: &[u8]) -> String {
    general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

/// Decode the claim set of a JWT (`header.payload.signature`)
pub fn decode_jwt_claims(token: &str) -> Result<Map<String, Value>, TokenDecodeError> {
    let mut segments = token.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(TokenDecodeError::Malformed);
    };

    let bytes = from_base64_url(payload).map_err(|_| TokenDecodeError::InvalidEncoding)?;
    match serde_json::from_slice::<Value>(&bytes) {
        Ok(Value::Object(claims)) => Ok(claims),
        _ => Err(TokenDecodeError::InvalidPayload),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_with(payload: &Value) -> String {
        let header = to_base64_url(br#"{"alg":"RS256","typ":"JWT"}"#);
        let body = to_base64_url(payload.to_string().as_bytes());
        format!("{header}.{body}.c2lnbmF0dXJl")
    }

    #[test]
    fn test_decode_claims() {
        let token = token_with(&serde_json::json!({
            "sub": "uid-1",
            "email": "a@example.com",
            "admin": true
        }));
        let claims = decode_jwt_claims(&token).unwrap();
        assert_eq!(claims["sub"], "uid-1");
        assert_eq!(claims["admin"], true);
    }

    #[test]
    fn test_decode_rejects_malformed() {
        assert_eq!(decode_jwt_claims("abc"), Err(TokenDecodeError::Malformed));
        assert_eq!(decode_jwt_claims("a.b.c.d"), Err(TokenDecodeError::Malformed));
        assert_eq!(
            decode_jwt_claims("a.!!!.c"),
            Err(TokenDecodeError::InvalidEncoding)
        );
    }

    #[test]
    fn test_decode_rejects_non_object_payload() {
        let token = token_with(&serde_json::json!([1, 2, 3]));
        assert_eq!(decode_jwt_claims(&token), Err(TokenDecodeError::InvalidPayload));
    }

    #[test]
    fn test_base64_url_accepts_padding() {
        assert_eq!(from_base64_url("aGk=").unwrap(), b"hi");
        assert_eq!(from_base64_url("aGk").unwrap(), b"hi");
    }
}
