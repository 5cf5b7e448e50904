//! Access token inspection
//!
//! The access token is a JWT. We only ever read its `exp` claim to tell the
//! user when the session runs out; signatures are the server's business.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Deserialize)]
struct Claims {
    exp: Option<i64>,
}

/// Read the expiry time from a JWT, if it has one
///
/// Returns `None` for empty tokens, tokens that are not three dot-separated
/// segments, or payloads without a numeric `exp` claim.
pub fn token_expiry(token: &str) -> Option<DateTime<Utc>> {
    let mut segments = token.split('.');
    let (_header, payload, _signature) = (segments.next()?, segments.next()?, segments.next()?);
    if segments.next().is_some() {
        return None;
    }

    // Some issuers keep the padding even though JWT forbids it
    let decoded = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    let claims: Claims = serde_json::from_slice(&decoded).ok()?;
    DateTime::from_timestamp(claims.exp?, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_token(payload: &str) -> String {
        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(payload);
        format!("{}.{}.signature", header, body)
    }

    #[test]
    fn test_token_expiry() {
        let token = make_token(r#"{"sub":"u1","exp":1700000000}"#);
        let expiry = token_expiry(&token).unwrap();
        assert_eq!(expiry.timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_token_without_exp() {
        let token = make_token(r#"{"sub":"u1"}"#);
        assert!(token_expiry(&token).is_none());
    }

    #[test]
    fn test_not_a_jwt() {
        assert!(token_expiry("").is_none());
        assert!(token_expiry("opaque-token").is_none());
        assert!(token_expiry("a.b.c.d").is_none());
        assert!(token_expiry("a.!!!.c").is_none());
    }
}
