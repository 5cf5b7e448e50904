//! Response envelope for the domain API
//!
//! Every domain endpoint wraps its payload the same way. Failure is signalled
//! in one of two ways depending on the endpoint: a non-zero integer `error`
//! with `msg`, or a string `e` with `message`. A numeric error wins when an
//! envelope carries both.

use serde::Deserialize;

use crate::error::{MoneyLoverError, MoneyLoverResult};
use crate::models::null_as_default;

/// Wrapper around every domain API response
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResponseEnvelope<T> {
    /// Non-zero on failure for numeric-style endpoints
    #[serde(default, deserialize_with = "null_as_default")]
    pub error: i64,

    /// Message accompanying a numeric error
    #[serde(default, deserialize_with = "null_as_default")]
    pub msg: String,

    /// Non-empty on failure for tag-style endpoints
    #[serde(default, deserialize_with = "null_as_default")]
    pub e: String,

    /// Message accompanying a tag error
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,

    /// Payload, absent on most failures
    pub data: Option<T>,
}

/// Outcome reported by an envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeStatus<'a> {
    /// No error signalled
    Ok,
    /// Non-zero `error`
    Numeric { code: i64, message: &'a str },
    /// Non-empty `e`
    Tagged { code: &'a str, message: &'a str },
}

impl<T> ResponseEnvelope<T> {
    /// Classify the envelope
    pub fn status(&self) -> EnvelopeStatus<'_> {
        if self.error != 0 {
            EnvelopeStatus::Numeric {
                code: self.error,
                message: &self.msg,
            }
        } else if !self.e.is_empty() {
            EnvelopeStatus::Tagged {
                code: &self.e,
                message: &self.message,
            }
        } else {
            EnvelopeStatus::Ok
        }
    }

    /// Unwrap the payload, turning a signalled failure into an API error
    ///
    /// A success without `data` yields `None`; callers decide what that means.
    pub fn into_result(self, operation: &'static str) -> MoneyLoverResult<Option<T>> {
        let failure = match self.status() {
            EnvelopeStatus::Ok => None,
            EnvelopeStatus::Numeric { code, message } => {
                Some((code.to_string(), message.to_string()))
            }
            EnvelopeStatus::Tagged { code, message } => {
                Some((code.to_string(), message.to_string()))
            }
        };

        match failure {
            Some((code, message)) => Err(MoneyLoverError::Api {
                operation,
                code,
                message,
            }),
            None => Ok(self.data),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn parse(json: &str) -> ResponseEnvelope<Value> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_success_envelope() {
        let envelope = parse(r#"{"error": 0, "msg": "", "data": [1, 2]}"#);
        assert_eq!(envelope.status(), EnvelopeStatus::Ok);
        let data = envelope.into_result("wallet.list").unwrap();
        assert_eq!(data, Some(serde_json::json!([1, 2])));
    }

    #[test]
    fn test_success_without_data() {
        let envelope = parse(r#"{"error": 0}"#);
        assert_eq!(envelope.into_result("wallet.list").unwrap(), None);

        let null_data = parse(r#"{"error": 0, "data": null}"#);
        assert_eq!(null_data.into_result("wallet.list").unwrap(), None);
    }

    #[test]
    fn test_numeric_error() {
        let envelope = parse(r#"{"error": 1, "msg": "bad wallet"}"#);
        let err = envelope.into_result("category.list").unwrap_err();
        assert_eq!(err.to_string(), "category.list failed: Error 1, bad wallet");
    }

    #[test]
    fn test_tagged_error() {
        let envelope = parse(r#"{"e": "717", "message": "token_device_not_found"}"#);
        let err = envelope.into_result("user.info").unwrap_err();
        assert!(matches!(err, MoneyLoverError::Api { ref code, .. } if code == "717"));
        assert!(err.is_session_expired());
    }

    #[test]
    fn test_numeric_error_wins() {
        let envelope = parse(r#"{"error": 2, "msg": "numeric", "e": "tag", "message": "tagged"}"#);
        assert_eq!(
            envelope.status(),
            EnvelopeStatus::Numeric {
                code: 2,
                message: "numeric"
            }
        );
    }

    #[test]
    fn test_null_fields_tolerated() {
        let envelope =
            parse(r#"{"error": null, "msg": null, "e": null, "message": null, "data": {}}"#);
        assert_eq!(envelope.status(), EnvelopeStatus::Ok);
    }
}
