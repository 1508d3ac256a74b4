use std::fmt;

use serde::{Deserialize, Serialize};

/// Nested error payload, as carried by service-side failures.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// Failure reported by the record fetch service.
///
/// Mirrors the loosely-shaped errors services hand back: an optional nested
/// `body.message` and an optional top-level `message`. Unknown fields are
/// ignored when deserializing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FetchError {
    #[serde(default)]
    pub body: Option<ErrorBody>,
    #[serde(default)]
    pub message: Option<String>,
}

impl FetchError {
    /// Error whose message lives in the nested body.
    pub fn with_body(message: impl Into<String>) -> Self {
        Self {
            body: Some(ErrorBody {
                message: Some(message.into()),
            }),
            message: None,
        }
    }

    /// Error with only a top-level message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            body: None,
            message: Some(message.into()),
        }
    }

    /// Human-readable message: nested body message first, then the top-level
    /// message, else an empty string.
    pub fn user_message(&self) -> &str {
        self.body
            .as_ref()
            .and_then(|body| body.message.as_deref())
            .or(self.message.as_deref())
            .unwrap_or("")
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.user_message() {
            "" => write!(f, "fetch failed"),
            message => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for FetchError {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> FetchError {
        serde_json::from_value(value).expect("error shape")
    }

    #[test]
    fn nested_message_wins() {
        let err = parse(json!({"body": {"message": "X"}, "message": "outer"}));
        assert_eq!(err.user_message(), "X");
    }

    #[test]
    fn top_level_message_without_body() {
        assert_eq!(parse(json!({"message": "Y"})).user_message(), "Y");
    }

    #[test]
    fn body_without_message_falls_back_to_top_level() {
        let err = parse(json!({"body": {}, "message": "Y"}));
        assert_eq!(err.user_message(), "Y");
    }

    #[test]
    fn empty_object_has_empty_message() {
        let err = parse(json!({}));
        assert_eq!(err.user_message(), "");
        assert_eq!(err.to_string(), "fetch failed");
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let err = parse(json!({"status": 500, "body": {"message": "boom", "code": 7}}));
        assert_eq!(err, FetchError::with_body("boom"));
    }
}
