use thiserror::Error;

/// Message the backend sends when a mood for the given date already exists.
pub const MOOD_EXISTS_MESSAGE: &str = "Mood for this date already exists";

#[derive(Debug, Error)]
pub enum MoodError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("API error {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Api {
        status: u16,
        message: Option<String>,
    },

    #[error("Unauthorized: {}", .message.as_deref().unwrap_or("session rejected by server"))]
    Unauthorized { message: Option<String> },

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("Session error: {0}")]
    Session(String),
}

impl MoodError {
    /// The message the server attached to a failed response, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Api { message, .. } | Self::Unauthorized { message } => message.as_deref(),
            _ => None,
        }
    }

    /// Returns `true` when the server rejected a create because today's mood
    /// was already recorded.
    pub fn is_mood_conflict(&self) -> bool {
        self.server_message() == Some(MOOD_EXISTS_MESSAGE)
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// The server message when present, otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message()
            .filter(|m| !m.is_empty())
            .unwrap_or(fallback)
            .to_string()
    }
}

/// Pull a human-readable message out of an error response body.
///
/// Checks `messages` before `message`. `messages` may be a plain string or an
/// object keyed by field, in which case the first string value wins.
pub fn extract_server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let pick = |v: &serde_json::Value| -> Option<String> {
        match v {
            serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
            serde_json::Value::Object(map) => map.values().find_map(|v| match v {
                serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
                _ => None,
            }),
            _ => None,
        }
    };
    value
        .get("messages")
        .and_then(pick)
        .or_else(|| value.get("message").and_then(pick))
}

pub type Result<T> = std::result::Result<T, MoodError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_detected_from_api_message() {
        let err = MoodError::Api {
            status: 400,
            message: Some(MOOD_EXISTS_MESSAGE.to_string()),
        };
        assert!(err.is_mood_conflict());
    }

    #[test]
    fn test_other_message_is_not_conflict() {
        let err = MoodError::Api {
            status: 400,
            message: Some("Validation failed".into()),
        };
        assert!(!err.is_mood_conflict());
        assert_eq!(err.user_message("fallback"), "Validation failed");
    }

    #[test]
    fn test_user_message_fallback() {
        let err = MoodError::Api {
            status: 500,
            message: None,
        };
        assert_eq!(err.user_message("Something broke"), "Something broke");

        let err = MoodError::Validation("x".into());
        assert_eq!(err.user_message("fallback"), "fallback");
    }

    #[test]
    fn test_extract_messages_string_first() {
        let body = r#"{"messages": "Mood for this date already exists", "message": "other"}"#;
        assert_eq!(
            extract_server_message(body).as_deref(),
            Some(MOOD_EXISTS_MESSAGE)
        );
    }

    #[test]
    fn test_extract_messages_object() {
        let body = r#"{"status": 400, "messages": {"error": "Email already registered"}}"#;
        assert_eq!(
            extract_server_message(body).as_deref(),
            Some("Email already registered")
        );
    }

    #[test]
    fn test_extract_message_fallback_and_garbage() {
        assert_eq!(
            extract_server_message(r#"{"message": "nope"}"#).as_deref(),
            Some("nope")
        );
        assert!(extract_server_message("<html>502</html>").is_none());
        assert!(extract_server_message(r#"{"message": ""}"#).is_none());
    }

    #[test]
    fn test_unauthorized_flag() {
        let err = MoodError::Unauthorized { message: None };
        assert!(err.is_unauthorized());
        assert!(!err.is_mood_conflict());
    }
}
