//! API request and response types.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/chat`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatRequest {
    /// The user's message; a missing key counts as empty
    #[serde(default)]
    pub message: Option<String>,
}

impl ChatRequest {
    /// The message if it has any non-whitespace content.
    pub fn validated_message(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.trim().is_empty())
    }
}

/// Successful reply from `POST /api/chat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// The agent's final text
    pub response: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service name
    pub service: String,
}

/// Error payload. `code` becomes the HTTP status; only `detail` is in the body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(skip)]
    pub code: u16,

    /// Human-readable failure description
    pub detail: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_and_blank_messages_are_invalid() {
        let missing: ChatRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(missing.validated_message(), None);

        let blank: ChatRequest = serde_json::from_str(r#"{"message": "  \n"}"#).unwrap();
        assert_eq!(blank.validated_message(), None);

        let null: ChatRequest = serde_json::from_str(r#"{"message": null}"#).unwrap();
        assert_eq!(null.validated_message(), None);

        let ok: ChatRequest = serde_json::from_str(r#"{"message": " hi "}"#).unwrap();
        assert_eq!(ok.validated_message(), Some(" hi "));
    }

    #[test]
    fn envelope_serializes_detail_only() {
        let envelope = ErrorEnvelope {
            code: 400,
            detail: "Message is required".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&envelope).unwrap(),
            r#"{"detail":"Message is required"}"#
        );
    }
}
