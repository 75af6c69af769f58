//! Messaging delivery trait and supporting types.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

use crate::domain::{MessageId, OutgoingMessage, ReplyToken, UserId};

/// Errors that can occur during messaging operations.
#[derive(Debug, Error)]
pub enum MessagingError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Invalid webhook payload: {0}")]
    InvalidPayload(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Result type for messaging operations.
pub type MessagingResult<T> = Result<T, MessagingError>;

/// Trait for delivering messages back to users.
///
/// One implementation per messaging platform. Reply delivery consumes the
/// event's reply token; push delivery addresses the user directly and is
/// used for follow-up messages after the token is spent.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Returns the provider's name (e.g., "line").
    fn name(&self) -> &str;

    /// Replies to a webhook event.
    async fn reply(
        &self,
        reply_token: &ReplyToken,
        messages: &[OutgoingMessage],
    ) -> MessagingResult<()>;

    /// Pushes messages to a user outside the reply window.
    async fn push(&self, user: &UserId, messages: &[OutgoingMessage]) -> MessagingResult<()>;

    /// Downloads the binary content of a received message.
    async fn fetch_content(&self, message: &MessageId) -> MessagingResult<Bytes>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display() {
        let err = MessagingError::Api {
            status: 400,
            message: "invalid reply token".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 400 - invalid reply token");
    }

    #[test]
    fn invalid_payload_display() {
        let err = MessagingError::InvalidPayload("not json".to_string());
        assert!(err.to_string().contains("not json"));
    }
}
