//! Core identifier types for domain entities.
//!
//! These newtype wrappers provide type safety for the identifiers handed
//! to us by the messaging platform, preventing accidental mixing of
//! different ID types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a chat user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for UserId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Unique identifier for a received message, used to fetch its content.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub String);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for MessageId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for MessageId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Single-use token authorizing one reply to a webhook event.
///
/// Reply tokens expire shortly after the event is delivered and are
/// consumed by the first reply; later messages to the same user must go
/// through push delivery instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReplyToken(pub String);

impl fmt::Display for ReplyToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ReplyToken {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ReplyToken {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}
