//! Webhook payload parsing.
//!
//! Translates the platform's webhook JSON into domain [`IncomingEvent`]s.
//! Event kinds the bot does not handle (stickers, video, unfollow,
//! group sources without a user id) are skipped, not errors — a delivery
//! batch is only rejected when the envelope itself is malformed.

use serde::Deserialize;

use crate::domain::{IncomingEvent, MessageId, ReplyToken, UserId};

use super::traits::{MessagingError, MessagingResult};

#[derive(Debug, Deserialize)]
struct WebhookPayload {
    #[serde(default)]
    events: Vec<WebhookEvent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WebhookEvent {
    #[serde(rename = "type")]
    kind: String,
    reply_token: Option<String>,
    source: Option<EventSource>,
    message: Option<EventMessage>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventSource {
    user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EventMessage {
    #[serde(rename = "type")]
    kind: String,
    id: String,
    text: Option<String>,
}

/// Parses a raw webhook body into the events the bot acts on.
pub fn parse_events(body: &[u8]) -> MessagingResult<Vec<IncomingEvent>> {
    let payload: WebhookPayload = serde_json::from_slice(body)
        .map_err(|e| MessagingError::InvalidPayload(e.to_string()))?;

    let mut events = Vec::new();
    for event in payload.events {
        match convert(event) {
            Some(converted) => events.push(converted),
            None => tracing::debug!("skipping unhandled webhook event"),
        }
    }

    Ok(events)
}

fn convert(event: WebhookEvent) -> Option<IncomingEvent> {
    let reply_token = ReplyToken(event.reply_token?);
    let user = UserId(event.source?.user_id?);

    match event.kind.as_str() {
        "message" => {
            let message = event.message?;
            match message.kind.as_str() {
                "text" => Some(IncomingEvent::Text {
                    user,
                    reply_token,
                    text: message.text?,
                }),
                "image" => Some(IncomingEvent::Image {
                    user,
                    reply_token,
                    message: MessageId(message.id),
                }),
                _ => None,
            }
        }
        "follow" => Some(IncomingEvent::Follow { user, reply_token }),
        _ => None,
    }
}
