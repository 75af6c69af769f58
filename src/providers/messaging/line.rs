//! LINE Messaging API client.
//!
//! Replies and pushes go to the main API host; message content downloads
//! go to the separate data host.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};

use crate::domain::{MessageId, OutgoingMessage, ReplyToken, UserId};

use super::traits::{MessagingError, MessagingResult, Notifier};

const LINE_API_URL: &str = "https://api.line.me";
const LINE_DATA_URL: &str = "https://api-data.line.me";

/// Wire format for an outgoing message.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum WireMessage<'a> {
    Text {
        text: &'a str,
    },
    #[serde(rename_all = "camelCase")]
    Image {
        original_content_url: &'a str,
        preview_image_url: &'a str,
    },
}

impl<'a> From<&'a OutgoingMessage> for WireMessage<'a> {
    fn from(message: &'a OutgoingMessage) -> Self {
        match message {
            OutgoingMessage::Text { text } => WireMessage::Text { text },
            OutgoingMessage::Image {
                original_url,
                preview_url,
            } => WireMessage::Image {
                original_content_url: original_url,
                preview_image_url: preview_url,
            },
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReplyRequest<'a> {
    reply_token: &'a str,
    messages: Vec<WireMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct PushRequest<'a> {
    to: &'a str,
    messages: Vec<WireMessage<'a>>,
}

/// LINE API error response.
#[derive(Debug, Deserialize)]
struct LineError {
    message: String,
}

/// Client for the LINE Messaging API.
pub struct LineClient {
    client: reqwest::Client,
    access_token: String,
    api_url: String,
    data_url: String,
}

impl LineClient {
    /// Creates a new client with the channel access token.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            access_token: access_token.into(),
            api_url: LINE_API_URL.to_string(),
            data_url: LINE_DATA_URL.to_string(),
        }
    }

    /// Overrides both API hosts, for tests and proxies.
    pub fn with_urls(mut self, api_url: impl Into<String>, data_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self.data_url = data_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Overrides the HTTP client.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    fn build_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let bearer = format!("Bearer {}", self.access_token);
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&bearer).unwrap_or_else(|_| HeaderValue::from_static("")),
        );
        headers
    }

    fn content_url(&self, message: &MessageId) -> String {
        format!("{}/v2/bot/message/{}/content", self.data_url, message)
    }

    async fn handle_error_response(&self, response: reqwest::Response) -> MessagingError {
        let status = response.status().as_u16();

        if let Ok(error) = response.json::<LineError>().await {
            return MessagingError::Api {
                status,
                message: error.message,
            };
        }

        MessagingError::Api {
            status,
            message: format!("HTTP {}", status),
        }
    }

    async fn post_json<T: Serialize>(&self, url: String, body: &T) -> MessagingResult<()> {
        let response = self
            .client
            .post(url)
            .headers(self.build_headers())
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(self.handle_error_response(response).await);
        }

        Ok(())
    }
}

#[async_trait]
impl Notifier for LineClient {
    fn name(&self) -> &str {
        "line"
    }

    async fn reply(
        &self,
        reply_token: &ReplyToken,
        messages: &[OutgoingMessage],
    ) -> MessagingResult<()> {
        let body = ReplyRequest {
            reply_token: &reply_token.0,
            messages: messages.iter().map(WireMessage::from).collect(),
        };

        self.post_json(format!("{}/v2/bot/message/reply", self.api_url), &body)
            .await
    }

    async fn push(&self, user: &UserId, messages: &[OutgoingMessage]) -> MessagingResult<()> {
        let body = PushRequest {
            to: &user.0,
            messages: messages.iter().map(WireMessage::from).collect(),
        };

        self.post_json(format!("{}/v2/bot/message/push", self.api_url), &body)
            .await
    }

    async fn fetch_content(&self, message: &MessageId) -> MessagingResult<Bytes> {
        let response = self
            .client
            .get(self.content_url(message))
            .headers(self.build_headers())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(self.handle_error_response(response).await);
        }

        Ok(response.bytes().await?)
    }
}
