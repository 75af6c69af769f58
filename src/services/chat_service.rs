//! Chat dispatch service.
//!
//! The [`ChatService`] owns the conversation: it keeps per-user intent,
//! routes each incoming event to the right provider round-trip, and sends
//! the results back through the notifier. Provider failures propagate to
//! the caller; the service never retries, it only guarantees the user's
//! intent is not left stuck on a failed round-trip.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use crate::domain::{
    IncomingEvent, Intent, MessageId, OutgoingMessage, ReplyToken, SessionStore, UserId,
};
use crate::providers::ai::{GenerationProvider, VisionProvider};
use crate::providers::messaging::Notifier;
use crate::search::{top_n, vectorize_set};

use super::media_service::DownloadStore;

const ANALYZE_MENU_ITEM: &str = "Analyze Image";
const GENERATE_MENU_ITEM: &str = "Generate Image";

const ANALYZE_PROMPT: &str = "Please upload ONE image you wished to analyze.\n\
                              Processing might take a while, please be patient for the result.";
const GENERATE_PROMPT: &str = "Tell me what image would you like to generate today!\n\
                               Processing might take a while, please be patient for the result.";
const BUSY_REPLY: &str = "We're still processing your previous request, \
                          please wait for the result patiently.";
const MENU_REPLY: &str = "Please open the menu to select which service you want to use.";
const GREETING_REPLY: &str = "Thanks for adding me! \
                              Open the menu to analyze or generate images.";

/// Runtime configuration for the chat service.
#[derive(Debug, Clone)]
pub struct ChatSettings {
    /// Directory of images that uploads are searched against.
    pub imageset_dir: PathBuf,
    /// Directory where received uploads are stored.
    pub downloads_dir: PathBuf,
    /// Externally reachable base URL for serving item-set images.
    pub public_url: String,
    /// How many similar images to report.
    pub top_n: usize,
}

/// Routes incoming chat events to provider calls and replies.
pub struct ChatService {
    notifier: Arc<dyn Notifier>,
    vision: Arc<dyn VisionProvider>,
    generation: Arc<dyn GenerationProvider>,
    sessions: SessionStore,
    downloads: DownloadStore,
    settings: ChatSettings,
}

impl ChatService {
    /// Creates a new chat service.
    pub fn new(
        notifier: Arc<dyn Notifier>,
        vision: Arc<dyn VisionProvider>,
        generation: Arc<dyn GenerationProvider>,
        settings: ChatSettings,
    ) -> Self {
        Self {
            notifier,
            vision,
            generation,
            sessions: SessionStore::new(),
            downloads: DownloadStore::new(settings.downloads_dir.clone()),
            settings,
        }
    }

    /// Dispatches one incoming event to completion.
    pub async fn handle_event(&self, event: IncomingEvent) -> Result<()> {
        match event {
            IncomingEvent::Text {
                user,
                reply_token,
                text,
            } => self.handle_text(&user, &reply_token, &text).await,
            IncomingEvent::Image {
                user,
                reply_token,
                message,
            } => self.handle_image(&user, &reply_token, &message).await,
            IncomingEvent::Follow { user, reply_token } => {
                tracing::info!(%user, "new follower");
                self.reply_text(&reply_token, GREETING_REPLY).await
            }
        }
    }

    async fn handle_text(&self, user: &UserId, reply_token: &ReplyToken, text: &str) -> Result<()> {
        match text {
            ANALYZE_MENU_ITEM => {
                self.sessions.set(user, Intent::AwaitingImage).await;
                self.reply_text(reply_token, ANALYZE_PROMPT).await
            }
            GENERATE_MENU_ITEM => {
                self.sessions.set(user, Intent::AwaitingPrompt).await;
                self.reply_text(reply_token, GENERATE_PROMPT).await
            }
            prompt => match self.sessions.get(user).await {
                Some(Intent::AwaitingPrompt) => {
                    self.run_generation(user, reply_token, prompt).await
                }
                Some(Intent::Processing) => self.reply_text(reply_token, BUSY_REPLY).await,
                _ => self.reply_text(reply_token, MENU_REPLY).await,
            },
        }
    }

    async fn handle_image(
        &self,
        user: &UserId,
        reply_token: &ReplyToken,
        message: &MessageId,
    ) -> Result<()> {
        match self.sessions.get(user).await {
            Some(Intent::AwaitingImage) => {
                self.sessions.set(user, Intent::Processing).await;
                let result = self.run_analysis(user, reply_token, message).await;
                self.sessions.clear(user).await;
                result
            }
            Some(Intent::Processing) => self.reply_text(reply_token, BUSY_REPLY).await,
            _ => self.reply_text(reply_token, MENU_REPLY).await,
        }
    }

    /// Generates an image from the user's prompt and replies with it.
    async fn run_generation(
        &self,
        user: &UserId,
        reply_token: &ReplyToken,
        prompt: &str,
    ) -> Result<()> {
        self.sessions.set(user, Intent::Processing).await;
        let result = self.generation.generate_image(prompt).await;
        self.sessions.clear(user).await;

        let image = result?;
        tracing::info!(%user, url = %image.url, "generated image");

        self.notifier
            .reply(reply_token, &[OutgoingMessage::image(image.url)])
            .await?;
        Ok(())
    }

    /// Captions the uploaded image, ranks it against the item-set, replies
    /// with the findings, and pushes the best match.
    async fn run_analysis(
        &self,
        user: &UserId,
        reply_token: &ReplyToken,
        message: &MessageId,
    ) -> Result<()> {
        let content = self.notifier.fetch_content(message).await?;
        let stored = self.downloads.save(&content).await?;
        tracing::debug!(%user, path = %stored.display(), "stored uploaded image");

        let caption = self.vision.caption_image(&content).await?;
        let query = self.vision.embed_image(&content).await?;

        let vision = self.vision.clone();
        let set = vectorize_set(&self.settings.imageset_dir, move |path| {
            let vision = vision.clone();
            async move { vision.embed_image_file(&path).await }
        })
        .await?;

        let ranked = top_n(&query, &set, self.settings.top_n)?;

        let mut text = format!(
            "Caption: {}\nConfidence: {:.4}",
            caption.text, caption.confidence
        );
        for (index, (name, score)) in ranked.iter().enumerate() {
            let label = if index == 0 {
                "Top similar image"
            } else {
                "Also similar"
            };
            text.push_str(&format!("\n{label}: {name}\nSimilarity: {score:.4}"));
        }
        if ranked.is_empty() {
            text.push_str("\nNo similar images available.");
        }

        self.reply_text(reply_token, &text).await?;

        if let Some((name, _)) = ranked.first() {
            let url = self.media_url(name);
            self.notifier
                .push(user, &[OutgoingMessage::image(url)])
                .await?;
        }

        Ok(())
    }

    async fn reply_text(&self, reply_token: &ReplyToken, text: &str) -> Result<()> {
        self.notifier
            .reply(reply_token, &[OutgoingMessage::text(text)])
            .await?;
        Ok(())
    }

    /// Public URL serving an item-set image. Filenames may contain spaces,
    /// which the platform's URL fetcher rejects unencoded.
    fn media_url(&self, name: &str) -> String {
        format!(
            "{}/media/{}",
            self.settings.public_url.trim_end_matches('/'),
            name.replace(' ', "%20")
        )
    }
}
