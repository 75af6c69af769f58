//! glimpse - Entry point for the bot backend

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;

use glimpse::config::{Settings, SettingsError};
use glimpse::providers::ai::{AzureOpenAiProvider, AzureVisionProvider};
use glimpse::providers::messaging::LineClient;
use glimpse::server::{self, AppState};
use glimpse::services::{ChatService, ChatSettings, MediaLibrary};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Starting glimpse");

    let settings_path = Settings::default_path().context("no config directory available")?;
    let settings = match Settings::load(&settings_path) {
        Ok(settings) => settings,
        Err(SettingsError::NotFound { path }) => {
            Settings::default().save(&path)?;
            anyhow::bail!(
                "settings template written to {}; fill in the credentials and restart",
                path.display()
            );
        }
        Err(e) => return Err(e.into()),
    };

    let notifier = Arc::new(LineClient::new(
        settings.messaging.channel_access_token.clone(),
    ));
    let vision = Arc::new(AzureVisionProvider::new(
        settings.vision.key.clone(),
        settings.vision.endpoint.clone(),
    ));
    let generation = Arc::new(
        AzureOpenAiProvider::new(
            settings.generation.key.clone(),
            settings.generation.endpoint.clone(),
            settings.generation.deployment.clone(),
        )
        .with_size(settings.generation.size.clone()),
    );

    let chat = Arc::new(ChatService::new(
        notifier,
        vision,
        generation,
        ChatSettings {
            imageset_dir: settings.search.imageset_dir.clone(),
            downloads_dir: settings.search.downloads_dir.clone(),
            public_url: settings.server.public_url.clone(),
            top_n: settings.search.top_n,
        },
    ));

    let library = MediaLibrary::new(settings.search.imageset_dir.clone());
    let state = AppState::new(chat, library, settings.messaging.channel_secret.clone());

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("invalid server bind address")?;

    server::serve(state, addr).await
}
