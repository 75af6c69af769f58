//! Webhook HTTP server.
//!
//! Two routes: the messaging platform posts signed event batches to
//! `/callback`, and the platform (or anyone) fetches item-set images from
//! `/media/:name` when the bot sends an image message.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::providers::messaging::{parse_events, validate_signature};
use crate::services::{ChatService, MediaLibrary};

const SIGNATURE_HEADER: &str = "x-line-signature";

/// Shared state behind the router.
#[derive(Clone)]
pub struct AppState {
    chat: Arc<ChatService>,
    library: MediaLibrary,
    channel_secret: String,
}

impl AppState {
    /// Creates the server state.
    pub fn new(
        chat: Arc<ChatService>,
        library: MediaLibrary,
        channel_secret: impl Into<String>,
    ) -> Self {
        Self {
            chat,
            library,
            channel_secret: channel_secret.into(),
        }
    }
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/callback", post(callback_handler))
        .route("/media/:name", get(media_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds and serves until shutdown.
pub async fn serve(state: AppState, addr: SocketAddr) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("webhook server listening on {}", addr);

    axum::serve(listener, router(state)).await?;
    Ok(())
}

/// Webhook entry point.
///
/// Dispatch failures are logged but still acknowledged with 200: the
/// platform redelivers on non-2xx, and a failing provider round-trip is
/// not something a redelivery would fix.
async fn callback_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok());

    let Some(signature) = signature else {
        return (StatusCode::BAD_REQUEST, "Missing signature.").into_response();
    };

    if !validate_signature(&state.channel_secret, &body, signature) {
        tracing::warn!("webhook delivery with invalid signature");
        return (StatusCode::BAD_REQUEST, "Invalid signature.").into_response();
    }

    let events = match parse_events(&body) {
        Ok(events) => events,
        Err(e) => {
            tracing::warn!(error = %e, "unparseable webhook payload");
            return (StatusCode::BAD_REQUEST, "Invalid payload.").into_response();
        }
    };

    for event in events {
        if let Err(e) = state.chat.handle_event(event).await {
            tracing::error!(error = %e, "event dispatch failed");
        }
    }

    (StatusCode::OK, "OK").into_response()
}

async fn media_handler(State(state): State<AppState>, Path(name): Path<String>) -> Response {
    let Some(path) = state.library.resolve(&name) else {
        return (StatusCode::NOT_FOUND, "Image not found.").into_response();
    };

    match tokio::fs::read(&path).await {
        Ok(content) => ([(header::CONTENT_TYPE, "image/jpeg")], content).into_response(),
        Err(e) => {
            tracing::error!(error = %e, path = %path.display(), "failed to read media file");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to read image.").into_response()
        }
    }
}
