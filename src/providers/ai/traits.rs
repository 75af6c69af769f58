//! Vision and generation provider traits and supporting types.

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

use crate::search::Embedding;

/// Errors that can occur during AI provider operations.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Rate limited, retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Failed to read media: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// A natural-language description of an image.
#[derive(Debug, Clone, PartialEq)]
pub struct Caption {
    /// The caption text.
    pub text: String,

    /// Model confidence in the caption, 0.0 to 1.0.
    pub confidence: f64,
}

/// An image produced by a generation provider, hosted by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    /// URL of the hosted image.
    pub url: String,

    /// The prompt after any provider-side rewriting, when reported.
    pub revised_prompt: Option<String>,
}

/// Trait for image understanding providers (captioning and embeddings).
///
/// Implementations wrap one cloud vision API; the rest of the crate only
/// depends on this contract. Embeddings for images and text from the same
/// provider share a vector space, which is what makes cross-modal
/// similarity search work.
#[async_trait]
pub trait VisionProvider: Send + Sync {
    /// Returns the provider's name (e.g., "azure-vision").
    fn name(&self) -> &str;

    /// Describes an image, returning a caption with confidence.
    async fn caption_image(&self, image: &[u8]) -> ProviderResult<Caption>;

    /// Embeds an image into a fixed-length vector.
    async fn embed_image(&self, image: &[u8]) -> ProviderResult<Embedding>;

    /// Embeds a piece of text into the same vector space as images.
    async fn embed_text(&self, text: &str) -> ProviderResult<Embedding>;

    /// Reads an image file and embeds its contents.
    async fn embed_image_file(&self, path: &Path) -> ProviderResult<Embedding> {
        let bytes = tokio::fs::read(path).await?;
        self.embed_image(&bytes).await
    }
}

/// Trait for text-to-image generation providers.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Returns the provider's name (e.g., "azure-openai").
    fn name(&self) -> &str;

    /// Returns the model or deployment identifier being used.
    fn model(&self) -> &str;

    /// Generates one image from a text prompt.
    async fn generate_image(&self, prompt: &str) -> ProviderResult<GeneratedImage>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display_carries_status_and_message() {
        let err = ProviderError::Api {
            status: 403,
            message: "quota exceeded".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 403 - quota exceeded");
    }

    #[test]
    fn rate_limited_display() {
        let err = ProviderError::RateLimited {
            retry_after_secs: Some(30),
        };
        assert!(err.to_string().contains("30"));
    }

    #[tokio::test]
    async fn embed_image_file_surfaces_read_failure() {
        struct NoopVision;

        #[async_trait]
        impl VisionProvider for NoopVision {
            fn name(&self) -> &str {
                "noop"
            }

            async fn caption_image(&self, _image: &[u8]) -> ProviderResult<Caption> {
                unreachable!("not exercised")
            }

            async fn embed_image(&self, _image: &[u8]) -> ProviderResult<Embedding> {
                Ok(Embedding::new(vec![1.0]))
            }

            async fn embed_text(&self, _text: &str) -> ProviderResult<Embedding> {
                Ok(Embedding::new(vec![1.0]))
            }
        }

        let missing = Path::new("/definitely/not/here.jpg");
        let err = NoopVision.embed_image_file(missing).await.unwrap_err();
        assert!(matches!(err, ProviderError::Io(_)));
    }
}
