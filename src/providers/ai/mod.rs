//! AI provider implementations.
//!
//! This module provides a unified interface for the two cloud AI services
//! the bot orchestrates: image understanding (captioning and embeddings)
//! and text-to-image generation.
//!
//! # Example
//!
//! ```rust,no_run
//! use glimpse::providers::ai::{
//!     AzureOpenAiProvider, AzureVisionProvider, GenerationProvider, VisionProvider,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let vision = AzureVisionProvider::new("key", "https://res.cognitiveservices.azure.com");
//! let caption = vision.caption_image(&[0u8; 4]).await?;
//! println!("{} ({:.2})", caption.text, caption.confidence);
//!
//! let generation = AzureOpenAiProvider::new("key", "https://res.openai.azure.com", "dall-e-3");
//! let image = generation.generate_image("a lighthouse at dusk").await?;
//! println!("hosted at {}", image.url);
//! # Ok(())
//! # }
//! ```

mod azure_openai;
mod azure_vision;
mod traits;

pub use azure_openai::AzureOpenAiProvider;
pub use azure_vision::AzureVisionProvider;
pub use traits::{
    Caption, GeneratedImage, GenerationProvider, ProviderError, ProviderResult, VisionProvider,
};
