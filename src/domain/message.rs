//! Outgoing message types.

/// A message the bot sends back to a user, either as a webhook reply or a
/// push. Providers translate these into their own wire format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutgoingMessage {
    /// Plain text.
    Text { text: String },

    /// An image hosted at a public URL. The platform fetches both the
    /// full-size content and the preview itself.
    Image {
        original_url: String,
        preview_url: String,
    },
}

impl OutgoingMessage {
    /// Creates a text message.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Creates an image message using the same URL for content and preview.
    pub fn image(url: impl Into<String>) -> Self {
        let url = url.into();
        Self::Image {
            original_url: url.clone(),
            preview_url: url,
        }
    }
}
