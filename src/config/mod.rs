//! Configuration and settings management.
//!
//! This module provides application settings types and persistence.
//! Settings are stored as JSON and cover the webhook server, messaging
//! credentials, AI provider credentials, and search parameters.

mod settings;

pub use settings::{
    GenerationSettings, MessagingSettings, SearchSettings, ServerSettings, Settings, SettingsError,
    VisionSettings,
};
