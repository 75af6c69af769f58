//! Application settings and configuration types.
//!
//! Settings are persisted as JSON (default location
//! `~/.config/glimpse/settings.json` or the XDG equivalent) and loaded at
//! startup. A missing file is reported distinctly so the binary can write
//! the template and tell the operator to fill it in.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur loading or saving settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings file not found at {path}")]
    NotFound { path: PathBuf },

    #[error("failed to access settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("settings file {path} is malformed: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Top-level application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Webhook server binding and public URL.
    pub server: ServerSettings,
    /// Messaging platform credentials.
    pub messaging: MessagingSettings,
    /// Vision service credentials.
    pub vision: VisionSettings,
    /// Image generation service credentials.
    pub generation: GenerationSettings,
    /// Similarity search configuration.
    pub search: SearchSettings,
}

impl Settings {
    /// Loads settings from `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(SettingsError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let raw = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&raw).map_err(|source| SettingsError::Malformed {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Writes settings to `path` as pretty JSON, creating parent
    /// directories as needed.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| SettingsError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
            }
        }

        let json = serde_json::to_string_pretty(self).map_err(|source| {
            SettingsError::Malformed {
                path: path.to_path_buf(),
                source,
            }
        })?;

        fs::write(path, json).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Platform config location for the settings file.
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "glimpse")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }
}

/// Webhook server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Bind address.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Externally reachable base URL, used to build media links in
    /// outgoing image messages. No trailing slash.
    pub public_url: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            public_url: String::new(),
        }
    }
}

/// Messaging platform credentials.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessagingSettings {
    /// Channel access token for reply/push delivery.
    pub channel_access_token: String,
    /// Channel secret used to validate webhook signatures.
    pub channel_secret: String,
}

/// Vision service credentials.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VisionSettings {
    /// API key.
    pub key: String,
    /// Resource endpoint, e.g. `https://res.cognitiveservices.azure.com`.
    pub endpoint: String,
}

/// Image generation service credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationSettings {
    /// API key.
    pub key: String,
    /// Resource endpoint, e.g. `https://res.openai.azure.com`.
    pub endpoint: String,
    /// Image model deployment name.
    pub deployment: String,
    /// Generated image size.
    pub size: String,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            key: String::new(),
            endpoint: String::new(),
            deployment: "dall-e-3".to_string(),
            size: "1024x1024".to_string(),
        }
    }
}

/// Similarity search configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchSettings {
    /// Directory of images to vectorize and search.
    pub imageset_dir: PathBuf,
    /// Directory where received message content is stored.
    pub downloads_dir: PathBuf,
    /// How many similar images to report.
    pub top_n: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            imageset_dir: PathBuf::from("./imageset"),
            downloads_dir: PathBuf::from("./downloads"),
            top_n: 1,
        }
    }
}
