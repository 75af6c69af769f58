//! Media storage and lookup.
//!
//! [`DownloadStore`] keeps content received from the messaging platform;
//! [`MediaLibrary`] resolves item-set images for HTTP serving.

use std::path::{Path, PathBuf};

use chrono::Utc;

/// Resolves item identifiers to files under the item-set root.
///
/// Identifiers come straight from URLs, so anything that could escape the
/// root (path separators, parent components) resolves to nothing.
#[derive(Debug, Clone)]
pub struct MediaLibrary {
    root: PathBuf,
}

impl MediaLibrary {
    /// Creates a library over the given item-set directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The item-set root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps an item identifier to its file, if the identifier is safe and
    /// the file exists.
    pub fn resolve(&self, name: &str) -> Option<PathBuf> {
        if name.is_empty()
            || name == "."
            || name == ".."
            || name.contains('/')
            || name.contains('\\')
        {
            return None;
        }

        let path = self.root.join(name);
        path.is_file().then_some(path)
    }
}

/// Stores received message content under a downloads directory.
#[derive(Debug, Clone)]
pub struct DownloadStore {
    dir: PathBuf,
}

impl DownloadStore {
    /// Creates a store rooted at the given directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Writes content to a fresh timestamped file, creating the downloads
    /// directory on demand. Returns the stored path.
    pub async fn save(&self, content: &[u8]) -> std::io::Result<PathBuf> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let name = format!("{}.jpg", Utc::now().format("%Y%m%d%H%M%S%f"));
        let path = self.dir.join(name);
        tokio::fs::write(&path, content).await?;

        Ok(path)
    }
}
