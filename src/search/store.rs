//! Flat-file persistence for item-set embeddings.
//!
//! Each item-set directory gets one JSON store file mapping item
//! identifiers (filenames) to embedding vectors. The file is the cache
//! that lets an item-set be vectorized once and searched many times.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::Embedding;

/// Errors that can occur reading or writing a store file.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access store file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("store file {path} is not a valid embedding map: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Persistent mapping from item identifier to embedding vector.
///
/// Entries are kept in a `BTreeMap` so iteration order is the identifier
/// order, independent of how the platform lists the source directory.
/// Entries are only ever added; an identifier whose source file has since
/// been deleted stays in the store until the store file itself is removed.
#[derive(Debug)]
pub struct VectorStore {
    path: PathBuf,
    entries: BTreeMap<String, Embedding>,
}

impl VectorStore {
    /// Loads the store persisted at `path`, or an empty store if no file
    /// exists there yet.
    ///
    /// A file that exists but cannot be read or parsed is an error, never
    /// silently replaced with an empty store.
    pub fn load(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();

        if !path.exists() {
            return Ok(Self {
                path,
                entries: BTreeMap::new(),
            });
        }

        let raw = fs::read_to_string(&path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;

        let entries = serde_json::from_str(&raw).map_err(|source| StoreError::Malformed {
            path: path.clone(),
            source,
        })?;

        Ok(Self { path, entries })
    }

    /// Writes the full mapping to the store path, overwriting any prior
    /// content and creating the file if absent.
    pub fn save(&self) -> StoreResult<()> {
        let json = serde_json::to_string_pretty(&self.entries).map_err(|source| {
            StoreError::Malformed {
                path: self.path.clone(),
                source,
            }
        })?;

        fs::write(&self.path, json).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }

    /// Returns whether a store file is present on disk at this store's path.
    pub fn is_persisted(&self) -> bool {
        self.path.exists()
    }

    /// The path this store persists to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Inserts or replaces the embedding for an item.
    pub fn insert(&mut self, id: impl Into<String>, embedding: Embedding) {
        self.entries.insert(id.into(), embedding);
    }

    /// Retrieves the embedding for an item, if present.
    pub fn get(&self, id: &str) -> Option<&Embedding> {
        self.entries.get(id)
    }

    /// Returns whether an embedding is stored for the given item.
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Number of stored embeddings.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The identifier-ordered entry map.
    pub fn entries(&self) -> &BTreeMap<String, Embedding> {
        &self.entries
    }

    /// Consumes the store, returning the entry map.
    pub fn into_entries(self) -> BTreeMap<String, Embedding> {
        self.entries
    }
}
