//! Item-set vectorization.
//!
//! Walks an item-set directory, obtains an embedding per file from the
//! provider, and persists the resulting map next to the directory. A
//! directory that already has a persisted store is returned as-is; the
//! store must be deleted to force re-vectorization.

use std::collections::BTreeMap;
use std::fs;
use std::future::Future;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::providers::ai::ProviderError;

use super::{Embedding, StoreError, VectorStore};

/// Errors that can occur while vectorizing an item-set.
#[derive(Debug, Error)]
pub enum VectorizeError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("failed to scan item-set directory {path}: {source}")]
    Scan {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("embedding provider failed on {item}: {source}")]
    Embed {
        item: String,
        #[source]
        source: ProviderError,
    },
}

/// Store file location for an item-set directory: a sibling file named
/// after the directory, e.g. `imageset/` -> `imageset.vectors.json`.
pub fn store_path(dir: &Path) -> PathBuf {
    let name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "itemset".to_string());
    dir.with_file_name(format!("{name}.vectors.json"))
}

/// Returns the embedding map for every file directly under `dir`.
///
/// If a persisted store exists it is loaded and returned unchanged — no
/// incremental update, and a corrupted store file surfaces as an error
/// rather than being overwritten. Otherwise every regular file in the
/// directory is embedded via `embed` in filename order, the completed map
/// is persisted, and the map is returned. The first embedding failure
/// aborts the pass; nothing is persisted for a partial pass.
pub async fn vectorize_set<F, Fut>(
    dir: &Path,
    mut embed: F,
) -> Result<BTreeMap<String, Embedding>, VectorizeError>
where
    F: FnMut(PathBuf) -> Fut,
    Fut: Future<Output = Result<Embedding, ProviderError>>,
{
    let mut store = VectorStore::load(store_path(dir))?;
    if store.is_persisted() {
        tracing::debug!(
            store = %store.path().display(),
            entries = store.len(),
            "item-set already vectorized"
        );
        return Ok(store.into_entries());
    }

    let mut items = Vec::new();
    let listing = fs::read_dir(dir).map_err(|source| VectorizeError::Scan {
        path: dir.to_path_buf(),
        source,
    })?;
    for entry in listing {
        let entry = entry.map_err(|source| VectorizeError::Scan {
            path: dir.to_path_buf(),
            source,
        })?;
        let file_type = entry.file_type().map_err(|source| VectorizeError::Scan {
            path: dir.to_path_buf(),
            source,
        })?;
        if file_type.is_file() {
            items.push((entry.file_name().to_string_lossy().into_owned(), entry.path()));
        }
    }
    items.sort_by(|a, b| a.0.cmp(&b.0));

    tracing::info!(
        dir = %dir.display(),
        items = items.len(),
        "vectorizing item-set"
    );

    for (name, path) in items {
        let embedding = embed(path).await.map_err(|source| VectorizeError::Embed {
            item: name.clone(),
            source,
        })?;
        store.insert(name, embedding);
    }

    store.save()?;
    Ok(store.into_entries())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    fn fill(dir: &Path, names: &[&str]) {
        for name in names {
            fs::write(dir.join(name), b"image bytes").unwrap();
        }
    }

    /// Embedder that records which items it was asked for.
    fn counting_embedder(
        calls: Arc<AtomicUsize>,
        order: Arc<Mutex<Vec<String>>>,
    ) -> impl FnMut(PathBuf) -> std::future::Ready<Result<Embedding, ProviderError>> {
        move |path: PathBuf| {
            calls.fetch_add(1, Ordering::SeqCst);
            let name = path.file_name().unwrap().to_string_lossy().into_owned();
            order.lock().unwrap().push(name.clone());
            let dims = name.len() as f32;
            std::future::ready(Ok(Embedding::new(vec![dims, 1.0])))
        }
    }

    #[tokio::test]
    async fn vectorizes_every_file_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        fill(dir.path(), &["c.jpg", "a.jpg", "b.jpg"]);

        let calls = Arc::new(AtomicUsize::new(0));
        let order = Arc::new(Mutex::new(Vec::new()));
        let set = vectorize_set(dir.path(), counting_embedder(calls.clone(), order.clone()))
            .await
            .unwrap();

        assert_eq!(set.len(), 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(
            order.lock().unwrap().as_slice(),
            &["a.jpg".to_string(), "b.jpg".to_string(), "c.jpg".to_string()]
        );
        assert!(store_path(dir.path()).exists());
    }

    #[tokio::test]
    async fn second_pass_reuses_store_without_provider_calls() {
        let dir = tempfile::tempdir().unwrap();
        fill(dir.path(), &["a.jpg", "b.jpg"]);

        let calls = Arc::new(AtomicUsize::new(0));
        let order = Arc::new(Mutex::new(Vec::new()));

        let first = vectorize_set(dir.path(), counting_embedder(calls.clone(), order.clone()))
            .await
            .unwrap();
        let second = vectorize_set(dir.path(), counting_embedder(calls.clone(), order.clone()))
            .await
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn provider_failure_aborts_without_persisting() {
        let dir = tempfile::tempdir().unwrap();
        fill(dir.path(), &["a.jpg", "b.jpg"]);

        let err = vectorize_set(dir.path(), |_path| {
            std::future::ready(Err(ProviderError::Api {
                status: 500,
                message: "model overloaded".to_string(),
            }))
        })
        .await
        .unwrap_err();

        assert!(matches!(err, VectorizeError::Embed { .. }));
        assert!(!store_path(dir.path()).exists());
    }

    #[tokio::test]
    async fn corrupted_store_surfaces_and_is_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        fill(dir.path(), &["a.jpg"]);

        let store = store_path(dir.path());
        fs::write(&store, "{ truncated").unwrap();

        let calls = Arc::new(AtomicUsize::new(0));
        let order = Arc::new(Mutex::new(Vec::new()));
        let err = vectorize_set(dir.path(), counting_embedder(calls.clone(), order))
            .await
            .unwrap_err();

        assert!(matches!(err, VectorizeError::Store(StoreError::Malformed { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(fs::read_to_string(&store).unwrap(), "{ truncated");
    }

    #[tokio::test]
    async fn subdirectories_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fill(dir.path(), &["a.jpg"]);
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("b.jpg"), b"x").unwrap();

        let calls = Arc::new(AtomicUsize::new(0));
        let order = Arc::new(Mutex::new(Vec::new()));
        let set = vectorize_set(dir.path(), counting_embedder(calls, order))
            .await
            .unwrap();

        assert_eq!(set.len(), 1);
        assert!(set.contains_key("a.jpg"));
    }

    #[test]
    fn store_path_is_sibling_of_directory() {
        assert_eq!(
            store_path(Path::new("/data/imageset")),
            PathBuf::from("/data/imageset.vectors.json")
        );
        assert_eq!(
            store_path(Path::new("imageset/")),
            PathBuf::from("imageset.vectors.json")
        );
    }
}
