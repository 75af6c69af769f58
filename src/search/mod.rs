//! Embedding storage and similarity search.
//!
//! This is the subsystem behind the "analyze image" flow: item-set images
//! are embedded once through the vision provider and cached in a flat
//! JSON store, then query images are ranked against the cached vectors by
//! cosine similarity.
//!
//! # Architecture
//!
//! - [`Embedding`] - a provider-produced vector with cosine similarity
//! - [`VectorStore`] - the persisted identifier -> embedding map
//! - [`vectorize_set`] - fills and caches the store for a directory
//! - [`top_n`] - ranks stored candidates against a query embedding
//!
//! # Example
//!
//! ```ignore
//! use glimpse::search::{top_n, vectorize_set};
//!
//! let set = vectorize_set(Path::new("imageset"), |path| async move {
//!     vision.embed_image_file(&path).await
//! })
//! .await?;
//!
//! let query = vision.embed_image(&uploaded).await?;
//! let best = top_n(&query, &set, 1)?;
//! ```

mod embedding;
mod ranker;
mod store;
mod vectorizer;

pub use embedding::{Embedding, SimilarityError};
pub use ranker::top_n;
pub use store::{StoreError, StoreResult, VectorStore};
pub use vectorizer::{store_path, vectorize_set, VectorizeError};
