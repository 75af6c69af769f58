//! Business services layer.
//!
//! Services sit between the HTTP surface and the infrastructure layer:
//!
//! ```text
//! Server Layer (webhook, media endpoints)
//!          |
//!          v
//!    Services Layer  <-- You are here
//!          |
//!          v
//! Infrastructure (Providers, Search, Storage)
//! ```
//!
//! - [`ChatService`]: routes conversation events to AI round-trips
//! - [`MediaLibrary`] / [`DownloadStore`]: item-set and upload storage

mod chat_service;
mod media_service;

pub use chat_service::{ChatService, ChatSettings};
pub use media_service::{DownloadStore, MediaLibrary};
