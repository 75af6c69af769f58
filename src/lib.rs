//! glimpse - A conversational AI bot backend
//!
//! This crate bridges a messaging platform webhook to cloud AI services:
//! uploaded images are captioned and matched against a vectorized image
//! set by cosine similarity, and text prompts are turned into generated
//! images. The webhook, providers, and similarity search are composed in
//! the services layer.

pub mod config;
pub mod domain;
pub mod providers;
pub mod search;
pub mod server;
pub mod services;

pub use services::ChatService;
