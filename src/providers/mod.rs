//! External service integrations.
//!
//! Providers are the only modules that know wire formats: the AI services
//! that caption, embed, and generate images, and the messaging platform
//! that delivers conversations. Each exposes a trait the services layer
//! consumes, so tests can substitute fakes.

pub mod ai;
pub mod messaging;
