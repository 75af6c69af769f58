//! Domain types shared across the bot.
//!
//! Identifiers, incoming/outgoing message shapes, and per-user
//! conversation state. These types are provider-agnostic; the messaging
//! provider translates its wire formats into and out of them.

mod event;
mod message;
mod session;
mod types;

pub use event::IncomingEvent;
pub use message::OutgoingMessage;
pub use session::{Intent, SessionStore};
pub use types::{MessageId, ReplyToken, UserId};
