//! Provider-agnostic incoming chat events.

use super::{MessageId, ReplyToken, UserId};

/// An event delivered by the messaging platform webhook, reduced to the
/// cases the bot acts on. Event kinds the bot ignores (stickers, video,
/// unfollows) are dropped during webhook parsing and never reach here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IncomingEvent {
    /// A text message from a user.
    Text {
        user: UserId,
        reply_token: ReplyToken,
        text: String,
    },

    /// An image message; the bytes are fetched separately by message ID.
    Image {
        user: UserId,
        reply_token: ReplyToken,
        message: MessageId,
    },

    /// The user added the bot as a friend.
    Follow {
        user: UserId,
        reply_token: ReplyToken,
    },
}

impl IncomingEvent {
    /// The user this event originates from.
    pub fn user(&self) -> &UserId {
        match self {
            IncomingEvent::Text { user, .. }
            | IncomingEvent::Image { user, .. }
            | IncomingEvent::Follow { user, .. } => user,
        }
    }

    /// The reply token attached to this event.
    pub fn reply_token(&self) -> &ReplyToken {
        match self {
            IncomingEvent::Text { reply_token, .. }
            | IncomingEvent::Image { reply_token, .. }
            | IncomingEvent::Follow { reply_token, .. } => reply_token,
        }
    }
}
