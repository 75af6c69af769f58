//! Per-user conversation state.
//!
//! The bot is menu-driven: a user first picks an action, then sends the
//! message or image that action consumes. [`SessionStore`] keeps the
//! pending intent per user between those two webhook deliveries. It is
//! owned by the chat service and handed to each handler explicitly; the
//! intent for a round-trip is taken out at the start of the handler and
//! only re-entered when a new menu selection arrives.

use std::collections::HashMap;

use tokio::sync::RwLock;

use super::UserId;

/// What the bot is waiting for from a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// The user chose image analysis and owes us an image.
    AwaitingImage,

    /// The user chose image generation and owes us a prompt.
    AwaitingPrompt,

    /// A round-trip for this user is in flight; further input is refused
    /// until it completes.
    Processing,
}

/// Async map of user to pending intent.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<UserId, Intent>>,
}

impl SessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the pending intent for a user, replacing any prior one.
    pub async fn set(&self, user: &UserId, intent: Intent) {
        self.sessions.write().await.insert(user.clone(), intent);
    }

    /// Returns the pending intent for a user without consuming it.
    pub async fn get(&self, user: &UserId) -> Option<Intent> {
        self.sessions.read().await.get(user).copied()
    }

    /// Removes and returns the pending intent for a user.
    pub async fn take(&self, user: &UserId) -> Option<Intent> {
        self.sessions.write().await.remove(user)
    }

    /// Drops any pending intent for a user.
    pub async fn clear(&self, user: &UserId) {
        self.sessions.write().await.remove(user);
    }

    /// Number of users with a pending intent.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Returns whether no user has a pending intent.
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_and_get() {
        let store = SessionStore::new();
        let user = UserId::from("U1");

        assert_eq!(store.get(&user).await, None);

        store.set(&user, Intent::AwaitingImage).await;
        assert_eq!(store.get(&user).await, Some(Intent::AwaitingImage));
    }

    #[tokio::test]
    async fn set_replaces_prior_intent() {
        let store = SessionStore::new();
        let user = UserId::from("U1");

        store.set(&user, Intent::AwaitingImage).await;
        store.set(&user, Intent::AwaitingPrompt).await;

        assert_eq!(store.get(&user).await, Some(Intent::AwaitingPrompt));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn take_consumes_the_intent() {
        let store = SessionStore::new();
        let user = UserId::from("U1");

        store.set(&user, Intent::Processing).await;
        assert_eq!(store.take(&user).await, Some(Intent::Processing));
        assert_eq!(store.take(&user).await, None);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn users_are_independent() {
        let store = SessionStore::new();

        store.set(&UserId::from("U1"), Intent::AwaitingImage).await;
        store.set(&UserId::from("U2"), Intent::AwaitingPrompt).await;

        store.clear(&UserId::from("U1")).await;
        assert_eq!(store.get(&UserId::from("U1")).await, None);
        assert_eq!(
            store.get(&UserId::from("U2")).await,
            Some(Intent::AwaitingPrompt)
        );
    }
}
