//! User-updated broadcast hub.
//!
//! Any view holding a subscription re-reads the persisted user when a
//! notification arrives. This replaces an ambient global signal with an
//! explicit hub that is created once and handed to whoever needs it.

use tokio::sync::broadcast;

use crate::auth::models::User;

const CHANNEL_CAPACITY: usize = 16;

/// Notification that the persisted user changed.
#[derive(Debug, Clone)]
pub enum UserEvent {
    /// The persisted user record was overwritten. Carries the new record
    /// so subscribers can skip the storage read.
    Updated(User),
    /// Persisted auth state was cleared; the user is unauthenticated.
    LoggedOut,
}

/// Broadcast hub for [`UserEvent`]s.
///
/// Cloning shares the underlying channel. Emitting with no subscribers is
/// fine; events are simply dropped.
#[derive(Debug, Clone)]
pub struct UserEvents {
    tx: broadcast::Sender<UserEvent>,
}

impl UserEvents {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Subscribe to future events.
    pub fn subscribe(&self) -> broadcast::Receiver<UserEvent> {
        self.tx.subscribe()
    }

    /// Announce that the persisted user record changed.
    pub fn emit_updated(&self, user: User) {
        let _ = self.tx.send(UserEvent::Updated(user));
    }

    /// Announce that persisted auth state was cleared.
    pub fn emit_logged_out(&self) {
        let _ = self.tx.send(UserEvent::LoggedOut);
    }
}

impl Default for UserEvents {
    fn default() -> Self {
        Self::new()
    }
}
