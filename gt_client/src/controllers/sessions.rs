//! Active sessions view controller.
//!
//! Lists the account's sessions and revokes them. Revoking the session
//! this client runs under is a logout: persisted state is cleared and the
//! user lands on the login view. Revoking any other session only drops it
//! from the list.

use std::sync::Arc;

use log::info;

use crate::api_client::AuthApi;
use crate::controllers::{BusyFlag, ControllerResult};
use crate::navigation::{Navigator, Route};
use gametracker::events::UserEvents;
use gametracker::session::SessionRecord;
use gametracker::storage::AuthStore;

/// Controller for the active-sessions view.
pub struct SessionsController {
    api: Arc<dyn AuthApi>,
    store: AuthStore,
    events: UserEvents,
    navigator: Arc<dyn Navigator>,
    sessions: Vec<SessionRecord>,
    busy: BusyFlag,
}

impl SessionsController {
    pub fn new(
        api: Arc<dyn AuthApi>,
        store: AuthStore,
        events: UserEvents,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            api,
            store,
            events,
            navigator,
            sessions: Vec::new(),
            busy: BusyFlag::default(),
        }
    }

    /// The sessions as of the last refresh or revocation.
    pub fn sessions(&self) -> &[SessionRecord] {
        &self.sessions
    }

    /// Fetch the session list.
    pub async fn refresh(&mut self) -> ControllerResult<&[SessionRecord]> {
        let _busy = self.busy.begin()?;
        self.sessions = self.api.sessions().await?;
        Ok(&self.sessions)
    }

    /// Revoke one session by id.
    pub async fn revoke(&mut self, session_id: &str) -> ControllerResult<()> {
        let _busy = self.busy.begin()?;
        self.api.logout_session(session_id).await?;
        self.sessions.retain(|session| session.id != session_id);

        let current = self.store.current_session_id().await?;
        if current.as_deref() == Some(session_id) {
            info!("Current session revoked, logging out");
            self.log_out_locally().await?;
        }
        Ok(())
    }

    /// Revoke every session, including the current one. Always ends at
    /// the login view.
    pub async fn revoke_all(&mut self) -> ControllerResult<()> {
        let _busy = self.busy.begin()?;
        self.api.logout_all().await?;
        self.sessions.clear();
        info!("All sessions revoked");
        self.log_out_locally().await
    }

    async fn log_out_locally(&self) -> ControllerResult<()> {
        self.api.set_token(None);
        self.store.clear().await?;
        self.events.emit_logged_out();
        self.navigator.navigate(Route::Login);
        Ok(())
    }
}
