//! Settings-page 2FA enrollment controller.
//!
//! This is the post-authentication flow: provisioning a QR, confirming a
//! code, or disabling. It is a separate code path from the login-time
//! challenge in [`super::LoginController`]: enrollment never resolves a
//! pending login, and login never issues a QR.

use std::sync::Arc;

use log::info;

use crate::api_client::AuthApi;
use crate::controllers::{BusyFlag, ControllerError, ControllerResult};
use gametracker::auth::models::{TwoFactorSetup, User};
use gametracker::auth::validate::validate_two_factor_code;
use gametracker::events::UserEvents;
use gametracker::storage::AuthStore;

/// Controller for the 2FA section of account settings.
pub struct TwoFactorController {
    api: Arc<dyn AuthApi>,
    store: AuthStore,
    events: UserEvents,
    busy: BusyFlag,
}

impl TwoFactorController {
    pub fn new(api: Arc<dyn AuthApi>, store: AuthStore, events: UserEvents) -> Self {
        Self {
            api,
            store,
            events,
            busy: BusyFlag::default(),
        }
    }

    /// Called when the settings view opens. If the cached user is not
    /// enrolled, requests a provisioning QR; enrolled users get `None`
    /// and the view shows the disable option instead.
    pub async fn ensure_setup(&self) -> ControllerResult<Option<TwoFactorSetup>> {
        let user = self.cached_user().await?;
        if user.two_fa_enabled {
            return Ok(None);
        }

        let _busy = self.busy.begin()?;
        let setup = self.api.two_factor_setup().await?;
        Ok(Some(setup))
    }

    /// Confirm enrollment with a code from the authenticator app. Flips
    /// the persisted user's flag and notifies subscribers.
    pub async fn confirm(&self, code: &str) -> ControllerResult<()> {
        validate_two_factor_code(code)?;

        let _busy = self.busy.begin()?;
        self.api.two_factor_verify(code).await?;
        info!("Two-factor authentication enabled");
        self.set_enrolled(true).await
    }

    /// Disable 2FA for the account. Same persistence and notification
    /// contract as [`confirm`](Self::confirm).
    pub async fn disable(&self) -> ControllerResult<()> {
        let _busy = self.busy.begin()?;
        self.api.two_factor_disable().await?;
        info!("Two-factor authentication disabled");
        self.set_enrolled(false).await
    }

    async fn cached_user(&self) -> ControllerResult<User> {
        self.store
            .user()
            .await?
            .ok_or(ControllerError::NotLoggedIn)
    }

    async fn set_enrolled(&self, enabled: bool) -> ControllerResult<()> {
        let mut user = self.cached_user().await?;
        user.two_fa_enabled = enabled;
        self.store.save_user(&user).await?;
        self.events.emit_updated(user);
        Ok(())
    }
}
