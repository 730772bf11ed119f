//! Account mutation controller: password change, deletion, profile edits.
//!
//! Each operation is a single request with no retry. The 2FA code is
//! attached only when the cached user record shows the account enrolled;
//! an enrolled account submitting without a code is rejected locally.

use std::sync::Arc;
use std::time::Duration;

use log::info;

use crate::api_client::AuthApi;
use crate::controllers::{BusyFlag, ControllerError, ControllerResult};
use crate::navigation::{Navigator, Route};
use gametracker::auth::errors::ValidationError;
use gametracker::auth::models::{ProfileUpdate, User};
use gametracker::auth::validate::{validate_nickname, validate_password, validate_two_factor_code};
use gametracker::events::UserEvents;
use gametracker::storage::AuthStore;

const DELETION_GRACE: Duration = Duration::from_millis(1500);

/// Controller for account settings mutations.
pub struct AccountController {
    api: Arc<dyn AuthApi>,
    store: AuthStore,
    events: UserEvents,
    navigator: Arc<dyn Navigator>,
    busy: BusyFlag,
    /// Pause between a successful deletion and leaving the view, so the
    /// confirmation message is visible.
    deletion_grace: Duration,
}

impl AccountController {
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
            busy: BusyFlag::default(),
            deletion_grace: DELETION_GRACE,
        }
    }

    /// Override the post-deletion pause. Tests use zero.
    pub fn with_deletion_grace(mut self, grace: Duration) -> Self {
        self.deletion_grace = grace;
        self
    }

    /// Change the account password.
    pub async fn change_password(
        &self,
        old_password: &str,
        new_password: &str,
        code: Option<&str>,
    ) -> ControllerResult<()> {
        if old_password.is_empty() {
            return Err(ValidationError::MissingField("oldPassword").into());
        }
        validate_password(new_password)?;
        let code = self.code_if_enrolled(code).await?;

        let _busy = self.busy.begin()?;
        self.api
            .change_password(old_password, new_password, code.as_deref())
            .await?;
        info!("Password changed");
        Ok(())
    }

    /// Delete the account. On success all persisted auth state is
    /// cleared and, after a short visible pause, the user lands on the
    /// login view.
    pub async fn delete_account(&self, password: &str, code: Option<&str>) -> ControllerResult<()> {
        if password.is_empty() {
            return Err(ValidationError::MissingField("password").into());
        }
        let code = self.code_if_enrolled(code).await?;

        let _busy = self.busy.begin()?;
        self.api.delete_account(password, code.as_deref()).await?;
        info!("Account deleted");

        tokio::time::sleep(self.deletion_grace).await;
        self.api.set_token(None);
        self.store.clear().await?;
        self.events.emit_logged_out();
        self.navigator.navigate(Route::Login);
        Ok(())
    }

    /// Submit a profile edit. The returned user record overwrites the
    /// persisted one and subscribers are notified.
    pub async fn update_profile(&self, update: ProfileUpdate) -> ControllerResult<User> {
        if let Some(nickname) = &update.nickname {
            validate_nickname(nickname)?;
        }

        let _busy = self.busy.begin()?;
        let user = self.api.update_profile(update).await?;
        self.store.save_user(&user).await?;
        self.events.emit_updated(user.clone());
        Ok(user)
    }

    /// Resolve the 2FA code for a sensitive operation: `None` when the
    /// cached user is not enrolled, the validated code when it is.
    async fn code_if_enrolled(&self, code: Option<&str>) -> ControllerResult<Option<String>> {
        let user = self
            .store
            .user()
            .await?
            .ok_or(ControllerError::NotLoggedIn)?;
        if !user.two_fa_enabled {
            return Ok(None);
        }

        let code = code
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or(ValidationError::TwoFactorCodeRequired)?;
        validate_two_factor_code(code)?;
        Ok(Some(code.to_string()))
    }
}
