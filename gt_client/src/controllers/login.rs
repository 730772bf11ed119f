//! Login form controller.
//!
//! Drives the [`LoginFlow`] state machine from API responses. The
//! controller owns the 2FA code field buffer so a rejected code leaves
//! the user on the challenge view with an empty, re-enterable field.

use std::sync::Arc;

use log::info;

use crate::api_client::AuthApi;
use crate::controllers::{BusyFlag, ControllerResult};
use crate::navigation::{Navigator, Route};
use gametracker::auth::errors::{FlowError, ValidationError};
use gametracker::auth::flow::{LoginFlow, TwoFactorCodeInput};
use gametracker::auth::models::{AuthSession, LoginOutcome};
use gametracker::auth::validate::validate_email;
use gametracker::events::UserEvents;
use gametracker::storage::AuthStore;

/// Controller for the login view, including the login-time 2FA challenge.
pub struct LoginController {
    api: Arc<dyn AuthApi>,
    store: AuthStore,
    events: UserEvents,
    navigator: Arc<dyn Navigator>,
    flow: LoginFlow,
    code: TwoFactorCodeInput,
    busy: BusyFlag,
}

impl LoginController {
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
            flow: LoginFlow::new(),
            code: TwoFactorCodeInput::new(),
            busy: BusyFlag::default(),
        }
    }

    /// Current flow state, for the view to decide what to render.
    pub fn flow(&self) -> &LoginFlow {
        &self.flow
    }

    /// Current content of the 2FA code field.
    pub fn code(&self) -> &TwoFactorCodeInput {
        &self.code
    }

    /// Type one character into the code field.
    pub fn enter_code_digit(&mut self, c: char) -> bool {
        self.code.push(c)
    }

    /// Backspace in the code field.
    pub fn erase_code_digit(&mut self) {
        self.code.pop();
    }

    /// Submit the credential form.
    ///
    /// On plain success the session is persisted and the flow completes.
    /// On a 2FA answer the challenge is held and no token exists yet. On
    /// failure the error is returned and the flow stays on the credential
    /// form.
    pub async fn submit_credentials(
        &mut self,
        email: &str,
        password: &str,
        public_ip: Option<&str>,
    ) -> ControllerResult<()> {
        validate_email(email)?;
        if password.is_empty() {
            return Err(ValidationError::MissingField("password").into());
        }

        let _busy = self.busy.begin()?;
        match self.api.login(email, password, public_ip).await? {
            LoginOutcome::Authenticated(session) => self.complete(session).await,
            LoginOutcome::ChallengeRequired(challenge) => {
                info!("Login requires a second factor");
                self.flow.challenge_received(challenge)?;
                self.code.clear();
                Ok(())
            }
        }
    }

    /// Submit the 2FA code field against the pending challenge.
    ///
    /// A rejected code keeps the challenge alive and clears the field.
    pub async fn submit_code(&mut self, public_ip: Option<&str>) -> ControllerResult<()> {
        let challenge = self
            .flow
            .challenge()
            .cloned()
            .ok_or(FlowError::NotAwaitingCode)?;
        if !self.code.is_complete() {
            return Err(ValidationError::InvalidTwoFactorCode.into());
        }

        let _busy = self.busy.begin()?;
        let result = self
            .api
            .two_factor_login(&challenge.user_id, self.code.as_str(), public_ip)
            .await;

        match result {
            Ok(session) => self.complete(session).await,
            Err(err) => {
                self.flow.code_rejected()?;
                self.code.clear();
                Err(err.into())
            }
        }
    }

    /// Abandon a pending challenge and return to the credential form.
    pub fn cancel_challenge(&mut self) {
        self.flow.reset();
        self.code.clear();
    }

    async fn complete(&mut self, session: AuthSession) -> ControllerResult<()> {
        self.api.set_token(Some(session.token.clone()));
        self.store.save_session(&session).await?;
        self.flow.authenticated()?;
        info!("Logged in as {}", session.user.nickname);
        self.events.emit_updated(session.user);
        self.navigator.navigate(Route::Home);
        Ok(())
    }
}
