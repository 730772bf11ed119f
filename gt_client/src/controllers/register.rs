//! Registration form controller.
//!
//! Validates every field locally, then issues the single registration
//! request. Verification happens out of band: the server mails a link and
//! the view only reports that the mail was sent.

use std::sync::Arc;

use log::info;

use crate::api_client::AuthApi;
use crate::controllers::{BusyFlag, ControllerResult};
use gametracker::auth::errors::ValidationError;
use gametracker::auth::models::RecoveryReceipt;
use gametracker::auth::validate::{validate_email, validate_nickname, validate_password};

/// Controller for the registration view.
pub struct RegisterController {
    api: Arc<dyn AuthApi>,
    busy: BusyFlag,
}

impl RegisterController {
    pub fn new(api: Arc<dyn AuthApi>) -> Self {
        Self {
            api,
            busy: BusyFlag::default(),
        }
    }

    /// Submit the registration form.
    pub async fn submit(
        &self,
        name: &str,
        nickname: &str,
        email: &str,
        password: &str,
    ) -> ControllerResult<RecoveryReceipt> {
        if name.trim().is_empty() {
            return Err(ValidationError::MissingField("nombre").into());
        }
        validate_nickname(nickname)?;
        validate_email(email)?;
        validate_password(password)?;

        let _busy = self.busy.begin()?;
        let receipt = self.api.register(name, nickname, email, password).await?;
        info!("Registered {nickname}, verification mail sent");
        Ok(receipt)
    }

    /// Confirm an emailed verification link's token.
    pub async fn verify_email(&self, token: &str) -> ControllerResult<()> {
        if token.is_empty() {
            return Err(ValidationError::MissingField("token").into());
        }

        let _busy = self.busy.begin()?;
        Ok(self.api.verify_email(token).await?)
    }
}
