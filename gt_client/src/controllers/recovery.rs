//! Password recovery and reset controller.
//!
//! A linear flow: request a recovery email, open the emailed link, reset
//! with the token from that link's query string. Accounts with 2FA
//! enabled must supply a code; that requirement is checked client-side
//! before any reset request is issued.

use std::sync::Arc;

use url::Url;

use crate::api_client::AuthApi;
use crate::controllers::{BusyFlag, ControllerResult};
use gametracker::auth::errors::ValidationError;
use gametracker::auth::models::RecoveryReceipt;
use gametracker::auth::validate::{validate_email, validate_password, validate_two_factor_code};

/// Extract the reset token from a recovery link.
pub fn reset_token_from_url(link: &str) -> Option<String> {
    let url = Url::parse(link).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == "token")
        .map(|(_, value)| value.into_owned())
        .filter(|token| !token.is_empty())
}

/// Controller for the recovery-request and reset-password views.
pub struct RecoveryController {
    api: Arc<dyn AuthApi>,
    busy: BusyFlag,
}

impl RecoveryController {
    pub fn new(api: Arc<dyn AuthApi>) -> Self {
        Self {
            api,
            busy: BusyFlag::default(),
        }
    }

    /// Request a recovery email. The view always tells the user recovery
    /// was attempted; the receipt's preview URL only exists on
    /// development mail backends.
    pub async fn request(&self, email: &str) -> ControllerResult<RecoveryReceipt> {
        validate_email(email)?;

        let _busy = self.busy.begin()?;
        Ok(self.api.request_recovery(email).await?)
    }

    /// Whether the account behind this reset token needs a 2FA code.
    /// Called when the reset view opens, before the form is shown.
    pub async fn requires_code(&self, reset_token: &str) -> ControllerResult<bool> {
        Ok(self
            .api
            .two_factor_required_for_reset(reset_token)
            .await?)
    }

    /// Submit the reset form.
    ///
    /// When `requires_code` is set and the code is blank, the submission
    /// is rejected locally and no request is issued.
    pub async fn reset(
        &self,
        reset_token: &str,
        new_password: &str,
        requires_code: bool,
        code: Option<&str>,
    ) -> ControllerResult<()> {
        if reset_token.is_empty() {
            return Err(ValidationError::MissingField("token").into());
        }
        validate_password(new_password)?;

        let code = if requires_code {
            let code = code
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .ok_or(ValidationError::TwoFactorCodeRequired)?;
            validate_two_factor_code(code)?;
            Some(code)
        } else {
            None
        };

        let _busy = self.busy.begin()?;
        Ok(self
            .api
            .reset_password(reset_token, new_password, code)
            .await?)
    }
}
