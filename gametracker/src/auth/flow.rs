//! Login flow state machine.
//!
//! The flow has three states. A credential submission either authenticates
//! directly, raises a two-factor challenge, or fails and leaves the state
//! untouched so the form can be resubmitted:
//!
//! ```text
//! AwaitingCredentials --(ok)--------------> Authenticated
//! AwaitingCredentials --(require2FA)------> AwaitingTwoFactorCode
//! AwaitingTwoFactorCode --(code ok)-------> Authenticated
//! AwaitingTwoFactorCode --(code rejected)-> AwaitingTwoFactorCode
//! ```
//!
//! The machine is pure: it never performs I/O, so every transition is
//! directly testable. The controller in `gt_client` drives it from API
//! responses and handles persistence/navigation around it.

use super::errors::FlowError;
use super::models::TwoFactorChallenge;

/// Client-side login flow state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoginFlow {
    /// Initial state: the credential form is shown.
    #[default]
    AwaitingCredentials,
    /// Credentials were accepted but the account requires a 2FA code.
    /// No token has been issued yet.
    AwaitingTwoFactorCode { challenge: TwoFactorChallenge },
    /// Terminal state: token and user are persisted.
    Authenticated,
}

impl LoginFlow {
    /// Create a flow in its initial state.
    pub fn new() -> Self {
        Self::AwaitingCredentials
    }

    /// The server answered the credential submission with `require2FA`.
    ///
    /// # Errors
    ///
    /// * `FlowError::NotAwaitingCredentials` - challenge arrived out of order
    pub fn challenge_received(&mut self, challenge: TwoFactorChallenge) -> Result<(), FlowError> {
        match self {
            Self::AwaitingCredentials => {
                *self = Self::AwaitingTwoFactorCode { challenge };
                Ok(())
            }
            _ => Err(FlowError::NotAwaitingCredentials),
        }
    }

    /// A token+user pair was issued, either directly from credentials or
    /// after a correct 2FA code.
    ///
    /// # Errors
    ///
    /// * `FlowError::AlreadyAuthenticated` - the flow already completed
    pub fn authenticated(&mut self) -> Result<(), FlowError> {
        match self {
            Self::Authenticated => Err(FlowError::AlreadyAuthenticated),
            _ => {
                *self = Self::Authenticated;
                Ok(())
            }
        }
    }

    /// The server rejected the submitted 2FA code. The flow stays in
    /// `AwaitingTwoFactorCode` so a fresh code can be entered.
    ///
    /// # Errors
    ///
    /// * `FlowError::NotAwaitingCode` - no challenge is pending
    pub fn code_rejected(&mut self) -> Result<(), FlowError> {
        match self {
            Self::AwaitingTwoFactorCode { .. } => Ok(()),
            _ => Err(FlowError::NotAwaitingCode),
        }
    }

    /// Reset to `AwaitingCredentials`, discarding any pending challenge.
    pub fn reset(&mut self) {
        *self = Self::AwaitingCredentials;
    }

    /// The pending challenge, if the flow is awaiting a code.
    pub fn challenge(&self) -> Option<&TwoFactorChallenge> {
        match self {
            Self::AwaitingTwoFactorCode { challenge } => Some(challenge),
            _ => None,
        }
    }

    /// Whether the flow reached its terminal state.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated)
    }
}

/// Number of digits in a TOTP code.
pub const TWO_FACTOR_CODE_LEN: usize = 6;

/// Input buffer for the six-digit 2FA code field.
///
/// Accepts ASCII digits only and caps the length at six; a rejected code
/// is cleared so a fresh one can be typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TwoFactorCodeInput {
    digits: String,
}

impl TwoFactorCodeInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a digit. Non-digits and input past six digits are ignored,
    /// returning `false`.
    pub fn push(&mut self, c: char) -> bool {
        if c.is_ascii_digit() && self.digits.len() < TWO_FACTOR_CODE_LEN {
            self.digits.push(c);
            true
        } else {
            false
        }
    }

    /// Remove the last digit, if any.
    pub fn pop(&mut self) {
        self.digits.pop();
    }

    /// Clear the field. Called when the server rejects the code.
    pub fn clear(&mut self) {
        self.digits.clear();
    }

    /// Whether all six digits were entered.
    pub fn is_complete(&self) -> bool {
        self.digits.len() == TWO_FACTOR_CODE_LEN
    }

    pub fn as_str(&self) -> &str {
        &self.digits
    }
}
