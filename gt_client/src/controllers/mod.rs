//! Account flow controllers.
//!
//! Each controller backs one form or view: it validates input before any
//! request, holds the per-form busy flag, calls the API, and applies the
//! result to persisted state, the event hub, and navigation. Failures are
//! local to the controller that produced them.

pub mod account;
pub mod achievements;
pub mod login;
pub mod recovery;
pub mod register;
pub mod sessions;
pub mod two_factor;

pub use account::AccountController;
pub use achievements::AchievementsController;
pub use login::LoginController;
pub use recovery::RecoveryController;
pub use register::RegisterController;
pub use sessions::SessionsController;
pub use two_factor::TwoFactorController;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

use crate::api_client::{ApiError, GENERIC_ERROR};
use gametracker::auth::errors::{FlowError, ValidationError};
use gametracker::storage::StorageError;

/// Controller errors.
#[derive(Debug, Error)]
pub enum ControllerError {
    /// A request from this form is already in flight.
    #[error("Ya hay una operación en curso")]
    Busy,

    /// The operation needs a logged-in user but none is persisted.
    #[error("No has iniciado sesión")]
    NotLoggedIn,

    /// Caught before any network call.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Flow(#[from] FlowError),
}

impl ControllerError {
    /// Message suitable for showing in the form that triggered the
    /// operation. Server rejections surface verbatim, validation errors
    /// as written, everything else collapses to the generic message.
    pub fn user_message(&self) -> String {
        match self {
            Self::Busy | Self::NotLoggedIn | Self::Validation(_) => self.to_string(),
            Self::Api(e) => e.user_message(),
            Self::Storage(_) | Self::Flow(_) => GENERIC_ERROR.to_string(),
        }
    }
}

/// Result type for controller operations.
pub type ControllerResult<T> = Result<T, ControllerError>;

/// Per-form busy flag.
///
/// Mirrors the disabled submit button: while a request is in flight,
/// further submissions from the same form are rejected locally without
/// issuing a request. Dropping the guard re-enables the form.
#[derive(Debug, Default, Clone)]
pub(crate) struct BusyFlag {
    in_flight: Arc<AtomicBool>,
}

impl BusyFlag {
    /// Claim the flag for one request.
    pub fn begin(&self) -> ControllerResult<BusyGuard> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_ok()
        {
            Ok(BusyGuard {
                in_flight: Arc::clone(&self.in_flight),
            })
        } else {
            Err(ControllerError::Busy)
        }
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}

pub(crate) struct BusyGuard {
    in_flight: Arc<AtomicBool>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.in_flight.store(false, Ordering::Release);
    }
}
