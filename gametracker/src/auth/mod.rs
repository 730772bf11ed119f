//! Authentication module for the GameTracker account flow.
//!
//! This module implements the client side of authentication:
//! - Credential and user models matching the account API wire format
//! - The login flow state machine, including the two-factor challenge
//! - Pre-flight validation (email shape, password length, 2FA code format)
//! - Password-strength scoring for registration and password-change forms
//!
//! ## Example
//!
//! ```
//! use gametracker::auth::{LoginFlow, TwoFactorChallenge};
//!
//! let mut flow = LoginFlow::new();
//!
//! // The server answered the credential submission with a 2FA challenge.
//! flow.challenge_received(TwoFactorChallenge {
//!     user_id: "u-1".to_string(),
//! })
//! .unwrap();
//! assert!(flow.challenge().is_some());
//!
//! // A correct code completes the flow.
//! flow.authenticated().unwrap();
//! assert!(flow.is_authenticated());
//! ```

pub mod errors;
pub mod flow;
pub mod models;
pub mod password;
pub mod validate;

pub use errors::{FlowError, ValidationError};
pub use flow::{LoginFlow, TwoFactorCodeInput};
pub use models::{
    AuthSession, Credentials, ImageUpload, LoginOutcome, ProfileUpdate, RecoveryReceipt,
    TwoFactorChallenge, TwoFactorSetup, User, UserId,
};
pub use password::{PasswordStrength, password_strength};
pub use validate::{
    validate_email, validate_nickname, validate_password, validate_two_factor_code,
};
