//! # GameTracker
//!
//! Core client library for the GameTracker account service.
//!
//! This library models the account lifecycle as seen from a client: login
//! with an optional two-factor challenge, token/user persistence, active
//! session management, and achievement tracking. All networking lives in
//! the companion `gt_client` crate; everything here is either a data model,
//! a pure function, or a small state machine, which keeps the whole
//! account flow testable without a server.
//!
//! ## Core Modules
//!
//! - [`auth`]: credential/user models, the login flow state machine,
//!   validation, and password-strength scoring
//! - [`session`]: active session records and device classification
//! - [`achievements`]: achievement catalog and unlock merging
//! - [`storage`]: persisted token/user adapter and in-memory implementation
//! - [`events`]: broadcast hub for user-updated notifications
//!
//! ## Example
//!
//! ```
//! use gametracker::auth::LoginFlow;
//!
//! // A fresh flow waits for credentials
//! let flow = LoginFlow::new();
//! assert!(!flow.is_authenticated());
//! ```

/// Authentication models, flow state machine, and validation.
pub mod auth;
pub use auth::{
    AuthSession, Credentials, FlowError, LoginFlow, LoginOutcome, PasswordStrength,
    TwoFactorChallenge, TwoFactorCodeInput, TwoFactorSetup, User, UserId, ValidationError,
};

/// Active session records and device classification.
pub mod session;
pub use session::{Browser, DeviceInfo, Os, SessionRecord};

/// Achievement catalog and unlock merging.
pub mod achievements;
pub use achievements::{Achievement, MergedAchievement, UserAchievement, merge_achievements};

/// Persisted auth state adapter.
pub mod storage;
pub use storage::{AuthStore, MemoryStorage, StorageAdapter, StorageError, StorageResult};

/// User-updated broadcast hub.
pub mod events;
pub use events::{UserEvent, UserEvents};
