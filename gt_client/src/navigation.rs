//! Navigation abstraction.
//!
//! Controllers never touch a browser-global location; they ask an
//! injected [`Navigator`] to move. Tests record the requested routes, the
//! binary just logs them.

use std::fmt;

/// Destinations the account flows navigate to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// The login view. Forced after logout, self-revocation, and account
    /// deletion.
    Login,
    /// The authenticated landing view.
    Home,
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Login => write!(f, "/auth"),
            Self::Home => write!(f, "/"),
        }
    }
}

/// Moves the user between views.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Navigator for headless use: logs the requested route and nothing else.
#[derive(Debug, Default)]
pub struct LoggingNavigator;

impl Navigator for LoggingNavigator {
    fn navigate(&self, route: Route) {
        log::info!("Navigating to {route}");
    }
}
