//! Authentication error types.

use thiserror::Error;

/// Pre-flight validation errors, raised before any network request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field was left blank.
    #[error("El campo '{0}' es obligatorio")]
    MissingField(&'static str),

    /// Malformed email address.
    #[error("El correo electrónico no es válido")]
    InvalidEmail,

    /// Password shorter than the minimum.
    #[error("La contraseña debe tener al menos {min} caracteres")]
    PasswordTooShort { min: usize },

    /// Nickname shorter than the minimum.
    #[error("El nickname debe tener al menos {min} caracteres")]
    NicknameTooShort { min: usize },

    /// 2FA code is not exactly six digits.
    #[error("El código debe tener 6 dígitos")]
    InvalidTwoFactorCode,

    /// The account requires a 2FA code but none was entered.
    #[error("Introduce el código de verificación en dos pasos")]
    TwoFactorCodeRequired,
}

/// Invalid login-flow transitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    /// A credential-phase event arrived outside `AwaitingCredentials`.
    #[error("Login flow is not awaiting credentials")]
    NotAwaitingCredentials,

    /// A code-phase event arrived outside `AwaitingTwoFactorCode`.
    #[error("Login flow is not awaiting a two-factor code")]
    NotAwaitingCode,

    /// The flow already reached `Authenticated`.
    #[error("Login flow is already authenticated")]
    AlreadyAuthenticated,
}
