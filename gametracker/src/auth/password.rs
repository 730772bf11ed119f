//! Password-strength scoring.
//!
//! The score counts satisfied criteria, so it is monotonic: satisfying a
//! superset of criteria can never lower the score.

/// Minimum password length accepted by registration and password changes.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Strength of a candidate password.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordStrength {
    /// Number of satisfied criteria, 0 through 5.
    pub score: u8,
    /// Label shown next to the strength meter.
    pub label: &'static str,
}

/// Score a password against five criteria: minimum length, uppercase,
/// lowercase, digit, and symbol.
pub fn password_strength(password: &str) -> PasswordStrength {
    let criteria = [
        password.chars().count() >= MIN_PASSWORD_LEN,
        password.chars().any(|c| c.is_uppercase()),
        password.chars().any(|c| c.is_lowercase()),
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(|c| !c.is_alphanumeric() && !c.is_whitespace()),
    ];

    let score = criteria.iter().filter(|&&met| met).count() as u8;
    let label = match score {
        0 | 1 => "Muy débil",
        2 => "Débil",
        3 => "Regular",
        4 => "Buena",
        _ => "Fuerte",
    };

    PasswordStrength { score, label }
}
