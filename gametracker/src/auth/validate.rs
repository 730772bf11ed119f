//! Pre-flight form validation.
//!
//! Everything here runs before a network request is issued; a validation
//! failure means no request is sent at all.

use super::errors::ValidationError;
use super::flow::TWO_FACTOR_CODE_LEN;
use super::password::MIN_PASSWORD_LEN;

/// Minimum nickname length accepted by registration and profile edits.
pub const MIN_NICKNAME_LEN: usize = 3;

/// Validate an email address shape: one `@` with a non-empty local part
/// and a domain containing a dot.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ValidationError::MissingField("email"));
    }

    let Some((local, domain)) = email.split_once('@') else {
        return Err(ValidationError::InvalidEmail);
    };

    if local.is_empty()
        || domain.is_empty()
        || domain.starts_with('.')
        || domain.ends_with('.')
        || !domain.contains('.')
        || email.contains(char::is_whitespace)
    {
        return Err(ValidationError::InvalidEmail);
    }

    Ok(())
}

/// Validate password length.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::MissingField("password"));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort {
            min: MIN_PASSWORD_LEN,
        });
    }
    Ok(())
}

/// Validate nickname length.
pub fn validate_nickname(nickname: &str) -> Result<(), ValidationError> {
    let nickname = nickname.trim();
    if nickname.is_empty() {
        return Err(ValidationError::MissingField("nickname"));
    }
    if nickname.chars().count() < MIN_NICKNAME_LEN {
        return Err(ValidationError::NicknameTooShort {
            min: MIN_NICKNAME_LEN,
        });
    }
    Ok(())
}

/// Validate a 2FA code: exactly six ASCII digits.
pub fn validate_two_factor_code(code: &str) -> Result<(), ValidationError> {
    if code.len() != TWO_FACTOR_CODE_LEN || !code.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidTwoFactorCode);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // === Email ===

    #[test]
    fn test_valid_emails() {
        for email in ["a@b.co", "user.name@example.com", "x+tag@sub.domain.org"] {
            assert!(validate_email(email).is_ok(), "{email} should be valid");
        }
    }

    #[test]
    fn test_invalid_emails() {
        for email in [
            "plainaddress",
            "@example.com",
            "user@",
            "user@nodot",
            "user@.com",
            "user@domain.",
            "user name@example.com",
        ] {
            assert_eq!(
                validate_email(email),
                Err(ValidationError::InvalidEmail),
                "{email} should be invalid"
            );
        }
    }

    #[test]
    fn test_blank_email_is_missing_field() {
        assert_eq!(
            validate_email("   "),
            Err(ValidationError::MissingField("email"))
        );
    }

    // === Password ===

    #[test]
    fn test_password_minimum_length() {
        assert!(validate_password("12345678").is_ok());
        assert_eq!(
            validate_password("1234567"),
            Err(ValidationError::PasswordTooShort { min: 8 })
        );
        assert_eq!(
            validate_password(""),
            Err(ValidationError::MissingField("password"))
        );
    }

    #[test]
    fn test_password_length_counts_chars_not_bytes() {
        // Eight characters, more than eight bytes.
        assert!(validate_password("ññññññññ").is_ok());
    }

    // === Nickname ===

    #[test]
    fn test_nickname_minimum_length() {
        assert!(validate_nickname("abc").is_ok());
        assert_eq!(
            validate_nickname("ab"),
            Err(ValidationError::NicknameTooShort { min: 3 })
        );
        assert_eq!(
            validate_nickname(""),
            Err(ValidationError::MissingField("nickname"))
        );
    }

    // === 2FA code ===

    #[test]
    fn test_two_factor_code_exact_format() {
        assert!(validate_two_factor_code("000000").is_ok());
        assert!(validate_two_factor_code("123456").is_ok());

        for code in ["12345", "1234567", "12a456", "12 456", ""] {
            assert_eq!(
                validate_two_factor_code(code),
                Err(ValidationError::InvalidTwoFactorCode),
                "{code:?} should be rejected"
            );
        }
    }
}
