//! Authentication data models.
//!
//! Field names follow Rust conventions; serde renames preserve the wire
//! names used by the account API (a mix of English and Spanish).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User ID type. The API uses opaque string identifiers.
pub type UserId = String;

/// Account holder as returned by the API and persisted under the `user`
/// storage key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    #[serde(rename = "nombre")]
    pub name: String,
    pub nickname: String,
    #[serde(default)]
    pub tag: Option<String>,
    pub email: String,
    #[serde(default)]
    pub verified: bool,
    /// Gates whether a 2FA code is required on login, password change,
    /// password reset, and account deletion.
    #[serde(rename = "twoFAEnabled", default)]
    pub two_fa_enabled: bool,
    #[serde(rename = "profileImageUrl", default)]
    pub profile_image_url: Option<String>,
    #[serde(rename = "bannerType", default)]
    pub banner_type: Option<String>,
    #[serde(rename = "bannerColor", default)]
    pub banner_color: Option<String>,
    #[serde(rename = "bannerImageUrl", default)]
    pub banner_image_url: Option<String>,
    #[serde(rename = "biografia", default)]
    pub bio: Option<String>,
    #[serde(rename = "juegoFavorito", default)]
    pub favorite_game: Option<String>,
    #[serde(rename = "cumpleanos", default)]
    pub birthday: Option<String>,
    #[serde(rename = "plataformas", default)]
    pub platforms: Vec<String>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Login credentials. Transient, never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// A full authenticated session: the bearer token plus the user record it
/// belongs to. Both halves are persisted together and cleared together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub token: String,
    pub user: User,
}

/// Pending login-time two-factor challenge.
///
/// Exists only between a `require2FA` login answer and the code
/// submission that resolves it. No token has been issued at this point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TwoFactorChallenge {
    pub user_id: UserId,
}

/// Outcome of a credential submission.
#[derive(Debug, Clone)]
pub enum LoginOutcome {
    /// Credentials accepted, no second factor required.
    Authenticated(AuthSession),
    /// Credentials accepted, the account requires a 2FA code.
    ChallengeRequired(TwoFactorChallenge),
}

/// Provisioning artifact returned when enrolling in 2FA from settings.
#[derive(Debug, Clone, Deserialize)]
pub struct TwoFactorSetup {
    /// Scannable QR image (data URL).
    pub qr: String,
    /// The TOTP secret, shown for manual entry.
    pub secret: String,
}

/// Result of a registration or password-recovery request.
///
/// The preview URL is a development convenience of the mail backend and is
/// absent in production deployments.
#[derive(Debug, Clone, Default)]
pub struct RecoveryReceipt {
    pub email_preview_url: Option<String>,
}

/// Profile mutation payload, sent as a multipart form.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub nickname: Option<String>,
    pub bio: Option<String>,
    pub favorite_game: Option<String>,
    pub birthday: Option<String>,
    pub platforms: Option<Vec<String>>,
    pub banner_type: Option<String>,
    pub banner_color: Option<String>,
    pub profile_image: Option<ImageUpload>,
    pub banner_image: Option<ImageUpload>,
}

/// An image file attached to a profile update.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_deserializes_wire_names() {
        let json = r#"{
            "id": "u-42",
            "nombre": "Ana García",
            "nickname": "anag",
            "tag": "1234",
            "email": "ana@example.com",
            "verified": true,
            "twoFAEnabled": true,
            "profileImageUrl": "https://cdn.example.com/ana.png",
            "biografia": "Hola",
            "juegoFavorito": "Hollow Knight",
            "plataformas": ["pc", "switch"],
            "createdAt": "2024-03-01T12:00:00Z"
        }"#;

        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.name, "Ana García");
        assert!(user.two_fa_enabled);
        assert_eq!(user.platforms, vec!["pc", "switch"]);
        assert_eq!(user.bio.as_deref(), Some("Hola"));
    }

    #[test]
    fn test_user_tolerates_missing_optional_fields() {
        let json = r#"{
            "id": "u-1",
            "nombre": "Bob",
            "nickname": "bob",
            "email": "bob@example.com"
        }"#;

        let user: User = serde_json::from_str(json).unwrap();
        assert!(!user.verified);
        assert!(!user.two_fa_enabled);
        assert!(user.platforms.is_empty());
        assert!(user.created_at.is_none());
    }

    #[test]
    fn test_user_ignores_unknown_wire_fields() {
        let json = r#"{
            "id": "u-1",
            "nombre": "Bob",
            "nickname": "bob",
            "email": "bob@example.com",
            "__v": 3,
            "internalFlag": true
        }"#;

        assert!(serde_json::from_str::<User>(json).is_ok());
    }

    #[test]
    fn test_user_roundtrips_through_storage_encoding() {
        let user = User {
            id: "u-7".to_string(),
            name: "Carla".to_string(),
            nickname: "carla".to_string(),
            tag: None,
            email: "carla@example.com".to_string(),
            verified: true,
            two_fa_enabled: false,
            profile_image_url: None,
            banner_type: Some("color".to_string()),
            banner_color: Some("#aabbcc".to_string()),
            banner_image_url: None,
            bio: None,
            favorite_game: None,
            birthday: None,
            platforms: vec!["pc".to_string()],
            created_at: None,
        };

        let encoded = serde_json::to_string(&user).unwrap();
        // Persisted records keep the wire names so they stay compatible
        // with values stored by other clients.
        assert!(encoded.contains("\"nombre\""));
        assert!(encoded.contains("\"twoFAEnabled\""));

        let decoded: User = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded.id, user.id);
        assert_eq!(decoded.banner_color, user.banner_color);
    }
}
