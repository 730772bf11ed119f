//! Session data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A server-tracked authenticated device/browser instance.
///
/// Distinct from the bearer token itself: revoking a session invalidates
/// the token that session was issued.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "userAgent", default)]
    pub user_agent: String,
    #[serde(default)]
    pub ip: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "lastActive", default)]
    pub last_active: Option<DateTime<Utc>>,
    #[serde(rename = "expiresAt", default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl SessionRecord {
    /// Best-effort browser/OS classification of this session's user agent.
    pub fn device(&self) -> super::DeviceInfo {
        super::DeviceInfo::from_user_agent(&self.user_agent)
    }
}
