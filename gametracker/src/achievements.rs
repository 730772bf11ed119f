//! Achievement catalog and unlock merging.
//!
//! The API exposes two lists: the full catalog and the current user's
//! unlocks. The merged view is what profile pages render: every catalog
//! entry, flagged with whether this user unlocked it and when.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A catalog achievement, owned by the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Achievement {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "icono", default)]
    pub icon: Option<String>,
}

/// One unlocked achievement of the current user: the catalog id plus the
/// unlock timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAchievement {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "fechaObtencion")]
    pub unlocked_at: DateTime<Utc>,
}

/// A catalog achievement joined with the current user's unlock state.
#[derive(Debug, Clone)]
pub struct MergedAchievement {
    pub achievement: Achievement,
    pub unlocked: bool,
    pub unlock_date: Option<DateTime<Utc>>,
}

/// Join the catalog with the user's unlocks by id.
///
/// An achievement is unlocked iff a user entry with the same id exists;
/// its `unlock_date` is that entry's recorded timestamp. Catalog order is
/// preserved. User entries without a catalog counterpart are dropped.
pub fn merge_achievements(
    catalog: Vec<Achievement>,
    unlocked: &[UserAchievement],
) -> Vec<MergedAchievement> {
    let unlock_dates: HashMap<&str, DateTime<Utc>> = unlocked
        .iter()
        .map(|entry| (entry.id.as_str(), entry.unlocked_at))
        .collect();

    catalog
        .into_iter()
        .map(|achievement| {
            let unlock_date = unlock_dates.get(achievement.id.as_str()).copied();
            MergedAchievement {
                unlocked: unlock_date.is_some(),
                unlock_date,
                achievement,
            }
        })
        .collect()
}
