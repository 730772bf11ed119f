//! Achievements view controller.

use std::sync::Arc;

use crate::api_client::AuthApi;
use crate::controllers::{BusyFlag, ControllerResult};
use gametracker::achievements::{MergedAchievement, merge_achievements};

/// Controller for the achievements view: fetches the catalog and the
/// current user's unlocks and merges them.
pub struct AchievementsController {
    api: Arc<dyn AuthApi>,
    busy: BusyFlag,
}

impl AchievementsController {
    pub fn new(api: Arc<dyn AuthApi>) -> Self {
        Self {
            api,
            busy: BusyFlag::default(),
        }
    }

    /// Load the merged achievement list.
    pub async fn load(&self) -> ControllerResult<Vec<MergedAchievement>> {
        let _busy = self.busy.begin()?;
        let catalog = self.api.achievements().await?;
        let unlocked = self.api.my_achievements().await?;
        Ok(merge_achievements(catalog, &unlocked))
    }
}
