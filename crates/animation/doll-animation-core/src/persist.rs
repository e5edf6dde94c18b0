//! Saved animator state.
//!
//! Names are stored in preference to indices so saves survive changes to the
//! pose list. The numeric index is still written for older readers and is
//! consulted on load only when no name resolves.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::animator::Animator;
use crate::pose::{PoseRead, DEFAULT_POSE_NAME};
use crate::selection::Selection;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedState {
    /// Active action; when present it alone decides what restore does.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    /// Pose name, omitted for the default pose.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pose: Option<String>,
    /// Legacy selection index (-1 = default).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pose_index: Option<i32>,
}

impl Animator {
    pub fn save(&self) -> PersistedState {
        let action = self.action().map(|a| a.name().to_string());
        let pose = if action.is_some() || self.pose().name() == DEFAULT_POSE_NAME {
            None
        } else {
            Some(self.pose().name().to_string())
        };
        // The selection still names whatever showed before the action started.
        let pose_index = if action.is_some() {
            Selection::Default.to_index()
        } else {
            self.selection().to_index()
        };
        PersistedState {
            action,
            pose,
            pose_index: Some(pose_index),
        }
    }

    /// Restore from saved state: action name, then pose name, then the legacy
    /// index, then the default pose. A saved action name decides alone, so an
    /// unregistered one restores the default pose. Never fails.
    pub fn restore(&mut self, state: &PersistedState) {
        let snapshot = self.registry().snapshot();

        if let Some(name) = &state.action {
            match snapshot.action(name) {
                Some(action) => {
                    self.set_action(action);
                    return;
                }
                None => {
                    warn!("saved action '{name}' is no longer registered; restoring default");
                    self.apply_selection(&snapshot, Selection::Default);
                    return;
                }
            }
        }

        if let Some(name) = &state.pose {
            match snapshot.pose(name) {
                Some(pose) => {
                    self.set_pose(pose);
                    return;
                }
                None => warn!("saved pose '{name}' is no longer registered"),
            }
        }

        let selection = match state.pose_index {
            Some(index) => Selection::try_from_index(index as i64).unwrap_or_else(|| {
                warn!("saved pose index {index} is out of range");
                Selection::Default
            }),
            None => Selection::Default,
        };
        self.apply_selection(&snapshot, selection);
    }
}
