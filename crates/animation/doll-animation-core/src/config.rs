//! Animator configuration.

use serde::{Deserialize, Serialize};

/// Behaviour switches for [`crate::Animator`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimatorConfig {
    /// Blend from the pose showing at `set_action` into the first keyframe
    /// over the first keyframe's authored tick count.
    pub blend_in_first_keyframe: bool,

    /// HOLD actions stay active on their final keyframe pose. When false, HOLD
    /// finishes and reverts to the default pose exactly like ONCE.
    pub hold_freezes_on_final_pose: bool,
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self {
            blend_in_first_keyframe: false,
            hold_freezes_on_final_pose: true,
        }
    }
}
