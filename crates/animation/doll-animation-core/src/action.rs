//! Actions: named timelines with a playback mode.

use serde::{Deserialize, Serialize};

use crate::pose::Pose;
use crate::sampling::sample_timeline;
use crate::timeline::{AuthoredKeyframe, Timeline};

/// What happens when playback reaches the end of the timeline.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackMode {
    /// Restart from the beginning.
    Loop,
    /// Stay on the final pose.
    Hold,
    /// Play once, then return to the default pose.
    #[default]
    Once,
}

/// A named animation.
#[derive(Clone, Debug, PartialEq)]
pub struct Action {
    name: String,
    display_name: Option<String>,
    timeline: Timeline,
    mode: PlaybackMode,
}

impl Action {
    pub fn new(name: impl Into<String>, mode: PlaybackMode, keyframes: &[AuthoredKeyframe]) -> Self {
        Self::from_timeline(name, mode, Timeline::compile(keyframes))
    }

    pub fn from_timeline(name: impl Into<String>, mode: PlaybackMode, timeline: Timeline) -> Self {
        Self {
            name: name.into(),
            display_name: None,
            timeline,
            mode,
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }

    pub fn mode(&self) -> PlaybackMode {
        self.mode
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Absolute tick of the final keyframe.
    pub fn duration(&self) -> u32 {
        self.timeline.duration()
    }

    /// Pose at `tick` under this action's own playback mode.
    pub fn sample(&self, tick: u32) -> Option<Pose> {
        sample_timeline(&self.timeline, tick, self.mode)
    }
}
