//! Per-entity animation state machine.
//!
//! States:
//! - Default: no action, showing the default ("standing") pose
//! - NamedPose: no action, showing some other registered pose
//! - Playing: an action is active and drives the pose every tick
//!
//! The authoritative side mutates the animator through `set_*`, `stop_action`,
//! `cycle` and `tick`, and publishes [`Animator::sync_byte`]. Observers feed the
//! byte they receive into [`Animator::apply_sync_byte`] and resolve it against
//! their own registry; no pose data ever crosses the wire.

use std::sync::Arc;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::action::{Action, PlaybackMode};
use crate::config::AnimatorConfig;
use crate::events::AnimationEvent;
use crate::interp::functions::segment_factor;
use crate::pose::{Pose, PoseRead, DEFAULT_POSE_NAME};
use crate::registry::{Registry, RegistrySnapshot};
use crate::selection::Selection;

/// Coarse state of an [`Animator`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimationState {
    Default,
    NamedPose,
    Playing,
}

#[derive(Debug)]
pub struct Animator {
    registry: Arc<Registry>,
    config: AnimatorConfig,
    pose: Pose,
    action: Option<Arc<Action>>,
    tick: u32,
    selection: Selection,
    /// Pose to blend out of while the first keyframe fades in.
    entry_pose: Option<Pose>,
    /// A HOLD action has reached its end and is frozen.
    held: bool,
    last_synced: Option<u8>,
}

impl Animator {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self::with_config(registry, AnimatorConfig::default())
    }

    pub fn with_config(registry: Arc<Registry>, config: AnimatorConfig) -> Self {
        let pose = registry.snapshot().default_pose();
        Self {
            registry,
            config,
            pose,
            action: None,
            tick: 0,
            selection: Selection::Default,
            entry_pose: None,
            held: false,
            last_synced: None,
        }
    }

    pub fn config(&self) -> &AnimatorConfig {
        &self.config
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Pose to render this frame.
    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    pub fn action(&self) -> Option<&Arc<Action>> {
        self.action.as_ref()
    }

    /// Ticks since the current pose or action was assigned.
    pub fn tick_count(&self) -> u32 {
        self.tick
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// True while a HOLD action sits frozen on its final pose.
    pub fn is_holding(&self) -> bool {
        self.held
    }

    pub fn state(&self) -> AnimationState {
        if self.action.is_some() {
            AnimationState::Playing
        } else if self.pose.name() == DEFAULT_POSE_NAME {
            AnimationState::Default
        } else {
            AnimationState::NamedPose
        }
    }

    /// Show `pose`, cancelling any active action.
    pub fn set_pose(&mut self, pose: Pose) {
        let snapshot = self.registry.snapshot();
        let name = pose.name();
        self.selection = if name == DEFAULT_POSE_NAME {
            Selection::Default
        } else {
            match snapshot.position_of(name) {
                Some(pos) => Selection::try_from_index(pos as i64).unwrap_or_else(|| {
                    warn!("pose '{name}' sits at index {pos}, past the replicable range");
                    Selection::Default
                }),
                None => {
                    debug!("pose '{name}' is not registered; observers will see the default");
                    Selection::Default
                }
            }
        };
        debug!("set pose '{name}'");
        self.show(pose);
    }

    /// Show the registered pose called `name`, or the default pose if there is none.
    pub fn set_pose_by_name(&mut self, name: &str) {
        let pose = self.registry.snapshot().pose_or_default(name);
        self.set_pose(pose);
    }

    /// Start playing `action` from its first tick.
    pub fn set_action(&mut self, action: Arc<Action>) {
        debug!("start action '{}' ({:?})", action.name(), action.mode());
        // Entry pose is always stored data; lead-in blends never nest.
        self.entry_pose = Some(self.pose.flatten());
        self.tick = 0;
        self.held = false;
        if let Some(pose) = self.sample_current(&action) {
            self.pose = pose;
        }
        self.action = Some(action);
    }

    /// Start the registered action called `name`. A miss reverts to the
    /// default pose and returns false.
    pub fn set_action_by_name(&mut self, name: &str) -> bool {
        match self.registry.snapshot().action(name) {
            Some(action) => {
                self.set_action(action);
                true
            }
            None => {
                warn!("action '{name}' is not registered; reverting to the default pose");
                self.stop_action();
                false
            }
        }
    }

    /// Go back to the default pose. Whatever showed before the action is not restored.
    pub fn stop_action(&mut self) {
        let snapshot = self.registry.snapshot();
        self.reset_to_default(&snapshot);
    }

    /// Advance one simulation step.
    pub fn tick(&mut self) -> Option<AnimationEvent> {
        let action = self.action.clone()?;
        if self.held {
            return None;
        }

        self.tick = self.tick.saturating_add(1);
        if let Some(pose) = self.sample_current(&action) {
            self.pose = pose;
        }

        let duration = action.duration();
        if self.tick < duration {
            return None;
        }

        let name = action.name().to_string();
        match action.mode() {
            // A zero-length loop shows its single pose and never reports wrapping.
            PlaybackMode::Loop if duration == 0 => {
                self.tick = 0;
                None
            }
            PlaybackMode::Loop => {
                self.tick = 0;
                self.entry_pose = action.timeline().last().map(|k| k.pose.clone());
                Some(AnimationEvent::ActionLooped { action: name })
            }
            PlaybackMode::Hold if self.config.hold_freezes_on_final_pose => {
                self.held = true;
                self.tick = duration;
                if let Some(last) = action.timeline().last() {
                    self.pose = last.pose.clone();
                }
                debug!("action '{name}' holding on its final pose");
                Some(AnimationEvent::ActionHeld { action: name })
            }
            PlaybackMode::Once | PlaybackMode::Hold => {
                debug!("action '{name}' finished");
                self.stop_action();
                Some(AnimationEvent::ActionFinished { action: name })
            }
        }
    }

    /// Step to the next pose in the sorted name list.
    ///
    /// Default and index 0 ("standing") are one logical stop: leaving Default
    /// goes straight to index 1, and stepping past the last name lands on
    /// Default. Returns the new selection.
    pub fn cycle(&mut self) -> Selection {
        let snapshot = self.registry.snapshot();
        let names = snapshot.cycle_names();
        let n = names.len();

        let next = match self.selection {
            Selection::Default if n > 1 => 1,
            Selection::Default => return self.apply_selection(&snapshot, Selection::Default),
            Selection::Index(i) => i as usize + 1,
        };
        let selection = if next >= n {
            Selection::Default
        } else {
            Selection::try_from_index(next as i64).unwrap_or(Selection::Default)
        };
        self.apply_selection(&snapshot, selection)
    }

    /// Replicated form of the current selection.
    pub fn sync_byte(&self) -> u8 {
        self.selection.encode()
    }

    /// Observer side: adopt a replicated selection. Re-resolves only when the
    /// byte differs from the last one applied.
    pub fn apply_sync_byte(&mut self, byte: u8) {
        if self.last_synced == Some(byte) {
            return;
        }
        self.last_synced = Some(byte);
        let snapshot = self.registry.snapshot();
        self.apply_selection(&snapshot, Selection::decode(byte));
    }

    /// Resolve `selection` against `snapshot` and show the result. Anything
    /// that no longer resolves reverts to Default.
    pub(crate) fn apply_selection(
        &mut self,
        snapshot: &RegistrySnapshot,
        selection: Selection,
    ) -> Selection {
        let Some(pos) = selection.position() else {
            self.reset_to_default(snapshot);
            return self.selection;
        };
        let names = snapshot.cycle_names();
        match names.get(pos).and_then(|name| snapshot.pose(name)) {
            Some(pose) => {
                debug!("selection {pos} -> pose '{}'", pose.name());
                self.selection = selection;
                self.show(pose);
            }
            None => {
                warn!(
                    "selection {pos} does not resolve against {} registered poses; reverting to default",
                    snapshot.pose_count()
                );
                self.reset_to_default(snapshot);
            }
        }
        self.selection
    }

    fn show(&mut self, pose: Pose) {
        self.pose = pose;
        self.action = None;
        self.tick = 0;
        self.held = false;
        self.entry_pose = None;
    }

    fn reset_to_default(&mut self, snapshot: &RegistrySnapshot) {
        self.selection = Selection::Default;
        self.show(snapshot.default_pose());
    }

    /// Pose for the current tick of `action`, including the optional blend-in
    /// from the entry pose ahead of the first keyframe.
    fn sample_current(&self, action: &Action) -> Option<Pose> {
        if self.config.blend_in_first_keyframe {
            if let (Some(entry), Some(first)) = (&self.entry_pose, action.timeline().first()) {
                let lead_in = action.timeline().first_keyframe_duration();
                if lead_in > 0 && self.tick < first.tick {
                    let f = segment_factor(self.tick, 0, first.tick);
                    return Some(Pose::blend(entry.clone(), first.pose.clone(), f));
                }
            }
        }
        action.sample(self.tick)
    }
}
