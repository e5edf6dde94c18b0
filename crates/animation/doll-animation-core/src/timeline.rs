//! Keyframe timeline compiler.
//!
//! Authored keyframes carry *relative* ticks: the first keyframe's tick is the
//! time needed to move into it from whatever pose was showing, every later
//! keyframe's tick is the time since the previous one. Compilation prefix-sums
//! them into absolute ticks.

use log::warn;

use crate::pose::Pose;

/// A keyframe as authored: (relative tick, pose).
#[derive(Clone, Debug, PartialEq)]
pub struct AuthoredKeyframe {
    /// Ticks since the previous keyframe. Only the first keyframe may be <= 0,
    /// which means "show immediately".
    pub tick: i32,
    pub pose: Pose,
}

impl AuthoredKeyframe {
    pub fn new(tick: i32, pose: Pose) -> Self {
        Self { tick, pose }
    }
}

/// A keyframe placed at an absolute tick.
#[derive(Clone, Debug, PartialEq)]
pub struct CompiledKeyframe {
    pub tick: u32,
    pub pose: Pose,
}

/// Compiled, immutable keyframe sequence.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Timeline {
    keyframes: Vec<CompiledKeyframe>,
    duration: u32,
    first_keyframe_duration: u32,
}

impl Timeline {
    /// Compile authored keyframes into absolute ticks.
    ///
    /// Absolute ticks are non-decreasing; equal neighbours are instant cuts.
    /// The duration is the absolute tick of the final keyframe (0 when empty).
    pub fn compile(authored: &[AuthoredKeyframe]) -> Timeline {
        let mut keyframes = Vec::with_capacity(authored.len());
        let mut first_keyframe_duration = 0;
        let mut at: u32 = 0;

        for (i, kf) in authored.iter().enumerate() {
            let relative = if kf.tick > 0 {
                kf.tick as u32
            } else {
                if i > 0 && kf.tick < 0 {
                    warn!(
                        "keyframe {i} has negative relative tick {}; treating it as an instant cut",
                        kf.tick
                    );
                }
                0
            };
            if i == 0 {
                first_keyframe_duration = relative;
                at = relative;
            } else {
                at = at.saturating_add(relative);
            }
            keyframes.push(CompiledKeyframe {
                tick: at,
                pose: kf.pose.clone(),
            });
        }

        let duration = keyframes.last().map(|k| k.tick).unwrap_or(0);
        Timeline {
            keyframes,
            duration,
            first_keyframe_duration,
        }
    }

    pub fn keyframes(&self) -> &[CompiledKeyframe] {
        &self.keyframes
    }

    pub fn len(&self) -> usize {
        self.keyframes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }

    /// Absolute tick of the final keyframe.
    pub fn duration(&self) -> u32 {
        self.duration
    }

    /// Ticks the first keyframe asked for to blend in from the prior pose.
    pub fn first_keyframe_duration(&self) -> u32 {
        self.first_keyframe_duration
    }

    pub fn first(&self) -> Option<&CompiledKeyframe> {
        self.keyframes.first()
    }

    pub fn last(&self) -> Option<&CompiledKeyframe> {
        self.keyframes.last()
    }
}
