//! Timeline sampling.
//!
//! Model:
//! - The sample tick is first mapped to an effective tick by the playback mode.
//!   Every mode clamps to `duration - 1`; wrapping a looping counter back to 0
//!   is the animator's job, not the sampler's.
//! - 0 keyframes: no pose. 1 keyframe: that pose for every tick.
//! - Otherwise the segment [prev, next] around the effective tick is located.
//!   An exact hit (or an instant cut) returns the stored pose untouched;
//!   anything between two keyframes returns a lazy [`Pose::Blended`].

use crate::action::{Action, PlaybackMode};
use crate::interp::functions::segment_factor;
use crate::pose::Pose;
use crate::timeline::{CompiledKeyframe, Timeline};

/// Map a caller tick onto the timeline for the given mode.
#[inline]
pub fn effective_tick(mode: PlaybackMode, tick: u32, duration: u32) -> u32 {
    let last = duration.saturating_sub(1);
    match mode {
        // Freeze on the pre-wrap frame.
        PlaybackMode::Loop => {
            if tick >= duration {
                last
            } else {
                tick
            }
        }
        PlaybackMode::Once | PlaybackMode::Hold => tick.min(last),
    }
}

/// Find (prev, next) around tick `t`:
/// - prev: last keyframe with tick <= t (falls back to the first keyframe)
/// - next: first keyframe with tick >= t (falls back to the last keyframe)
fn find_segment(keyframes: &[CompiledKeyframe], t: u32) -> (usize, usize) {
    let n = keyframes.len();
    let at_or_before = keyframes.partition_point(|k| k.tick <= t);
    let prev = at_or_before.saturating_sub(1);
    let first_at_or_after = keyframes.partition_point(|k| k.tick < t);
    let next = first_at_or_after.min(n - 1);
    (prev, next)
}

/// Sample a compiled timeline at `tick` under `mode`.
pub fn sample_timeline(timeline: &Timeline, tick: u32, mode: PlaybackMode) -> Option<Pose> {
    let keyframes = timeline.keyframes();
    match keyframes.len() {
        0 => None,
        1 => Some(keyframes[0].pose.clone()),
        _ => {
            let t = effective_tick(mode, tick, timeline.duration());
            let (i0, i1) = find_segment(keyframes, t);
            let prev = &keyframes[i0];
            let next = &keyframes[i1];
            if i0 == i1 || prev.tick == t || prev.tick == next.tick {
                return Some(prev.pose.clone());
            }
            let f = segment_factor(t, prev.tick, next.tick);
            Some(Pose::blend(prev.pose.clone(), next.pose.clone(), f))
        }
    }
}

/// Sample an action at `tick` with an explicit playback mode.
pub fn sample_action(action: &Action, tick: u32, mode: PlaybackMode) -> Option<Pose> {
    sample_timeline(action.timeline(), tick, mode)
}
