//! Discrete signals emitted by [`crate::Animator::tick`].

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum AnimationEvent {
    /// A LOOP action passed its duration and restarted.
    ActionLooped { action: String },
    /// A HOLD action reached its final pose and froze there.
    ActionHeld { action: String },
    /// An action ran out and the animator went back to the default pose.
    ActionFinished { action: String },
}
