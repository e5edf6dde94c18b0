//! Doll Animation Core (engine-agnostic)
//!
//! Static poses, keyframed actions and the per-entity state machine that
//! plays them. The crate defines the pose model, a timeline compiler and
//! sampler, a bulk-reloadable registry, the animator with its pose-cycling
//! interaction, the one-byte replicated selection and saved-state handling.
//! Rendering, asset discovery and transport are left to the host.

pub mod action;
pub mod animator;
pub mod config;
pub mod error;
pub mod events;
pub mod interp;
pub mod persist;
pub mod pose;
pub mod registry;
pub mod sampling;
pub mod selection;
pub mod stored_library;
pub mod timeline;

// Re-exports for consumers (adapters)
pub use action::{Action, PlaybackMode};
pub use animator::{AnimationState, Animator};
pub use config::AnimatorConfig;
pub use error::LibraryError;
pub use events::AnimationEvent;
pub use persist::PersistedState;
pub use pose::{
    BlendedPose, Part, PartTransform, Pose, PoseData, PoseRead, Vec3, DEFAULT_POSE_NAME,
};
pub use registry::{PoseLibrary, PoseSource, Registry, RegistrySnapshot};
pub use sampling::{effective_tick, sample_action, sample_timeline};
pub use selection::{decode_index, encode_index, Selection};
pub use stored_library::{parse_stored_library_json, StoredLibrarySource};
pub use timeline::{AuthoredKeyframe, CompiledKeyframe, Timeline};
