use log::debug;
use serde::Deserialize;

use crate::action::{Action, PlaybackMode};
use crate::error::LibraryError;
use crate::pose::{Part, PartTransform, Pose, PoseData, PoseRead, Vec3, ONE, ZERO};
use crate::registry::{PoseLibrary, PoseSource};
use crate::timeline::AuthoredKeyframe;

/// Public API: parse a stored pose library (see fixtures/libraries/*.json) into a
/// [`PoseLibrary`].
///
/// Notes:
/// - Poses are read first; action keyframes name poses from the same document.
/// - Missing part transforms default to no rotation, no offset, unit scale.
/// - Later entries with a repeated name replace earlier ones.
/// - Keyframe ticks are relative (see [`crate::timeline`]) and kept as authored.
pub fn parse_stored_library_json(s: &str) -> Result<PoseLibrary, LibraryError> {
    let stored: StoredLibrary = serde_json::from_str(s)?;

    let mut library = PoseLibrary::new();
    for sp in stored.poses {
        library.insert_pose(to_pose(sp));
    }

    for sa in stored.actions {
        let mut keyframes = Vec::with_capacity(sa.keyframes.len());
        for kf in sa.keyframes {
            let pose: Pose = library
                .poses
                .get(&kf.pose)
                .cloned()
                .ok_or_else(|| LibraryError::UnknownPose {
                    action: sa.name.clone(),
                    pose: kf.pose.clone(),
                })?;
            keyframes.push(AuthoredKeyframe::new(kf.tick, pose));
        }
        let mut action = Action::new(sa.name, sa.mode, &keyframes);
        if let Some(display) = sa.display_name {
            action = action.with_display_name(display);
        }
        library.insert_action(action);
    }

    Ok(library)
}

fn to_pose(sp: StoredPose) -> PoseData {
    let mut pose = PoseData::new(sp.name)
        .with_position(sp.position)
        .with_scale(sp.scale);
    if let Some(display) = sp.display_name {
        pose = pose.with_display_name(display);
    }
    let parts = [
        (Part::Head, sp.head),
        (Part::Hat, sp.hat),
        (Part::Body, sp.body),
        (Part::RightArm, sp.right_arm),
        (Part::LeftArm, sp.left_arm),
        (Part::RightLeg, sp.right_leg),
        (Part::LeftLeg, sp.left_leg),
    ];
    for (part, transform) in parts {
        pose = pose.with_part(part, transform);
    }
    pose
}

/// [`PoseSource`] over an in-memory JSON document.
#[derive(Clone, Debug)]
pub struct StoredLibrarySource {
    json: String,
}

impl StoredLibrarySource {
    pub fn new(json: impl Into<String>) -> Self {
        Self { json: json.into() }
    }
}

impl PoseSource for StoredLibrarySource {
    fn load_all(&mut self) -> Result<PoseLibrary, LibraryError> {
        let library = parse_stored_library_json(&self.json)?;
        debug!(
            "parsed stored library: poses [{}]",
            library
                .poses
                .values()
                .map(|p| p.name())
                .collect::<Vec<_>>()
                .join(", ")
        );
        Ok(library)
    }
}

// ----- JSON schema (serde) -----

fn zero() -> Vec3 {
    ZERO
}

fn one() -> Vec3 {
    ONE
}

#[derive(Debug, Deserialize)]
struct StoredLibrary {
    #[serde(default)]
    pub poses: Vec<StoredPose>,
    #[serde(default)]
    pub actions: Vec<StoredAction>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredPose {
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub head: PartTransform,
    #[serde(default)]
    pub hat: PartTransform,
    #[serde(default)]
    pub body: PartTransform,
    #[serde(default)]
    pub right_arm: PartTransform,
    #[serde(default)]
    pub left_arm: PartTransform,
    #[serde(default)]
    pub right_leg: PartTransform,
    #[serde(default)]
    pub left_leg: PartTransform,
    #[serde(default = "zero")]
    pub position: Vec3,
    #[serde(default = "one")]
    pub scale: Vec3,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredAction {
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub mode: PlaybackMode,
    pub keyframes: Vec<StoredKeyframe>,
}

#[derive(Debug, Deserialize)]
struct StoredKeyframe {
    pub tick: i32,
    pub pose: String,
}
