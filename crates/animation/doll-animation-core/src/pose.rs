//! Pose model: immutable per-part transforms for a seven-part humanoid doll.
//!
//! A [`Pose`] is either a stored snapshot ([`PoseData`]) or a lazy blend of two
//! poses ([`BlendedPose`]). Both are read through [`PoseRead`], so a renderer
//! never needs to know where a pose came from. Every accessor hands out a
//! `[f32; 3]` by value; nothing returned can alias the pose's storage.

use std::sync::Arc;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::interp::functions::lerp_vec3;

/// Name of the implicit default pose.
pub const DEFAULT_POSE_NAME: &str = "standing";

/// Three-component vector (radians for rotations, model units for positions).
pub type Vec3 = [f32; 3];

pub const ZERO: Vec3 = [0.0, 0.0, 0.0];
pub const ONE: Vec3 = [1.0, 1.0, 1.0];

fn one() -> Vec3 {
    ONE
}

/// Jointed parts of the doll model.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Part {
    Head,
    Hat,
    Body,
    RightArm,
    LeftArm,
    RightLeg,
    LeftLeg,
}

impl Part {
    pub const COUNT: usize = 7;

    pub const ALL: [Part; Part::COUNT] = [
        Part::Head,
        Part::Hat,
        Part::Body,
        Part::RightArm,
        Part::LeftArm,
        Part::RightLeg,
        Part::LeftLeg,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Rotation, position offset and scale of one part.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PartTransform {
    #[serde(default)]
    pub rotation: Vec3,
    #[serde(default)]
    pub position: Vec3,
    #[serde(default = "one")]
    pub scale: Vec3,
}

impl Default for PartTransform {
    fn default() -> Self {
        Self {
            rotation: ZERO,
            position: ZERO,
            scale: ONE,
        }
    }
}

impl PartTransform {
    /// Component-wise linear interpolation of all three vectors.
    #[inline]
    pub fn lerp(&self, other: &PartTransform, t: f32) -> PartTransform {
        PartTransform {
            rotation: lerp_vec3(self.rotation, other.rotation, t),
            position: lerp_vec3(self.position, other.position, t),
            scale: lerp_vec3(self.scale, other.scale, t),
        }
    }
}

/// Shared read interface for stored and blended poses.
pub trait PoseRead {
    fn name(&self) -> &str;
    fn display_name(&self) -> Option<&str>;

    /// Joint rotation in radians.
    fn rotation(&self, part: Part) -> Vec3;
    fn part_position(&self, part: Part) -> Vec3;
    fn part_scale(&self, part: Part) -> Vec3;

    /// Whole-model offset.
    fn position(&self) -> Vec3;
    /// Whole-model scale.
    fn scale(&self) -> Vec3;

    /// Human-facing label: the display name when one was authored.
    fn label(&self) -> &str {
        self.display_name().unwrap_or_else(|| self.name())
    }

    fn part(&self, part: Part) -> PartTransform {
        PartTransform {
            rotation: self.rotation(part),
            position: self.part_position(part),
            scale: self.part_scale(part),
        }
    }
}

/// Plain pose data as authored.
#[derive(Clone, Debug, PartialEq)]
pub struct PoseData {
    name: String,
    display_name: Option<String>,
    parts: [PartTransform; Part::COUNT],
    position: Vec3,
    scale: Vec3,
}

impl PoseData {
    /// Identity pose (no rotation, no offset, unit scale) with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_name: None,
            parts: [PartTransform::default(); Part::COUNT],
            position: ZERO,
            scale: ONE,
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn with_part(mut self, part: Part, transform: PartTransform) -> Self {
        self.parts[part.index()] = transform;
        self
    }

    pub fn with_rotation(mut self, part: Part, rotation: Vec3) -> Self {
        self.parts[part.index()].rotation = rotation;
        self
    }

    pub fn with_part_position(mut self, part: Part, position: Vec3) -> Self {
        self.parts[part.index()].position = position;
        self
    }

    pub fn with_part_scale(mut self, part: Part, scale: Vec3) -> Self {
        self.parts[part.index()].scale = scale;
        self
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Freeze into a shareable [`Pose`].
    pub fn into_pose(self) -> Pose {
        Pose::Stored(Arc::new(self))
    }
}

impl PoseRead for PoseData {
    fn name(&self) -> &str {
        &self.name
    }

    fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    fn rotation(&self, part: Part) -> Vec3 {
        self.parts[part.index()].rotation
    }

    fn part_position(&self, part: Part) -> Vec3 {
        self.parts[part.index()].position
    }

    fn part_scale(&self, part: Part) -> Vec3 {
        self.parts[part.index()].scale
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn scale(&self) -> Vec3 {
        self.scale
    }

    fn part(&self, part: Part) -> PartTransform {
        self.parts[part.index()]
    }
}

/// Read-through linear blend of two poses.
///
/// Nothing is precomputed: each accessor interpolates the matching vectors of
/// `from` and `to` at `factor` on every call.
#[derive(Clone, Debug, PartialEq)]
pub struct BlendedPose {
    from: Pose,
    to: Pose,
    factor: f32,
}

impl BlendedPose {
    pub fn source(&self) -> &Pose {
        &self.from
    }

    pub fn target(&self) -> &Pose {
        &self.to
    }

    /// Blend factor in [0, 1]; 0 reads `from`, 1 reads `to`.
    pub fn factor(&self) -> f32 {
        self.factor
    }

    /// The source the blend is closer to; it lends the blend its identity.
    fn dominant(&self) -> &Pose {
        if self.factor < 0.5 {
            &self.from
        } else {
            &self.to
        }
    }
}

impl PoseRead for BlendedPose {
    fn name(&self) -> &str {
        self.dominant().name()
    }

    fn display_name(&self) -> Option<&str> {
        self.dominant().display_name()
    }

    fn rotation(&self, part: Part) -> Vec3 {
        lerp_vec3(self.from.rotation(part), self.to.rotation(part), self.factor)
    }

    fn part_position(&self, part: Part) -> Vec3 {
        lerp_vec3(
            self.from.part_position(part),
            self.to.part_position(part),
            self.factor,
        )
    }

    fn part_scale(&self, part: Part) -> Vec3 {
        lerp_vec3(
            self.from.part_scale(part),
            self.to.part_scale(part),
            self.factor,
        )
    }

    fn position(&self) -> Vec3 {
        lerp_vec3(self.from.position(), self.to.position(), self.factor)
    }

    fn scale(&self) -> Vec3 {
        lerp_vec3(self.from.scale(), self.to.scale(), self.factor)
    }

    fn part(&self, part: Part) -> PartTransform {
        self.from.part(part).lerp(&self.to.part(part), self.factor)
    }
}

/// A pose as seen by the animator and the renderer. Cloning is cheap.
#[derive(Clone, Debug, PartialEq)]
pub enum Pose {
    Stored(Arc<PoseData>),
    Blended(Arc<BlendedPose>),
}

static BUILTIN_DEFAULT: Lazy<Pose> = Lazy::new(|| {
    PoseData::new(DEFAULT_POSE_NAME)
        .with_display_name("Standing")
        .into_pose()
});

impl Pose {
    /// Built-in standing pose used whenever a lookup comes up empty.
    pub fn builtin_default() -> Pose {
        BUILTIN_DEFAULT.clone()
    }

    /// Lazy blend between two poses. `factor` is clamped to [0, 1].
    pub fn blend(from: Pose, to: Pose, factor: f32) -> Pose {
        let factor = if factor.is_nan() {
            0.0
        } else {
            factor.clamp(0.0, 1.0)
        };
        Pose::Blended(Arc::new(BlendedPose { from, to, factor }))
    }

    pub fn is_blended(&self) -> bool {
        matches!(self, Pose::Blended(_))
    }

    /// The stored data behind this pose, if it is not a blend.
    pub fn as_stored(&self) -> Option<&PoseData> {
        match self {
            Pose::Stored(data) => Some(data),
            Pose::Blended(_) => None,
        }
    }

    pub fn as_blended(&self) -> Option<&BlendedPose> {
        match self {
            Pose::Stored(_) => None,
            Pose::Blended(blend) => Some(blend),
        }
    }

    /// This pose with any blend resolved into stored data, so it can seed a
    /// new blend without nesting the old one.
    pub fn flatten(&self) -> Pose {
        let Pose::Blended(blend) = self else {
            return self.clone();
        };
        let mut data = PoseData::new(blend.name())
            .with_position(blend.position())
            .with_scale(blend.scale());
        if let Some(display) = blend.display_name() {
            data = data.with_display_name(display);
        }
        for part in Part::ALL {
            data = data.with_part(part, blend.part(part));
        }
        data.into_pose()
    }

    /// True when both handles point at the same allocation.
    pub fn same_as(&self, other: &Pose) -> bool {
        match (self, other) {
            (Pose::Stored(a), Pose::Stored(b)) => Arc::ptr_eq(a, b),
            (Pose::Blended(a), Pose::Blended(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<PoseData> for Pose {
    fn from(data: PoseData) -> Self {
        data.into_pose()
    }
}

impl PoseRead for Pose {
    fn name(&self) -> &str {
        match self {
            Pose::Stored(p) => p.name(),
            Pose::Blended(p) => p.name(),
        }
    }

    fn display_name(&self) -> Option<&str> {
        match self {
            Pose::Stored(p) => p.display_name(),
            Pose::Blended(p) => p.display_name(),
        }
    }

    fn rotation(&self, part: Part) -> Vec3 {
        match self {
            Pose::Stored(p) => p.rotation(part),
            Pose::Blended(p) => p.rotation(part),
        }
    }

    fn part_position(&self, part: Part) -> Vec3 {
        match self {
            Pose::Stored(p) => p.part_position(part),
            Pose::Blended(p) => p.part_position(part),
        }
    }

    fn part_scale(&self, part: Part) -> Vec3 {
        match self {
            Pose::Stored(p) => p.part_scale(part),
            Pose::Blended(p) => p.part_scale(part),
        }
    }

    fn position(&self) -> Vec3 {
        match self {
            Pose::Stored(p) => p.position(),
            Pose::Blended(p) => p.position(),
        }
    }

    fn scale(&self) -> Vec3 {
        match self {
            Pose::Stored(p) => p.scale(),
            Pose::Blended(p) => p.scale(),
        }
    }

    fn part(&self, part: Part) -> PartTransform {
        match self {
            Pose::Stored(p) => p.part(part),
            Pose::Blended(p) => p.part(part),
        }
    }
}
