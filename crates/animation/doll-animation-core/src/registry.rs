//! Name-keyed pose and action store.
//!
//! The registry holds one immutable [`RegistrySnapshot`] behind an `Arc`.
//! Reload builds a complete replacement and swaps it in whole, so a reader
//! holding a snapshot never sees a half-updated mapping. Readers clone the
//! `Arc` and keep using it for as long as they like.

use std::sync::{Arc, PoisonError, RwLock};

use hashbrown::HashMap;
use log::{debug, warn};

use crate::action::Action;
use crate::error::LibraryError;
use crate::pose::{Pose, PoseRead, DEFAULT_POSE_NAME};

/// A complete set of named poses and actions, as produced by a loader.
#[derive(Clone, Debug, Default)]
pub struct PoseLibrary {
    pub poses: HashMap<String, Pose>,
    pub actions: HashMap<String, Arc<Action>>,
}

impl PoseLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a pose under its own name. A later pose with the same name wins.
    pub fn insert_pose(&mut self, pose: impl Into<Pose>) {
        let pose = pose.into();
        let name = pose.name().to_string();
        if self.poses.insert(name.clone(), pose).is_some() {
            debug!("pose '{name}' redefined; keeping the later definition");
        }
    }

    /// Insert an action under its own name. A later action with the same name wins.
    pub fn insert_action(&mut self, action: Action) {
        let name = action.name().to_string();
        if self.actions.insert(name.clone(), Arc::new(action)).is_some() {
            debug!("action '{name}' redefined; keeping the later definition");
        }
    }

    pub fn with_pose(mut self, pose: impl Into<Pose>) -> Self {
        self.insert_pose(pose);
        self
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.insert_action(action);
        self
    }
}

/// External provider of named poses and actions. Only [`Registry::reload`] calls it.
pub trait PoseSource {
    fn load_all(&mut self) -> Result<PoseLibrary, LibraryError>;
}

/// Read-only view of one generation of the registry.
#[derive(Debug, Default)]
pub struct RegistrySnapshot {
    library: PoseLibrary,
    sorted_names: Vec<String>,
}

impl RegistrySnapshot {
    pub fn new(library: PoseLibrary) -> Self {
        let sorted_names = sorted_pose_names(&library.poses);
        Self {
            library,
            sorted_names,
        }
    }

    pub fn pose(&self, name: &str) -> Option<Pose> {
        self.library.poses.get(name).cloned()
    }

    pub fn action(&self, name: &str) -> Option<Arc<Action>> {
        self.library.actions.get(name).cloned()
    }

    pub fn contains_pose(&self, name: &str) -> bool {
        self.library.poses.contains_key(name)
    }

    pub fn pose_count(&self) -> usize {
        self.library.poses.len()
    }

    pub fn action_count(&self) -> usize {
        self.library.actions.len()
    }

    /// The registered "standing" pose, or the built-in one.
    pub fn default_pose(&self) -> Pose {
        self.pose(DEFAULT_POSE_NAME)
            .unwrap_or_else(Pose::builtin_default)
    }

    /// Look up a pose by name, falling back to the default pose on a miss.
    pub fn pose_or_default(&self, name: &str) -> Pose {
        match self.pose(name) {
            Some(pose) => pose,
            None => {
                warn!("pose '{name}' is not registered; using the default pose");
                self.default_pose()
            }
        }
    }

    /// Registered pose names sorted alphabetically with "standing" pinned first.
    pub fn sorted_pose_names(&self) -> &[String] {
        &self.sorted_names
    }

    /// Names offered to pose cycling. Never empty: an empty registry offers
    /// the default pose name alone.
    pub fn cycle_names(&self) -> Vec<String> {
        if self.sorted_names.is_empty() {
            vec![DEFAULT_POSE_NAME.to_string()]
        } else {
            self.sorted_names.clone()
        }
    }

    /// Position of `name` in [`Self::sorted_pose_names`].
    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.sorted_names.iter().position(|n| n == name)
    }

    pub fn action_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.library.actions.keys().cloned().collect();
        names.sort();
        names
    }
}

fn sorted_pose_names(poses: &HashMap<String, Pose>) -> Vec<String> {
    let mut names: Vec<String> = poses.keys().cloned().collect();
    names.sort();
    if let Some(i) = names.iter().position(|n| n == DEFAULT_POSE_NAME) {
        let standing = names.remove(i);
        names.insert(0, standing);
    }
    names
}

/// Shared, bulk-reloadable registry.
#[derive(Debug, Default)]
pub struct Registry {
    current: RwLock<Arc<RegistrySnapshot>>,
}

impl Registry {
    /// Empty registry; every lookup falls back to the built-in default pose.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_library(library: PoseLibrary) -> Self {
        Self {
            current: RwLock::new(Arc::new(RegistrySnapshot::new(library))),
        }
    }

    /// Current generation. Holding it does not block reloads.
    pub fn snapshot(&self) -> Arc<RegistrySnapshot> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Swap in a complete replacement library.
    pub fn replace(&self, library: PoseLibrary) {
        let next = Arc::new(RegistrySnapshot::new(library));
        debug!(
            "registry reloaded: {} poses, {} actions",
            next.pose_count(),
            next.action_count()
        );
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = next;
    }

    /// Load everything from `source` and swap it in. On failure the current
    /// generation stays installed.
    pub fn reload(&self, source: &mut dyn PoseSource) -> Result<(), LibraryError> {
        match source.load_all() {
            Ok(library) => {
                self.replace(library);
                Ok(())
            }
            Err(err) => {
                warn!("registry reload failed, keeping previous poses: {err}");
                Err(err)
            }
        }
    }
}
