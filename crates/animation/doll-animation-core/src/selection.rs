//! Replicated pose selection.
//!
//! The selection is either the default sentinel or a 0-based index into the
//! sorted pose-name list. On the wire it is one byte: 0..=254 is an index,
//! 255 is the default. Internal code only ever sees [`Selection`]; the byte
//! exists at the serialization edge.

use log::warn;
use serde::{Deserialize, Serialize};

/// Wire value of [`Selection::Default`].
pub const DEFAULT_SELECTION_BYTE: u8 = u8::MAX;

/// Largest index representable on the wire.
pub const MAX_SELECTION_INDEX: u8 = u8::MAX - 1;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Selection {
    /// No explicit selection; show the default pose.
    #[default]
    Default,
    /// Position in the sorted pose-name list (never 255).
    Index(u8),
}

impl Selection {
    /// Build a selection from a signed legacy index (-1 = default).
    ///
    /// Indices past [`MAX_SELECTION_INDEX`] cannot be encoded; callers must not
    /// produce them. Debug builds assert, release builds fall back to default.
    pub fn from_index(index: i32) -> Selection {
        if index < 0 {
            return Selection::Default;
        }
        debug_assert!(
            index <= MAX_SELECTION_INDEX as i32,
            "selection index {index} does not fit the wire format"
        );
        if index > MAX_SELECTION_INDEX as i32 {
            warn!("selection index {index} does not fit the wire format; using default");
            return Selection::Default;
        }
        Selection::Index(index as u8)
    }

    /// Checked form of [`Self::from_index`]: `None` when the index cannot be
    /// encoded. Use this for indices read from storage or computed from a list.
    pub fn try_from_index(index: i64) -> Option<Selection> {
        if index < 0 {
            Some(Selection::Default)
        } else if index <= MAX_SELECTION_INDEX as i64 {
            Some(Selection::Index(index as u8))
        } else {
            None
        }
    }

    /// Signed form: -1 for default, otherwise the index.
    pub fn to_index(self) -> i32 {
        match self {
            Selection::Default => -1,
            Selection::Index(i) => i as i32,
        }
    }

    /// Position in the name list, if any.
    pub fn position(self) -> Option<usize> {
        match self {
            Selection::Default => None,
            Selection::Index(i) => Some(i as usize),
        }
    }

    pub fn is_default(self) -> bool {
        matches!(self, Selection::Default)
    }

    #[inline]
    pub fn encode(self) -> u8 {
        match self {
            Selection::Default => DEFAULT_SELECTION_BYTE,
            Selection::Index(i) => i,
        }
    }

    #[inline]
    pub fn decode(byte: u8) -> Selection {
        if byte == DEFAULT_SELECTION_BYTE {
            Selection::Default
        } else {
            Selection::Index(byte)
        }
    }
}

/// Encode a signed index (-1 = default) into its wire byte.
pub fn encode_index(index: i32) -> u8 {
    Selection::from_index(index).encode()
}

/// Decode a wire byte into a signed index (-1 = default).
pub fn decode_index(byte: u8) -> i32 {
    Selection::decode(byte).to_index()
}
