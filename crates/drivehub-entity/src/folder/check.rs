//! Tri-state check value of a folder subtree.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Aggregated selection state of a folder and all of its descendant
/// folders. Always derived from the selection set, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckState {
    /// Every folder in the subtree is selected.
    Checked,
    /// Some, but not all, folders in the subtree are selected.
    Indeterminate,
    /// No folder in the subtree is selected.
    Unchecked,
}

impl CheckState {
    /// Classify `selected` out of `total` folder ids.
    pub fn from_counts(selected: usize, total: usize) -> Self {
        if selected == 0 {
            Self::Unchecked
        } else if selected >= total {
            Self::Checked
        } else {
            Self::Indeterminate
        }
    }

    /// Checkbox marker used by text renderers.
    pub fn marker(self) -> &'static str {
        match self {
            Self::Checked => "[x]",
            Self::Indeterminate => "[-]",
            Self::Unchecked => "[ ]",
        }
    }
}

impl fmt::Display for CheckState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Checked => write!(f, "checked"),
            Self::Indeterminate => write!(f, "indeterminate"),
            Self::Unchecked => write!(f, "unchecked"),
        }
    }
}
