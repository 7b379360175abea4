//! Per-hunk review decisions.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The reviewer's decision for one hunk.
///
/// Every hunk starts `Pending`; any decision may be revised to any other at
/// any time. There are no automatic transitions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HunkAction {
    /// Not yet decided.
    #[default]
    Pending,
    /// Include this hunk when exporting a patch.
    Accept,
    /// Exclude this hunk.
    Reject,
}

/// A `hunk index -> HunkAction` map owned by the calling application.
///
/// The engine never stores one of these; callers construct it when review
/// begins and pass it into patch-filtering operations explicitly. Indices
/// without an entry are `Pending` by convention.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewState {
    actions: HashMap<usize, HunkAction>,
}

impl ReviewState {
    /// Create a review state with every hunk pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the decision for a hunk. Overwrites any earlier decision.
    pub fn set_action(&mut self, hunk_index: usize, action: HunkAction) {
        if action == HunkAction::Pending {
            // Pending is the absence of a decision; keep the map sparse.
            self.actions.remove(&hunk_index);
        } else {
            self.actions.insert(hunk_index, action);
        }
    }

    /// The decision for a hunk, `Pending` when none was recorded.
    pub fn action_for(&self, hunk_index: usize) -> HunkAction {
        self.actions.get(&hunk_index).copied().unwrap_or_default()
    }

    /// Whether the hunk is marked `Accept`.
    pub fn is_accepted(&self, hunk_index: usize) -> bool {
        self.action_for(hunk_index) == HunkAction::Accept
    }

    /// Indices marked with the given action, in ascending order.
    /// Only explicitly recorded decisions are reported, so asking for
    /// `Pending` always yields an empty list.
    pub fn indices_with(&self, action: HunkAction) -> Vec<usize> {
        let mut indices: Vec<usize> = self
            .actions
            .iter()
            .filter(|(_, a)| **a == action)
            .map(|(i, _)| *i)
            .collect();
        indices.sort_unstable();
        indices
    }

    /// Number of recorded (non-pending) decisions.
    pub fn decided(&self) -> usize {
        self.actions.len()
    }

    /// Forget every decision, returning all hunks to `Pending`.
    pub fn reset(&mut self) {
        self.actions.clear();
    }
}
