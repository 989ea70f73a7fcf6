//! Fade-out join
//!
//! Counts outstanding fade completions for one advancement. The join fires
//! once, when the last element reports, and ignores duplicates and
//! elements it was never waiting on.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::types::ElementId;

/// Why the engine is waiting on fades
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FadePurpose {
    /// Move to the next segment of the current track
    NextSegment,
    /// Leave the question interlude
    LeaveQuestions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FadeJoin {
    pub purpose: FadePurpose,
    pending: BTreeSet<ElementId>,
    fired: bool,
}

impl FadeJoin {
    pub fn new(purpose: FadePurpose) -> Self {
        Self {
            purpose,
            pending: BTreeSet::new(),
            fired: false,
        }
    }

    pub fn wait_on(&mut self, element: ElementId) {
        if !self.fired {
            self.pending.insert(element);
        }
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    /// Record a completion; true exactly once, when the last one arrives
    pub fn complete(&mut self, element: &ElementId) -> bool {
        if self.fired || !self.pending.remove(element) {
            return false;
        }
        if self.pending.is_empty() {
            self.fired = true;
            return true;
        }
        false
    }
}
