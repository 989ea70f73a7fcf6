//! Commands that can be sent to the engine

use serde::{Deserialize, Serialize};

use super::question::QuestionId;

/// Engine command produced by the input controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Leave the landing page
    Start,
    /// Reader pressed the continue control
    Continue,
    /// Reader clicked a question prompt
    Ask(QuestionId),
    /// Scroll position changed (normalized 0..1)
    Scroll(f64),
    /// Jump one step forward, bypassing animations
    DebugAdvance,
    /// Jump one step back, bypassing animations
    DebugRetreat,
    /// Back to the landing page from the end screen
    Restart,
}

/// Whether a command changed anything
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Ignored,
}

impl Outcome {
    pub fn applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }
}
