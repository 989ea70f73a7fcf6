//! Question interlude content

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one of the two questions the reader can ask
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionId {
    Afterlife,
    God,
}

impl QuestionId {
    pub const ALL: [QuestionId; 2] = [QuestionId::Afterlife, QuestionId::God];
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionId::Afterlife => write!(f, "afterlife"),
            QuestionId::God => write!(f, "god"),
        }
    }
}

/// A single askable question and its answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOption {
    pub id: QuestionId,
    pub prompt: String,
    pub answer: String,
    pub answer_display_ms: u64,
}

/// Setup text plus the two options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSet {
    pub setup: String,
    pub options: Vec<QuestionOption>,
}

impl QuestionSet {
    pub fn option(&self, id: QuestionId) -> Option<&QuestionOption> {
        self.options.iter().find(|o| o.id == id)
    }
}
