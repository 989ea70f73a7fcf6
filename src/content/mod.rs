//! Content store
//!
//! Immutable story data read by the engine: the intro, the dialogue plan
//! (ordinary lines interleaved with interlude portals), the question set,
//! and the scroll section.

use serde::{Deserialize, Serialize};

use crate::error::{ContentError, EngineError, Result};
use crate::types::{QuestionSet, ScrollSegment, Segment, Track};

pub mod builtin;
pub mod check;


/// A named sub-section reachable from the dialogue plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interlude {
    Questions,
    Scroll,
}

/// One entry of the dialogue plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum DialogueStep {
    /// An ordinary dialogue segment
    Line(Segment),
    /// Divert into an interlude, then resume the dialogue at `resume_at`
    Interlude { kind: Interlude, resume_at: usize },
}

/// All content for one story
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Story {
    pub intro: Vec<Segment>,
    pub dialogue: Vec<DialogueStep>,
    pub questions: QuestionSet,
    pub scroll: Vec<ScrollSegment>,
}

impl Story {
    /// Decode and validate a story from JSON
    pub fn from_json(json: &str) -> std::result::Result<Self, ContentError> {
        let story: Story = serde_json::from_str(json)?;
        let report = check::check(&story);
        if !report.is_valid() {
            return Err(ContentError::Invalid {
                problems: report.errors,
            });
        }
        Ok(story)
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn len(&self, track: Track) -> usize {
        match track {
            Track::Intro => self.intro.len(),
            Track::Dialogue => self.dialogue.len(),
        }
    }

    pub fn intro(&self, index: usize) -> Result<&Segment> {
        self.intro
            .get(index)
            .ok_or_else(|| EngineError::content_index(Track::Intro, index, self.intro.len()))
    }

    pub fn dialogue(&self, index: usize) -> Result<&DialogueStep> {
        self.dialogue
            .get(index)
            .ok_or_else(|| EngineError::content_index(Track::Dialogue, index, self.dialogue.len()))
    }

    /// The segment at `index` of `track`, if that step is an ordinary line
    pub fn segment(&self, track: Track, index: usize) -> Result<Option<&Segment>> {
        match track {
            Track::Intro => self.intro(index).map(Some),
            Track::Dialogue => match self.dialogue(index)? {
                DialogueStep::Line(segment) => Ok(Some(segment)),
                DialogueStep::Interlude { .. } => Ok(None),
            },
        }
    }

    pub fn questions(&self) -> &QuestionSet {
        &self.questions
    }

    pub fn scroll(&self, index: usize) -> Option<&ScrollSegment> {
        self.scroll.get(index)
    }

    /// Dialogue indices that divert into an interlude
    pub fn portals(&self) -> impl Iterator<Item = (usize, Interlude, usize)> + '_ {
        self.dialogue
            .iter()
            .enumerate()
            .filter_map(|(i, step)| match step {
                DialogueStep::Interlude { kind, resume_at } => Some((i, *kind, *resume_at)),
                DialogueStep::Line(_) => None,
            })
    }
}

impl Default for Story {
    fn default() -> Self {
        builtin::story()
    }
}
