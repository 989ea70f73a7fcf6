//! Engine state representation

use serde::{Deserialize, Serialize};
use std::fmt;

use super::question::QuestionId;
use super::render::TextBlock;
use crate::runtime::scheduler::PendingTimer;
use crate::runtime::transition::FadeJoin;

/// Top-level section the story is in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    #[default]
    Landing,
    Intro,
    Dialogue,
    QuestionInterlude,
    ScrollInterlude,
    End,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Section::Landing => "landing",
            Section::Intro => "intro",
            Section::Dialogue => "dialogue",
            Section::QuestionInterlude => "question-interlude",
            Section::ScrollInterlude => "scroll-interlude",
            Section::End => "end",
        };
        f.write_str(name)
    }
}

/// Segment list being played
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Track {
    Intro,
    Dialogue,
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Track::Intro => f.write_str("intro"),
            Track::Dialogue => f.write_str("dialogue"),
        }
    }
}

/// Progress through the question interlude
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionState {
    pub asked_afterlife: bool,
    pub asked_god: bool,
    pub is_showing_answer: bool,
    pub current_answer: Option<QuestionId>,
}

impl QuestionState {
    pub fn asked(&self, id: QuestionId) -> bool {
        match id {
            QuestionId::Afterlife => self.asked_afterlife,
            QuestionId::God => self.asked_god,
        }
    }

    pub fn mark_asked(&mut self, id: QuestionId) {
        match id {
            QuestionId::Afterlife => self.asked_afterlife = true,
            QuestionId::God => self.asked_god = true,
        }
    }

    pub fn any_asked(&self) -> bool {
        self.asked_afterlife || self.asked_god
    }

    pub fn is_complete(&self) -> bool {
        self.asked_afterlife && self.asked_god
    }
}

/// Progress through the scroll interlude
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrollState {
    pub current_segment_index: usize,
    pub has_initialized: bool,
    /// Scroll listener is attached
    pub listening: bool,
    pub progress: f64,
}

/// Complete mutable state of one story session
///
/// Owned by exactly one `Engine`. A fresh value is the Landing state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineState {
    pub section: Section,
    pub intro_index: usize,
    pub dialogue_index: usize,
    pub active_timer: Option<PendingTimer>,
    pub question: QuestionState,
    pub scroll: ScrollState,
    /// Current segment waits for the continue control
    pub awaiting_continue: bool,
    /// Lingering blocks carried into the next render
    pub carried: Vec<TextBlock>,
    /// Outstanding fade-out join
    pub fade: Option<FadeJoin>,
}

impl EngineState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index(&self, track: Track) -> usize {
        match track {
            Track::Intro => self.intro_index,
            Track::Dialogue => self.dialogue_index,
        }
    }

    pub fn set_index(&mut self, track: Track, index: usize) {
        match track {
            Track::Intro => self.intro_index = index,
            Track::Dialogue => self.dialogue_index = index,
        }
    }
}
