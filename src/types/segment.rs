//! Segment records for the intro and dialogue sections

use serde::{Deserialize, Serialize};

/// Which speaker a block of text belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// The narrating voice
    Narrator,
    /// The person being spoken to
    Person,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Narrator, Role::Person];
}

/// Vertical placement hint for a text block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    Top,
    Mid,
    Bottom,
}

/// Semantic style markers attached to one role's text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleTags {
    /// Placement within the display region
    pub position: Option<Position>,
    /// Text stays on screen, unfaded, into the next render
    pub linger: bool,
    /// Text is removed instantly instead of fading out
    pub skip_fade: bool,
    /// Text is shown deprioritised ("faded to grey")
    pub faded: bool,
    /// Small stage direction printed after the text
    pub aside: Option<String>,
}

impl StyleTags {
    pub fn at(position: Position) -> Self {
        Self {
            position: Some(position),
            ..Self::default()
        }
    }

    pub fn lingering(mut self) -> Self {
        self.linger = true;
        self
    }

    pub fn skipping_fade(mut self) -> Self {
        self.skip_fade = true;
        self
    }

    pub fn with_aside(mut self, aside: impl Into<String>) -> Self {
        self.aside = Some(aside.into());
        self
    }
}

/// Text spoken by one role within a segment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleText {
    pub text: String,
    pub style: StyleTags,
}

impl RoleText {
    pub fn new(text: impl Into<String>, style: StyleTags) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, StyleTags::default())
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Whether this text must be faded out (and waited on) before advancing
    pub fn needs_fade(&self) -> bool {
        !self.is_empty() && !self.style.linger && !self.style.skip_fade
    }
}

/// How a segment hands over to the next one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Advance {
    /// Wait for the reader to press the continue control
    Button,
    /// Advance on its own after a delay
    Timed { delay_ms: Option<u64> },
}

impl Advance {
    pub fn after(delay_ms: u64) -> Self {
        Self::Timed {
            delay_ms: Some(delay_ms),
        }
    }
}

/// One unit of narration or dialogue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    #[serde(default)]
    pub narrator: RoleText,
    #[serde(default)]
    pub person: RoleText,
    pub advance: Advance,
}

impl Segment {
    /// A timed narrator-only segment, as used by the intro
    pub fn narration(text: impl Into<String>, delay_ms: u64) -> Self {
        Self {
            narrator: RoleText::plain(text),
            person: RoleText::default(),
            advance: Advance::after(delay_ms),
        }
    }

    pub fn role(&self, role: Role) -> &RoleText {
        match role {
            Role::Narrator => &self.narrator,
            Role::Person => &self.person,
        }
    }

    pub fn linger(&self, role: Role) -> bool {
        self.role(role).style.linger
    }

    pub fn skip_fade(&self, role: Role) -> bool {
        self.role(role).style.skip_fade
    }

    pub fn is_button(&self) -> bool {
        matches!(self.advance, Advance::Button)
    }
}
