//! Render tree handed to the display region
//!
//! The engine never touches a presentation framework. It produces a
//! `RenderTree` and the host's `RenderSink` mounts it, replacing whatever
//! was shown before.

use serde::{Deserialize, Serialize};

use super::question::QuestionId;
use super::scroll::ScrollPhase;
use super::segment::{Position, Role};
use super::state::Section;

/// Where inside a render an element lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    Text(Role),
    /// Nth block of the lingering history shown above the segment
    Carried(usize),
    Panel,
    Choice(QuestionId),
    Scroll(usize),
}

/// Stable identity of a displayed element
///
/// `render` is bumped every time the engine mounts a new tree, so
/// completion events for elements of an older tree can be told apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ElementId {
    pub render: u64,
    pub slot: Slot,
}

impl ElementId {
    pub fn new(render: u64, slot: Slot) -> Self {
        Self { render, slot }
    }
}

/// What a text block represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    Narrator,
    Person,
    Title,
    Setup,
    Answer,
}

impl From<Role> for BlockKind {
    fn from(role: Role) -> Self {
        match role {
            Role::Narrator => BlockKind::Narrator,
            Role::Person => BlockKind::Person,
        }
    }
}

/// Presentation descriptor for a text block
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockStyle {
    pub position: Option<Position>,
    pub faded: bool,
    pub aside: Option<String>,
    /// Block should fade in when mounted
    pub enter: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextBlock {
    pub id: ElementId,
    pub kind: BlockKind,
    pub text: String,
    pub style: BlockStyle,
}

/// A question prompt, clickable unless already asked
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceControl {
    pub id: ElementId,
    pub question: QuestionId,
    pub label: String,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrollBlock {
    pub id: ElementId,
    pub segment_id: String,
    pub content: String,
    pub phase: ScrollPhase,
}

/// Buttons the reader can press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Control {
    Begin,
    Continue,
    Restart,
}

/// Everything the display region shows at one moment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderTree {
    pub section: Section,
    pub blocks: Vec<TextBlock>,
    pub choices: Vec<ChoiceControl>,
    pub scroll: Vec<ScrollBlock>,
    pub controls: Vec<Control>,
}

impl RenderTree {
    pub fn new(section: Section) -> Self {
        Self {
            section,
            blocks: Vec::new(),
            choices: Vec::new(),
            scroll: Vec::new(),
            controls: Vec::new(),
        }
    }

    pub fn block(&self, slot: Slot) -> Option<&TextBlock> {
        self.blocks.iter().find(|b| b.id.slot == slot)
    }

    /// Blocks carried over from earlier renders, oldest first
    pub fn carried_blocks(&self) -> impl Iterator<Item = &TextBlock> {
        self.blocks
            .iter()
            .filter(|b| matches!(b.id.slot, Slot::Carried(_)))
    }

    pub fn has_control(&self, control: Control) -> bool {
        self.controls.contains(&control)
    }

    /// Choices the reader can still click
    pub fn clickable_choices(&self) -> impl Iterator<Item = &ChoiceControl> {
        self.choices.iter().filter(|c| c.enabled)
    }
}
