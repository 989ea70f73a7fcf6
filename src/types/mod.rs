//! Core types for the hereafter library
//!
//! - Segment / Question / Scroll: story content records
//! - State: the engine's single mutable state
//! - Render: the tree the display region mounts
//! - Event: commands sent to the engine

pub mod event;
pub mod question;
pub mod render;
pub mod scroll;
pub mod segment;
pub mod state;

pub use event::{Command, Outcome};
pub use question::{QuestionId, QuestionOption, QuestionSet};
pub use render::{
    BlockKind, BlockStyle, ChoiceControl, Control, ElementId, RenderTree, ScrollBlock, Slot,
    TextBlock,
};
pub use scroll::{ScrollPhase, ScrollSegment};
pub use segment::{Advance, Position, Role, RoleText, Segment, StyleTags};
pub use state::{EngineState, QuestionState, ScrollState, Section, Track};
