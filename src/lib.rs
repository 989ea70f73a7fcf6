//! # hereafter
//!
//! An interactive story engine. A story is an intro, a dialogue plan of
//! timed and button-advanced segments, a two-question interlude, and a
//! scroll-driven section. The engine is a single-threaded state machine
//! driven by reader commands, a virtual clock, and fade completions
//! reported by the host's stage.
//!
//! ## Quick Start
//!
//! ```rust
//! use hereafter::{Command, Engine, EngineConfig, RecordingStage, Section, Story};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = EngineConfig::default().with_lead_in(0);
//! let mut engine = Engine::new(Story::default(), config, RecordingStage::new());
//!
//! engine.apply(Command::Start)?;
//! engine.advance_time(0)?;
//! assert_eq!(engine.state().section, Section::Intro);
//!
//! // Report finished fades back to the engine as time passes
//! while engine.state().section == Section::Intro {
//!     engine.advance_time(1000)?;
//!     for element in engine.stage().fading() {
//!         engine.stage_mut().finish_fade(&element);
//!         engine.animation_finished(element)?;
//!     }
//! }
//! assert_eq!(engine.state().section, Section::Dialogue);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod content;
pub mod error;
pub mod input;
pub mod logging;
pub mod render;
pub mod runtime;
pub mod stage;
pub mod types;

pub use config::{EngineConfig, QuestionPolicy};
pub use content::{DialogueStep, Interlude, Story};
pub use error::{ContentError, EngineError};
pub use input::{InputController, KeyBindings, Trigger};
pub use runtime::Engine;
pub use stage::{Animator, Fade, RecordingStage, RenderSink, Stage};
pub use types::{
    Command, ElementId, EngineState, Outcome, QuestionId, RenderTree, Section, Segment, Slot,
};
