//! Presentation seams consumed by the engine
//!
//! A host implements `RenderSink` and `Animator` for its display surface.
//! Fade completions are reported back through `Engine::animation_finished`.

use crate::types::{ElementId, RenderTree};

pub mod recording;

pub use recording::{RecordingStage, StageCall};

/// The single display region
pub trait RenderSink {
    /// Mount a tree, replacing what is currently shown
    fn render(&mut self, tree: &RenderTree);

    /// Remove everything from the display region
    fn clear(&mut self);

    /// Attach or detach the scroll listener
    fn set_scroll_listener(&mut self, attached: bool);
}

/// Result of asking the animator to fade an element out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fade {
    /// Animation running, completion will be reported later
    Started,
    /// Element is not displayed, nothing to wait for
    Missing,
}

/// Visual transitions on displayed elements
pub trait Animator {
    fn fade_out(&mut self, element: &ElementId) -> Fade;

    /// Remove an element immediately, without animation
    fn remove(&mut self, element: &ElementId);

    fn fade_in(&mut self, _element: &ElementId) {}

    /// Full-screen entry flash
    fn flash(&mut self) {}
}

/// A display surface with transitions
pub trait Stage: RenderSink + Animator {}

impl<T: RenderSink + Animator> Stage for T {}
