//! In-memory stage that records every call
//!
//! Used by tests and by headless hosts. It tracks which elements are on
//! screen so fades of elements that are not displayed report `Missing`.

use std::collections::BTreeSet;

use super::{Animator, Fade, RenderSink};
use crate::types::{ElementId, RenderTree};

/// A call the engine made on the stage
#[derive(Debug, Clone, PartialEq)]
pub enum StageCall {
    Render(RenderTree),
    Clear,
    ScrollListener(bool),
    FadeIn(ElementId),
    FadeOut(ElementId),
    Remove(ElementId),
    Flash,
}

#[derive(Debug, Default)]
pub struct RecordingStage {
    calls: Vec<StageCall>,
    displayed: BTreeSet<ElementId>,
    fading: BTreeSet<ElementId>,
    listener: bool,
}

impl RecordingStage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[StageCall] {
        &self.calls
    }

    /// Forget recorded calls, keep the display state
    pub fn take_calls(&mut self) -> Vec<StageCall> {
        std::mem::take(&mut self.calls)
    }

    /// Most recently mounted tree
    pub fn current(&self) -> Option<&RenderTree> {
        self.calls.iter().rev().find_map(|call| match call {
            StageCall::Render(tree) => Some(tree),
            _ => None,
        })
    }

    pub fn renders(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, StageCall::Render(_)))
            .count()
    }

    pub fn is_displayed(&self, element: &ElementId) -> bool {
        self.displayed.contains(element)
    }

    /// Fades started and not yet finished
    pub fn fading(&self) -> Vec<ElementId> {
        self.fading.iter().copied().collect()
    }

    /// Mark a fade as finished and return the element, as the
    /// presentation layer would on its animation-end event
    pub fn finish_fade(&mut self, element: &ElementId) -> Option<ElementId> {
        if self.fading.remove(element) {
            self.displayed.remove(element);
            Some(*element)
        } else {
            None
        }
    }

    pub fn listener_attached(&self) -> bool {
        self.listener
    }
}

impl RenderSink for RecordingStage {
    fn render(&mut self, tree: &RenderTree) {
        self.displayed.clear();
        self.fading.clear();
        self.displayed.extend(tree.blocks.iter().map(|b| b.id));
        self.displayed.extend(tree.choices.iter().map(|c| c.id));
        self.displayed.extend(tree.scroll.iter().map(|s| s.id));
        self.calls.push(StageCall::Render(tree.clone()));
    }

    fn clear(&mut self) {
        self.displayed.clear();
        self.fading.clear();
        self.calls.push(StageCall::Clear);
    }

    fn set_scroll_listener(&mut self, attached: bool) {
        self.listener = attached;
        self.calls.push(StageCall::ScrollListener(attached));
    }
}

impl Animator for RecordingStage {
    fn fade_out(&mut self, element: &ElementId) -> Fade {
        self.calls.push(StageCall::FadeOut(*element));
        if self.displayed.contains(element) {
            self.fading.insert(*element);
            Fade::Started
        } else {
            Fade::Missing
        }
    }

    fn remove(&mut self, element: &ElementId) {
        self.displayed.remove(element);
        self.calls.push(StageCall::Remove(*element));
    }

    fn fade_in(&mut self, element: &ElementId) {
        self.calls.push(StageCall::FadeIn(*element));
    }

    fn flash(&mut self) {
        self.calls.push(StageCall::Flash);
    }
}
