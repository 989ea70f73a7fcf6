//! Scroll interlude
//!
//! Scroll progress selects which block is visible. Reaching the end of
//! the last block's band detaches the listener and schedules the return
//! to the dialogue.

use log::{debug, info, trace};

use super::Engine;
use super::scheduler::TimerAction;
use crate::error::Result;
use crate::logging::FLOW;
use crate::render;
use crate::stage::Stage;
use crate::types::scroll::{Band, band_index};
use crate::types::{Outcome, ScrollState, Section};

impl<S: Stage> Engine<S> {
    /// Scroll position changed to `progress` (0..1 of the scrollable height)
    pub fn scroll_to(&mut self, progress: f64) -> Result<Outcome> {
        if self.state.section != Section::ScrollInterlude || !self.state.scroll.listening {
            trace!(target: FLOW, "scroll event ignored");
            return Ok(Outcome::Ignored);
        }
        if progress.is_nan() {
            return Ok(Outcome::Ignored);
        }
        let progress = progress.clamp(0.0, 1.0);
        let n = self.story.scroll.len();

        let index = band_index(n, progress);
        if index != self.state.scroll.current_segment_index {
            if let Some(segment) = self.story.scroll(index) {
                debug!(target: FLOW, "scroll block '{}' now active", segment.id);
            }
        }
        self.state.scroll.progress = progress;
        self.state.scroll.current_segment_index = index;
        self.render_scroll();

        let exit = Band::of(n.saturating_sub(1), n).end;
        if progress >= exit {
            info!(target: FLOW, "scroll section finished");
            self.detach_scroll();
            self.arm(self.config.scroll_resume_delay_ms, TimerAction::FinishScroll);
        }
        Ok(Outcome::Applied)
    }

    pub(super) fn enter_scroll(&mut self) -> Result<()> {
        self.cancel_timer();
        self.state.section = Section::ScrollInterlude;
        self.state.awaiting_continue = false;
        self.state.carried.clear();
        self.state.scroll = ScrollState {
            has_initialized: true,
            listening: self.state.scroll.listening,
            ..ScrollState::default()
        };
        self.attach_scroll();
        self.render_scroll();
        Ok(())
    }

    pub(super) fn attach_scroll(&mut self) {
        if !self.state.scroll.listening {
            debug!(target: FLOW, "scroll listener attached");
            self.state.scroll.listening = true;
            self.stage.set_scroll_listener(true);
        }
    }

    pub(super) fn detach_scroll(&mut self) {
        if self.state.scroll.listening {
            debug!(target: FLOW, "scroll listener detached");
            self.state.scroll.listening = false;
            self.stage.set_scroll_listener(false);
        }
    }

    fn render_scroll(&mut self) {
        let seq = self.next_seq();
        let tree = render::scroll_section(seq, &self.story.scroll, self.state.scroll.progress);
        self.mount(tree);
    }
}
