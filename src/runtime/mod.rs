//! Story progression engine
//!
//! `Engine` owns the session state and drives the stage. Everything that
//! happens is a reaction to one of three things: a command from the
//! reader, a timer coming due on the virtual clock, or the stage
//! reporting that a fade finished.

use log::{debug, info, trace, warn};

use crate::config::EngineConfig;
use crate::content::{DialogueStep, Interlude, Story};
use crate::error::{EngineError, Result};
use crate::logging::{ANIMATION, ENGINE, FLOW, TIMER};
use crate::render;
use crate::stage::{Fade, Stage};
use crate::types::{
    Advance, Command, ElementId, EngineState, Outcome, RenderTree, Role, Section, Segment, Slot,
    Track,
};

pub mod questions;
pub mod scheduler;
pub mod scroll;
pub mod transition;

#[cfg(test)]
mod tests;

use scheduler::{PendingTimer, Scheduler, TimerAction};
use transition::{FadeJoin, FadePurpose};

/// A single story session
pub struct Engine<S: Stage> {
    story: Story,
    config: EngineConfig,
    stage: S,
    state: EngineState,
    scheduler: Scheduler,
    /// Generation stamped on element ids, survives restarts
    render_seq: u64,
    /// Tree currently mounted on the stage
    mounted: Option<RenderTree>,
}

impl<S: Stage> Engine<S> {
    /// Create a session and mount the landing page
    pub fn new(story: Story, config: EngineConfig, stage: S) -> Self {
        let mut engine = Self {
            story,
            config,
            stage,
            state: EngineState::new(),
            scheduler: Scheduler::new(),
            render_seq: 0,
            mounted: None,
        };
        engine.mount(render::landing());
        engine
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn story(&self) -> &Story {
        &self.story
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn stage(&self) -> &S {
        &self.stage
    }

    pub fn stage_mut(&mut self) -> &mut S {
        &mut self.stage
    }

    pub fn mounted(&self) -> Option<&RenderTree> {
        self.mounted.as_ref()
    }

    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    /// When the pending timer is due, if there is one
    pub fn next_deadline(&self) -> Option<u64> {
        self.state.active_timer.map(|t| t.due_at_ms)
    }

    /// Dispatch a command from the input controller
    pub fn apply(&mut self, command: Command) -> Result<Outcome> {
        match command {
            Command::Start => self.start(),
            Command::Continue => self.continue_story(),
            Command::Ask(id) => self.ask(id),
            Command::Scroll(progress) => self.scroll_to(progress),
            Command::DebugAdvance => self.debug_advance(),
            Command::DebugRetreat => self.debug_retreat(),
            Command::Restart => self.restart(),
        }
    }

    /// Leave the landing page: flash, clear, and schedule the intro
    pub fn start(&mut self) -> Result<Outcome> {
        if self.state.section != Section::Landing {
            return Ok(Outcome::Ignored);
        }
        info!(target: FLOW, "story started");
        self.state.section = Section::Intro;
        self.state.intro_index = 0;
        self.stage.flash();
        self.clear();
        self.arm(self.config.lead_in_ms, TimerAction::ShowIntro);
        Ok(Outcome::Applied)
    }

    /// Reader pressed the continue control
    pub fn continue_story(&mut self) -> Result<Outcome> {
        if !self.state.awaiting_continue {
            return Ok(Outcome::Ignored);
        }
        let Some(track) = self.track() else {
            return Ok(Outcome::Ignored);
        };
        let index = self.state.index(track);
        let fade_person = match self.story.segment(track, index)? {
            Some(segment) => segment.linger(Role::Person),
            None => false,
        };
        debug!(target: FLOW, "continue pressed at {track} {index}");
        self.advance(track, fade_person)?;
        Ok(Outcome::Applied)
    }

    /// Back to the landing page from the end screen
    pub fn restart(&mut self) -> Result<Outcome> {
        if self.state.section != Section::End {
            return Ok(Outcome::Ignored);
        }
        self.cancel_timer();
        self.detach_scroll();
        self.state = EngineState::new();
        info!(target: FLOW, "story restarted");
        self.mount(render::landing());
        Ok(Outcome::Applied)
    }

    /// Step forward one segment, bypassing timers and fades
    pub fn debug_advance(&mut self) -> Result<Outcome> {
        match self.state.section {
            Section::Landing | Section::End => Ok(Outcome::Ignored),
            Section::Intro => {
                self.interrupt();
                self.state.intro_index += 1;
                debug!(target: FLOW, "debug advance to intro {}", self.state.intro_index);
                self.present(Track::Intro)?;
                Ok(Outcome::Applied)
            }
            Section::Dialogue | Section::QuestionInterlude | Section::ScrollInterlude => {
                self.interrupt();
                let last = self.story.len(Track::Dialogue).saturating_sub(1);
                self.state.dialogue_index = (self.state.dialogue_index + 1).min(last);
                self.state.section = Section::Dialogue;
                debug!(target: FLOW, "debug advance to dialogue {}", self.state.dialogue_index);
                self.present(Track::Dialogue)?;
                Ok(Outcome::Applied)
            }
        }
    }

    /// Step back one segment, bypassing timers and fades
    pub fn debug_retreat(&mut self) -> Result<Outcome> {
        match self.state.section {
            Section::Landing => Ok(Outcome::Ignored),
            Section::Intro => {
                self.interrupt();
                self.state.intro_index = self.state.intro_index.saturating_sub(1);
                debug!(target: FLOW, "debug retreat to intro {}", self.state.intro_index);
                self.present(Track::Intro)?;
                Ok(Outcome::Applied)
            }
            Section::End => {
                self.interrupt();
                self.state.dialogue_index = self.story.len(Track::Dialogue).saturating_sub(1);
                self.state.section = Section::Dialogue;
                debug!(target: FLOW, "debug retreat from end to dialogue {}", self.state.dialogue_index);
                self.present(Track::Dialogue)?;
                Ok(Outcome::Applied)
            }
            Section::Dialogue | Section::QuestionInterlude | Section::ScrollInterlude => {
                self.interrupt();
                self.state.dialogue_index = self.state.dialogue_index.saturating_sub(1);
                self.state.section = Section::Dialogue;
                debug!(target: FLOW, "debug retreat to dialogue {}", self.state.dialogue_index);
                self.present(Track::Dialogue)?;
                Ok(Outcome::Applied)
            }
        }
    }

    /// The stage finished fading `element` out
    pub fn animation_finished(&mut self, element: ElementId) -> Result<Outcome> {
        let Some(join) = self.state.fade.as_mut() else {
            trace!(target: ANIMATION, "fade end for {element:?} with no join pending");
            return Ok(Outcome::Ignored);
        };
        if !join.complete(&element) {
            trace!(target: ANIMATION, "fade end for {element:?} ignored");
            return Ok(Outcome::Ignored);
        }
        let purpose = join.purpose;
        self.state.fade = None;
        debug!(target: ANIMATION, "all fades done ({purpose:?})");
        self.fades_done(purpose)?;
        Ok(Outcome::Applied)
    }

    /// Move the virtual clock forward by `ms`, firing due timers
    pub fn advance_time(&mut self, ms: u64) -> Result<usize> {
        let until = self.scheduler.now_ms().saturating_add(ms);
        self.tick_to(until)
    }

    /// Move the virtual clock to `until_ms`, firing due timers in order.
    /// Returns how many fired.
    pub fn tick_to(&mut self, until_ms: u64) -> Result<usize> {
        let mut fired = 0;
        while let Some(timer) = self.scheduler.take_due(&mut self.state.active_timer, until_ms) {
            fired += 1;
            self.fire(timer)?;
        }
        self.scheduler.settle(until_ms);
        Ok(fired)
    }

    fn fire(&mut self, timer: PendingTimer) -> Result<()> {
        debug!(target: TIMER, "timer {} fired ({:?}) at {}ms", timer.token, timer.action, timer.due_at_ms);
        match timer.action {
            TimerAction::ShowIntro => {
                if self.state.section == Section::Intro {
                    self.present(Track::Intro)?;
                }
            }
            TimerAction::AdvanceSegment => self.begin_exit()?,
            TimerAction::AnswerElapsed => self.answer_elapsed()?,
            TimerAction::FinishQuestions => self.leave_questions()?,
            TimerAction::FinishScroll => {
                if self.state.section == Section::ScrollInterlude {
                    self.resume_from_portal()?;
                }
            }
        }
        Ok(())
    }

    fn fades_done(&mut self, purpose: FadePurpose) -> Result<()> {
        match purpose {
            FadePurpose::NextSegment => match self.track() {
                Some(track) => self.advance(track, false),
                None => Ok(()),
            },
            FadePurpose::LeaveQuestions => self.resume_from_portal(),
        }
    }

    /// Track being played in the current section
    fn track(&self) -> Option<Track> {
        match self.state.section {
            Section::Intro => Some(Track::Intro),
            Section::Dialogue => Some(Track::Dialogue),
            _ => None,
        }
    }

    /// Show whatever sits at the current index of `track`
    fn present(&mut self, track: Track) -> Result<()> {
        let index = self.state.index(track);
        if index >= self.story.len(track) {
            return self.finish_track(track);
        }

        match track {
            Track::Intro => {
                let segment = self.story.intro(index)?.clone();
                self.show_segment(track, index, segment)
            }
            Track::Dialogue => match self.story.dialogue(index)?.clone() {
                DialogueStep::Line(segment) => self.show_segment(track, index, segment),
                DialogueStep::Interlude { kind, resume_at } => {
                    info!(target: FLOW, "dialogue {index} diverts to {kind:?} (resume at {resume_at})");
                    match kind {
                        Interlude::Questions => self.enter_questions(),
                        Interlude::Scroll => self.enter_scroll(),
                    }
                }
            },
        }
    }

    fn show_segment(&mut self, track: Track, index: usize, segment: Segment) -> Result<()> {
        self.state.section = match track {
            Track::Intro => Section::Intro,
            Track::Dialogue => Section::Dialogue,
        };
        let seq = self.next_seq();
        let carried = std::mem::take(&mut self.state.carried);
        let tree = render::segment(seq, self.state.section, &carried, &segment);
        debug!(target: ENGINE, "showing {track} {index}");
        self.mount(tree);

        match segment.advance {
            Advance::Button => {
                self.state.awaiting_continue = true;
            }
            Advance::Timed { delay_ms } => {
                let delay = delay_ms.unwrap_or_else(|| {
                    let default_ms = self.config.default_delay_ms;
                    warn!(target: TIMER, "{}", EngineError::MissingTimerConfig { index, default_ms });
                    default_ms
                });
                self.arm(delay, TimerAction::AdvanceSegment);
            }
        }
        Ok(())
    }

    /// A timed segment's delay elapsed: drop skip-fade roles, fade the
    /// rest, and advance once every fade has reported back
    fn begin_exit(&mut self) -> Result<()> {
        let Some(track) = self.track() else {
            return Ok(());
        };
        let index = self.state.index(track);
        let Some(segment) = self.story.segment(track, index)?.cloned() else {
            return Ok(());
        };

        let mut join = FadeJoin::new(FadePurpose::NextSegment);
        for role in Role::ALL {
            let text = segment.role(role);
            if text.is_empty() {
                continue;
            }
            let element = ElementId::new(self.render_seq, Slot::Text(role));
            if text.style.skip_fade {
                trace!(target: ANIMATION, "removing {element:?} without fade");
                self.stage.remove(&element);
            } else if text.needs_fade() {
                self.fade_out(&mut join, element);
            }
        }

        // the carried history ends with the run of lines, fade it with them
        if !self.continues_run(track, index + 1)? {
            let carried: Vec<ElementId> = self
                .mounted
                .iter()
                .flat_map(|tree| tree.carried_blocks())
                .map(|block| block.id)
                .collect();
            for element in carried {
                self.fade_out(&mut join, element);
            }
        }

        if join.remaining() == 0 {
            self.advance(track, false)
        } else {
            debug!(target: ANIMATION, "waiting on {} fades", join.remaining());
            self.state.fade = Some(join);
            Ok(())
        }
    }

    /// Whether `index` of `track` is another line of the current run
    fn continues_run(&self, track: Track, index: usize) -> Result<bool> {
        if index >= self.story.len(track) {
            return Ok(false);
        }
        Ok(self.story.segment(track, index)?.is_some())
    }

    fn fade_out(&mut self, join: &mut FadeJoin, element: ElementId) {
        match self.stage.fade_out(&element) {
            Fade::Started => join.wait_on(element),
            Fade::Missing => {
                warn!(target: ANIMATION, "{}", EngineError::AnimationTargetMissing { element });
            }
        }
    }

    /// Move to the next index of `track`, carrying lingering blocks
    fn advance(&mut self, track: Track, fade_person: bool) -> Result<()> {
        let index = self.state.index(track);
        let carried = match (&self.mounted, self.story.segment(track, index)?) {
            (Some(tree), Some(segment)) => render::lingering(tree, segment, fade_person),
            _ => Vec::new(),
        };
        self.cancel_timer();
        self.state.fade = None;
        self.state.awaiting_continue = false;
        self.state.carried = carried;
        self.state.set_index(track, index + 1);
        self.present(track)
    }

    fn finish_track(&mut self, track: Track) -> Result<()> {
        self.state.carried.clear();
        match track {
            Track::Intro => {
                info!(target: FLOW, "intro finished");
                self.state.section = Section::Dialogue;
                self.state.dialogue_index = 0;
                self.present(Track::Dialogue)
            }
            Track::Dialogue => {
                info!(target: FLOW, "dialogue finished");
                self.cancel_timer();
                self.state.section = Section::End;
                self.state.awaiting_continue = false;
                let seq = self.next_seq();
                self.mount(render::end_screen(seq));
                Ok(())
            }
        }
    }

    /// Return from an interlude to the dialogue index its portal declares
    fn resume_from_portal(&mut self) -> Result<()> {
        let portal = self.state.dialogue_index;
        let resume_at = match self.story.dialogue(portal)? {
            DialogueStep::Interlude { resume_at, .. } => *resume_at,
            DialogueStep::Line(_) => portal + 1,
        };
        self.detach_scroll();
        self.cancel_timer();
        self.state.section = Section::Dialogue;
        self.state.dialogue_index = resume_at;
        info!(target: FLOW, "resuming dialogue at {resume_at}");
        self.present(Track::Dialogue)
    }

    /// Drop every pending timer and fade before a forced jump
    fn interrupt(&mut self) {
        self.cancel_timer();
        if let Some(join) = self.state.fade.take() {
            debug!(target: ANIMATION, "dropped fade join with {} pending", join.remaining());
        }
        self.detach_scroll();
        self.state.carried.clear();
        self.state.awaiting_continue = false;
        self.clear();
    }

    fn arm(&mut self, delay_ms: u64, action: TimerAction) {
        let displaced = self
            .scheduler
            .arm(&mut self.state.active_timer, delay_ms, action);
        if let Some(old) = displaced {
            debug!(target: TIMER, "timer {} ({:?}) cancelled by new timer", old.token, old.action);
        }
        trace!(target: TIMER, "armed {action:?} in {delay_ms}ms");
    }

    fn cancel_timer(&mut self) {
        if let Some(old) = self.state.active_timer.take() {
            debug!(target: TIMER, "timer {} ({:?}) cancelled", old.token, old.action);
        }
    }

    fn next_seq(&mut self) -> u64 {
        self.render_seq += 1;
        self.render_seq
    }

    fn mount(&mut self, tree: RenderTree) {
        self.stage.render(&tree);
        for block in tree.blocks.iter().filter(|b| b.style.enter) {
            self.stage.fade_in(&block.id);
        }
        self.mounted = Some(tree);
    }

    fn clear(&mut self) {
        self.stage.clear();
        self.mounted = None;
    }
}
