//! Question interlude
//!
//! Two prompts, each askable once. Asking shows the answer for its
//! display time, then the setup screen returns. Once both have been asked
//! and the last answer has been read, the panel fades and the dialogue
//! resumes.

use log::{debug, info};

use super::Engine;
use super::scheduler::TimerAction;
use super::transition::{FadeJoin, FadePurpose};
use crate::error::Result;
use crate::logging::FLOW;
use crate::render;
use crate::stage::Stage;
use crate::types::{Outcome, QuestionId, Section};

impl<S: Stage> Engine<S> {
    /// Reader clicked the prompt for `id`
    pub fn ask(&mut self, id: QuestionId) -> Result<Outcome> {
        if self.state.section != Section::QuestionInterlude {
            return Ok(Outcome::Ignored);
        }
        let question = &self.state.question;
        if question.asked(id) || question.is_complete() {
            debug!(target: FLOW, "question '{id}' already asked");
            return Ok(Outcome::Ignored);
        }
        if self.config.questions.lock_while_answering && question.is_showing_answer {
            debug!(target: FLOW, "question '{id}' locked while an answer is showing");
            return Ok(Outcome::Ignored);
        }
        let Some(display_ms) = self
            .story
            .questions()
            .option(id)
            .map(|o| o.answer_display_ms)
        else {
            return Ok(Outcome::Ignored);
        };

        info!(target: FLOW, "asked '{id}'");
        self.state.question.mark_asked(id);
        self.state.question.current_answer = Some(id);
        self.state.question.is_showing_answer = true;
        self.render_questions();
        self.arm(display_ms, TimerAction::AnswerElapsed);
        Ok(Outcome::Applied)
    }

    pub(super) fn enter_questions(&mut self) -> Result<()> {
        self.cancel_timer();
        self.state.section = Section::QuestionInterlude;
        self.state.awaiting_continue = false;
        self.state.carried.clear();
        self.state.question.is_showing_answer = false;
        self.state.question.current_answer = None;
        self.render_questions();
        if self.state.question.is_complete() {
            self.arm(
                self.config.question_resume_delay_ms,
                TimerAction::FinishQuestions,
            );
        }
        Ok(())
    }

    pub(super) fn answer_elapsed(&mut self) -> Result<()> {
        if self.state.section != Section::QuestionInterlude {
            return Ok(());
        }
        self.state.question.is_showing_answer = false;
        self.state.question.current_answer = None;
        self.render_questions();
        if self.state.question.is_complete() {
            info!(target: FLOW, "both questions asked");
            self.arm(
                self.config.question_resume_delay_ms,
                TimerAction::FinishQuestions,
            );
        }
        Ok(())
    }

    /// Fade the whole panel, then resume
    pub(super) fn leave_questions(&mut self) -> Result<()> {
        if self.state.section != Section::QuestionInterlude {
            return Ok(());
        }
        let elements: Vec<_> = self
            .mounted
            .iter()
            .flat_map(|tree| {
                tree.blocks
                    .iter()
                    .map(|b| b.id)
                    .chain(tree.choices.iter().map(|c| c.id))
            })
            .collect();

        let mut join = FadeJoin::new(FadePurpose::LeaveQuestions);
        for element in elements {
            self.fade_out(&mut join, element);
        }
        if join.remaining() == 0 {
            self.resume_from_portal()
        } else {
            self.state.fade = Some(join);
            Ok(())
        }
    }

    fn render_questions(&mut self) {
        let seq = self.next_seq();
        let tree = render::question_panel(
            seq,
            self.story.questions(),
            &self.state.question,
            &self.config.questions,
        );
        self.mount(tree);
    }
}
