//! Single-slot timer on a virtual millisecond clock
//!
//! The engine owns at most one pending timer. Arming a new one displaces
//! the old one, which is returned so the caller can log the cancellation.

use serde::{Deserialize, Serialize};

/// What the engine does when a timer fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerAction {
    /// Lead-in after the start flash has elapsed
    ShowIntro,
    /// A timed segment's delay has elapsed
    AdvanceSegment,
    /// A question answer has been shown long enough
    AnswerElapsed,
    /// Both questions asked, fade the panel and resume
    FinishQuestions,
    /// Scroll section finished, resume the dialogue
    FinishScroll,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingTimer {
    pub token: u64,
    pub due_at_ms: u64,
    pub action: TimerAction,
}

/// Virtual clock and token source
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    now_ms: u64,
    next_token: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Arm `slot`, returning the timer it displaced
    pub fn arm(
        &mut self,
        slot: &mut Option<PendingTimer>,
        delay_ms: u64,
        action: TimerAction,
    ) -> Option<PendingTimer> {
        self.next_token += 1;
        slot.replace(PendingTimer {
            token: self.next_token,
            due_at_ms: self.now_ms.saturating_add(delay_ms),
            action,
        })
    }

    /// Take the timer out of `slot` if it is due at or before `until_ms`,
    /// moving the clock to its due time
    pub fn take_due(&mut self, slot: &mut Option<PendingTimer>, until_ms: u64) -> Option<PendingTimer> {
        let due_at_ms = slot.as_ref().map(|t| t.due_at_ms)?;
        if due_at_ms > until_ms {
            return None;
        }
        self.now_ms = self.now_ms.max(due_at_ms);
        slot.take()
    }

    /// Move the clock forward, never backward
    pub fn settle(&mut self, until_ms: u64) {
        self.now_ms = self.now_ms.max(until_ms);
    }
}
