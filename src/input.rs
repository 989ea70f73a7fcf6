//! Input controller
//!
//! Maps raw triggers from the host (key presses, clicks on rendered
//! controls, scroll positions) to engine commands.

use log::trace;
use serde::{Deserialize, Serialize};

use crate::logging::INPUT;
use crate::types::{Command, Control, QuestionId};

/// Something the reader did
#[derive(Debug, Clone, PartialEq)]
pub enum Trigger {
    /// Key press, named as the browser names keys ("d", "ArrowRight", "Enter")
    Key(String),
    /// Click on a rendered control
    Control(Control),
    /// Click on a question prompt
    Choice(QuestionId),
    /// Scroll position, normalized to 0..1
    Scroll(f64),
}

/// Which keys produce which command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub start: Vec<String>,
    pub next: Vec<String>,
    pub debug_advance: Vec<String>,
    pub debug_retreat: Vec<String>,
    pub restart: Vec<String>,
    pub ask_afterlife: Vec<String>,
    pub ask_god: Vec<String>,
}

fn keys(names: &[&str]) -> Vec<String> {
    names.iter().map(|k| k.to_string()).collect()
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            start: keys(&["b", "begin"]),
            next: keys(&["Enter", " "]),
            debug_advance: keys(&["d", "ArrowRight"]),
            debug_retreat: keys(&["a", "ArrowLeft"]),
            restart: keys(&["r"]),
            ask_afterlife: keys(&["1"]),
            ask_god: keys(&["2"]),
        }
    }
}

impl KeyBindings {
    fn command(&self, key: &str) -> Option<Command> {
        let bound = |list: &[String]| list.iter().any(|k| k == key);
        if bound(&self.debug_advance) {
            Some(Command::DebugAdvance)
        } else if bound(&self.debug_retreat) {
            Some(Command::DebugRetreat)
        } else if bound(&self.next) {
            Some(Command::Continue)
        } else if bound(&self.start) {
            Some(Command::Start)
        } else if bound(&self.restart) {
            Some(Command::Restart)
        } else if bound(&self.ask_afterlife) {
            Some(Command::Ask(QuestionId::Afterlife))
        } else if bound(&self.ask_god) {
            Some(Command::Ask(QuestionId::God))
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct InputController {
    bindings: KeyBindings,
}

impl InputController {
    pub fn new(bindings: KeyBindings) -> Self {
        Self { bindings }
    }

    /// Translate a trigger into a command, if it maps to one
    pub fn trigger(&self, trigger: Trigger) -> Option<Command> {
        let command = match &trigger {
            Trigger::Key(key) => self.bindings.command(key),
            Trigger::Control(Control::Begin) => Some(Command::Start),
            Trigger::Control(Control::Continue) => Some(Command::Continue),
            Trigger::Control(Control::Restart) => Some(Command::Restart),
            Trigger::Choice(id) => Some(Command::Ask(*id)),
            Trigger::Scroll(progress) => Some(Command::Scroll(*progress)),
        };
        match &command {
            Some(command) => trace!(target: INPUT, "{trigger:?} -> {command:?}"),
            None => trace!(target: INPUT, "{trigger:?} unbound"),
        }
        command
    }
}
