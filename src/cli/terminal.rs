//! Terminal stage
//!
//! Prints each mounted tree as plain text. Fades cannot be animated in a
//! terminal, so started fades are queued and the player reports them as
//! finished once the configured fade time has passed.

use std::collections::BTreeSet;
use std::io::{self, Write};

use crate::stage::{Animator, Fade, RenderSink};
use crate::types::{
    BlockKind, Control, ElementId, QuestionId, RenderTree, ScrollPhase, TextBlock,
};

/// ANSI clear screen and cursor home
const CLEAR: &str = "\x1b[2J\x1b[H";

pub struct TerminalStage<W: Write> {
    out: W,
    displayed: BTreeSet<ElementId>,
    started: Vec<ElementId>,
    listener: bool,
    /// First write failure, surfaced by the player
    failure: Option<io::Error>,
}

impl<W: Write> TerminalStage<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            displayed: BTreeSet::new(),
            started: Vec::new(),
            listener: false,
            failure: None,
        }
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    /// Fades started since the last call
    pub fn take_started(&mut self) -> Vec<ElementId> {
        std::mem::take(&mut self.started)
    }

    /// The simulated fade of `element` is over
    pub fn finish_fade(&mut self, element: &ElementId) {
        self.displayed.remove(element);
    }

    pub fn listener_attached(&self) -> bool {
        self.listener
    }

    pub fn take_failure(&mut self) -> Option<io::Error> {
        self.failure.take()
    }

    fn emit(&mut self, text: &str) {
        if self.failure.is_some() {
            return;
        }
        if let Err(err) = writeln!(self.out, "{text}").and_then(|_| self.out.flush()) {
            self.failure = Some(err);
        }
    }
}

fn block_line(block: &TextBlock) -> String {
    let mut line = match block.kind {
        BlockKind::Narrator | BlockKind::Setup | BlockKind::Answer => format!("  {}", block.text),
        BlockKind::Person => format!("      {}", block.text),
        BlockKind::Title => format!("\n          {}\n", block.text.to_uppercase()),
    };
    if block.style.faded {
        line = format!("\x1b[2m{line}\x1b[0m");
    }
    if let Some(aside) = &block.style.aside {
        line.push_str(&format!("  ({aside})"));
    }
    line
}

fn choice_key(id: QuestionId) -> usize {
    QuestionId::ALL
        .iter()
        .position(|q| *q == id)
        .map_or(0, |i| i + 1)
}

fn control_line(control: Control) -> &'static str {
    match control {
        Control::Begin => "[b] Begin",
        Control::Continue => "[Enter] Continue",
        Control::Restart => "[r] Restart",
    }
}

impl<W: Write> RenderSink for TerminalStage<W> {
    fn render(&mut self, tree: &RenderTree) {
        self.displayed.clear();
        self.displayed.extend(tree.blocks.iter().map(|b| b.id));
        self.displayed.extend(tree.choices.iter().map(|c| c.id));
        self.displayed.extend(tree.scroll.iter().map(|s| s.id));

        let mut lines = vec![CLEAR.to_string()];
        lines.extend(tree.blocks.iter().map(block_line));
        for choice in &tree.choices {
            let key = if choice.enabled {
                choice_key(choice.question).to_string()
            } else {
                "-".to_string()
            };
            lines.push(format!("  [{key}] {}", choice.label));
        }
        for block in &tree.scroll {
            match block.phase {
                ScrollPhase::Hidden => {}
                ScrollPhase::Entering | ScrollPhase::Fading => {
                    lines.push(format!("\x1b[2m  {}\x1b[0m", block.content))
                }
                ScrollPhase::Active => lines.push(format!("  {}", block.content)),
            }
        }
        if !tree.controls.is_empty() {
            lines.push(String::new());
            lines.extend(tree.controls.iter().map(|c| control_line(*c).to_string()));
        }
        self.emit(&lines.join("\n"));
    }

    fn clear(&mut self) {
        self.displayed.clear();
        self.emit(CLEAR);
    }

    fn set_scroll_listener(&mut self, attached: bool) {
        self.listener = attached;
        if attached {
            self.emit("  (scroll with `s <0..1>`)");
        }
    }
}

impl<W: Write> Animator for TerminalStage<W> {
    fn fade_out(&mut self, element: &ElementId) -> Fade {
        if self.displayed.contains(element) {
            self.started.push(*element);
            Fade::Started
        } else {
            Fade::Missing
        }
    }

    fn remove(&mut self, element: &ElementId) {
        self.displayed.remove(element);
    }

    fn flash(&mut self) {
        self.emit("\x1b[7m                                        \x1b[0m");
    }
}
