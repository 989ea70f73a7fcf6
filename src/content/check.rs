//! Static validation of story content

use std::collections::HashSet;

use super::{DialogueStep, Interlude, Story};
use crate::types::{Advance, QuestionId, Segment};

/// Result of checking a story
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckReport {
    /// Problems that make the story unplayable
    pub errors: Vec<String>,
    /// Problems the engine recovers from
    pub warnings: Vec<String>,
}

impl CheckReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Perform static validation on a story
///
/// Errors:
/// - question set without exactly one option per question id
/// - interlude resume index past the end of the dialogue, or pointing back
///   at the portal itself
/// - scroll interlude with an empty scroll section
/// - scroll trigger position outside `[0, 1]`
///
/// Warnings:
/// - timed segments without a delay
/// - segments with nothing to show
/// - scroll trigger positions out of order
/// - an interlude declared more than once
pub fn check(story: &Story) -> CheckReport {
    let mut report = CheckReport::default();

    check_questions(story, &mut report);

    for (i, segment) in story.intro.iter().enumerate() {
        check_segment("intro", i, segment, &mut report);
    }

    let mut seen_interludes = HashSet::new();
    for (i, step) in story.dialogue.iter().enumerate() {
        match step {
            DialogueStep::Line(segment) => check_segment("dialogue", i, segment, &mut report),
            DialogueStep::Interlude { kind, resume_at } => {
                if *resume_at > story.dialogue.len() {
                    report.errors.push(format!(
                        "dialogue {i}: resume index {resume_at} is past the end ({})",
                        story.dialogue.len()
                    ));
                }
                if *resume_at == i {
                    report
                        .errors
                        .push(format!("dialogue {i}: interlude resumes at itself"));
                }
                if *kind == Interlude::Scroll && story.scroll.is_empty() {
                    report.errors.push(format!(
                        "dialogue {i}: scroll interlude declared but scroll section is empty"
                    ));
                }
                if !seen_interludes.insert(*kind) {
                    report
                        .warnings
                        .push(format!("dialogue {i}: {kind:?} interlude declared again"));
                }
            }
        }
    }

    let mut previous = f64::NEG_INFINITY;
    for segment in &story.scroll {
        let position = segment.trigger_position;
        if !(0.0..=1.0).contains(&position) {
            report.errors.push(format!(
                "scroll '{}': trigger position {position} is outside [0, 1]",
                segment.id
            ));
        } else if position < previous {
            report.warnings.push(format!(
                "scroll '{}': trigger position {position} is before the previous segment",
                segment.id
            ));
        }
        previous = position;
    }

    report
}

fn check_questions(story: &Story, report: &mut CheckReport) {
    let options = &story.questions.options;
    if options.len() != QuestionId::ALL.len() {
        report.errors.push(format!(
            "question set has {} options, expected {}",
            options.len(),
            QuestionId::ALL.len()
        ));
    }
    for id in QuestionId::ALL {
        let count = options.iter().filter(|o| o.id == id).count();
        if count != 1 {
            report
                .errors
                .push(format!("question '{id}' appears {count} times"));
        }
    }
}

fn check_segment(track: &str, index: usize, segment: &Segment, report: &mut CheckReport) {
    if let Advance::Timed { delay_ms: None } = segment.advance {
        report
            .warnings
            .push(format!("{track} {index}: timed segment has no delay"));
    }
    if segment.narrator.is_empty() && segment.person.is_empty() {
        report
            .warnings
            .push(format!("{track} {index}: segment has no text"));
    }
}
