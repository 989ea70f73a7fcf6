//! The story shipped with the binary

use super::{DialogueStep, Interlude, Story};
use crate::types::{
    Advance, Position, QuestionId, QuestionOption, QuestionSet, RoleText, ScrollSegment, Segment,
    StyleTags,
};

fn person(text: &str, style: StyleTags) -> DialogueStep {
    DialogueStep::Line(Segment {
        narrator: RoleText::default(),
        person: RoleText::new(text, style),
        advance: Advance::Button,
    })
}

fn narrator(text: &str, style: StyleTags, delay_ms: u64) -> DialogueStep {
    DialogueStep::Line(Segment {
        narrator: RoleText::new(text, style),
        person: RoleText::default(),
        advance: Advance::after(delay_ms),
    })
}

/// Build the built-in story
pub fn story() -> Story {
    let intro = vec![
        Segment::narration("You were on your way home when you died.", 4000),
        Segment::narration(
            "It was a car accident. Nothing particularly remarkable, but fatal nonetheless.",
            4000,
        ),
        Segment::narration("And then there was nothing at all.", 3000),
    ];

    let dialogue = vec![
        person(
            "\u{201c}What\u{2026} what happened? Where am I?\u{201d}",
            StyleTags::at(Position::Mid).lingering().with_aside("You asked."),
        ),
        narrator(
            "\u{201c}You died,\u{201d}",
            StyleTags::at(Position::Top).with_aside("I said, matter-of-factly."),
            8000,
        ),
        person(
            "\u{201c}There was a\u{2026} a truck and it was skidding\u{2026}\u{201d}",
            StyleTags::at(Position::Mid).lingering(),
        ),
        narrator(
            "\u{201c}Yup,\u{201d}",
            StyleTags::at(Position::Mid).with_aside("I said."),
            3000,
        ),
        person("\u{201c}I\u{2026} I died?\u{201d}", StyleTags::at(Position::Mid)),
        narrator(
            "\u{201c}You did. Don't feel bad about it. Everybody does.\u{201d}",
            StyleTags::at(Position::Top),
            5000,
        ),
        DialogueStep::Interlude {
            kind: Interlude::Questions,
            resume_at: 7,
        },
        narrator(
            "\u{201c}Those are the two everybody asks.\u{201d}",
            StyleTags::at(Position::Top).skipping_fade(),
            4000,
        ),
        person(
            "\u{201c}So what happens now?\u{201d}",
            StyleTags::at(Position::Mid),
        ),
        narrator(
            "\u{201c}Now you remember.\u{201d}",
            StyleTags::at(Position::Mid),
            4000,
        ),
        DialogueStep::Interlude {
            kind: Interlude::Scroll,
            resume_at: 11,
        },
        person(
            "\u{201c}I think I understand.\u{201d}",
            StyleTags::at(Position::Mid),
        ),
        narrator(
            "\u{201c}Good. Then it's time to go.\u{201d}",
            StyleTags::at(Position::Bottom),
            5000,
        ),
    ];

    let questions = QuestionSet {
        setup: "You have time for two questions.".to_string(),
        options: vec![
            QuestionOption {
                id: QuestionId::Afterlife,
                prompt: "\u{201c}Is this the afterlife?\u{201d}".to_string(),
                answer: "\u{201c}More or less. Think of it as a waiting room.\u{201d}".to_string(),
                answer_display_ms: 5000,
            },
            QuestionOption {
                id: QuestionId::God,
                prompt: "\u{201c}Are you God?\u{201d}".to_string(),
                answer: "\u{201c}Yes. I'm God.\u{201d}".to_string(),
                answer_display_ms: 5000,
            },
        ],
    };

    let scroll = [
        "A kitchen that smells of burnt toast.",
        "A hand you held on the first day of school.",
        "A room full of people who knew your name.",
        "A road, wet with rain, and headlights.",
    ]
    .iter()
    .enumerate()
    .map(|(k, content)| ScrollSegment {
        id: format!("memory-{}", k + 1),
        content: content.to_string(),
        trigger_position: (k as f64 + 0.5) / 4.0,
    })
    .collect();

    Story {
        intro,
        dialogue,
        questions,
        scroll,
    }
}
