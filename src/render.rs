//! Renderer: content records to render trees
//!
//! Every function here is pure. `seq` is the render generation stamped on
//! each element id.

use crate::config::QuestionPolicy;
use crate::types::{
    BlockKind, BlockStyle, ChoiceControl, Control, ElementId, QuestionSet, QuestionState,
    RenderTree, Role, ScrollBlock, ScrollSegment, Section, Segment, Slot, TextBlock,
    scroll::phase_at,
};

pub fn landing() -> RenderTree {
    let mut tree = RenderTree::new(Section::Landing);
    tree.controls.push(Control::Begin);
    tree
}

pub fn end_screen(seq: u64) -> RenderTree {
    let mut tree = RenderTree::new(Section::End);
    tree.blocks.push(TextBlock {
        id: ElementId::new(seq, Slot::Panel),
        kind: BlockKind::Title,
        text: "The End".to_string(),
        style: BlockStyle {
            enter: true,
            ..BlockStyle::default()
        },
    });
    tree.controls.push(Control::Restart);
    tree
}

/// Render an intro or dialogue segment on top of any carried blocks
pub fn segment(seq: u64, section: Section, carried: &[TextBlock], segment: &Segment) -> RenderTree {
    let mut tree = RenderTree::new(section);

    for (n, block) in carried.iter().enumerate() {
        tree.blocks.push(TextBlock {
            id: ElementId::new(seq, Slot::Carried(n)),
            style: BlockStyle {
                enter: false,
                ..block.style.clone()
            },
            ..block.clone()
        });
    }

    for role in Role::ALL {
        let text = segment.role(role);
        if text.is_empty() {
            continue;
        }
        tree.blocks.push(TextBlock {
            id: ElementId::new(seq, Slot::Text(role)),
            kind: role.into(),
            text: text.text.clone(),
            style: BlockStyle {
                position: text.style.position,
                faded: text.style.faded,
                aside: text.style.aside.clone(),
                enter: true,
            },
        });
    }

    if segment.is_button() {
        tree.controls.push(Control::Continue);
    }
    tree
}

/// Blocks of `tree` that stay on screen for the next render
///
/// The history already carried by `tree` is kept and the lingering roles of
/// `segment` are appended to it. `fade_person` applies the persistent faded
/// treatment to every person line in the result.
pub fn lingering(tree: &RenderTree, segment: &Segment, fade_person: bool) -> Vec<TextBlock> {
    let current = Role::ALL
        .into_iter()
        .filter(|role| segment.linger(*role) && !segment.skip_fade(*role))
        .filter_map(|role| tree.block(Slot::Text(role)));

    tree.carried_blocks()
        .chain(current)
        .map(|block| {
            let mut block = block.clone();
            if fade_person && block.kind == BlockKind::Person {
                block.style.faded = true;
            }
            block
        })
        .collect()
}

/// Render the question interlude panel
pub fn question_panel(
    seq: u64,
    set: &QuestionSet,
    state: &QuestionState,
    policy: &QuestionPolicy,
) -> RenderTree {
    let mut tree = RenderTree::new(Section::QuestionInterlude);

    let answer = state
        .current_answer
        .filter(|_| state.is_showing_answer)
        .and_then(|id| set.option(id));

    let panel = match answer {
        Some(option) => Some((BlockKind::Answer, option.answer.clone())),
        None if !state.any_asked() || policy.keep_setup_after_first => {
            Some((BlockKind::Setup, set.setup.clone()))
        }
        None => None,
    };

    if let Some((kind, text)) = panel {
        tree.blocks.push(TextBlock {
            id: ElementId::new(seq, Slot::Panel),
            kind,
            text,
            style: BlockStyle {
                enter: true,
                ..BlockStyle::default()
            },
        });
    }

    let locked = policy.lock_while_answering && state.is_showing_answer;
    for option in &set.options {
        tree.choices.push(ChoiceControl {
            id: ElementId::new(seq, Slot::Choice(option.id)),
            question: option.id,
            label: option.prompt.clone(),
            enabled: !state.asked(option.id) && !locked && !state.is_complete(),
        });
    }
    tree
}

/// Render the scroll section at `progress`
pub fn scroll_section(seq: u64, segments: &[ScrollSegment], progress: f64) -> RenderTree {
    let mut tree = RenderTree::new(Section::ScrollInterlude);
    let n = segments.len();
    for (k, segment) in segments.iter().enumerate() {
        tree.scroll.push(ScrollBlock {
            id: ElementId::new(seq, Slot::Scroll(k)),
            segment_id: segment.id.clone(),
            content: segment.content.clone(),
            phase: phase_at(k, n, progress),
        });
    }
    tree
}
