//! Tests for the progression engine

use super::*;
use crate::content::{DialogueStep, Interlude, Story};
use crate::stage::{Animator, RecordingStage, StageCall};
use crate::types::{
    Advance, Control, QuestionId, QuestionOption, QuestionSet, RoleText, ScrollSegment,
    StyleTags,
};

const LEAD_IN: u64 = 3000;

fn line(narrator: RoleText, person: RoleText, advance: Advance) -> DialogueStep {
    DialogueStep::Line(Segment {
        narrator,
        person,
        advance,
    })
}

fn story() -> Story {
    Story {
        intro: vec![
            Segment::narration("I1", 1000),
            Segment::narration("I2", 1000),
        ],
        dialogue: vec![
            // 0
            line(
                RoleText::default(),
                RoleText::new("P0", StyleTags::default().lingering()),
                Advance::Button,
            ),
            // 1
            line(RoleText::plain("N1"), RoleText::default(), Advance::after(2000)),
            // 2
            line(RoleText::plain("N2"), RoleText::plain("P2"), Advance::after(1000)),
            // 3
            line(
                RoleText::default(),
                RoleText::new("P3", StyleTags::default().lingering()),
                Advance::after(1000),
            ),
            // 4
            line(
                RoleText::new("N4", StyleTags::default().skipping_fade()),
                RoleText::default(),
                Advance::after(1000),
            ),
            // 5
            line(
                RoleText::plain("N5"),
                RoleText::default(),
                Advance::Timed { delay_ms: None },
            ),
            // 6
            DialogueStep::Interlude {
                kind: Interlude::Questions,
                resume_at: 7,
            },
            // 7
            line(RoleText::default(), RoleText::plain("P7"), Advance::Button),
            // 8
            DialogueStep::Interlude {
                kind: Interlude::Scroll,
                resume_at: 9,
            },
            // 9
            line(RoleText::plain("N9"), RoleText::default(), Advance::after(500)),
        ],
        questions: QuestionSet {
            setup: "Ask.".to_string(),
            options: vec![
                QuestionOption {
                    id: QuestionId::Afterlife,
                    prompt: "A?".to_string(),
                    answer: "a".to_string(),
                    answer_display_ms: 1000,
                },
                QuestionOption {
                    id: QuestionId::God,
                    prompt: "G?".to_string(),
                    answer: "g".to_string(),
                    answer_display_ms: 1000,
                },
            ],
        },
        scroll: (0..4)
            .map(|k| ScrollSegment {
                id: format!("s{k}"),
                content: format!("scroll {k}"),
                trigger_position: (k as f64 + 0.5) / 4.0,
            })
            .collect(),
    }
}

fn engine() -> Engine<RecordingStage> {
    Engine::new(story(), EngineConfig::default(), RecordingStage::new())
}

/// Start a session and jump straight to dialogue `index`
fn reach(index: usize) -> Engine<RecordingStage> {
    let mut engine = engine();
    engine.start().unwrap();
    engine.advance_time(LEAD_IN).unwrap();
    while engine.state().section == Section::Intro {
        engine.debug_advance().unwrap();
    }
    while engine.state().dialogue_index < index {
        engine.debug_advance().unwrap();
    }
    engine.stage_mut().take_calls();
    engine
}

/// Report every running fade as finished
fn finish_fades(engine: &mut Engine<RecordingStage>) -> usize {
    let fading = engine.stage().fading();
    for element in &fading {
        engine.stage_mut().finish_fade(element);
        engine.animation_finished(*element).unwrap();
    }
    fading.len()
}

fn fade_outs(calls: &[StageCall]) -> usize {
    calls
        .iter()
        .filter(|c| matches!(c, StageCall::FadeOut(_)))
        .count()
}

#[test]
fn new_engine_mounts_landing() {
    let engine = engine();
    assert_eq!(engine.state(), &EngineState::new());
    assert!(engine.mounted().unwrap().has_control(Control::Begin));
}

#[test]
fn start_flashes_and_waits_for_lead_in() {
    let mut engine = engine();
    assert_eq!(engine.start().unwrap(), Outcome::Applied);
    assert_eq!(engine.state().section, Section::Intro);

    let calls = engine.stage().calls();
    assert!(calls.contains(&StageCall::Flash));
    assert!(calls.contains(&StageCall::Clear));
    assert!(engine.mounted().is_none());

    assert_eq!(engine.advance_time(LEAD_IN - 1).unwrap(), 0);
    assert!(engine.mounted().is_none());

    assert_eq!(engine.advance_time(1).unwrap(), 1);
    let tree = engine.mounted().unwrap();
    assert_eq!(tree.block(Slot::Text(Role::Narrator)).unwrap().text, "I1");
}

#[test]
fn start_only_from_landing() {
    let mut engine = engine();
    engine.start().unwrap();
    assert_eq!(engine.start().unwrap(), Outcome::Ignored);
}

#[test]
fn intro_plays_through_into_dialogue() {
    let mut engine = engine();
    engine.start().unwrap();
    engine.advance_time(LEAD_IN).unwrap();

    for expected in 1..=2 {
        engine.advance_time(1000).unwrap();
        assert_eq!(finish_fades(&mut engine), 1);
        if expected < 2 {
            assert_eq!(engine.state().intro_index, expected);
        }
    }

    assert_eq!(engine.state().section, Section::Dialogue);
    assert_eq!(engine.state().dialogue_index, 0);
    assert!(engine.state().awaiting_continue);
}

#[test]
fn timed_segment_waits_for_every_fade() {
    let mut engine = reach(2);

    engine.advance_time(1000).unwrap();
    let fading = engine.stage().fading();
    assert_eq!(fading.len(), 2);
    assert_eq!(engine.state().dialogue_index, 2);

    engine.stage_mut().finish_fade(&fading[1]);
    assert_eq!(engine.animation_finished(fading[1]).unwrap(), Outcome::Ignored);
    assert_eq!(engine.state().dialogue_index, 2);

    // redundant completion event for the same element
    assert_eq!(engine.animation_finished(fading[1]).unwrap(), Outcome::Ignored);
    assert_eq!(engine.state().dialogue_index, 2);

    engine.stage_mut().finish_fade(&fading[0]);
    assert_eq!(engine.animation_finished(fading[0]).unwrap(), Outcome::Applied);
    assert_eq!(engine.state().dialogue_index, 3);

    assert_eq!(engine.animation_finished(fading[0]).unwrap(), Outcome::Ignored);
    assert_eq!(engine.state().dialogue_index, 3);
}

#[test]
fn button_segment_never_advances_on_its_own() {
    let mut engine = reach(0);
    engine.advance_time(1_000_000).unwrap();
    assert_eq!(engine.state().dialogue_index, 0);
    assert!(engine.state().awaiting_continue);
    assert!(engine.state().active_timer.is_none());

    assert_eq!(engine.continue_story().unwrap(), Outcome::Applied);
    assert_eq!(engine.state().dialogue_index, 1);
    assert!(!engine.state().awaiting_continue);
}

#[test]
fn continue_fades_lingering_person_into_next_render() {
    let mut engine = reach(0);
    engine.continue_story().unwrap();

    let tree = engine.mounted().unwrap();
    let carried = tree.block(Slot::Carried(0)).unwrap();
    assert_eq!(carried.text, "P0");
    assert!(carried.style.faded);
    assert_eq!(tree.block(Slot::Text(Role::Narrator)).unwrap().text, "N1");
}

#[test]
fn continue_ignored_for_timed_segment() {
    let mut engine = reach(1);
    assert_eq!(engine.continue_story().unwrap(), Outcome::Ignored);
    assert_eq!(engine.state().dialogue_index, 1);
}

#[test]
fn lingering_person_and_empty_narrator_advance_synchronously() {
    let mut engine = reach(3);
    engine.advance_time(1000).unwrap();

    assert_eq!(engine.state().dialogue_index, 4);
    assert!(engine.state().fade.is_none());
    assert_eq!(fade_outs(engine.stage().calls()), 0);

    let carried = engine
        .mounted()
        .unwrap()
        .block(Slot::Carried(0))
        .unwrap();
    assert_eq!(carried.text, "P3");
    assert!(!carried.style.faded);
}

#[test]
fn lingering_person_stays_through_later_lines() {
    let mut engine = reach(0);
    engine.continue_story().unwrap();
    engine.advance_time(2000).unwrap();
    assert_eq!(finish_fades(&mut engine), 1);
    assert_eq!(engine.state().dialogue_index, 2);

    let tree = engine.mounted().unwrap();
    let carried = tree.block(Slot::Carried(0)).unwrap();
    assert_eq!(carried.text, "P0");
    assert!(carried.style.faded);
    assert!(engine.stage().is_displayed(&carried.id));
    assert_eq!(tree.block(Slot::Text(Role::Person)).unwrap().text, "P2");
}

#[test]
fn carried_history_fades_when_the_run_of_lines_ends() {
    let mut engine = reach(0);
    engine.continue_story().unwrap();
    engine.advance_time(2000).unwrap();
    finish_fades(&mut engine);
    engine.advance_time(1000).unwrap();
    assert_eq!(finish_fades(&mut engine), 2);
    // 3 advances without fades, 4 is removed outright
    engine.advance_time(2000).unwrap();
    assert_eq!(engine.state().dialogue_index, 5);

    let tree = engine.mounted().unwrap().clone();
    let texts: Vec<_> = tree.carried_blocks().map(|b| b.text.as_str()).collect();
    assert_eq!(texts, ["P0", "P3"]);

    engine.stage_mut().take_calls();
    engine
        .advance_time(EngineConfig::default().default_delay_ms)
        .unwrap();
    let fading = engine.stage().fading();
    assert_eq!(fading.len(), 3);
    for block in tree.carried_blocks() {
        assert!(fading.contains(&block.id));
    }

    assert_eq!(finish_fades(&mut engine), 3);
    assert_eq!(engine.state().section, Section::QuestionInterlude);
    assert!(engine.state().carried.is_empty());
}

#[test]
fn skip_fade_removes_instantly() {
    let mut engine = reach(4);
    let seq = engine.mounted().unwrap().blocks[0].id.render;
    engine.advance_time(1000).unwrap();

    let removed = ElementId::new(seq, Slot::Text(Role::Narrator));
    assert!(engine.stage().calls().contains(&StageCall::Remove(removed)));
    assert_eq!(fade_outs(engine.stage().calls()), 0);
    assert_eq!(engine.state().dialogue_index, 5);
}

#[test]
fn missing_delay_falls_back_to_default() {
    let mut engine = reach(5);
    engine.advance_time(EngineConfig::default().default_delay_ms - 1).unwrap();
    assert_eq!(engine.stage().fading().len(), 0);

    engine.advance_time(1).unwrap();
    assert_eq!(engine.stage().fading().len(), 1);
}

#[test]
fn missing_fade_target_counts_as_complete() {
    let mut engine = reach(2);
    let seq = engine.mounted().unwrap().blocks[0].id.render;
    let narrator = ElementId::new(seq, Slot::Text(Role::Narrator));
    engine.stage_mut().remove(&narrator);

    engine.advance_time(1000).unwrap();
    assert_eq!(engine.state().fade.as_ref().unwrap().remaining(), 1);

    assert_eq!(finish_fades(&mut engine), 1);
    assert_eq!(engine.state().dialogue_index, 3);
}

#[test]
fn debug_jump_drops_stale_timer() {
    let mut engine = reach(1);
    let stale = engine.state().active_timer.unwrap();

    engine.debug_advance().unwrap();
    let live = engine.state().active_timer.unwrap();
    assert_ne!(live.token, stale.token);
    assert_eq!(live.due_at_ms, engine.now_ms() + 1000);

    // the stale 2000ms timer never fires against segment 2
    engine.advance_time(1000).unwrap();
    assert_eq!(engine.stage().fading().len(), 2);
    assert_eq!(engine.state().dialogue_index, 2);
}

#[test]
fn debug_jump_drops_pending_fades() {
    let mut engine = reach(2);
    engine.advance_time(1000).unwrap();
    let fading = engine.stage().fading();
    assert!(engine.state().fade.is_some());

    engine.debug_advance().unwrap();
    assert!(engine.state().fade.is_none());
    assert_eq!(engine.state().dialogue_index, 3);

    for element in fading {
        assert_eq!(engine.animation_finished(element).unwrap(), Outcome::Ignored);
    }
    assert_eq!(engine.state().dialogue_index, 3);
}

#[test]
fn debug_retreat_clamps_at_zero() {
    let mut engine = reach(0);
    engine.debug_retreat().unwrap();
    assert_eq!(engine.state().dialogue_index, 0);
    assert_eq!(engine.state().section, Section::Dialogue);
    assert!(engine.state().awaiting_continue);
}

#[test]
fn debug_advance_clamps_at_last_index() {
    let mut engine = reach(9);
    engine.debug_advance().unwrap();
    assert_eq!(engine.state().dialogue_index, 9);
    assert_eq!(engine.state().section, Section::Dialogue);
}

#[test]
fn debug_commands_ignored_on_landing() {
    let mut engine = engine();
    assert_eq!(engine.debug_advance().unwrap(), Outcome::Ignored);
    assert_eq!(engine.debug_retreat().unwrap(), Outcome::Ignored);
}

#[test]
fn portal_diverts_on_forward_progress() {
    let mut engine = reach(5);
    engine.advance_time(3000).unwrap();
    finish_fades(&mut engine);

    assert_eq!(engine.state().section, Section::QuestionInterlude);
    assert_eq!(engine.state().dialogue_index, 6);
}

#[test]
fn portal_diverts_on_debug_jumps() {
    let mut engine = reach(5);
    engine.debug_advance().unwrap();
    assert_eq!(engine.state().section, Section::QuestionInterlude);

    engine.debug_advance().unwrap();
    assert_eq!(engine.state().dialogue_index, 7);
    assert_eq!(engine.state().section, Section::Dialogue);

    engine.debug_retreat().unwrap();
    assert_eq!(engine.state().section, Section::QuestionInterlude);
    assert_eq!(engine.state().dialogue_index, 6);
}

#[test]
fn asking_twice_has_no_effect() {
    let mut engine = reach(6);
    assert_eq!(engine.ask(QuestionId::Afterlife).unwrap(), Outcome::Applied);
    let renders = engine.stage().renders();
    let state = engine.state().clone();

    assert_eq!(engine.ask(QuestionId::Afterlife).unwrap(), Outcome::Ignored);
    assert_eq!(engine.stage().renders(), renders);
    assert_eq!(engine.state(), &state);

    engine.advance_time(1000).unwrap();
    assert_eq!(engine.ask(QuestionId::Afterlife).unwrap(), Outcome::Ignored);
    assert!(!engine.state().question.is_showing_answer);
}

#[test]
fn answer_shows_then_setup_returns() {
    let mut engine = reach(6);
    engine.ask(QuestionId::God).unwrap();

    let question = &engine.state().question;
    assert!(question.is_showing_answer);
    assert_eq!(question.current_answer, Some(QuestionId::God));
    let panel = engine.mounted().unwrap().block(Slot::Panel).unwrap();
    assert_eq!(panel.text, "g");

    engine.advance_time(1000).unwrap();
    let question = &engine.state().question;
    assert!(!question.is_showing_answer);
    assert_eq!(question.current_answer, None);
    assert!(question.asked_god);

    let tree = engine.mounted().unwrap();
    let clickable: Vec<_> = tree.clickable_choices().map(|c| c.question).collect();
    assert_eq!(clickable, vec![QuestionId::Afterlife]);
}

#[test]
fn other_question_stays_clickable_while_answer_shows() {
    let mut engine = reach(6);
    engine.ask(QuestionId::Afterlife).unwrap();
    assert_eq!(engine.ask(QuestionId::God).unwrap(), Outcome::Applied);
    assert_eq!(engine.state().question.current_answer, Some(QuestionId::God));

    // the first answer's timer was replaced, only one is live
    engine.advance_time(1000).unwrap();
    assert!(!engine.state().question.is_showing_answer);
    assert_eq!(
        engine.state().active_timer.unwrap().action,
        TimerAction::FinishQuestions
    );
}

#[test]
fn lock_policy_blocks_other_question_while_answering() {
    let config = EngineConfig::default().with_question_policy(crate::config::QuestionPolicy {
        lock_while_answering: true,
        keep_setup_after_first: false,
    });
    let mut engine = Engine::new(story(), config, RecordingStage::new());
    engine.start().unwrap();
    engine.advance_time(LEAD_IN).unwrap();
    while engine.state().section != Section::QuestionInterlude {
        engine.debug_advance().unwrap();
    }

    engine.ask(QuestionId::Afterlife).unwrap();
    assert_eq!(engine.ask(QuestionId::God).unwrap(), Outcome::Ignored);
    engine.advance_time(1000).unwrap();
    assert_eq!(engine.ask(QuestionId::God).unwrap(), Outcome::Applied);
}

#[test]
fn both_questions_resume_dialogue() {
    let mut engine = reach(6);
    engine.ask(QuestionId::Afterlife).unwrap();
    engine.advance_time(1000).unwrap();
    engine.ask(QuestionId::God).unwrap();
    engine.advance_time(1000).unwrap();

    assert!(engine.state().question.is_complete());
    assert_eq!(engine.mounted().unwrap().clickable_choices().count(), 0);
    assert_eq!(engine.ask(QuestionId::God).unwrap(), Outcome::Ignored);

    engine.advance_time(1999).unwrap();
    assert_eq!(engine.state().section, Section::QuestionInterlude);
    engine.advance_time(1).unwrap();
    assert!(finish_fades(&mut engine) > 0);

    assert_eq!(engine.state().section, Section::Dialogue);
    assert_eq!(engine.state().dialogue_index, 7);
    assert!(engine.state().awaiting_continue);
}

#[test]
fn asking_outside_interlude_is_ignored() {
    let mut engine = reach(0);
    assert_eq!(engine.ask(QuestionId::God).unwrap(), Outcome::Ignored);
    assert!(!engine.state().question.asked_god);
}

#[test]
fn scroll_section_exits_once() {
    let mut engine = reach(8);
    assert_eq!(engine.state().section, Section::ScrollInterlude);
    assert!(engine.stage().listener_attached());
    assert!(engine.state().scroll.has_initialized);

    engine.scroll_to(0.5).unwrap();
    assert_eq!(engine.state().scroll.current_segment_index, 2);
    assert!(engine.state().active_timer.is_none());

    assert_eq!(engine.scroll_to(1.0).unwrap(), Outcome::Applied);
    assert!(!engine.stage().listener_attached());
    let timer = engine.state().active_timer.unwrap();
    assert_eq!(timer.action, TimerAction::FinishScroll);

    assert_eq!(engine.scroll_to(1.0).unwrap(), Outcome::Ignored);
    assert_eq!(engine.state().active_timer.unwrap().token, timer.token);

    engine.advance_time(1000).unwrap();
    assert_eq!(engine.state().section, Section::Dialogue);
    assert_eq!(engine.state().dialogue_index, 9);
}

#[test]
fn scroll_listener_attaches_once() {
    let mut engine = reach(8);
    engine.debug_retreat().unwrap();
    engine.debug_advance().unwrap();
    assert_eq!(engine.state().section, Section::ScrollInterlude);

    let attaches = engine
        .stage()
        .calls()
        .iter()
        .filter(|c| **c == StageCall::ScrollListener(true))
        .count();
    let detaches = engine
        .stage()
        .calls()
        .iter()
        .filter(|c| **c == StageCall::ScrollListener(false))
        .count();
    assert_eq!(attaches, 1);
    assert_eq!(detaches, 1);
    assert!(engine.stage().listener_attached());
}

#[test]
fn story_ends_and_restarts_fresh() {
    let mut engine = reach(9);
    engine.advance_time(500).unwrap();
    finish_fades(&mut engine);

    assert_eq!(engine.state().section, Section::End);
    assert!(engine.mounted().unwrap().has_control(Control::Restart));
    assert_eq!(engine.debug_advance().unwrap(), Outcome::Ignored);

    assert_eq!(engine.restart().unwrap(), Outcome::Applied);
    assert_eq!(engine.state(), &EngineState::new());
    assert!(engine.mounted().unwrap().has_control(Control::Begin));
}

#[test]
fn restart_only_from_end() {
    let mut engine = reach(3);
    assert_eq!(engine.restart().unwrap(), Outcome::Ignored);
    assert_eq!(engine.state().dialogue_index, 3);
}

#[test]
fn debug_retreat_from_end_returns_to_last_line() {
    let mut engine = reach(9);
    engine.advance_time(500).unwrap();
    finish_fades(&mut engine);
    assert_eq!(engine.state().section, Section::End);

    engine.debug_retreat().unwrap();
    assert_eq!(engine.state().section, Section::Dialogue);
    assert_eq!(engine.state().dialogue_index, 9);
}

#[test]
fn apply_dispatches_commands() {
    let mut engine = engine();
    assert_eq!(engine.apply(Command::Start).unwrap(), Outcome::Applied);
    assert_eq!(engine.apply(Command::Restart).unwrap(), Outcome::Ignored);
    assert_eq!(engine.apply(Command::Scroll(0.5)).unwrap(), Outcome::Ignored);
}
