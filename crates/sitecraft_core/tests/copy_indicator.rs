use std::time::{Duration, Instant};

use sitecraft_core::{update, AppState, Effect, MessageId, Msg, COPY_INDICATOR_TTL};

fn init_logging() {
    sitecraft_logging::initialize_for_tests();
}

fn transcript_with_reply() -> (AppState, MessageId, MessageId) {
    let (state, _) = update(AppState::new(), Msg::InputChanged("a zine".to_string()));
    let (state, effects) = update(state, Msg::PromptSubmitted);
    let request_id = match &effects[0] {
        Effect::Generate { request_id, .. } => *request_id,
        other => panic!("unexpected effect {other:?}"),
    };
    let (state, _) = update(
        state,
        Msg::GenerationSucceeded {
            request_id,
            html: "<p>zine</p>".to_string(),
        },
    );
    let messages = state.transcript().messages();
    let user_id = messages[0].id.clone();
    let ai_id = messages[1].id.clone();
    (state, user_id, ai_id)
}

#[test]
fn copy_request_emits_message_text() {
    init_logging();
    let (state, _, ai_id) = transcript_with_reply();
    let (state, effects) = update(state, Msg::CopyRequested { id: ai_id.clone() });
    assert_eq!(
        effects,
        vec![Effect::CopyToClipboard {
            id: ai_id,
            text: state.transcript().messages()[1].text.clone(),
        }]
    );

    let (_, effects) = update(
        state,
        Msg::CopyRequested {
            id: MessageId::from("msg-0-unknown00"),
        },
    );
    assert!(effects.is_empty());
}

#[test]
fn indicator_expires_after_exactly_the_interval() {
    init_logging();
    let (state, _, ai_id) = transcript_with_reply();
    let at = Instant::now();
    let (state, _) = update(
        state,
        Msg::CopyFinished {
            id: ai_id.clone(),
            succeeded: true,
            at,
        },
    );

    assert!(state.is_copied(&ai_id, at));
    assert!(state.is_copied(&ai_id, at + COPY_INDICATOR_TTL - Duration::from_millis(1)));
    assert!(!state.is_copied(&ai_id, at + COPY_INDICATOR_TTL));

    let (state, _) = update(state, Msg::Tick(at + Duration::from_millis(1999)));
    assert!(state.view_at(at + Duration::from_millis(1999)).messages[1].copied);
    let (state, _) = update(state, Msg::Tick(at + COPY_INDICATOR_TTL));
    assert!(!state.view_at(at + COPY_INDICATOR_TTL).messages[1].copied);
}

#[test]
fn indicators_for_different_messages_are_independent() {
    init_logging();
    let (state, user_id, ai_id) = transcript_with_reply();
    let t0 = Instant::now();
    let t1 = t0 + Duration::from_millis(1500);

    let (state, _) = update(
        state,
        Msg::CopyFinished {
            id: user_id.clone(),
            succeeded: true,
            at: t0,
        },
    );
    let (state, _) = update(
        state,
        Msg::CopyFinished {
            id: ai_id.clone(),
            succeeded: true,
            at: t1,
        },
    );

    let (state, _) = update(state, Msg::Tick(t0 + COPY_INDICATOR_TTL));
    let view = state.view_at(t0 + COPY_INDICATOR_TTL);
    assert!(!view.messages[0].copied);
    assert!(view.messages[1].copied);

    let (state, _) = update(state, Msg::Tick(t1 + COPY_INDICATOR_TTL));
    assert!(!state.view_at(t1 + COPY_INDICATOR_TTL).messages[1].copied);
}

#[test]
fn view_turns_indicator_off_at_expiry_without_a_tick() {
    init_logging();
    let (state, _, ai_id) = transcript_with_reply();
    let at = Instant::now();
    let (state, _) = update(
        state,
        Msg::CopyFinished {
            id: ai_id,
            succeeded: true,
            at,
        },
    );

    assert!(state.view_at(at).messages[1].copied);
    assert!(state.view_at(at + COPY_INDICATOR_TTL - Duration::from_millis(1)).messages[1].copied);
    assert!(!state.view_at(at + COPY_INDICATOR_TTL).messages[1].copied);
    assert!(!state.view_at(at + Duration::from_secs(3)).messages[1].copied);
}

#[test]
fn copy_finished_long_ago_is_not_shown() {
    init_logging();
    let (state, _, ai_id) = transcript_with_reply();
    let Some(at) = Instant::now().checked_sub(Duration::from_secs(3)) else {
        return;
    };
    let (state, _) = update(
        state,
        Msg::CopyFinished {
            id: ai_id,
            succeeded: true,
            at,
        },
    );

    assert!(!state.view().messages[1].copied);
}

#[test]
fn failed_copy_sets_no_indicator() {
    init_logging();
    let (state, _, ai_id) = transcript_with_reply();
    let at = Instant::now();
    let (state, effects) = update(
        state,
        Msg::CopyFinished {
            id: ai_id.clone(),
            succeeded: false,
            at,
        },
    );
    assert!(effects.is_empty());
    assert!(!state.is_copied(&ai_id, at));
    assert_eq!(state.transcript().len(), 2);
}
