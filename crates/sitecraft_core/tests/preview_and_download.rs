use pretty_assertions::assert_eq;
use sitecraft_core::{
    update, AppState, DeviceMode, Effect, Msg, PreviewView, RequestId, Viewport,
    PREVIEW_FALLBACK_ERROR,
};

fn init_logging() {
    sitecraft_logging::initialize_for_tests();
}

fn submit_prompt(state: AppState, input: &str) -> (AppState, RequestId) {
    let (state, _) = update(state, Msg::InputChanged(input.to_string()));
    let (state, effects) = update(state, Msg::PromptSubmitted);
    let request_id = effects
        .iter()
        .find_map(|effect| match effect {
            Effect::Generate { request_id, .. } => Some(*request_id),
            _ => None,
        })
        .expect("generate effect");
    (state, request_id)
}

fn generated(state: AppState, input: &str, html: &str) -> AppState {
    let (state, request_id) = submit_prompt(state, input);
    let (state, _) = update(
        state,
        Msg::GenerationSucceeded {
            request_id,
            html: html.to_string(),
        },
    );
    state
}

fn failed(state: AppState, input: &str, detail: &str) -> AppState {
    let (state, request_id) = submit_prompt(state, input);
    let (state, _) = update(
        state,
        Msg::GenerationFailed {
            request_id,
            detail: Some(detail.to_string()),
        },
    );
    state
}

#[test]
fn empty_transcript_shows_placeholder() {
    init_logging();
    assert_eq!(AppState::new().view().preview, PreviewView::Placeholder);
}

#[test]
fn first_pending_request_shows_generating() {
    init_logging();
    let (state, _) = submit_prompt(AppState::new(), "a resume site");
    assert_eq!(state.view().preview, PreviewView::Generating);
}

#[test]
fn newest_preview_wins_and_survives_a_pending_request() {
    init_logging();
    let state = generated(AppState::new(), "one", "<p>one</p>");
    let state = generated(state, "two", "<p>two</p>");

    let expected = PreviewView::Document {
        html: "<p>two</p>".to_string(),
        device_mode: DeviceMode::Desktop,
        viewport: Viewport {
            max_width: None,
            max_height: None,
        },
    };
    assert_eq!(state.view().preview, expected);
    // Idempotent under repeated rendering.
    assert_eq!(state.view().preview, expected);

    let (state, _) = submit_prompt(state, "three");
    assert_eq!(state.view().preview, expected);
}

#[test]
fn failed_generation_shows_error_detail() {
    init_logging();
    let state = generated(AppState::new(), "one", "<p>one</p>");
    let state = failed(state, "two", "HTTP 500");
    assert_eq!(
        state.view().preview,
        PreviewView::Failed {
            detail: "HTTP 500".to_string()
        }
    );
}

#[test]
fn empty_document_shows_fallback_error() {
    init_logging();
    let state = generated(AppState::new(), "one", "");
    assert_eq!(
        state.view().preview,
        PreviewView::Failed {
            detail: PREVIEW_FALLBACK_ERROR.to_string()
        }
    );
}

#[test]
fn device_switch_rerenders_without_touching_transcript() {
    init_logging();
    let state = generated(AppState::new(), "a portfolio site", "<html>OK</html>");
    let transcript_before = state.transcript().clone();

    let (mut state, effects) = update(state, Msg::DeviceModeSelected(DeviceMode::Mobile));
    assert!(effects.is_empty());
    assert!(state.consume_dirty());
    assert_eq!(state.transcript(), &transcript_before);
    assert_eq!(
        state.view().preview,
        PreviewView::Document {
            html: "<html>OK</html>".to_string(),
            device_mode: DeviceMode::Mobile,
            viewport: Viewport {
                max_width: Some(375),
                max_height: Some(812),
            },
        }
    );

    let (mut state, effects) = update(state, Msg::DeviceModeSelected(DeviceMode::Mobile));
    assert!(effects.is_empty());
    assert!(!state.consume_dirty());
}

#[test]
fn download_on_empty_transcript_is_noop() {
    init_logging();
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::DownloadRequested);
    assert!(effects.is_empty());
    assert_eq!(next, state);
    assert!(!next.view().can_download);
}

#[test]
fn download_emits_newest_successful_document() {
    init_logging();
    let state = generated(AppState::new(), "one", "<html>OK</html>");
    assert!(state.view().can_download);

    let (state, effects) = update(state, Msg::DownloadRequested);
    assert_eq!(
        effects,
        vec![Effect::DownloadPreview {
            html: "<html>OK</html>".to_string()
        }]
    );

    let state = failed(state, "two", "boom");
    let (_, effects) = update(state, Msg::DownloadRequested);
    assert!(effects.is_empty());
}

#[test]
fn download_is_noop_while_newest_message_is_pending() {
    init_logging();
    let state = generated(AppState::new(), "one", "<html>OK</html>");
    let (state, _) = submit_prompt(state, "two");
    let (_, effects) = update(state, Msg::DownloadRequested);
    assert!(effects.is_empty());
}
