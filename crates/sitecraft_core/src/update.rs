use sitecraft_logging::{site_debug, site_info, site_warn};

use crate::state::{CANCELLED_ERROR, UNKNOWN_ERROR};
use crate::{AppState, Effect, Msg};

/// Applies a message to state and returns any effects.
///
/// Everything except message ids and timestamps is a function of the inputs;
/// IO happens in the effects the caller executes.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    if state.is_closed() && !matches!(msg, Msg::Tick(_) | Msg::NoOp) {
        site_debug!("Session closed; dropping {:?}", msg);
        return (state, Vec::new());
    }

    let effects = match msg {
        Msg::InputChanged(text) => {
            state.set_input(text);
            Vec::new()
        }
        Msg::PromptSubmitted => {
            let prompt = state.input().to_string();
            let effects = submit(&mut state, prompt);
            if !effects.is_empty() {
                state.set_input(String::new());
            }
            effects
        }
        Msg::RegenerateRequested => match state.last_user_prompt() {
            Some(prompt) => submit(&mut state, prompt),
            None => Vec::new(),
        },
        Msg::CancelRequested => match state.pending().map(|pending| pending.request_id) {
            Some(request_id) => {
                if let Some(pending) = state.take_pending(request_id) {
                    site_info!("Cancelled generation request_id={}", request_id);
                    state.resolve_failure(&pending, CANCELLED_ERROR.to_string());
                }
                vec![Effect::CancelGeneration { request_id }]
            }
            None => Vec::new(),
        },
        Msg::DeviceModeSelected(mode) => {
            state.set_device_mode(mode);
            Vec::new()
        }
        Msg::GenerationSucceeded { request_id, html } => {
            match state.take_pending(request_id) {
                Some(pending) => {
                    site_info!(
                        "Generation succeeded request_id={} html_len={}",
                        request_id,
                        html.len()
                    );
                    state.resolve_success(&pending, html);
                }
                None => site_debug!("Ignoring stale success for request_id={}", request_id),
            }
            Vec::new()
        }
        Msg::GenerationFailed { request_id, detail } => {
            match state.take_pending(request_id) {
                Some(pending) => {
                    let detail = detail
                        .filter(|text| !text.trim().is_empty())
                        .unwrap_or_else(|| UNKNOWN_ERROR.to_string());
                    site_warn!("Generation failed request_id={}: {}", request_id, detail);
                    state.resolve_failure(&pending, detail);
                }
                None => site_debug!("Ignoring stale failure for request_id={}", request_id),
            }
            Vec::new()
        }
        Msg::CopyRequested { id } => match state.transcript().get(&id) {
            Some(message) => vec![Effect::CopyToClipboard {
                id,
                text: message.text.clone(),
            }],
            None => Vec::new(),
        },
        Msg::CopyFinished { id, succeeded, at } => {
            if succeeded {
                state.mark_copied(id, at);
            } else {
                site_warn!("Copy to clipboard failed for {}", id);
            }
            Vec::new()
        }
        Msg::DownloadRequested => match state.latest_download() {
            Some(html) => vec![Effect::DownloadPreview {
                html: html.to_string(),
            }],
            None => {
                site_debug!("Nothing to download");
                Vec::new()
            }
        },
        Msg::SessionClosed => match state.close() {
            Some(pending) => vec![Effect::CancelGeneration {
                request_id: pending.request_id,
            }],
            None => Vec::new(),
        },
        Msg::Tick(now) => {
            state.expire_copy_indicators(now);
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn submit(state: &mut AppState, prompt: String) -> Vec<Effect> {
    if prompt.trim().is_empty() {
        return Vec::new();
    }
    if let Some(pending) = state.pending() {
        site_debug!(
            "Submission rejected; request_id={} still outstanding",
            pending.request_id
        );
        return Vec::new();
    }

    let pending = state.start_request(prompt);
    site_info!(
        "Prompt submitted request_id={} device_mode={} prompt_len={}",
        pending.request_id,
        pending.device_mode,
        pending.prompt.len()
    );
    vec![Effect::Generate {
        request_id: pending.request_id,
        prompt: pending.prompt,
        device_mode: pending.device_mode,
    }]
}
