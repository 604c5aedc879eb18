use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use crate::preview::select_preview;
use crate::view_model::{AppViewModel, MessageRowView};
use crate::{DeviceMode, Message, MessageId, MessageStatus, Preview, Sender, Transcript};

pub type RequestId = u64;

/// How long the "copied" indicator stays on after a successful copy.
pub const COPY_INDICATOR_TTL: Duration = Duration::from_secs(2);

pub const FAILURE_TEXT: &str = "Failed to generate design";
pub const UNKNOWN_ERROR: &str = "Unknown error";
pub const CANCELLED_ERROR: &str = "Generation cancelled";

/// The single outstanding generation, keyed by its request token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    pub request_id: RequestId,
    pub user_message_id: MessageId,
    pub prompt: String,
    pub device_mode: DeviceMode,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    input: String,
    device_mode: DeviceMode,
    transcript: Transcript,
    pending: Option<PendingRequest>,
    next_request_id: RequestId,
    /// Message id -> instant the copy indicator expires.
    copy_indicators: BTreeMap<MessageId, Instant>,
    closed: bool,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The view model as of the current instant.
    pub fn view(&self) -> AppViewModel {
        self.view_at(Instant::now())
    }

    /// The view model with copy indicators evaluated at `now`.
    pub fn view_at(&self, now: Instant) -> AppViewModel {
        let messages = self
            .transcript
            .messages()
            .iter()
            .map(|message| {
                let copied = self.is_copied(&message.id, now);
                MessageRowView::from_message(message, copied)
            })
            .collect();

        AppViewModel {
            messages,
            input: self.input.clone(),
            device_mode: self.device_mode,
            is_generating: self.is_generating(),
            can_download: self.latest_download().is_some(),
            preview: select_preview(&self.transcript, self.pending.is_some(), self.device_mode),
            dirty: self.dirty,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn device_mode(&self) -> DeviceMode {
        self.device_mode
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn pending(&self) -> Option<&PendingRequest> {
        self.pending.as_ref()
    }

    /// While true the submit affordance is disabled.
    pub fn is_generating(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Whether the copy indicator for `id` is lit at `now`.
    pub fn is_copied(&self, id: &MessageId, now: Instant) -> bool {
        self.copy_indicators
            .get(id)
            .is_some_and(|expires_at| now < *expires_at)
    }

    /// HTML of the newest message, if it is a successful non-empty preview.
    pub fn latest_download(&self) -> Option<&str> {
        self.transcript
            .latest()
            .and_then(|message| message.preview.as_ref())
            .filter(|preview| preview.is_renderable())
            .map(|preview| preview.content.as_str())
    }

    /// Returns whether the state changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_input(&mut self, text: String) {
        if self.input != text {
            self.input = text;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_device_mode(&mut self, mode: DeviceMode) -> bool {
        if self.device_mode == mode {
            return false;
        }
        self.device_mode = mode;
        self.mark_dirty();
        true
    }

    /// Appends the `Sending` user message and records it as the pending request.
    pub(crate) fn start_request(&mut self, prompt: String) -> PendingRequest {
        let user_message = Message::user(prompt.clone());
        self.next_request_id += 1;
        let pending = PendingRequest {
            request_id: self.next_request_id,
            user_message_id: user_message.id.clone(),
            prompt,
            device_mode: self.device_mode,
        };
        self.transcript.push(user_message);
        self.pending = Some(pending.clone());
        self.mark_dirty();
        pending
    }

    /// Removes and returns the pending request if `request_id` matches it.
    pub(crate) fn take_pending(&mut self, request_id: RequestId) -> Option<PendingRequest> {
        match &self.pending {
            Some(pending) if pending.request_id == request_id => self.pending.take(),
            _ => None,
        }
    }

    pub(crate) fn resolve_success(&mut self, pending: &PendingRequest, html: String) {
        self.transcript
            .settle(&pending.user_message_id, MessageStatus::Sent);
        let text = format!(
            "Generated website for {} view based on your prompt: \"{}\"",
            pending.device_mode, pending.prompt
        );
        self.transcript
            .push(Message::ai(text, MessageStatus::Sent, Preview::website(html)));
        self.mark_dirty();
    }

    pub(crate) fn resolve_failure(&mut self, pending: &PendingRequest, detail: String) {
        self.transcript
            .settle(&pending.user_message_id, MessageStatus::Error);
        self.transcript.push(Message::ai(
            FAILURE_TEXT,
            MessageStatus::Error,
            Preview::failed(detail),
        ));
        self.mark_dirty();
    }

    pub(crate) fn last_user_prompt(&self) -> Option<String> {
        self.transcript
            .messages()
            .iter()
            .rev()
            .find(|message| message.sender == Sender::User)
            .map(|message| message.text.clone())
    }

    pub(crate) fn mark_copied(&mut self, id: MessageId, at: Instant) {
        self.copy_indicators.insert(id, at + COPY_INDICATOR_TTL);
        self.mark_dirty();
    }

    /// Drops every indicator whose expiry is at or before `now`.
    pub(crate) fn expire_copy_indicators(&mut self, now: Instant) {
        let before = self.copy_indicators.len();
        self.copy_indicators.retain(|_, expires_at| now < *expires_at);
        if self.copy_indicators.len() != before {
            self.mark_dirty();
        }
    }

    /// Marks the session torn down; returns the request that was in flight.
    pub(crate) fn close(&mut self) -> Option<PendingRequest> {
        self.closed = true;
        self.pending.take()
    }
}
