use std::time::Instant;

use crate::{DeviceMode, MessageId, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the prompt input box.
    InputChanged(String),
    /// User submitted the current prompt input for generation.
    PromptSubmitted,
    /// User asked to run the most recent prompt again.
    RegenerateRequested,
    /// User cancelled the outstanding generation.
    CancelRequested,
    /// User picked a preview device.
    DeviceModeSelected(DeviceMode),
    /// Engine completion with a generated document.
    GenerationSucceeded { request_id: RequestId, html: String },
    /// Engine completion with a failure; `detail` is the error text, if any.
    GenerationFailed {
        request_id: RequestId,
        detail: Option<String>,
    },
    /// User clicked copy on a message.
    CopyRequested { id: MessageId },
    /// Platform clipboard write finished.
    CopyFinished {
        id: MessageId,
        succeeded: bool,
        at: Instant,
    },
    /// User clicked download.
    DownloadRequested,
    /// The chat view is being torn down.
    SessionClosed,
    /// Timer tick; expires transient indicators.
    Tick(Instant),
    /// Fallback for placeholder wiring.
    NoOp,
}
