use chrono::Local;

use crate::{DeviceMode, Message, MessageId, MessageStatus, PreviewView, Sender};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppViewModel {
    pub messages: Vec<MessageRowView>,
    pub input: String,
    pub device_mode: DeviceMode,
    /// Submission is disabled while true.
    pub is_generating: bool,
    pub can_download: bool,
    pub preview: PreviewView,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRowView {
    pub id: MessageId,
    pub text: String,
    pub sender: Sender,
    pub status: MessageStatus,
    /// Local wall-clock time, e.g. `3:07 PM`.
    pub time_label: String,
    pub copied: bool,
}

impl MessageRowView {
    pub(crate) fn from_message(message: &Message, copied: bool) -> Self {
        Self {
            id: message.id.clone(),
            text: message.text.clone(),
            sender: message.sender,
            status: message.status,
            time_label: message
                .timestamp
                .with_timezone(&Local)
                .format("%-I:%M %p")
                .to_string(),
            copied,
        }
    }
}
