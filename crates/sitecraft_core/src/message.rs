use std::fmt;

use chrono::{DateTime, Utc};
use rand::distributions::{Distribution, Uniform};

const ID_RANDOM_LEN: usize = 9;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Transcript entry identifier: `msg-{unix_millis}-{random base36}`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MessageId(String);

impl MessageId {
    pub fn generate() -> Self {
        Self::generate_at(Utc::now())
    }

    pub(crate) fn generate_at(at: DateTime<Utc>) -> Self {
        let mut rng = rand::thread_rng();
        let digits = Uniform::from(0..BASE36.len());
        let suffix: String = (0..ID_RANDOM_LEN)
            .map(|_| BASE36[digits.sample(&mut rng)] as char)
            .collect();
        Self(format!("msg-{}-{suffix}", at.timestamp_millis()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MessageId {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Ai,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStatus {
    Sending,
    Sent,
    Error,
}

impl MessageStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, MessageStatus::Sending)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PreviewKind {
    #[default]
    Website,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    pub kind: PreviewKind,
    /// Raw HTML document; empty on failure.
    pub content: String,
    pub error: Option<String>,
}

impl Preview {
    pub fn website(content: impl Into<String>) -> Self {
        Self {
            kind: PreviewKind::Website,
            content: content.into(),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            kind: PreviewKind::Website,
            content: String::new(),
            error: Some(error.into()),
        }
    }

    /// True for an error-free preview with a non-empty document.
    pub fn is_renderable(&self) -> bool {
        self.error.is_none() && !self.content.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: MessageId,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
    pub status: MessageStatus,
    pub preview: Option<Preview>,
}

impl Message {
    pub(crate) fn user(text: impl Into<String>) -> Self {
        let timestamp = Utc::now();
        Self {
            id: MessageId::generate_at(timestamp),
            text: text.into(),
            sender: Sender::User,
            timestamp,
            status: MessageStatus::Sending,
            preview: None,
        }
    }

    pub(crate) fn ai(text: impl Into<String>, status: MessageStatus, preview: Preview) -> Self {
        let timestamp = Utc::now();
        Self {
            id: MessageId::generate_at(timestamp),
            text: text.into(),
            sender: Sender::Ai,
            timestamp,
            status,
            preview: Some(preview),
        }
    }
}
