use crate::{Message, MessageId, MessageStatus};

/// Append-only, display-ordered sequence of chat messages.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn get(&self, id: &MessageId) -> Option<&Message> {
        self.messages.iter().find(|message| &message.id == id)
    }

    pub fn latest(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// The most recently appended message that carries a preview.
    pub fn active_preview_message(&self) -> Option<&Message> {
        self.messages
            .iter()
            .rev()
            .find(|message| message.preview.is_some())
    }

    pub(crate) fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Moves a `Sending` message to a terminal status.
    ///
    /// Returns false if the id is unknown or the message already settled.
    pub(crate) fn settle(&mut self, id: &MessageId, status: MessageStatus) -> bool {
        debug_assert!(status.is_terminal());
        match self.messages.iter_mut().find(|message| &message.id == id) {
            Some(message) if message.status == MessageStatus::Sending => {
                message.status = status;
                true
            }
            _ => false,
        }
    }
}
