//! User-visible messages.
//!
//! Messages are what an administrator sees after a run, separate from the
//! `tracing` log.

use parking_lot::RwLock;
use std::fmt;

/// Severity of a user-visible message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    /// Something completed.
    Status,
    /// Something could not be done.
    Warning,
}

impl fmt::Display for MessageLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageLevel::Status => f.write_str("status"),
            MessageLevel::Warning => f.write_str("warning"),
        }
    }
}

/// A user-visible message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Severity.
    pub level: MessageLevel,
    /// Message text.
    pub text: String,
}

/// Receives user-visible messages.
pub trait Messenger {
    /// Adds a status message.
    fn status(&self, text: String);

    /// Adds a warning message.
    fn warning(&self, text: String);
}

/// A messenger that collects messages in order.
#[derive(Debug, Default)]
pub struct MessageLog {
    messages: RwLock<Vec<Message>>,
}

impl MessageLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every message in arrival order.
    pub fn messages(&self) -> Vec<Message> {
        self.messages.read().clone()
    }

    /// Returns the texts of messages at `level`.
    pub fn texts(&self, level: MessageLevel) -> Vec<String> {
        self.messages
            .read()
            .iter()
            .filter(|m| m.level == level)
            .map(|m| m.text.clone())
            .collect()
    }

    /// Removes and returns every message.
    pub fn take(&self) -> Vec<Message> {
        std::mem::take(&mut *self.messages.write())
    }

    fn push(&self, level: MessageLevel, text: String) {
        self.messages.write().push(Message { level, text });
    }
}

impl Messenger for MessageLog {
    fn status(&self, text: String) {
        self.push(MessageLevel::Status, text);
    }

    fn warning(&self, text: String) {
        self.push(MessageLevel::Warning, text);
    }
}
