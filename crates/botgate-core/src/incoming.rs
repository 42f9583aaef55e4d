//! Incoming message model

use serde::{Deserialize, Serialize};

/// A normalized inbound message: what was said, by whom, on which channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomingMessage {
    /// Message text (or collected digits for voice channels)
    pub text: String,
    /// Sender identifier (phone number, call id, user id)
    pub sender: String,
    /// Recipient identifier (the channel endpoint that was addressed)
    pub recipient: String,
}

impl IncomingMessage {
    pub fn new(
        text: impl Into<String>,
        sender: impl Into<String>,
        recipient: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            sender: sender.into(),
            recipient: recipient.into(),
        }
    }
}

/// A user's answer inside a running conversation.
///
/// Drivers wrap the incoming message so conversation code can read the
/// raw text, an optional value (e.g. the pressed digit), and whether the
/// answer came from an interactive control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub text: String,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub interactive: bool,
    #[serde(default)]
    pub message: Option<IncomingMessage>,
}

impl Answer {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            value: None,
            interactive: false,
            message: None,
        }
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    pub fn message(mut self, message: IncomingMessage) -> Self {
        self.message = Some(message);
        self
    }
}
