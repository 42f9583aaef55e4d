//! Outgoing message model

use serde::{Deserialize, Serialize};

use crate::attachment::Attachment;

/// A plain outgoing message with an optional attachment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutgoingMessage {
    pub text: String,
    #[serde(default)]
    pub attachment: Option<Attachment>,
}

impl OutgoingMessage {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            attachment: None,
        }
    }

    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachment = Some(attachment);
        self
    }
}

/// A button offered alongside a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    pub text: String,
    pub value: String,
}

impl Button {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            value: text.clone(),
            text,
        }
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }
}

/// A question presented to the user, optionally with buttons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub text: String,
    #[serde(default)]
    pub buttons: Vec<Button>,
}

impl Question {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            buttons: Vec::new(),
        }
    }

    pub fn button(mut self, button: Button) -> Self {
        self.buttons.push(button);
        self
    }

    pub fn buttons(mut self, buttons: impl IntoIterator<Item = Button>) -> Self {
        self.buttons.extend(buttons);
        self
    }
}

/// What conversation code hands back to a driver for delivery.
///
/// `Raw` carries a provider-native response document that bypasses all
/// translation; the type parameter is the driver's markup type.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply<R> {
    Text(String),
    Message(OutgoingMessage),
    Question(Question),
    Raw(R),
}

impl<R> From<&str> for Reply<R> {
    fn from(text: &str) -> Self {
        Reply::Text(text.to_string())
    }
}

impl<R> From<String> for Reply<R> {
    fn from(text: String) -> Self {
        Reply::Text(text)
    }
}

impl<R> From<OutgoingMessage> for Reply<R> {
    fn from(message: OutgoingMessage) -> Self {
        Reply::Message(message)
    }
}

impl<R> From<Question> for Reply<R> {
    fn from(question: Question) -> Self {
        Reply::Question(question)
    }
}
