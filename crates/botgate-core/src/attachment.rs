//! Attachments carried by outgoing messages

use serde::{Deserialize, Serialize};

/// Attachment on an outgoing message.
///
/// URL-backed attachments expose their location through [`Attachment::url`];
/// map pins have coordinates but no URL a provider could fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Attachment {
    Image { url: String },
    Audio { url: String },
    Video { url: String },
    File { url: String },
    Location { latitude: f64, longitude: f64 },
}

impl Attachment {
    pub fn image(url: impl Into<String>) -> Self {
        Attachment::Image { url: url.into() }
    }

    pub fn audio(url: impl Into<String>) -> Self {
        Attachment::Audio { url: url.into() }
    }

    pub fn video(url: impl Into<String>) -> Self {
        Attachment::Video { url: url.into() }
    }

    pub fn file(url: impl Into<String>) -> Self {
        Attachment::File { url: url.into() }
    }

    pub fn location(latitude: f64, longitude: f64) -> Self {
        Attachment::Location {
            latitude,
            longitude,
        }
    }

    /// Fetchable URL of the attachment, `None` for locations.
    pub fn url(&self) -> Option<&str> {
        match self {
            Attachment::Image { url }
            | Attachment::Audio { url }
            | Attachment::Video { url }
            | Attachment::File { url } => Some(url),
            Attachment::Location { .. } => None,
        }
    }
}
