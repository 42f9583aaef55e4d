//! Channel driver capability trait

use async_trait::async_trait;

use crate::event::DriverEvent;
use crate::incoming::{Answer, IncomingMessage};
use crate::outgoing::Reply;
use crate::user::User;

/// Content type of a declarative markup response body.
pub const CONTENT_TYPE_XML: &str = "text/xml";
/// Content type of a provider API result body.
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// A complete, immediately-sendable HTTP response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedResponse {
    pub body: String,
    pub content_type: &'static str,
}

impl RenderedResponse {
    pub fn xml(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            content_type: CONTENT_TYPE_XML,
        }
    }

    pub fn json(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            content_type: CONTENT_TYPE_JSON,
        }
    }
}

/// What a channel driver does with one webhook request.
///
/// A driver value is built per request and owns the request's state:
/// `matches` decides whether the request belongs to this channel,
/// `event` classifies distinguished sub-events, `messages` normalizes
/// the payload (memoized, identity-stable for the request's lifetime),
/// `build_payload` maps a generic reply to the channel's intermediate
/// payload and `render` turns that into the provider response.
#[async_trait]
pub trait ChannelDriver {
    /// Provider-native markup type accepted for raw passthrough.
    type Markup;
    /// Channel-specific intermediate payload.
    type Payload;
    /// Failure type surfaced by rendering.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Display name of the driver.
    fn name(&self) -> &'static str;

    /// Whether this request belongs to this channel.
    fn matches(&self) -> bool;

    /// Distinguished non-message event in this request, if any.
    fn event(&self) -> Option<DriverEvent>;

    /// Normalized messages. Repeated calls return the same slice.
    fn messages(&self) -> &[IncomingMessage];

    /// Whether the required channel credentials are present.
    fn is_configured(&self) -> bool;

    /// Map a generic reply to the channel's intermediate payload.
    fn build_payload(
        &self,
        reply: &Reply<Self::Markup>,
        matching: &IncomingMessage,
    ) -> Self::Payload;

    /// Render the intermediate payload into a provider response.
    async fn render(&self, payload: Self::Payload) -> Result<RenderedResponse, Self::Error>;

    /// Conversation answer for a normalized message.
    fn conversation_answer(&self, message: &IncomingMessage) -> Answer {
        Answer::new(message.text.clone())
            .value(message.text.clone())
            .interactive(true)
            .message(message.clone())
    }

    /// User record for a normalized message. Providers without profile
    /// data leave the name fields unset.
    fn user(&self, message: &IncomingMessage) -> User {
        User::new(message.sender.clone())
    }

    /// Whether the sender is a bot account.
    fn is_bot(&self) -> bool {
        false
    }
}
