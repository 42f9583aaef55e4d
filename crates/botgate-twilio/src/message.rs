//! Twilio SMS driver
//!
//! Handles inbound SMS webhooks and renders replies as `<Message>`
//! TwiML. Buttons degrade to plain text lines appended to the body; a
//! reply without an inbound channel to answer on is originated through
//! the REST API instead.

use std::sync::OnceLock;

use async_trait::async_trait;

use botgate_core::{Button, ChannelDriver, DriverEvent, IncomingMessage, RenderedResponse, Reply};

use crate::api::TwilioClient;
use crate::config::TwilioConfig;
use crate::driver::{RequestContext, WebhookRequest};
use crate::error::{Result, TwilioError};
use crate::twiml::{Message, Twiml};

/// Intermediate payload for an SMS reply.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessagePayload {
    pub text: String,
    pub buttons: Vec<Button>,
    pub twiml: Option<Twiml>,
    pub media: Option<String>,
    /// True when there is no inbound channel to reply on and the
    /// message must be created through the REST API instead
    pub originate: bool,
    pub recipient: String,
}

/// Driver for Twilio SMS webhooks.
pub struct TwilioMessageDriver {
    ctx: RequestContext,
    client: OnceLock<TwilioClient>,
}

impl TwilioMessageDriver {
    pub fn new(request: WebhookRequest, config: TwilioConfig) -> Self {
        Self {
            ctx: RequestContext::new(request, config),
            client: OnceLock::new(),
        }
    }

    fn client(&self) -> &TwilioClient {
        let config = self.ctx.config();
        self.client
            .get_or_init(|| TwilioClient::new(&config.sid, &config.token))
    }

    async fn originate(&self, payload: &MessagePayload) -> Result<RenderedResponse> {
        let resource = self
            .client()
            .create_message(
                &self.ctx.config().from_number,
                &payload.recipient,
                &payload.text,
                payload.media.as_deref(),
            )
            .await?;

        Ok(RenderedResponse::json(serde_json::to_string(&resource)?))
    }
}

#[async_trait]
impl ChannelDriver for TwilioMessageDriver {
    type Markup = Twiml;
    type Payload = MessagePayload;
    type Error = TwilioError;

    fn name(&self) -> &'static str {
        "TwilioMessage"
    }

    fn matches(&self) -> bool {
        self.ctx.has("MessageSid") && self.ctx.is_signature_valid()
    }

    fn event(&self) -> Option<DriverEvent> {
        None
    }

    fn messages(&self) -> &[IncomingMessage] {
        self.ctx.messages_with(|| {
            IncomingMessage::new(
                self.ctx.field("Body"),
                self.ctx.field("From"),
                self.ctx.field("To"),
            )
        })
    }

    fn is_configured(&self) -> bool {
        !self.ctx.config().token.is_empty()
    }

    fn build_payload(&self, reply: &Reply<Twiml>, matching: &IncomingMessage) -> MessagePayload {
        let mut payload = MessagePayload {
            originate: matching.recipient.is_empty(),
            recipient: matching.sender.clone(),
            ..Default::default()
        };

        match reply {
            Reply::Question(question) => {
                payload.text = question.text.clone();
                payload.buttons = question.buttons.clone();
            }
            Reply::Raw(twiml) => {
                payload.twiml = Some(twiml.clone());
            }
            Reply::Message(message) => {
                payload.text = message.text.clone();
                // Locations have no URL the provider could render.
                if let Some(url) = message.attachment.as_ref().and_then(|a| a.url()) {
                    payload.media = Some(url.to_string());
                }
            }
            Reply::Text(text) => {
                payload.text = text.clone();
            }
        }

        payload
    }

    async fn render(&self, payload: MessagePayload) -> Result<RenderedResponse> {
        if let Some(twiml) = &payload.twiml {
            return Ok(RenderedResponse::xml(twiml.to_string()));
        }

        if payload.originate {
            return self.originate(&payload).await;
        }

        let mut body = payload.text.clone();
        for button in &payload.buttons {
            body.push('\n');
            body.push_str(&button.text);
        }

        let mut message = Message::new(body);
        if let Some(media) = &payload.media {
            message = message.media(media);
        }

        let mut twiml = Twiml::new();
        twiml.message(message);

        Ok(RenderedResponse::xml(twiml.to_string()))
    }
}
