//! Twilio voice driver
//!
//! Handles voice call webhooks: a call ringing in surfaces as an
//! `incoming_call` event, collected digits surface as the message text,
//! and replies render as `<Say>` prompts — wrapped in `<Gather>` when
//! the reply is a question awaiting input.

use async_trait::async_trait;

use botgate_core::{
    Button, ChannelDriver, DriverEvent, IncomingMessage, RenderedResponse, Reply,
};

use crate::config::{InputMode, TwilioConfig};
use crate::driver::{RequestContext, WebhookRequest};
use crate::error::TwilioError;
use crate::twiml::{Gather, Say, Twiml};

/// Event emitted when a call rings in before any digits were collected.
pub const INCOMING_CALL: &str = "incoming_call";

/// Intermediate payload for a voice reply.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VoicePayload {
    pub text: String,
    pub question: bool,
    pub buttons: Vec<Button>,
    pub twiml: Option<Twiml>,
    /// `<Say>` voice override; channel default when unset
    pub voice: Option<String>,
    /// `<Say>` language override; channel default when unset
    pub language: Option<String>,
    /// `<Gather>` input override; channel default when unset
    pub input: Option<InputMode>,
}

/// Driver for Twilio voice call webhooks.
pub struct TwilioVoiceDriver {
    ctx: RequestContext,
}

impl TwilioVoiceDriver {
    pub fn new(request: WebhookRequest, config: TwilioConfig) -> Self {
        Self {
            ctx: RequestContext::new(request, config),
        }
    }
}

#[async_trait]
impl ChannelDriver for TwilioVoiceDriver {
    type Markup = Twiml;
    type Payload = VoicePayload;
    type Error = TwilioError;

    fn name(&self) -> &'static str {
        "TwilioVoice"
    }

    fn matches(&self) -> bool {
        self.ctx.has("CallSid") && self.ctx.is_signature_valid()
    }

    fn event(&self) -> Option<DriverEvent> {
        if self.ctx.has("CallSid") && !self.ctx.has("Digits") {
            return Some(DriverEvent::new(INCOMING_CALL, self.ctx.payload().clone()));
        }
        None
    }

    fn messages(&self) -> &[IncomingMessage] {
        self.ctx.messages_with(|| {
            IncomingMessage::new(
                self.ctx.field("Digits"),
                self.ctx.field("CallSid"),
                self.ctx.field("To"),
            )
        })
    }

    fn is_configured(&self) -> bool {
        !self.ctx.config().token.is_empty()
    }

    fn build_payload(&self, reply: &Reply<Twiml>, _matching: &IncomingMessage) -> VoicePayload {
        let mut payload = VoicePayload::default();

        match reply {
            Reply::Question(question) => {
                payload.text = question.text.clone();
                payload.question = true;
                payload.buttons = question.buttons.clone();
            }
            Reply::Raw(twiml) => {
                payload.twiml = Some(twiml.clone());
            }
            Reply::Message(message) => {
                payload.text = message.text.clone();
            }
            Reply::Text(text) => {
                payload.text = text.clone();
            }
        }

        payload
    }

    async fn render(&self, payload: VoicePayload) -> Result<RenderedResponse, TwilioError> {
        if let Some(twiml) = payload.twiml {
            return Ok(RenderedResponse::xml(twiml.to_string()));
        }

        let config = self.ctx.config();
        let voice = payload.voice.unwrap_or_else(|| config.voice.clone());
        let language = payload.language.unwrap_or_else(|| config.language.clone());
        let say = |text: &str| Say::new(text).voice(&voice).language(&language);

        let mut twiml = Twiml::new();
        if payload.question {
            let input = payload.input.unwrap_or(config.input);
            let mut gather = Gather::new(input).say(say(&payload.text));
            for button in &payload.buttons {
                gather = gather.say(say(&button.text));
            }
            twiml.gather(gather);
        } else {
            twiml.say(say(&payload.text));
        }

        Ok(RenderedResponse::xml(twiml.to_string()))
    }
}
