//! botgate-twilio: Twilio voice and SMS drivers for botgate
//!
//! Receives Twilio webhook callbacks (voice call events, SMS messages),
//! verifies their signature, normalizes them into the botgate message
//! model, and renders outgoing replies as TwiML — or originates a fresh
//! message through the Twilio REST API when there is no inbound channel
//! to answer on.

pub mod api;
pub mod config;
pub mod driver;
pub mod error;
pub mod message;
pub mod signature;
pub mod twiml;
pub mod voice;
pub mod webhook;

pub use api::{MessageResource, TwilioClient};
pub use config::{voices, InputMode, TwilioConfig};
pub use driver::WebhookRequest;
pub use error::{Result, TwilioError};
pub use message::{MessagePayload, TwilioMessageDriver};
pub use signature::RequestValidator;
pub use twiml::Twiml;
pub use voice::{TwilioVoiceDriver, VoicePayload, INCOMING_CALL};
pub use webhook::{
    dispatch, start_webhook_server, webhook_router, WebhookHandler, WebhookState,
};
