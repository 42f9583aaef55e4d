//! Webhook endpoint for Twilio callbacks
//!
//! Thin transport over the drivers: parses the form body and signature
//! header into a [`WebhookRequest`], lets the voice driver then the SMS
//! driver claim it, hands the normalized message (or event) to the
//! embedding application's [`WebhookHandler`], and answers with the
//! rendered response. A request no driver claims is a 404 — an invalid
//! signature is indistinguishable from a foreign request by design.

use std::net::SocketAddr;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{Form, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use tracing::{debug, error, info, warn};

use botgate_core::{
    ChannelDriver, DriverEvent, EventPayload, IncomingMessage, RenderedResponse, Reply,
};

use crate::config::TwilioConfig;
use crate::driver::WebhookRequest;
use crate::error::{Result, TwilioError};
use crate::message::TwilioMessageDriver;
use crate::twiml::Twiml;
use crate::voice::TwilioVoiceDriver;

/// Conversation callbacks supplied by the embedding application.
#[async_trait]
pub trait WebhookHandler: Send + Sync {
    /// Reply to a normalized incoming message. `None` acknowledges the
    /// webhook with an empty response document.
    async fn on_message(&self, message: &IncomingMessage) -> Option<Reply<Twiml>>;

    /// Reply to a channel event (e.g. a call ringing in).
    async fn on_event(&self, event: &DriverEvent) -> Option<Reply<Twiml>> {
        let _ = event;
        None
    }
}

/// Webhook endpoint state
#[derive(Clone)]
pub struct WebhookState {
    pub config: TwilioConfig,
    pub handler: Arc<dyn WebhookHandler>,
}

/// Run one webhook request through the drivers.
///
/// Returns `Ok(None)` when no driver claims the request.
pub async fn dispatch(
    request: &WebhookRequest,
    config: &TwilioConfig,
    handler: &dyn WebhookHandler,
) -> Result<Option<RenderedResponse>> {
    let voice = TwilioVoiceDriver::new(request.clone(), config.clone());
    if voice.matches() {
        debug!("webhook request claimed by {}", voice.name());

        if let Some(event) = voice.event() {
            let reply = handler.on_event(&event).await;
            let matching = voice.messages()[0].clone();
            return Ok(Some(respond(&voice, reply, &matching).await?));
        }

        let matching = voice.messages()[0].clone();
        let reply = handler.on_message(&matching).await;
        return Ok(Some(respond(&voice, reply, &matching).await?));
    }

    let sms = TwilioMessageDriver::new(request.clone(), config.clone());
    if sms.matches() {
        debug!("webhook request claimed by {}", sms.name());

        let matching = sms.messages()[0].clone();
        let reply = handler.on_message(&matching).await;
        return Ok(Some(respond(&sms, reply, &matching).await?));
    }

    Ok(None)
}

async fn respond<D>(
    driver: &D,
    reply: Option<Reply<Twiml>>,
    matching: &IncomingMessage,
) -> Result<RenderedResponse>
where
    D: ChannelDriver<Markup = Twiml, Error = TwilioError> + Sync,
    D::Payload: Send,
{
    match reply {
        Some(reply) => driver.render(driver.build_payload(&reply, matching)).await,
        None => Ok(RenderedResponse::xml(Twiml::new().to_string())),
    }
}

/// Handle an incoming webhook request.
async fn handle_webhook(
    State(state): State<Arc<WebhookState>>,
    headers: HeaderMap,
    Form(params): Form<EventPayload>,
) -> Response {
    let signature = headers
        .get("X-Twilio-Signature")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    // Twilio signs the public URL it called; behind a proxy that is the
    // configured webhook URL, not whatever host the request carries.
    let request = WebhookRequest::new(state.config.webhook_url.clone(), signature, params);

    match dispatch(&request, &state.config, state.handler.as_ref()).await {
        Ok(Some(rendered)) => (
            [(header::CONTENT_TYPE, rendered.content_type)],
            rendered.body,
        )
            .into_response(),
        Ok(None) => {
            warn!("no driver claimed webhook request");
            StatusCode::NOT_FOUND.into_response()
        }
        Err(e) => {
            error!("failed to render webhook response: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Create the webhook router.
pub fn webhook_router(state: WebhookState) -> Router {
    Router::new()
        .route("/webhook/twilio", post(handle_webhook))
        .with_state(Arc::new(state))
}

/// Validate the configuration and serve the webhook endpoint.
pub async fn start_webhook_server(state: WebhookState, addr: SocketAddr) -> Result<()> {
    state.config.validate()?;

    let app = webhook_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| TwilioError::Config(e.to_string()))?;

    info!("Twilio webhook server listening on {}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| TwilioError::Http(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::RequestValidator;
    use botgate_core::Question;

    const TOKEN: &str = "test_token";
    const URI: &str = "https://bot.example.com/webhook/twilio";

    struct EchoHandler;

    #[async_trait]
    impl WebhookHandler for EchoHandler {
        async fn on_message(&self, message: &IncomingMessage) -> Option<Reply<Twiml>> {
            Some(Reply::Text(format!("you said {}", message.text)))
        }

        async fn on_event(&self, event: &DriverEvent) -> Option<Reply<Twiml>> {
            assert_eq!(event.name, crate::voice::INCOMING_CALL);
            Some(Question::new("Welcome. Press 1 for business hours.").into())
        }
    }

    struct SilentHandler;

    #[async_trait]
    impl WebhookHandler for SilentHandler {
        async fn on_message(&self, _message: &IncomingMessage) -> Option<Reply<Twiml>> {
            None
        }
    }

    fn config() -> TwilioConfig {
        TwilioConfig {
            token: TOKEN.to_string(),
            webhook_url: URI.to_string(),
            ..Default::default()
        }
    }

    fn signed_request(params: EventPayload) -> WebhookRequest {
        let signature = RequestValidator::new(TOKEN).sign(URI, &params).unwrap();
        WebhookRequest::new(URI, signature, params)
    }

    fn sms_params() -> EventPayload {
        let mut params = EventPayload::new();
        params.insert("MessageSid".to_string(), "SM123".to_string());
        params.insert("From".to_string(), "+431234567890".to_string());
        params.insert("To".to_string(), "+492662009090".to_string());
        params.insert("Body".to_string(), "ping".to_string());
        params
    }

    fn call_params() -> EventPayload {
        let mut params = EventPayload::new();
        params.insert("CallSid".to_string(), "CA123".to_string());
        params.insert("From".to_string(), "+431234567890".to_string());
        params.insert("To".to_string(), "+492662009090".to_string());
        params
    }

    #[tokio::test]
    async fn test_dispatches_sms_to_the_message_driver() {
        let request = signed_request(sms_params());

        let rendered = dispatch(&request, &config(), &EchoHandler)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(
            rendered.body,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<Response><Message><Body>you said ping</Body></Message></Response>\n"
        );
    }

    #[tokio::test]
    async fn test_dispatches_ringing_call_to_the_event_hook() {
        let request = signed_request(call_params());

        let rendered = dispatch(&request, &config(), &EchoHandler)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(
            rendered.body,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<Response><Gather input=\"dtmf\"><Say voice=\"\" language=\"\">Welcome. Press 1 for business hours.</Say></Gather></Response>\n"
        );
    }

    #[tokio::test]
    async fn test_dispatches_digits_to_the_message_hook() {
        let mut params = call_params();
        params.insert("Digits".to_string(), "1".to_string());
        let request = signed_request(params);

        let rendered = dispatch(&request, &config(), &EchoHandler)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(
            rendered.body,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<Response><Say voice=\"\" language=\"\">you said 1</Say></Response>\n"
        );
    }

    #[tokio::test]
    async fn test_unsigned_request_matches_no_driver() {
        let request = WebhookRequest::new(URI, "forged", sms_params());

        let rendered = dispatch(&request, &config(), &EchoHandler).await.unwrap();
        assert!(rendered.is_none());
    }

    #[tokio::test]
    async fn test_silent_handler_yields_empty_response() {
        let request = signed_request(sms_params());

        let rendered = dispatch(&request, &config(), &SilentHandler)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(
            rendered.body,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<Response></Response>\n"
        );
    }
}
