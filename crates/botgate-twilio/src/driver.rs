//! Shared per-request driver state
//!
//! Both Twilio drivers work off the same request material: the decoded
//! form payload, the signed request URL, the signature header, and the
//! channel configuration. `RequestContext` owns that state together
//! with the memoized normalized message list.

use std::sync::OnceLock;

use botgate_core::{EventPayload, IncomingMessage};

use crate::config::TwilioConfig;
use crate::signature::RequestValidator;

/// One parsed webhook request, as delivered by the HTTP layer.
#[derive(Debug, Clone, Default)]
pub struct WebhookRequest {
    /// Full request URL as signed by the provider
    pub uri: String,
    /// Value of the `X-Twilio-Signature` header, empty when absent
    pub signature: String,
    /// Decoded form fields
    pub params: EventPayload,
}

impl WebhookRequest {
    pub fn new(
        uri: impl Into<String>,
        signature: impl Into<String>,
        params: EventPayload,
    ) -> Self {
        Self {
            uri: uri.into(),
            signature: signature.into(),
            params,
        }
    }
}

/// Request-scoped state shared by the voice and message drivers.
pub(crate) struct RequestContext {
    request: WebhookRequest,
    config: TwilioConfig,
    messages: OnceLock<Vec<IncomingMessage>>,
}

impl RequestContext {
    pub(crate) fn new(request: WebhookRequest, config: TwilioConfig) -> Self {
        Self {
            request,
            config,
            messages: OnceLock::new(),
        }
    }

    pub(crate) fn config(&self) -> &TwilioConfig {
        &self.config
    }

    pub(crate) fn field(&self, key: &str) -> &str {
        self.request
            .params
            .get(key)
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub(crate) fn has(&self, key: &str) -> bool {
        self.request.params.contains_key(key)
    }

    pub(crate) fn payload(&self) -> &EventPayload {
        &self.request.params
    }

    pub(crate) fn is_signature_valid(&self) -> bool {
        RequestValidator::new(&self.config.token).validate(
            &self.request.signature,
            &self.request.uri,
            &self.request.params,
        )
    }

    /// Normalized message list, built once per request. Later calls
    /// return the same allocation, so message references stay stable
    /// for the request's lifetime.
    pub(crate) fn messages_with(
        &self,
        build: impl FnOnce() -> IncomingMessage,
    ) -> &[IncomingMessage] {
        self.messages.get_or_init(|| vec![build()])
    }
}
