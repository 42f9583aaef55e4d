//! Webhook signature validation
//!
//! Twilio signs each webhook request with HMAC-SHA1 over the full
//! request URL followed by every POST parameter, sorted by name and
//! concatenated without delimiters, keyed with the account's auth token
//! and base64-encoded into the `X-Twilio-Signature` header.

use base64::{engine::general_purpose::STANDARD, Engine};
use hmac::{Hmac, Mac};
use sha1::Sha1;

use botgate_core::EventPayload;

type HmacSha1 = Hmac<Sha1>;

/// Validates webhook request signatures against the account auth token.
#[derive(Debug, Clone)]
pub struct RequestValidator {
    auth_token: String,
}

impl RequestValidator {
    pub fn new(auth_token: impl Into<String>) -> Self {
        Self {
            auth_token: auth_token.into(),
        }
    }

    /// Check a signature header against the request URL and form fields.
    ///
    /// Returns `false` on any mismatch, including a malformed header.
    pub fn validate(&self, signature: &str, url: &str, params: &EventPayload) -> bool {
        match self.sign(url, params) {
            Some(computed) => computed == signature,
            None => false,
        }
    }

    /// Compute the signature for a request, as Twilio would.
    pub fn sign(&self, url: &str, params: &EventPayload) -> Option<String> {
        let mut mac = HmacSha1::new_from_slice(self.auth_token.as_bytes()).ok()?;

        // BTreeMap iterates in key order, which is the signing order.
        let mut data = url.to_string();
        for (key, value) in params {
            data.push_str(key);
            data.push_str(value);
        }

        mac.update(data.as_bytes());
        Some(STANDARD.encode(mac.finalize().into_bytes()))
    }
}
