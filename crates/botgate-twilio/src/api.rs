//! Twilio REST API client
//!
//! Used only to originate a new message when an outbound send is not a
//! reply to an inbound webhook.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Result, TwilioError};

/// Twilio REST API client
#[derive(Debug, Clone)]
pub struct TwilioClient {
    client: Client,
    account_sid: String,
    auth_token: String,
    base_url: String,
}

/// Message resource returned by the Messages endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResource {
    pub sid: String,
    pub status: String,
    #[serde(default)]
    pub from: Option<String>,
    pub to: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub date_created: Option<String>,
    #[serde(default)]
    pub error_code: Option<i32>,
    #[serde(default)]
    pub error_message: Option<String>,
}

impl TwilioClient {
    /// Create a new client for an account.
    pub fn new(account_sid: impl Into<String>, auth_token: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            account_sid: account_sid.into(),
            auth_token: auth_token.into(),
            base_url: "https://api.twilio.com".to_string(),
        }
    }

    /// Originate a message. Failures surface as-is; there is no retry.
    pub async fn create_message(
        &self,
        from: &str,
        to: &str,
        body: &str,
        media_url: Option<&str>,
    ) -> Result<MessageResource> {
        info!("Originating message to {}", to);

        let url = format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.base_url, self.account_sid
        );

        let mut form = vec![("From", from), ("To", to), ("Body", body)];
        if let Some(media) = media_url {
            form.push(("MediaUrl", media));
        }

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&form)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(TwilioError::Api(format!(
                "Failed to create message: {} - {}",
                status, text
            )));
        }

        Ok(response.json().await?)
    }
}
