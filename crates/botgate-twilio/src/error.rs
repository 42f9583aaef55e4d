//! Error types for botgate-twilio

use thiserror::Error;

/// botgate-twilio error type
#[derive(Error, Debug)]
pub enum TwilioError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Twilio API error: {0}")]
    Api(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Invalid webhook payload: {0}")]
    InvalidPayload(String),
}

impl From<reqwest::Error> for TwilioError {
    fn from(err: reqwest::Error) -> Self {
        TwilioError::Http(err.to_string())
    }
}

impl From<serde_json::Error> for TwilioError {
    fn from(err: serde_json::Error) -> Self {
        TwilioError::Api(err.to_string())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, TwilioError>;
