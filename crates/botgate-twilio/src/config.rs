//! Twilio channel configuration
//!
//! Settings are read from environment variables (`TWILIO_*`) or a TOML
//! file with a `[twilio]` table. The auth token is required for
//! signature validation; everything else has a usable default.

use std::env;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TwilioError};

/// Voices supported by Twilio's `<Say>` verb.
pub mod voices {
    pub const MAN: &str = "man";
    pub const WOMAN: &str = "woman";
    pub const ALICE: &str = "alice";
}

/// Input accepted by a `<Gather>` prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InputMode {
    #[default]
    #[serde(rename = "dtmf")]
    Dtmf,
    #[serde(rename = "speech")]
    Speech,
    #[serde(rename = "dtmf speech")]
    DtmfSpeech,
}

impl InputMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputMode::Dtmf => "dtmf",
            InputMode::Speech => "speech",
            InputMode::DtmfSpeech => "dtmf speech",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "dtmf" => Some(InputMode::Dtmf),
            "speech" => Some(InputMode::Speech),
            "dtmf speech" => Some(InputMode::DtmfSpeech),
            _ => None,
        }
    }
}

/// Twilio channel configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TwilioConfig {
    /// Account SID, used when originating messages
    #[serde(default)]
    pub sid: String,

    /// Auth token, used for signature validation and API auth
    #[serde(default)]
    pub token: String,

    /// Number used as sender when originating messages
    #[serde(default)]
    pub from_number: String,

    /// Default `<Say>` voice
    #[serde(default)]
    pub voice: String,

    /// Default `<Say>` language
    #[serde(default)]
    pub language: String,

    /// Default `<Gather>` input mode
    #[serde(default)]
    pub input: InputMode,

    /// Public URL of the webhook endpoint, as Twilio signs it
    #[serde(default)]
    pub webhook_url: String,
}

#[derive(Deserialize)]
struct ConfigFile {
    #[serde(default)]
    twilio: TwilioConfig,
}

impl TwilioConfig {
    /// Load from `TWILIO_*` environment variables.
    pub fn from_env() -> Self {
        let var = |name: &str| env::var(name).unwrap_or_default();

        Self {
            sid: var("TWILIO_SID"),
            token: var("TWILIO_TOKEN"),
            from_number: var("TWILIO_FROM_NUMBER"),
            voice: var("TWILIO_VOICE"),
            language: var("TWILIO_LANGUAGE"),
            input: env::var("TWILIO_INPUT")
                .ok()
                .as_deref()
                .and_then(InputMode::parse)
                .unwrap_or_default(),
            webhook_url: var("TWILIO_WEBHOOK_URL"),
        }
    }

    /// Load the `[twilio]` table from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| TwilioError::Config(format!("cannot read config file: {}", e)))?;
        let file: ConfigFile = toml::from_str(&content)
            .map_err(|e| TwilioError::Config(format!("cannot parse config file: {}", e)))?;
        Ok(file.twilio)
    }

    /// Reject configurations that cannot validate webhook signatures.
    pub fn validate(&self) -> Result<()> {
        if self.token.is_empty() {
            return Err(TwilioError::Config("auth token not set".to_string()));
        }
        Ok(())
    }
}
