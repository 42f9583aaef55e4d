//! User model

use serde::{Deserialize, Serialize};

/// The user behind an incoming message.
///
/// Providers that expose no profile data in their webhook payloads leave
/// everything but `id` unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

impl User {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            first_name: None,
            last_name: None,
            username: None,
        }
    }
}
