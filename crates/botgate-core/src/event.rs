//! Driver events
//!
//! Some channels report happenings that are not messages (an incoming
//! call ringing, a user joining). Drivers surface those as named events
//! carrying the raw webhook payload.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Raw field map decoded from a webhook form body.
pub type EventPayload = BTreeMap<String, String>;

/// A named channel event with its source payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverEvent {
    pub name: String,
    pub payload: EventPayload,
}

impl DriverEvent {
    pub fn new(name: impl Into<String>, payload: EventPayload) -> Self {
        Self {
            name: name.into(),
            payload,
        }
    }
}
