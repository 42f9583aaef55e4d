//! botgate-core: channel-agnostic message model for botgate drivers
//!
//! This crate defines the generic types a channel driver translates to
//! and from: incoming messages, outgoing messages/questions, attachments,
//! users, driver events, and the `ChannelDriver` capability trait.

pub mod attachment;
pub mod driver;
pub mod event;
pub mod incoming;
pub mod outgoing;
pub mod user;

pub use attachment::Attachment;
pub use driver::{ChannelDriver, RenderedResponse, CONTENT_TYPE_JSON, CONTENT_TYPE_XML};
pub use event::{DriverEvent, EventPayload};
pub use incoming::{Answer, IncomingMessage};
pub use outgoing::{Button, OutgoingMessage, Question, Reply};
pub use user::User;
