//! Audit logging to the external logger service.
//!
//! Every step of a comment request is reported as a [`LogEvent`] tied to the
//! request's correlation id. Delivery is fire-and-forget: events are sent on
//! detached tasks, their outcome is never observed by the request, and a
//! broken logger service does not change any response.
//!
//! Author: kelexine (<https://github.com/kelexine>)

mod client;

pub use client::{EventScope, LoggerClient};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// One audit event as accepted by the logger service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEvent {
    /// Correlation id of the request that produced the event.
    pub id: Uuid,

    /// `"<HTTP verb> <original URI>"` of that request.
    pub method: String,

    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,

    /// Filled in by [`LoggerClient::log`] from the configured service name.
    #[serde(default)]
    pub service: String,
}

impl LogEvent {
    pub fn new(id: Uuid, method: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id,
            method: method.into(),
            message: message.into(),
            payload: None,
            service: String::new(),
        }
    }

    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }
}
