// Database adapter client module
// Author: kelexine (https://github.com/kelexine)

mod client;

pub use client::AdapterClient;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// The three operations the adapter exposes, each on its own endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Insert,
    Read,
    Delete,
}

impl Operation {
    /// Label used in metrics and traces.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Insert => "insert",
            Operation::Read => "read",
            Operation::Delete => "delete",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Envelope POSTed to every adapter endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdapterRequest<P> {
    pub req_id: Uuid,
    pub database: String,
    pub collection: String,
    pub payload: P,
}

/// Body returned by the adapter on HTTP 200
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdapterResponse {
    pub status: String,

    /// Records for reads; adapters may omit it otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,

    /// Anything else the adapter sent, kept for the audit trail.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
