//! Comment records as stored by the database adapter.
//!
//! Comments are soft-filtered through `visible`: reads always ask for visible
//! records only, while deletes address the whole organization.

// Author: kelexine (https://github.com/kelexine)

use crate::error::{AppError, Result};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// A comment document inserted through the adapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Document identifier. Currently the request's correlation id.
    pub doc_id: Uuid,

    pub org_id: String,

    /// Relayed verbatim from the request body; omitted when the caller sent none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<Value>,

    /// ISO-8601 UTC timestamp with millisecond precision.
    pub created_at: String,

    pub visible: bool,
}

impl Comment {
    /// Build a new visible comment stamped with the current UTC time.
    pub fn new(doc_id: Uuid, org_id: impl Into<String>, comment: Option<Value>) -> Self {
        Self {
            doc_id,
            org_id: org_id.into(),
            comment,
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            visible: true,
        }
    }
}

/// Read filter: visible comments of one organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadFilter {
    pub org_id: String,
    pub visible: bool,
}

impl ReadFilter {
    pub fn visible_for(org_id: impl Into<String>) -> Self {
        Self {
            org_id: org_id.into(),
            visible: true,
        }
    }
}

/// Delete filter: every comment of one organization, regardless of visibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteFilter {
    pub org_id: String,
}

impl DeleteFilter {
    pub fn all_for(org_id: impl Into<String>) -> Self {
        Self {
            org_id: org_id.into(),
        }
    }
}

/// A comment as returned to API callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub comment: Value,
    pub created_at: Value,
}

impl CommentView {
    /// Shape one adapter record, substituting `""` for a missing comment and
    /// `"N/A"` for a missing creation time.
    pub fn from_record(record: &Value) -> Self {
        let comment = record
            .get("comment")
            .filter(|v| is_truthy(v))
            .cloned()
            .unwrap_or_else(|| Value::String(String::new()));
        let created_at = record
            .get("createdAt")
            .filter(|v| is_truthy(v))
            .cloned()
            .unwrap_or_else(|| Value::String("N/A".to_string()));

        Self {
            comment,
            created_at,
        }
    }
}

/// Shape the `payload` array of a read response.
///
/// Anything other than an array, or an array holding a `null` record, means
/// the adapter broke its contract and the read is treated as failed.
pub fn shape_records(payload: Option<&Value>) -> Result<Vec<CommentView>> {
    match payload {
        Some(Value::Array(records)) => records
            .iter()
            .enumerate()
            .map(|(i, record)| match record {
                Value::Null => Err(AppError::Decode(format!("read payload record {} is null", i))),
                record => Ok(CommentView::from_record(record)),
            })
            .collect(),
        Some(other) => Err(AppError::Decode(format!(
            "read payload must be an array, got {}",
            json_type(other)
        ))),
        None => Err(AppError::Decode("read response has no payload".to_string())),
    }
}

// null, false, 0 and "" count as absent
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
