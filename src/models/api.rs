//! Request and response bodies of the comments API.

// Author: kelexine (https://github.com/kelexine)

use crate::error::{AppError, Result};
use crate::models::comment::CommentView;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Status reported when the adapter call did not succeed.
pub const STATUS_FAILED: &str = "Failed";

/// Body of `POST /orgs/{orgId}/comments`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateCommentRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<Value>,
}

/// How a request body is decoded, chosen from its `Content-Type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyFormat {
    Json,
    Form,
    /// Any other or missing content type; the body is not read.
    Ignored,
}

impl BodyFormat {
    pub fn from_content_type(content_type: Option<&str>) -> Self {
        let essence = content_type
            .and_then(|ct| ct.split(';').next())
            .map(|ct| ct.trim().to_ascii_lowercase());

        match essence.as_deref() {
            Some("application/json") => BodyFormat::Json,
            Some("application/x-www-form-urlencoded") => BodyFormat::Form,
            _ => BodyFormat::Ignored,
        }
    }
}

impl CreateCommentRequest {
    /// Decode a raw request body according to its format.
    ///
    /// An empty body reads as `{}`, as does any body that is neither JSON nor
    /// form encoded. Only malformed JSON or form data is rejected.
    pub fn parse(format: BodyFormat, body: &[u8]) -> Result<(Value, Self)> {
        let raw = match format {
            _ if body.iter().all(u8::is_ascii_whitespace) => Value::Object(Map::new()),
            BodyFormat::Json => serde_json::from_slice::<Value>(body)
                .map_err(|e| AppError::InvalidRequest(format!("JSON deserialization error: {}", e)))?,
            BodyFormat::Form => Value::Object(parse_form(body)?),
            BodyFormat::Ignored => Value::Object(Map::new()),
        };

        let request = Self {
            comment: raw.get("comment").cloned(),
        };
        Ok((raw, request))
    }
}

// Repeated keys collect into an array, like `a=1&a=2` -> {"a": ["1", "2"]}
fn parse_form(body: &[u8]) -> Result<Map<String, Value>> {
    let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(body)
        .map_err(|e| AppError::InvalidRequest(format!("form deserialization error: {}", e)))?;

    let mut fields = Map::new();
    for (key, value) in pairs {
        let value = Value::String(value);
        match fields.get_mut(&key) {
            Some(Value::Array(values)) => values.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
            None => {
                fields.insert(key, value);
            }
        }
    }
    Ok(fields)
}

/// Response of the create and delete endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationResponse {
    pub req_id: Uuid,
    pub service: String,
    pub status: String,
}

impl OperationResponse {
    pub fn new(req_id: Uuid, service: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            req_id,
            service: service.into(),
            status: status.into(),
        }
    }

    pub fn failed(req_id: Uuid, service: impl Into<String>) -> Self {
        Self::new(req_id, service, STATUS_FAILED)
    }
}

/// Response of the list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListCommentsResponse {
    #[serde(flatten)]
    pub outcome: OperationResponse,
    pub comments: Vec<CommentView>,
}

impl ListCommentsResponse {
    /// A failed read never carries comments.
    pub fn failed(req_id: Uuid, service: impl Into<String>) -> Self {
        Self {
            outcome: OperationResponse::failed(req_id, service),
            comments: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_takes_comment_verbatim() {
        let (raw, req) =
            CreateCommentRequest::parse(BodyFormat::Json, br#"{"comment":"<b>hi</b>","extra":1}"#).unwrap();
        assert_eq!(req.comment, Some(json!("<b>hi</b>")));
        assert_eq!(raw["extra"], 1);
    }

    #[test]
    fn test_parse_empty_body() {
        let (raw, req) = CreateCommentRequest::parse(BodyFormat::Json, b"").unwrap();
        assert_eq!(raw, json!({}));
        assert_eq!(req.comment, None);
    }

    #[test]
    fn test_parse_rejects_malformed_json() {
        let err = CreateCommentRequest::parse(BodyFormat::Json, b"{comment: hi").unwrap_err();
        assert!(matches!(err, AppError::InvalidRequest(_)));
    }

    #[test]
    fn test_parse_form_body() {
        let (raw, req) =
            CreateCommentRequest::parse(BodyFormat::Form, b"comment=hello+there&tag=a&tag=b").unwrap();
        assert_eq!(req.comment, Some(json!("hello there")));
        assert_eq!(raw["tag"], json!(["a", "b"]));
    }

    #[test]
    fn test_parse_ignores_other_content() {
        let (raw, req) = CreateCommentRequest::parse(BodyFormat::Ignored, b"hello there").unwrap();
        assert_eq!(raw, json!({}));
        assert_eq!(req.comment, None);
    }

    #[test]
    fn test_body_format_from_content_type() {
        assert_eq!(BodyFormat::from_content_type(Some("application/json")), BodyFormat::Json);
        assert_eq!(
            BodyFormat::from_content_type(Some("Application/JSON; charset=utf-8")),
            BodyFormat::Json
        );
        assert_eq!(
            BodyFormat::from_content_type(Some("application/x-www-form-urlencoded")),
            BodyFormat::Form
        );
        assert_eq!(BodyFormat::from_content_type(Some("text/plain")), BodyFormat::Ignored);
        assert_eq!(BodyFormat::from_content_type(None), BodyFormat::Ignored);
    }

    #[test]
    fn test_operation_response_shape() {
        let id = Uuid::new_v4();
        let json = serde_json::to_value(OperationResponse::new(id, "comment-app", "OK")).unwrap();
        assert_eq!(json, json!({"reqId": id.to_string(), "service": "comment-app", "status": "OK"}));
    }

    #[test]
    fn test_failed_list_response_shape() {
        let id = Uuid::new_v4();
        let json = serde_json::to_value(ListCommentsResponse::failed(id, "comment-app")).unwrap();
        assert_eq!(
            json,
            json!({"reqId": id.to_string(), "service": "comment-app", "status": "Failed", "comments": []})
        );
    }
}
