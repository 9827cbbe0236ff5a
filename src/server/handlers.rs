// HTTP request handlers
// Author: kelexine (https://github.com/kelexine)

use super::middleware::CorrelationId;
use super::routes::AppState;
use crate::adapter::Operation;
use crate::error::{AppError, Result};
use crate::logger::EventScope;
use crate::models::{
    shape_records, BodyFormat, Comment, CreateCommentRequest, DeleteFilter, ListCommentsResponse,
    OperationResponse, ReadFilter,
};
use axum::{
    body::Bytes,
    extract::{OriginalUri, Path, State},
    http::{header::CONTENT_TYPE, HeaderMap, Method, Uri},
    response::IntoResponse,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

const MSG_ORG_ID: &str = "Organization ID value: ";
const MSG_CONSTRUCTED: &str = "Request constructed";
const MSG_RECEIVED: &str = "Receive response from DBAdapter app";
const MSG_RETURNING: &str = "Returning response";
const MSG_RETURNING_FAILED: &str = "Returning failed response";

/// Audit messages that differ between operations.
struct Steps {
    construct: &'static str,
    send: &'static str,
    failure: &'static str,
}

fn steps(operation: Operation) -> Steps {
    match operation {
        Operation::Insert => Steps {
            construct: "Construct request for database insert",
            send: "Send insert request to DB Adapter app",
            failure: "Failed to insert data into database",
        },
        Operation::Read => Steps {
            construct: "Construct request for database read",
            send: "Send read request to DB Adapter app",
            failure: "Failed to read data from database",
        },
        Operation::Delete => Steps {
            construct: "Construct request for delete comments",
            send: "Send delete request to DB Adapter app",
            failure: "Failed to delete records from database",
        },
    }
}

fn method_line(method: &Method, uri: &Uri) -> String {
    format!("{} {}", method, uri)
}

fn record_failure(audit: &EventScope<'_>, operation: Operation, err: &AppError) {
    warn!(req_id = %audit.id(), "{} call failed: {}", operation, err);
    audit.record(steps(operation).failure, &err.log_payload());
}

fn finish<T: Serialize>(audit: &EventScope<'_>, operation: Operation, success: bool, response: &T) {
    let message = if success { MSG_RETURNING } else { MSG_RETURNING_FAILED };
    audit.record(message, response);
    crate::metrics::record_request(operation.as_str(), success);
}

/// Handler for `POST /orgs/{orgId}/comments`
///
/// Logical failures are reported in `status` with HTTP 200. JSON and form
/// bodies are decoded, anything else reads as `{}`; only malformed JSON or
/// form data is refused outright.
pub async fn create_comment_handler(
    State(state): State<AppState>,
    Extension(CorrelationId(req_id)): Extension<CorrelationId>,
    method: Method,
    OriginalUri(uri): OriginalUri,
    Path(org_id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<OperationResponse>> {
    let content_type = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok());
    let (raw, body) = CreateCommentRequest::parse(BodyFormat::from_content_type(content_type), &body)?;
    let steps = steps(Operation::Insert);
    let audit = state.logger.scope(req_id, method_line(&method, &uri));

    audit.record("Receive request with parameters", &raw);
    audit.note(format!("{}{}", MSG_ORG_ID, org_id));
    audit.note(steps.construct);

    // The correlation id doubles as the document id
    let request = state
        .adapter
        .request(req_id, Comment::new(req_id, org_id, body.comment));
    audit.record(MSG_CONSTRUCTED, &request);
    audit.note(steps.send);

    let service = state.logger.service();
    let (success, response) = match state.adapter.call(Operation::Insert, &request).await {
        Ok(reply) => {
            audit.record(MSG_RECEIVED, &reply);
            (true, OperationResponse::new(req_id, service, reply.status))
        }
        Err(e) => {
            record_failure(&audit, Operation::Insert, &e);
            (false, OperationResponse::failed(req_id, service))
        }
    };

    finish(&audit, Operation::Insert, success, &response);
    Ok(Json(response))
}

/// Handler for `GET /orgs/{orgId}/comments`
///
/// Only visible comments are requested from the adapter.
pub async fn list_comments_handler(
    State(state): State<AppState>,
    Extension(CorrelationId(req_id)): Extension<CorrelationId>,
    method: Method,
    OriginalUri(uri): OriginalUri,
    Path(org_id): Path<String>,
) -> Json<ListCommentsResponse> {
    let steps = steps(Operation::Read);
    let audit = state.logger.scope(req_id, method_line(&method, &uri));

    audit.note("Receive get comments request");
    audit.note(format!("{}{}", MSG_ORG_ID, org_id));
    audit.note(steps.construct);

    let request = state.adapter.request(req_id, ReadFilter::visible_for(org_id));
    audit.record(MSG_CONSTRUCTED, &request);
    audit.note(steps.send);

    let service = state.logger.service();
    let outcome = state
        .adapter
        .call(Operation::Read, &request)
        .await
        .and_then(|reply| {
            audit.record(MSG_RECEIVED, &reply);
            let comments = shape_records(reply.payload.as_ref())?;
            Ok(ListCommentsResponse {
                outcome: OperationResponse::new(req_id, service, reply.status),
                comments,
            })
        });

    let (success, response) = match outcome {
        Ok(response) => (true, response),
        Err(e) => {
            record_failure(&audit, Operation::Read, &e);
            (false, ListCommentsResponse::failed(req_id, service))
        }
    };

    finish(&audit, Operation::Read, success, &response);
    Json(response)
}

/// Handler for `DELETE /orgs/{orgId}/comments`
///
/// Removes every comment of the organization, visible or not.
pub async fn delete_comments_handler(
    State(state): State<AppState>,
    Extension(CorrelationId(req_id)): Extension<CorrelationId>,
    method: Method,
    OriginalUri(uri): OriginalUri,
    Path(org_id): Path<String>,
) -> Json<OperationResponse> {
    let steps = steps(Operation::Delete);
    let audit = state.logger.scope(req_id, method_line(&method, &uri));

    audit.note("Receive delete comments request");
    audit.note(format!("{}{}", MSG_ORG_ID, org_id));
    audit.note(steps.construct);

    let request = state.adapter.request(req_id, DeleteFilter::all_for(org_id));
    audit.record(MSG_CONSTRUCTED, &request);
    audit.note(steps.send);

    let service = state.logger.service();
    let (success, response) = match state.adapter.call(Operation::Delete, &request).await {
        Ok(reply) => {
            audit.record(MSG_RECEIVED, &reply);
            (true, OperationResponse::new(req_id, service, reply.status))
        }
        Err(e) => {
            record_failure(&audit, Operation::Delete, &e);
            (false, OperationResponse::failed(req_id, service))
        }
    };

    finish(&audit, Operation::Delete, success, &response);
    Json(response)
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub checks: HashMap<String, HealthCheck>,
    pub timestamp: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheck {
    pub status: String,
    pub message: String,
}

/// Reports the configured collaborators. Downstream services are not contacted.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let mut checks = HashMap::new();

    checks.insert(
        "database_adapter".to_string(),
        HealthCheck {
            status: "ok".to_string(),
            message: format!(
                "insert={} read={} delete={}",
                state.adapter.uri(Operation::Insert),
                state.adapter.uri(Operation::Read),
                state.adapter.uri(Operation::Delete)
            ),
        },
    );
    checks.insert(
        "logger".to_string(),
        HealthCheck {
            status: "ok".to_string(),
            message: format!("Audit events sent to {}", state.config.logger_app_uri),
        },
    );
    checks.insert(
        "storage_target".to_string(),
        HealthCheck {
            status: "ok".to_string(),
            message: format!(
                "{}/{}",
                state.config.comments_database_name, state.config.comments_collection_name
            ),
        },
    );

    Json(HealthResponse {
        status: "healthy".to_string(),
        service: state.config.app_name.clone(),
        checks,
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Prometheus text exposition
pub async fn metrics_handler() -> impl IntoResponse {
    (
        [(CONTENT_TYPE, "text/plain; version=0.0.4")],
        crate::metrics::gather_metrics(),
    )
}
