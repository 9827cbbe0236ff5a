// HTTP middleware
// Author: kelexine (https://github.com/kelexine)

use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::Instrument;
use uuid::Uuid;

pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Correlation id of the request being served.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorrelationId(pub Uuid);

/// Assign a fresh correlation id to every request.
///
/// Client-supplied `x-request-id` headers are ignored. The id is handed to
/// handlers as an extension, attached to the request span and echoed in the
/// response headers.
pub async fn assign_correlation_id(mut request: Request, next: Next) -> Response {
    let id = Uuid::new_v4();
    request.extensions_mut().insert(CorrelationId(id));

    let span = tracing::info_span!("request", req_id = %id);
    let mut response = next.run(request).instrument(span).await;

    if let Ok(value) = HeaderValue::from_str(&id.to_string()) {
        response.headers_mut().insert(X_REQUEST_ID, value);
    }
    response
}
