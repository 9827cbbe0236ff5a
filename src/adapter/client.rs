// Database adapter HTTP client
// Author: kelexine (https://github.com/kelexine)

use super::{AdapterRequest, AdapterResponse, Operation};
use crate::config::AppConfig;
use crate::error::{AppError, Result};
use reqwest::{header::CONTENT_TYPE, Client, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Instant;
use tracing::{debug, error};
use uuid::Uuid;

/// Client for the database adapter service.
///
/// Holds the three operation endpoints and the database/collection every
/// request is addressed to. Calls are awaited by the handler and carry no
/// deadline: a hung adapter hangs the request.
#[derive(Clone)]
pub struct AdapterClient {
    http_client: Client,
    database: String,
    collection: String,
    insert_uri: String,
    read_uri: String,
    delete_uri: String,
}

impl AdapterClient {
    pub fn new(config: &AppConfig, http_client: Client) -> Self {
        Self {
            http_client,
            database: config.comments_database_name.clone(),
            collection: config.comments_collection_name.clone(),
            insert_uri: config.dbadapter_insert_uri.clone(),
            read_uri: config.dbadapter_read_uri.clone(),
            delete_uri: config.dbadapter_delete_uri.clone(),
        }
    }

    /// Endpoint serving the given operation
    pub fn uri(&self, operation: Operation) -> &str {
        match operation {
            Operation::Insert => &self.insert_uri,
            Operation::Read => &self.read_uri,
            Operation::Delete => &self.delete_uri,
        }
    }

    /// Wrap an operation payload in the adapter envelope.
    pub fn request<P>(&self, req_id: Uuid, payload: P) -> AdapterRequest<P> {
        AdapterRequest {
            req_id,
            database: self.database.clone(),
            collection: self.collection.clone(),
            payload,
        }
    }

    /// POST `body` as JSON to `uri` and decode the JSON reply.
    ///
    /// Anything but HTTP 200 is an error, as is a network failure or a body
    /// that does not decode into `R`.
    pub async fn send<B, R>(&self, uri: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        debug!("POST {}", uri);

        let response = self
            .http_client
            .post(uri)
            .header(CONTENT_TYPE, "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::Transport {
                uri: uri.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            let error_text = response.text().await.unwrap_or_default();
            error!("Adapter error: HTTP {} from {} - Response body: {}", status, uri, error_text);
            return Err(AppError::Status {
                uri: uri.to_string(),
                status: status.as_u16(),
            });
        }

        let response_text = response.text().await.map_err(|e| AppError::Transport {
            uri: uri.to_string(),
            reason: format!("failed to read response body: {}", e),
        })?;

        serde_json::from_str(&response_text).map_err(|e| {
            error!("Failed to parse adapter response: {}", e);
            AppError::Decode(format!("adapter response from {}: {}", uri, e))
        })
    }

    /// Run one operation against its endpoint and record call metrics.
    pub async fn call<P: Serialize>(
        &self,
        operation: Operation,
        request: &AdapterRequest<P>,
    ) -> Result<AdapterResponse> {
        let start = Instant::now();
        let result = self.send(self.uri(operation), request).await;
        crate::metrics::record_adapter_call(
            operation.as_str(),
            result.is_ok(),
            start.elapsed().as_secs_f64(),
        );
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::{json, Value};

    fn client_for(base: &str) -> AdapterClient {
        let config = AppConfig {
            dbadapter_insert_uri: format!("{}/insert", base),
            dbadapter_read_uri: format!("{}/read", base),
            dbadapter_delete_uri: format!("{}/delete", base),
            ..AppConfig::default()
        };
        AdapterClient::new(&config, Client::new())
    }

    #[tokio::test]
    async fn test_send_posts_json_and_parses_reply() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/read")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({"orgId": "42"})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"status":"OK","payload":[]}"#)
            .create_async()
            .await;

        let client = client_for(&server.url());
        let reply: Value = client
            .send(client.uri(Operation::Read), &json!({"orgId": "42"}))
            .await
            .unwrap();

        assert_eq!(reply, json!({"status": "OK", "payload": []}));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_200_is_status_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/insert")
            .with_status(201)
            .with_body(r#"{"status":"Created"}"#)
            .create_async()
            .await;

        let client = client_for(&server.url());
        let err = client
            .send::<_, Value>(client.uri(Operation::Insert), &json!({}))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Status { status: 201, .. }));
    }

    #[tokio::test]
    async fn test_unreachable_adapter_is_transport_error() {
        // Port 9 (discard) is not expected to accept connections
        let client = client_for("http://127.0.0.1:9");
        let err = client
            .send::<_, Value>(client.uri(Operation::Delete), &json!({}))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Transport { .. }));
    }

    #[tokio::test]
    async fn test_non_json_reply_is_decode_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/read")
            .with_status(200)
            .with_body("<html>oops</html>")
            .create_async()
            .await;

        let client = client_for(&server.url());
        let err = client
            .send::<_, Value>(client.uri(Operation::Read), &json!({}))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Decode(_)));
    }

    #[tokio::test]
    async fn test_call_wraps_envelope() {
        let mut server = mockito::Server::new_async().await;
        let id = Uuid::new_v4();
        let mock = server
            .mock("POST", "/delete")
            .match_body(Matcher::Json(json!({
                "reqId": id.to_string(),
                "database": "comments",
                "collection": "comments",
                "payload": {"orgId": "9"}
            })))
            .with_status(200)
            .with_body(r#"{"status":"OK"}"#)
            .create_async()
            .await;

        let client = client_for(&server.url());
        let request = client.request(id, json!({"orgId": "9"}));
        let response = client.call(Operation::Delete, &request).await.unwrap();

        assert_eq!(response.status, "OK");
        mock.assert_async().await;
    }
}
