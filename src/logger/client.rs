// Logger service client
// Author: kelexine (https://github.com/kelexine)

use super::LogEvent;
use crate::config::AppConfig;
use crate::error::{AppError, Result};
use reqwest::{header::CONTENT_TYPE, Client};
use serde::Serialize;
use tracing::{info, trace};
use uuid::Uuid;

/// Client for the audit logger service.
#[derive(Clone)]
pub struct LoggerClient {
    http_client: Client,
    uri: String,
    service: String,
}

impl LoggerClient {
    pub fn new(config: &AppConfig, http_client: Client) -> Self {
        Self {
            http_client,
            uri: config.logger_app_uri.clone(),
            service: config.app_name.clone(),
        }
    }

    /// Service name stamped on every event.
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Dispatch an event without waiting for it.
    ///
    /// The event is mirrored to the local trace output, then POSTed from a
    /// detached task that may finish after the request has been answered.
    pub fn log(&self, mut event: LogEvent) {
        event.service = self.service.clone();
        info!(req_id = %event.id, method = %event.method, "{}", event.message);

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let client = self.clone();
                handle.spawn(async move {
                    let _ = client.deliver(&event).await;
                });
            }
            Err(_) => trace!("No runtime available, audit event dropped"),
        }
    }

    /// Send one event and wait for the logger's answer.
    pub async fn deliver(&self, event: &LogEvent) -> Result<()> {
        let result = self.post(event).await;
        crate::metrics::record_log_event(result.is_ok());
        if let Err(e) = &result {
            trace!("Audit event {} not delivered: {}", event.id, e);
        }
        result
    }

    async fn post(&self, event: &LogEvent) -> Result<()> {
        let response = self
            .http_client
            .post(&self.uri)
            .header(CONTENT_TYPE, "application/json")
            .json(event)
            .send()
            .await
            .map_err(|e| AppError::Transport {
                uri: self.uri.clone(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Status {
                uri: self.uri.clone(),
                status: status.as_u16(),
            });
        }
        Ok(())
    }

    /// Events of one request share its correlation id and method line.
    pub fn scope(&self, id: Uuid, method: impl Into<String>) -> EventScope<'_> {
        EventScope {
            logger: self,
            id,
            method: method.into(),
        }
    }
}

/// Audit logger bound to a single request.
pub struct EventScope<'a> {
    logger: &'a LoggerClient,
    id: Uuid,
    method: String,
}

impl EventScope<'_> {
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Log a message without payload.
    pub fn note(&self, message: impl Into<String>) {
        self.logger.log(LogEvent::new(self.id, self.method.clone(), message));
    }

    /// Log a message with a JSON payload.
    pub fn record<T: Serialize + ?Sized>(&self, message: impl Into<String>, payload: &T) {
        let event = LogEvent::new(self.id, self.method.clone(), message);
        let event = match serde_json::to_value(payload) {
            Ok(value) => event.with_payload(value),
            Err(_) => event,
        };
        self.logger.log(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;
    use std::time::Duration;

    fn logger_for(uri: String) -> LoggerClient {
        let config = AppConfig {
            app_name: "comment-app".to_string(),
            logger_app_uri: uri,
            ..AppConfig::default()
        };
        LoggerClient::new(&config, Client::new())
    }

    #[tokio::test]
    async fn test_log_stamps_service_and_posts_in_background() {
        let mut server = mockito::Server::new_async().await;
        let id = Uuid::new_v4();
        let mock = server
            .mock("POST", "/logs")
            .match_header("content-type", "application/json")
            .match_body(Matcher::PartialJson(json!({
                "id": id.to_string(),
                "method": "GET /orgs/1/comments",
                "message": "Receive get comments request",
                "service": "comment-app"
            })))
            .with_status(200)
            .expect(1)
            .create_async()
            .await;

        let logger = logger_for(format!("{}/logs", server.url()));
        logger.log(LogEvent::new(id, "GET /orgs/1/comments", "Receive get comments request"));

        // log() returns before delivery; wait for the detached task
        for _ in 0..50 {
            if mock.matched_async().await {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_scope_records_payload() {
        let mut server = mockito::Server::new_async().await;
        let id = Uuid::new_v4();
        let mock = server
            .mock("POST", "/logs")
            .match_body(Matcher::PartialJson(json!({
                "id": id.to_string(),
                "message": "Request constructed",
                "payload": {"orgId": "42"}
            })))
            .with_status(200)
            .create_async()
            .await;

        let logger = logger_for(format!("{}/logs", server.url()));
        logger
            .scope(id, "DELETE /orgs/42/comments")
            .record("Request constructed", &json!({"orgId": "42"}));

        for _ in 0..50 {
            if mock.matched_async().await {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_deliver_reports_failures() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/logs")
            .with_status(500)
            .create_async()
            .await;

        let logger = logger_for(format!("{}/logs", server.url()));
        let event = LogEvent::new(Uuid::new_v4(), "POST /orgs/1/comments", "x");
        let err = logger.deliver(&event).await.unwrap_err();
        assert!(matches!(err, AppError::Status { status: 500, .. }));

        let offline = logger_for("http://127.0.0.1:9/logs".to_string());
        let err = offline.deliver(&event).await.unwrap_err();
        assert!(matches!(err, AppError::Transport { .. }));
    }

    #[tokio::test]
    async fn test_log_never_fails_when_logger_is_down() {
        let logger = logger_for("http://127.0.0.1:9/logs".to_string());
        logger.log(LogEvent::new(Uuid::new_v4(), "GET /orgs/1/comments", "ignored"));
        logger
            .scope(Uuid::new_v4(), "GET /orgs/1/comments")
            .note("also ignored");
    }

    #[test]
    fn test_log_outside_runtime_is_dropped() {
        let logger = logger_for("http://127.0.0.1:9/logs".to_string());
        logger.log(LogEvent::new(Uuid::new_v4(), "GET /orgs/1/comments", "dropped"));
    }
}
