// HTTP routes configuration
// Author: kelexine (https://github.com/kelexine)

use super::handlers::{
    create_comment_handler, delete_comments_handler, health_handler, list_comments_handler,
    metrics_handler,
};
use super::middleware::assign_correlation_id;
use crate::adapter::AdapterClient;
use crate::config::AppConfig;
use crate::error::Result;
use crate::logger::LoggerClient;
use crate::utils::http::build_client;
use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Comment bodies are small; anything larger is refused with 413.
const MAX_BODY_BYTES: usize = 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub adapter: AdapterClient,
    pub logger: LoggerClient,
}

impl AppState {
    /// Build both outbound clients on one shared connection pool.
    pub fn from_config(config: AppConfig) -> Result<Self> {
        let http_client = build_client()?;
        Ok(Self {
            adapter: AdapterClient::new(&config, http_client.clone()),
            logger: LoggerClient::new(&config, http_client),
            config: Arc::new(config),
        })
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route(
            "/orgs/:org_id/comments",
            get(list_comments_handler)
                .post(create_comment_handler)
                .delete(delete_comments_handler),
        )
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(assign_correlation_id))
        .with_state(state)
}
