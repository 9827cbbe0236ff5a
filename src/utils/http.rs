// Shared outbound HTTP client
// Author: kelexine (https://github.com/kelexine)

use crate::error::{AppError, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Build the pooled client used for both the adapter and the logger.
///
/// No request timeout is set: adapter calls wait for as long as the adapter
/// takes to answer.
pub fn build_client() -> Result<Client> {
    let client = Client::builder()
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(90))
        .tcp_keepalive(Some(Duration::from_secs(60)))
        .tcp_nodelay(true)
        .use_rustls_tls()
        .build()
        .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

    debug!("Created HTTP client with connection pooling and keep-alive");
    Ok(client)
}
