//! Configuration data structures for the comment service.
//!
//! The field names mirror the environment variables the service is deployed
//! with (`APP_NAME`, `DBADAPTER_INSERT_URI`, ...), lower-cased.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use serde::{Deserialize, Serialize};

/// The root configuration object for the application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Service name stamped on every response and audit event.
    /// Default: `comment-app`
    #[serde(default = "default_app_name")]
    pub app_name: String,

    /// The IP address or hostname the server should bind to.
    /// Default: `0.0.0.0`
    #[serde(default = "default_app_host")]
    pub app_host: String,

    /// The port number the server should listen on.
    /// Default: `3000`
    #[serde(default = "default_app_port")]
    pub app_port: u16,

    /// Endpoint of the audit logger service.
    #[serde(default = "default_logger_app_uri")]
    pub logger_app_uri: String,

    /// Database adapter endpoint used to insert comments.
    #[serde(default = "default_dbadapter_insert_uri")]
    pub dbadapter_insert_uri: String,

    /// Database adapter endpoint used to read comments.
    #[serde(default = "default_dbadapter_read_uri")]
    pub dbadapter_read_uri: String,

    /// Database adapter endpoint used to delete comments.
    #[serde(default = "default_dbadapter_delete_uri")]
    pub dbadapter_delete_uri: String,

    /// Database the adapter should target.
    #[serde(default = "default_comments_database_name")]
    pub comments_database_name: String,

    /// Collection the adapter should target.
    #[serde(default = "default_comments_collection_name")]
    pub comments_collection_name: String,

    /// Minimum log level (`trace`, `debug`, `info`, `warn`, `error`).
    /// Default: `info`
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Output format for logs (`pretty`, `json`).
    /// Default: `pretty`
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_name: default_app_name(),
            app_host: default_app_host(),
            app_port: default_app_port(),
            logger_app_uri: default_logger_app_uri(),
            dbadapter_insert_uri: default_dbadapter_insert_uri(),
            dbadapter_read_uri: default_dbadapter_read_uri(),
            dbadapter_delete_uri: default_dbadapter_delete_uri(),
            comments_database_name: default_comments_database_name(),
            comments_collection_name: default_comments_collection_name(),
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

fn default_app_name() -> String {
    "comment-app".to_string()
}

fn default_app_host() -> String {
    "0.0.0.0".to_string()
}

fn default_app_port() -> u16 {
    3000
}

fn default_logger_app_uri() -> String {
    "http://localhost:3001/logs".to_string()
}

fn default_dbadapter_insert_uri() -> String {
    "http://localhost:3002/insert".to_string()
}

fn default_dbadapter_read_uri() -> String {
    "http://localhost:3002/read".to_string()
}

fn default_dbadapter_delete_uri() -> String {
    "http://localhost:3002/delete".to_string()
}

fn default_comments_database_name() -> String {
    "comments".to_string()
}

fn default_comments_collection_name() -> String {
    "comments".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}
