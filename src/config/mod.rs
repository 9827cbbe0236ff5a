// Configuration module
// Author: kelexine (https://github.com/kelexine)

mod models;

pub use models::*;

use crate::error::{AppError, Result};
use config::{Config, Environment, File};
use reqwest::Url;
use std::path::{Path, PathBuf};

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. CLI arguments (highest, applied by the caller)
    /// 2. Environment variables (`APP_NAME`, `DBADAPTER_READ_URI`, ...)
    /// 3. Config file
    /// 4. Defaults (lowest)
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_from(path, Environment::default())
    }

    /// Same as [`AppConfig::load`] with an explicit environment source.
    pub fn load_from(path: Option<&Path>, env: Environment) -> Result<Self> {
        // An explicitly named file must exist; the default one is optional.
        let (file, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (Self::default_config_path(), false),
        };

        let config = Config::builder()
            .add_source(Config::try_from(&Self::default())?)
            .add_source(File::from(file).required(required))
            .add_source(env.try_parsing(true))
            .build()
            .map_err(|e| AppError::Config(e.to_string()))?;

        let loaded: Self = config
            .try_deserialize()
            .map_err(|e| AppError::Config(e.to_string()))?;

        loaded.validate()?;
        Ok(loaded)
    }

    /// Reject configurations the service cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.app_name.trim().is_empty() {
            return Err(AppError::Config("APP_NAME must not be empty".to_string()));
        }

        for (name, value) in [
            ("LOGGER_APP_URI", &self.logger_app_uri),
            ("DBADAPTER_INSERT_URI", &self.dbadapter_insert_uri),
            ("DBADAPTER_READ_URI", &self.dbadapter_read_uri),
            ("DBADAPTER_DELETE_URI", &self.dbadapter_delete_uri),
        ] {
            let url = Url::parse(value)
                .map_err(|e| AppError::Config(format!("{} is not a valid URL ({}): {}", name, value, e)))?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(AppError::Config(format!(
                    "{} must use http or https, got {}",
                    name,
                    url.scheme()
                )));
            }
        }

        if self.comments_database_name.trim().is_empty() {
            return Err(AppError::Config("COMMENTS_DATABASE_NAME must not be empty".to_string()));
        }
        if self.comments_collection_name.trim().is_empty() {
            return Err(AppError::Config("COMMENTS_COLLECTION_NAME must not be empty".to_string()));
        }

        Ok(())
    }

    /// Socket address string the server binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.app_host, self.app_port)
    }

    fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".comment-app")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> Environment {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::default().source(Some(map))
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.app_name, "comment-app");
        assert_eq!(config.bind_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn test_environment_overrides_defaults() {
        let config = AppConfig::load_from(
            Some(write_config("").path()),
            env(&[
                ("APP_NAME", "comments-eu"),
                ("APP_PORT", "8088"),
                ("DBADAPTER_READ_URI", "http://adapter.internal/read"),
                ("COMMENTS_COLLECTION_NAME", "org_comments"),
            ]),
        )
        .unwrap();

        assert_eq!(config.app_name, "comments-eu");
        assert_eq!(config.app_port, 8088);
        assert_eq!(config.dbadapter_read_uri, "http://adapter.internal/read");
        assert_eq!(config.comments_collection_name, "org_comments");
        assert_eq!(config.dbadapter_insert_uri, "http://localhost:3002/insert");
    }

    #[test]
    fn test_file_values_lose_to_environment() {
        let file = write_config(
            "app_name = \"from-file\"\nlogger_app_uri = \"http://logger.internal/log\"\n",
        );
        let config = AppConfig::load_from(Some(file.path()), env(&[("APP_NAME", "from-env")])).unwrap();

        assert_eq!(config.app_name, "from-env");
        assert_eq!(config.logger_app_uri, "http://logger.internal/log");
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let result = AppConfig::load_from(Some(Path::new("/nonexistent/comment-app.toml")), env(&[]));
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_invalid_uri_rejected() {
        let config = AppConfig {
            dbadapter_delete_uri: "not a url".to_string(),
            ..AppConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("DBADAPTER_DELETE_URI"));
    }

    #[test]
    fn test_non_http_scheme_rejected() {
        let config = AppConfig {
            logger_app_uri: "ftp://logger/logs".to_string(),
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_app_name_rejected() {
        let config = AppConfig {
            app_name: "  ".to_string(),
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }
}
