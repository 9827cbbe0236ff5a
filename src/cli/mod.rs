// CLI module for comment-app
// Author: kelexine (https://github.com/kelexine)

use crate::config::AppConfig;
use clap::Parser;
use std::path::PathBuf;

/// comment-app - organization-scoped comment service
#[derive(Parser, Debug)]
#[command(name = "comment-app", version, about, long_about = None)]
pub struct Args {
    /// Path to a TOML config file (defaults to ~/.comment-app/config.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Bind address, overriding APP_HOST
    #[arg(long)]
    pub host: Option<String>,

    /// Listen port, overriding APP_PORT
    #[arg(short, long)]
    pub port: Option<u16>,
}

impl Args {
    /// Apply command-line overrides on top of the loaded configuration.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(host) = &self.host {
            config.app_host = host.clone();
        }
        if let Some(port) = self.port {
            config.app_port = port;
        }
    }
}
