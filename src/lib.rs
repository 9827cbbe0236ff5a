// comment-app - organization-scoped comment service
// Author: kelexine (https://github.com/kelexine)

pub mod adapter;
pub mod cli;
pub mod config;
pub mod error;
pub mod logger;
pub mod metrics;
pub mod models;
pub mod server;
pub mod utils;
