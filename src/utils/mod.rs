//! Utility functions and helpers for the comment service.
//!
//! # Submodules
//!
//! - `logging`: Tracing and logging initialization.
//! - `http`: The shared outbound HTTP client.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod http;
pub mod logging;
