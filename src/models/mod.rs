//! Data models for the comment service.
//!
//! This module contains the type definitions for:
//! - Comment records and the shapes sent to the database adapter (`comment`)
//! - The inbound/outbound HTTP bodies of the comments API (`api`)

// Author: kelexine (https://github.com/kelexine)

pub mod api;
pub mod comment;

pub use api::{BodyFormat, CreateCommentRequest, ListCommentsResponse, OperationResponse, STATUS_FAILED};
pub use comment::{shape_records, Comment, CommentView, DeleteFilter, ReadFilter};
