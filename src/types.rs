//! Common types used throughout tubelist
//!
//! This module contains shared type definitions, type aliases,
//! and small helpers used across multiple modules.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

// ============================================================================
// Type Aliases
// ============================================================================

/// Generic key-value map with string keys and values
pub type StringMap = HashMap<String, String>;

/// One page worth of item references (e.g. `/watch?v=abc`), in server order
pub type Batch = Vec<String>;

// ============================================================================
// Continuation
// ============================================================================

/// Everything needed to request the next page of a listing
///
/// Built from a server-issued continuation token. It is consumed by exactly
/// one fetch and then discarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContinuationRequest {
    /// Absolute URL to POST to
    pub url: String,
    /// Extra request headers
    pub headers: StringMap,
    /// JSON request body
    pub body: Value,
}

impl ContinuationRequest {
    /// Create a new continuation request
    pub fn new(url: impl Into<String>, headers: StringMap, body: Value) -> Self {
        Self {
            url: url.into(),
            headers,
            body,
        }
    }
}

// ============================================================================
// Watch links
// ============================================================================

/// Relative watch link for a video id: `/watch?v=<id>`
pub fn watch_path(video_id: &str) -> String {
    format!("/watch?v={video_id}")
}

/// Strip the `/watch?v=` prefix from a relative watch link
pub fn video_id_from_path(path: &str) -> Option<&str> {
    path.strip_prefix("/watch?v=")
}
