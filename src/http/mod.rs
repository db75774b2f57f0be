//! HTTP client module
//!
//! Provides the HTTP client shared by a playlist and its continuation
//! requests.
//!
//! # Features
//!
//! - **Default Headers**: Browser-like headers on every request
//! - **Rate Limiting**: Token bucket rate limiter using governor
//! - **Error Classification**: Transport, timeout and status errors
//!
//! There is no retry policy; every failure surfaces to the caller.

mod client;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
