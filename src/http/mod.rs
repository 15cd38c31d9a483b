//! HTTP client module
//!
//! Provides the transport every service client calls into.
//!
//! # Features
//!
//! - **Request Description**: Path templates, query, headers, JSON and multipart bodies
//! - **Automatic Retries**: Configurable retry logic with backoff, off by default
//! - **Authentication**: Integration with auth module
//! - **Detailed Responses**: Status code and headers alongside the decoded result

mod client;
mod request;
mod response;

pub use client::{
    HttpClient, HttpClientConfig, HttpClientConfigBuilder, DEFAULT_MAX_RETRIES,
    DEFAULT_MAX_RETRY_INTERVAL,
};
pub use request::{resolve_request_url, FormPart, RequestBody, RequestConfig};
pub use response::DetailedResponse;
