//! SDK identification headers
//!
//! Every request carries a `User-Agent` naming this SDK and the host platform,
//! plus an analytics header naming the service, API version and operation.

use crate::types::StringMap;
use std::sync::LazyLock;

/// Name reported in the `User-Agent` header
pub const SDK_NAME: &str = "platform-services-rust-sdk";

/// Header carrying service, version and operation identifiers
pub const SDK_ANALYTICS_HEADER: &str = "X-IBMCloud-SDK-Analytics";

static USER_AGENT: LazyLock<String> = LazyLock::new(|| {
    format!(
        "{SDK_NAME}/{} ({}; {})",
        crate::VERSION,
        std::env::consts::OS,
        std::env::consts::ARCH
    )
});

/// The `User-Agent` value sent by every client in this crate
pub fn user_agent() -> &'static str {
    &USER_AGENT
}

/// Headers identifying an operation, merged into each request
pub fn get_sdk_headers(service_name: &str, service_version: &str, operation_id: &str) -> StringMap {
    let mut headers = StringMap::new();
    headers.insert(
        SDK_ANALYTICS_HEADER.to_string(),
        format!(
            "service_name={service_name};service_version={service_version};operation_id={operation_id}"
        ),
    );
    headers
}
