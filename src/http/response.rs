//! Response wrapper returned by every service operation

use reqwest::header::HeaderMap;

/// A successful response: status, headers and the decoded result
#[derive(Debug, Clone)]
pub struct DetailedResponse<T> {
    /// HTTP status code
    pub status_code: u16,
    /// Response headers
    pub headers: HeaderMap,
    /// Decoded response body
    pub result: T,
}

impl<T> DetailedResponse<T> {
    /// Create a new detailed response
    pub fn new(status_code: u16, headers: HeaderMap, result: T) -> Self {
        Self {
            status_code,
            headers,
            result,
        }
    }

    /// Consume the response and return only the result
    pub fn into_result(self) -> T {
        self.result
    }

    /// Look up a response header as a string
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Transform the result while keeping status and headers
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> DetailedResponse<U> {
        DetailedResponse {
            status_code: self.status_code,
            headers: self.headers,
            result: f(self.result),
        }
    }
}
