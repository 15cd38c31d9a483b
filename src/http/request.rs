//! Request description and URL resolution
//!
//! A [`RequestConfig`] captures everything needed to issue one service call:
//! method, path template, path parameters, query parameters, headers and body.
//! It is cheap to clone so the client can rebuild the request on every retry.

use crate::error::{Error, Result};
use bytes::Bytes;
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

/// One part of a multipart/form-data body
#[derive(Debug, Clone)]
pub struct FormPart {
    /// Form field name
    pub name: String,
    /// Filename reported in the part's content disposition
    pub filename: Option<String>,
    /// Content type of the part
    pub content_type: Option<String>,
    /// Part payload
    pub data: Bytes,
}

/// Request body
#[derive(Debug, Clone, Default)]
pub enum RequestBody {
    /// No body
    #[default]
    Empty,
    /// JSON document
    Json(Value),
    /// multipart/form-data parts
    Multipart(Vec<FormPart>),
}

/// Configuration for a single request
#[derive(Debug, Clone)]
pub struct RequestConfig {
    /// HTTP method
    pub method: Method,
    /// Path template relative to the service URL, e.g. `/cases/{case_number}`
    pub path: String,
    /// Values substituted into the path template
    pub path_params: HashMap<String, String>,
    /// Query parameters, in insertion order
    pub query: Vec<(String, String)>,
    /// Request headers
    pub headers: HashMap<String, String>,
    /// Request body
    pub body: RequestBody,
    /// Override timeout for this request
    pub timeout: Option<Duration>,
    /// Override max retries for this request
    pub max_retries: Option<u32>,
}

impl RequestConfig {
    /// Create a new request config
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            path_params: HashMap::new(),
            query: Vec::new(),
            headers: HashMap::new(),
            body: RequestBody::Empty,
            timeout: None,
            max_retries: None,
        }
    }

    /// Shorthand for a GET request
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// Bind a path parameter
    #[must_use]
    pub fn path_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.path_params.insert(key.into(), value.into());
        self
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Add a query parameter when a value is present
    #[must_use]
    pub fn query_opt<V: ToString>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.query(key, v.to_string()),
            None => self,
        }
    }

    /// Add a comma-separated list query parameter when the list is non-empty
    #[must_use]
    pub fn query_csv(self, key: &str, values: &[String]) -> Self {
        if values.is_empty() {
            self
        } else {
            self.query(key, values.join(","))
        }
    }

    /// Add a header, replacing any earlier one with the same name in any case
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_header(key.into(), value.into());
        self
    }

    /// Add several headers
    #[must_use]
    pub fn headers<'a, I>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        for (key, value) in headers {
            self.set_header(key.clone(), value.clone());
        }
        self
    }

    /// Whether a header with this name is set, ignoring case
    pub fn has_header(&self, key: &str) -> bool {
        self.headers.keys().any(|k| k.eq_ignore_ascii_case(key))
    }

    fn set_header(&mut self, key: String, value: String) {
        self.headers.retain(|k, _| !k.eq_ignore_ascii_case(&key));
        self.headers.insert(key, value);
    }

    /// Set JSON body
    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    /// Serialize a value into the JSON body
    pub fn json_body<T: Serialize>(self, body: &T) -> Result<Self> {
        Ok(self.json(serde_json::to_value(body)?))
    }

    /// Append a multipart form part
    #[must_use]
    pub fn form_part(mut self, part: FormPart) -> Self {
        match &mut self.body {
            RequestBody::Multipart(parts) => parts.push(part),
            _ => self.body = RequestBody::Multipart(vec![part]),
        }
        self
    }

    /// Set timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set max retries
    #[must_use]
    pub fn retries(mut self, retries: u32) -> Self {
        self.max_retries = Some(retries);
        self
    }

    /// Resolve the full request URL against a service URL
    pub fn resolve_url(&self, service_url: &str) -> Result<Url> {
        resolve_request_url(service_url, &self.path, &self.path_params)
    }
}

/// Join a path template onto a service URL, substituting and percent-encoding
/// path parameters. Absolute `http(s)://` paths are used as-is.
pub fn resolve_request_url(
    service_url: &str,
    path: &str,
    path_params: &HashMap<String, String>,
) -> Result<Url> {
    if path.starts_with("http://") || path.starts_with("https://") {
        return Ok(Url::parse(path)?);
    }
    if service_url.is_empty() {
        return Err(Error::config("The service URL is required"));
    }

    let mut url = Url::parse(service_url)?;
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|()| Error::config(format!("Service URL cannot be a base: {service_url}")))?;
        segments.pop_if_empty();

        for segment in path.split('/').filter(|s| !s.is_empty()) {
            match segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                Some(name) => {
                    let value = path_params.get(name).ok_or_else(|| {
                        Error::validation(format!("Missing path parameter '{name}'"))
                    })?;
                    if value.is_empty() {
                        return Err(Error::validation(format!(
                            "Path parameter '{name}' must not be empty"
                        )));
                    }
                    segments.push(value);
                }
                None => {
                    segments.push(segment);
                }
            }
        }
    }
    Ok(url)
}
