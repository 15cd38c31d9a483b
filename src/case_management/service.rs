//! Case management service client

use super::models::{
    Attachment, AttachmentList, Case, CaseList, Comment, Resource, Watchlist,
    WatchlistAddResponse,
};
use super::options::{
    require_non_empty, AddCommentOptions, AddResourceOptions, AddWatchlistOptions,
    CreateCaseOptions, DeleteFileOptions, DownloadFileOptions, GetCaseOptions, GetCasesOptions,
    RemoveWatchlistOptions, UpdateCaseStatusOptions, UploadFileOptions,
};
use crate::auth::{AuthConfig, Authenticator};
use crate::common::get_sdk_headers;
use crate::config::{get_service_properties, ServiceProperties};
use crate::error::{Error, Result};
use crate::http::{DetailedResponse, FormPart, HttpClient, HttpClientConfig, RequestConfig};
use crate::pagination::{PageFetcher, Pager};
use crate::types::StringMap;
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Method;
use std::time::Duration;
use tracing::debug;

/// Default service URL
pub const DEFAULT_SERVICE_URL: &str = "https://support-center.cloud.ibm.com/case-management/v1";

/// Default name used to look up external configuration
pub const DEFAULT_SERVICE_NAME: &str = "case_management";

const SERVICE_VERSION: &str = "V1";
const JSON: &str = "application/json";
const OCTET_STREAM: &str = "application/octet-stream";

/// Construction options for [`CaseManagementV1`]
#[derive(Debug, Clone, Default)]
pub struct CaseManagementV1Options {
    /// Name used to look up external configuration
    pub service_name: Option<String>,
    /// Service URL override
    pub url: Option<String>,
    /// Authentication
    pub authenticator: Option<AuthConfig>,
}

impl CaseManagementV1Options {
    /// Set the service name
    #[must_use]
    pub fn service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = Some(name.into());
        self
    }

    /// Set the service URL
    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set the authenticator
    #[must_use]
    pub fn authenticator(mut self, authenticator: AuthConfig) -> Self {
        self.authenticator = Some(authenticator);
        self
    }
}

/// Client for the case management API
#[derive(Debug)]
pub struct CaseManagementV1 {
    client: HttpClient,
}

impl CaseManagementV1 {
    /// Create a client. An authenticator is required.
    pub fn new(options: CaseManagementV1Options) -> Result<Self> {
        let authenticator = options
            .authenticator
            .ok_or_else(|| Error::missing_field("authenticator"))?;
        let url = options.url.unwrap_or_else(|| DEFAULT_SERVICE_URL.to_string());
        Self::build(url, authenticator, &ServiceProperties::default())
    }

    /// Create a client configured from the credentials file and environment.
    ///
    /// An explicit URL or authenticator in `options` wins over external values.
    pub fn from_external_config(options: CaseManagementV1Options) -> Result<Self> {
        let service_name = options
            .service_name
            .unwrap_or_else(|| DEFAULT_SERVICE_NAME.to_string());
        let props = get_service_properties(&service_name)?;

        let authenticator = match options.authenticator {
            Some(authenticator) => authenticator,
            None => props.auth_config()?,
        };
        let url = options
            .url
            .or_else(|| props.url.clone())
            .unwrap_or_else(|| DEFAULT_SERVICE_URL.to_string());

        debug!("Configured {} from external config: {}", service_name, url);
        Self::build(url, authenticator, &props)
    }

    fn build(url: String, authenticator: AuthConfig, props: &ServiceProperties) -> Result<Self> {
        let config = HttpClientConfig::builder()
            .service_url(url)
            .gzip(props.enable_gzip)
            .disable_ssl_verification(props.disable_ssl)
            .build();
        let mut client = HttpClient::with_auth(config, Authenticator::new(authenticator)?)?;
        if props.enable_retries {
            client.enable_retries(
                props.max_retries.unwrap_or(0),
                props.retry_interval.unwrap_or(Duration::ZERO),
            );
        }
        Ok(Self { client })
    }

    /// Regional endpoints are not offered by this service
    pub fn get_service_url_for_region(region: &str) -> Result<String> {
        Err(Error::config(format!(
            "service does not support regional URLs (requested '{region}')"
        )))
    }

    // ========================================================================
    // Client configuration
    // ========================================================================

    /// Service URL
    pub fn service_url(&self) -> &str {
        self.client.service_url()
    }

    /// Replace the service URL
    pub fn set_service_url(&mut self, url: impl Into<String>) -> Result<()> {
        self.client.set_service_url(url)
    }

    /// Replace the headers sent with every request
    pub fn set_default_headers(&mut self, headers: StringMap) {
        self.client.set_default_headers(headers);
    }

    /// Enable or disable gzip response negotiation
    pub fn set_enable_gzip_compression(&mut self, enable: bool) -> Result<()> {
        self.client.set_enable_gzip(enable)
    }

    /// Whether gzip response negotiation is enabled
    pub fn enable_gzip_compression(&self) -> bool {
        self.client.gzip_enabled()
    }

    /// Retry transient failures. Zero values select the defaults.
    pub fn enable_retries(&mut self, max_retries: u32, max_retry_interval: Duration) {
        self.client.enable_retries(max_retries, max_retry_interval);
    }

    /// Stop retrying failed requests
    pub fn disable_retries(&mut self) {
        self.client.disable_retries();
    }

    /// Underlying HTTP client
    pub fn client(&self) -> &HttpClient {
        &self.client
    }

    fn request(
        &self,
        method: Method,
        path: &str,
        operation_id: &str,
        headers: &StringMap,
        accept: &str,
    ) -> RequestConfig {
        let sdk_headers = get_sdk_headers(DEFAULT_SERVICE_NAME, SERVICE_VERSION, operation_id);
        // Caller headers go last so they can override SDK headers and Accept
        RequestConfig::new(method, path)
            .headers(&sdk_headers)
            .header("Accept", accept)
            .headers(headers)
    }

    // ========================================================================
    // Cases
    // ========================================================================

    /// List cases, one page per call
    pub async fn get_cases(&self, options: &GetCasesOptions) -> Result<DetailedResponse<CaseList>> {
        let request = self
            .request(Method::GET, "/cases", "GetCases", &options.headers, JSON)
            .query_opt("offset", options.offset)
            .query_opt("limit", options.limit)
            .query_opt("search", options.search.as_deref())
            .query_opt("sort", options.sort.as_deref())
            .query_csv("status", &options.status)
            .query_csv("fields", &options.fields);

        self.client.request_json(&request).await
    }

    /// Pager over [`get_cases`](Self::get_cases).
    ///
    /// Fails when `options` already carries a non-zero offset.
    pub fn get_cases_pager(
        &self,
        options: &GetCasesOptions,
    ) -> Result<Pager<'_, Self, GetCasesOptions>> {
        Pager::new(self, options)
    }

    /// Open a case
    pub async fn create_case(&self, options: &CreateCaseOptions) -> Result<DetailedResponse<Case>> {
        options.validate()?;
        let request = self
            .request(Method::POST, "/cases", "CreateCase", &options.headers, JSON)
            .json_body(options)?;

        self.client.request_json(&request).await
    }

    /// Fetch one case
    pub async fn get_case(&self, options: &GetCaseOptions) -> Result<DetailedResponse<Case>> {
        require_non_empty("case_number", &options.case_number)?;
        let request = self
            .request(Method::GET, "/cases/{case_number}", "GetCase", &options.headers, JSON)
            .path_param("case_number", &options.case_number)
            .query_csv("fields", &options.fields);

        self.client.request_json(&request).await
    }

    /// Resolve, unresolve or accept a case
    pub async fn update_case_status(
        &self,
        options: &UpdateCaseStatusOptions,
    ) -> Result<DetailedResponse<Case>> {
        require_non_empty("case_number", &options.case_number)?;
        let request = self
            .request(
                Method::PUT,
                "/cases/{case_number}/status",
                "UpdateCaseStatus",
                &options.headers,
                JSON,
            )
            .path_param("case_number", &options.case_number)
            .json_body(&options.status_payload)?;

        self.client.request_json(&request).await
    }

    /// Comment on a case
    pub async fn add_comment(
        &self,
        options: &AddCommentOptions,
    ) -> Result<DetailedResponse<Comment>> {
        require_non_empty("case_number", &options.case_number)?;
        require_non_empty("comment", &options.comment)?;
        let request = self
            .request(
                Method::PUT,
                "/cases/{case_number}/comments",
                "AddComment",
                &options.headers,
                JSON,
            )
            .path_param("case_number", &options.case_number)
            .json(serde_json::json!({ "comment": options.comment }));

        self.client.request_json(&request).await
    }

    // ========================================================================
    // Watchlist
    // ========================================================================

    /// Add users to a case's watchlist
    pub async fn add_watchlist(
        &self,
        options: &AddWatchlistOptions,
    ) -> Result<DetailedResponse<WatchlistAddResponse>> {
        require_non_empty("case_number", &options.case_number)?;
        let request = self
            .request(
                Method::PUT,
                "/cases/{case_number}/watchlist",
                "AddWatchlist",
                &options.headers,
                JSON,
            )
            .path_param("case_number", &options.case_number)
            .json(serde_json::json!({ "watchlist": options.watchlist }));

        self.client.request_json(&request).await
    }

    /// Remove users from a case's watchlist
    pub async fn remove_watchlist(
        &self,
        options: &RemoveWatchlistOptions,
    ) -> Result<DetailedResponse<Watchlist>> {
        require_non_empty("case_number", &options.case_number)?;
        let request = self
            .request(
                Method::DELETE,
                "/cases/{case_number}/watchlist",
                "RemoveWatchlist",
                &options.headers,
                JSON,
            )
            .path_param("case_number", &options.case_number)
            .json(serde_json::json!({ "watchlist": options.watchlist }));

        self.client.request_json(&request).await
    }

    // ========================================================================
    // Resources and attachments
    // ========================================================================

    /// Attach a resource to a case
    pub async fn add_resource(
        &self,
        options: &AddResourceOptions,
    ) -> Result<DetailedResponse<Resource>> {
        require_non_empty("case_number", &options.case_number)?;
        let request = self
            .request(
                Method::PUT,
                "/cases/{case_number}/resources",
                "AddResource",
                &options.headers,
                JSON,
            )
            .path_param("case_number", &options.case_number)
            .json_body(&options.body())?;

        self.client.request_json(&request).await
    }

    /// Upload files to a case
    pub async fn upload_file(
        &self,
        options: &UploadFileOptions,
    ) -> Result<DetailedResponse<Attachment>> {
        require_non_empty("case_number", &options.case_number)?;
        if options.file.is_empty() {
            return Err(Error::validation("at least one file must be provided"));
        }

        let mut request = self
            .request(
                Method::PUT,
                "/cases/{case_number}/attachments",
                "UploadFile",
                &options.headers,
                JSON,
            )
            .path_param("case_number", &options.case_number);
        for file in &options.file {
            request = request.form_part(FormPart {
                name: "file".to_string(),
                filename: file.filename.clone(),
                content_type: file.content_type.clone(),
                data: file.data.clone(),
            });
        }

        self.client.request_json(&request).await
    }

    /// Download an attachment
    pub async fn download_file(
        &self,
        options: &DownloadFileOptions,
    ) -> Result<DetailedResponse<Bytes>> {
        require_non_empty("case_number", &options.case_number)?;
        require_non_empty("file_id", &options.file_id)?;
        let request = self
            .request(
                Method::GET,
                "/cases/{case_number}/attachments/{file_id}",
                "DownloadFile",
                &options.headers,
                OCTET_STREAM,
            )
            .path_param("case_number", &options.case_number)
            .path_param("file_id", &options.file_id);

        self.client.request_bytes(&request).await
    }

    /// Delete an attachment
    pub async fn delete_file(
        &self,
        options: &DeleteFileOptions,
    ) -> Result<DetailedResponse<AttachmentList>> {
        require_non_empty("case_number", &options.case_number)?;
        require_non_empty("file_id", &options.file_id)?;
        let request = self
            .request(
                Method::DELETE,
                "/cases/{case_number}/attachments/{file_id}",
                "DeleteFile",
                &options.headers,
                JSON,
            )
            .path_param("case_number", &options.case_number)
            .path_param("file_id", &options.file_id);

        self.client.request_json(&request).await
    }
}

#[async_trait]
impl PageFetcher<GetCasesOptions> for CaseManagementV1 {
    type Page = CaseList;

    async fn fetch_page(&self, options: &GetCasesOptions) -> Result<CaseList> {
        Ok(self.get_cases(options).await?.into_result())
    }
}
