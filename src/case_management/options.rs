//! Per-operation options
//!
//! Each operation takes an options value holding its parameters plus any
//! extra headers to send. Required parameters are constructor arguments;
//! optional ones are builder methods.

use super::models::{CasePayloadEu, FileWithMetadata, Offering, ResourcePayload, User};
use super::status::StatusPayload;
use crate::error::{Error, Result};
use crate::pagination::PagedOptions;
use crate::types::StringMap;
use serde::Serialize;

/// Adds `header`/`headers` builder methods to an options type with a `headers` field
macro_rules! impl_request_headers {
    ($($options:ty),+ $(,)?) => {
        $(
            impl $options {
                /// Add a header to send with the request
                #[must_use]
                pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
                    self.headers.insert(key.into(), value.into());
                    self
                }

                /// Replace the headers sent with the request
                #[must_use]
                pub fn headers(mut self, headers: StringMap) -> Self {
                    self.headers = headers;
                    self
                }
            }
        )+
    };
}

impl_request_headers!(
    GetCasesOptions,
    CreateCaseOptions,
    GetCaseOptions,
    UpdateCaseStatusOptions,
    AddCommentOptions,
    AddWatchlistOptions,
    RemoveWatchlistOptions,
    AddResourceOptions,
    UploadFileOptions,
    DownloadFileOptions,
    DeleteFileOptions,
);

/// Fail when a required string parameter is empty
pub(crate) fn require_non_empty(name: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::validation(format!("{name} must not be empty")));
    }
    Ok(())
}

// ============================================================================
// Fields shared by list and get
// ============================================================================

/// Values accepted by the `fields` projection
#[allow(missing_docs)]
pub mod fields {
    pub const AGENT_CLOSE_ONLY: &str = "agent_close_only";
    pub const ATTACHMENTS: &str = "attachments";
    pub const CLOSE_NOTES: &str = "close_notes";
    pub const COMMENTS: &str = "comments";
    pub const CONTACT: &str = "contact";
    pub const CONTACT_TYPE: &str = "contact_type";
    pub const CREATED_AT: &str = "created_at";
    pub const CREATED_BY: &str = "created_by";
    pub const DESCRIPTION: &str = "description";
    pub const EU: &str = "eu";
    pub const INVOICE_NUMBER: &str = "invoice_number";
    pub const NUMBER: &str = "number";
    pub const OFFERING: &str = "offering";
    pub const RESOLUTION: &str = "resolution";
    pub const RESOURCES: &str = "resources";
    pub const SEVERITY: &str = "severity";
    pub const SHORT_DESCRIPTION: &str = "short_description";
    pub const STATUS: &str = "status";
    pub const SUPPORT_TIER: &str = "support_tier";
    pub const UPDATED_AT: &str = "updated_at";
    pub const UPDATED_BY: &str = "updated_by";
    pub const WATCHLIST: &str = "watchlist";
}

// ============================================================================
// List / get
// ============================================================================

/// Options for listing cases
#[derive(Debug, Clone, Default)]
pub struct GetCasesOptions {
    /// Number of cases to skip
    pub offset: Option<i64>,
    /// Maximum cases per page
    pub limit: Option<i64>,
    /// Free-text search
    pub search: Option<String>,
    /// Sort field; a leading `~` sorts descending
    pub sort: Option<String>,
    /// Status filter
    pub status: Vec<String>,
    /// Fields to return
    pub fields: Vec<String>,
    /// Extra request headers
    pub headers: StringMap,
}

impl GetCasesOptions {
    /// Closed cases
    pub const STATUS_CLOSED: &'static str = "closed";
    /// Cases being worked on
    pub const STATUS_IN_PROGRESS: &'static str = "in_progress";
    /// New cases
    pub const STATUS_NEW: &'static str = "new";
    /// Cases with a proposed resolution
    pub const STATUS_RESOLUTION_PROVIDED: &'static str = "resolution_provided";
    /// Resolved cases
    pub const STATUS_RESOLVED: &'static str = "resolved";
    /// Cases waiting on the customer
    pub const STATUS_WAITING_ON_CLIENT: &'static str = "waiting_on_client";

    /// Prefix marking a descending sort
    pub const SORT_DESCENDING_PREFIX: &'static str = "~";

    /// Create empty list options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the offset
    #[must_use]
    pub fn offset(mut self, offset: i64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Set the page size
    #[must_use]
    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the search text
    #[must_use]
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Set the sort field
    #[must_use]
    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    /// Filter by status
    #[must_use]
    pub fn status<I, S>(mut self, status: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.status = status.into_iter().map(Into::into).collect();
        self
    }

    /// Select the returned fields
    #[must_use]
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }
}

impl PagedOptions for GetCasesOptions {
    fn offset(&self) -> Option<i64> {
        self.offset
    }

    fn set_offset(&mut self, offset: Option<i64>) {
        self.offset = offset;
    }
}

/// Options for fetching one case
#[derive(Debug, Clone, Default)]
pub struct GetCaseOptions {
    /// Case number
    pub case_number: String,
    /// Fields to return
    pub fields: Vec<String>,
    /// Extra request headers
    pub headers: StringMap,
}

impl GetCaseOptions {
    /// Options for `case_number`
    pub fn new(case_number: impl Into<String>) -> Self {
        Self {
            case_number: case_number.into(),
            ..Self::default()
        }
    }

    /// Select the returned fields
    #[must_use]
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }
}

// ============================================================================
// Create
// ============================================================================

/// Options for opening a case. Serializes to the request body.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateCaseOptions {
    /// Case type
    #[serde(rename = "type")]
    pub case_type: String,

    /// Subject line
    pub subject: String,

    /// Problem description
    pub description: String,

    /// Severity, 1 (highest) to 4
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<i64>,

    /// EU support settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eu: Option<CasePayloadEu>,

    /// Offering the case concerns
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offering: Option<Offering>,

    /// Resources to attach
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<ResourcePayload>,

    /// Users to add to the watchlist
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub watchlist: Vec<User>,

    /// Invoice number for billing cases
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,

    /// Whether an SLA credit is requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sla_credit_request: Option<bool>,

    /// Extra request headers
    #[serde(skip)]
    pub headers: StringMap,
}

impl CreateCaseOptions {
    /// Account and access case
    pub const TYPE_ACCOUNT_AND_ACCESS: &'static str = "account_and_access";
    /// Billing and invoice case
    pub const TYPE_BILLING_AND_INVOICE: &'static str = "billing_and_invoice";
    /// Sales case
    pub const TYPE_SALES: &'static str = "sales";
    /// Technical case
    pub const TYPE_TECHNICAL: &'static str = "technical";

    /// Options with the required fields
    pub fn new(
        case_type: impl Into<String>,
        subject: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            case_type: case_type.into(),
            subject: subject.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    /// Set the severity
    #[must_use]
    pub fn severity(mut self, severity: i64) -> Self {
        self.severity = Some(severity);
        self
    }

    /// Set EU support settings
    #[must_use]
    pub fn eu(mut self, eu: CasePayloadEu) -> Self {
        self.eu = Some(eu);
        self
    }

    /// Set the offering
    #[must_use]
    pub fn offering(mut self, offering: Offering) -> Self {
        self.offering = Some(offering);
        self
    }

    /// Attach a resource
    #[must_use]
    pub fn resource(mut self, resource: ResourcePayload) -> Self {
        self.resources.push(resource);
        self
    }

    /// Add a watcher
    #[must_use]
    pub fn watcher(mut self, user: User) -> Self {
        self.watchlist.push(user);
        self
    }

    /// Set the invoice number
    #[must_use]
    pub fn invoice_number(mut self, invoice_number: impl Into<String>) -> Self {
        self.invoice_number = Some(invoice_number.into());
        self
    }

    /// Request an SLA credit
    #[must_use]
    pub fn sla_credit_request(mut self, requested: bool) -> Self {
        self.sla_credit_request = Some(requested);
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        require_non_empty("type", &self.case_type)?;
        require_non_empty("subject", &self.subject)?;
        require_non_empty("description", &self.description)
    }
}

// ============================================================================
// Updates on an existing case
// ============================================================================

/// Options for changing a case's status
#[derive(Debug, Clone)]
pub struct UpdateCaseStatusOptions {
    /// Case number
    pub case_number: String,
    /// Status change
    pub status_payload: StatusPayload,
    /// Extra request headers
    pub headers: StringMap,
}

impl UpdateCaseStatusOptions {
    /// Options for `case_number`
    pub fn new(case_number: impl Into<String>, status_payload: StatusPayload) -> Self {
        Self {
            case_number: case_number.into(),
            status_payload,
            headers: StringMap::new(),
        }
    }
}

/// Options for commenting on a case
#[derive(Debug, Clone, Default)]
pub struct AddCommentOptions {
    /// Case number
    pub case_number: String,
    /// Comment text
    pub comment: String,
    /// Extra request headers
    pub headers: StringMap,
}

impl AddCommentOptions {
    /// Options for `case_number`
    pub fn new(case_number: impl Into<String>, comment: impl Into<String>) -> Self {
        Self {
            case_number: case_number.into(),
            comment: comment.into(),
            headers: StringMap::new(),
        }
    }
}

/// Options for adding users to a case's watchlist
#[derive(Debug, Clone, Default)]
pub struct AddWatchlistOptions {
    /// Case number
    pub case_number: String,
    /// Users to add
    pub watchlist: Vec<User>,
    /// Extra request headers
    pub headers: StringMap,
}

impl AddWatchlistOptions {
    /// Options for `case_number`
    pub fn new(case_number: impl Into<String>) -> Self {
        Self {
            case_number: case_number.into(),
            ..Self::default()
        }
    }

    /// Set the users to add
    #[must_use]
    pub fn watchlist(mut self, users: Vec<User>) -> Self {
        self.watchlist = users;
        self
    }
}

/// Options for removing users from a case's watchlist
#[derive(Debug, Clone, Default)]
pub struct RemoveWatchlistOptions {
    /// Case number
    pub case_number: String,
    /// Users to remove
    pub watchlist: Vec<User>,
    /// Extra request headers
    pub headers: StringMap,
}

impl RemoveWatchlistOptions {
    /// Options for `case_number`
    pub fn new(case_number: impl Into<String>) -> Self {
        Self {
            case_number: case_number.into(),
            ..Self::default()
        }
    }

    /// Set the users to remove
    #[must_use]
    pub fn watchlist(mut self, users: Vec<User>) -> Self {
        self.watchlist = users;
        self
    }
}

/// Options for attaching a resource to a case
#[derive(Debug, Clone, Default)]
pub struct AddResourceOptions {
    /// Case number
    pub case_number: String,
    /// Resource CRN
    pub crn: Option<String>,
    /// Classic infrastructure resource type
    pub resource_type: Option<String>,
    /// Classic infrastructure resource id
    pub id: Option<f64>,
    /// Note about the resource
    pub note: Option<String>,
    /// Extra request headers
    pub headers: StringMap,
}

impl AddResourceOptions {
    /// Options for `case_number`
    pub fn new(case_number: impl Into<String>) -> Self {
        Self {
            case_number: case_number.into(),
            ..Self::default()
        }
    }

    /// Set the CRN
    #[must_use]
    pub fn crn(mut self, crn: impl Into<String>) -> Self {
        self.crn = Some(crn.into());
        self
    }

    /// Set the classic infrastructure type
    #[must_use]
    pub fn resource_type(mut self, resource_type: impl Into<String>) -> Self {
        self.resource_type = Some(resource_type.into());
        self
    }

    /// Set the classic infrastructure id
    #[must_use]
    pub fn id(mut self, id: f64) -> Self {
        self.id = Some(id);
        self
    }

    /// Set the note
    #[must_use]
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub(crate) fn body(&self) -> ResourcePayload {
        ResourcePayload {
            crn: self.crn.clone(),
            resource_type: self.resource_type.clone(),
            id: self.id,
            note: self.note.clone(),
        }
    }
}

// ============================================================================
// Attachments
// ============================================================================

/// Options for uploading files to a case
#[derive(Debug, Clone, Default)]
pub struct UploadFileOptions {
    /// Case number
    pub case_number: String,
    /// Files to upload
    pub file: Vec<FileWithMetadata>,
    /// Extra request headers
    pub headers: StringMap,
}

impl UploadFileOptions {
    /// Options for `case_number`
    pub fn new(case_number: impl Into<String>, file: Vec<FileWithMetadata>) -> Self {
        Self {
            case_number: case_number.into(),
            file,
            headers: StringMap::new(),
        }
    }
}

/// Options for downloading an attachment
#[derive(Debug, Clone, Default)]
pub struct DownloadFileOptions {
    /// Case number
    pub case_number: String,
    /// Attachment id
    pub file_id: String,
    /// Extra request headers
    pub headers: StringMap,
}

impl DownloadFileOptions {
    /// Options for one attachment
    pub fn new(case_number: impl Into<String>, file_id: impl Into<String>) -> Self {
        Self {
            case_number: case_number.into(),
            file_id: file_id.into(),
            headers: StringMap::new(),
        }
    }
}

/// Options for deleting an attachment
#[derive(Debug, Clone, Default)]
pub struct DeleteFileOptions {
    /// Case number
    pub case_number: String,
    /// Attachment id
    pub file_id: String,
    /// Extra request headers
    pub headers: StringMap,
}

impl DeleteFileOptions {
    /// Options for one attachment
    pub fn new(case_number: impl Into<String>, file_id: impl Into<String>) -> Self {
        Self {
            case_number: case_number.into(),
            file_id: file_id.into(),
            headers: StringMap::new(),
        }
    }
}
