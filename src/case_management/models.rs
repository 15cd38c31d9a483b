//! Case management resource models
//!
//! Response fields the service may omit are `Option` or default to an empty
//! `Vec`, and are left out again when serialized.

use crate::error::Result;
use crate::pagination::{next_offset_from_link, PagedResponse, PaginationLink};
use bytes::Bytes;
use serde::{Deserialize, Serialize};

// ============================================================================
// Cases
// ============================================================================

/// A support case
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Case {
    /// Case number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,

    /// Short description of the case
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,

    /// Full description of the case
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Creation timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    /// User who created the case
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<User>,

    /// Last update timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,

    /// User who last updated the case
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<User>,

    /// Channel the case was opened through
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_type: Option<String>,

    /// Primary contact
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<User>,

    /// Case status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Severity, 1 (highest) to 4
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<f64>,

    /// Support tier of the account
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support_tier: Option<String>,

    /// Resolution notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,

    /// Notes recorded on close
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close_notes: Option<String>,

    /// EU support settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eu: Option<CaseEu>,

    /// Users watching the case
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub watchlist: Vec<User>,

    /// Files attached to the case
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,

    /// Offering the case concerns
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offering: Option<Offering>,

    /// Resources attached to the case
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<Resource>,

    /// Case comments
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<Comment>,
}

impl Case {
    /// Case opened through the cloud support center
    pub const CONTACT_TYPE_CLOUD_SUPPORT_CENTER: &'static str = "Cloud Support Center";
    /// Case opened through the IMS console
    pub const CONTACT_TYPE_IMS_CONSOLE: &'static str = "IMS Console";

    /// Basic support tier
    pub const SUPPORT_TIER_BASIC: &'static str = "Basic";
    /// Free support tier
    pub const SUPPORT_TIER_FREE: &'static str = "Free";
    /// Premium support tier
    pub const SUPPORT_TIER_PREMIUM: &'static str = "Premium";
    /// Standard support tier
    pub const SUPPORT_TIER_STANDARD: &'static str = "Standard";
}

/// EU support settings of a case
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseEu {
    /// Whether EU support is required
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support: Option<bool>,

    /// Data center handling the case
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_center: Option<String>,
}

/// EU support settings when creating a case
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CasePayloadEu {
    /// Whether EU support is required
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supported: Option<bool>,

    /// Data center number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_center: Option<i64>,
}

/// One page of cases
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaseList {
    /// Total number of cases matching the query
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_count: Option<i64>,

    /// Link to the first page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first: Option<PaginationLink>,

    /// Link to the next page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<PaginationLink>,

    /// Link to the previous page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<PaginationLink>,

    /// Link to the last page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last: Option<PaginationLink>,

    /// Cases on this page
    #[serde(default)]
    pub cases: Vec<Case>,
}

impl CaseList {
    /// Offset of the next page, `None` on the last page
    pub fn get_next_offset(&self) -> Result<Option<i64>> {
        next_offset_from_link(self.next.as_ref())
    }
}

impl PagedResponse for CaseList {
    type Item = Case;

    fn next_offset(&self) -> Result<Option<i64>> {
        self.get_next_offset()
    }

    fn into_items(self) -> Vec<Case> {
        self.cases
    }
}

// ============================================================================
// Case content
// ============================================================================

/// A case comment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Comment text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    /// Timestamp of the comment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_at: Option<String>,

    /// Author of the comment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_by: Option<User>,
}

/// A file attached to a case
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Attachment id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// File name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,

    /// File size
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_in_bytes: Option<i64>,

    /// Upload timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    /// Download URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Attachments remaining on a case
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentList {
    /// The attachments
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

/// Offering a case is about
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offering {
    /// Offering name
    pub name: String,

    /// Offering type
    #[serde(rename = "type")]
    pub offering_type: OfferingType,
}

impl Offering {
    /// Create an offering
    pub fn new(name: impl Into<String>, offering_type: OfferingType) -> Self {
        Self {
            name: name.into(),
            offering_type,
        }
    }
}

/// Identifies an offering
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferingType {
    /// Offering group
    pub group: String,

    /// CRN service name or category key
    pub key: String,

    /// Offering kind
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Offering id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl OfferingType {
    /// Group key is a CRN service name
    pub const GROUP_CRN_SERVICE_NAME: &'static str = "crn_service_name";
    /// Group key is a category
    pub const GROUP_CATEGORY: &'static str = "category";

    /// Create an offering type
    pub fn new(group: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            key: key.into(),
            kind: None,
            id: None,
        }
    }
}

/// A resource attached to a case
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Resource CRN
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crn: Option<String>,

    /// Resource name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Classic infrastructure resource type
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,

    /// Resource URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Note about the resource
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// A resource to attach when creating a case
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourcePayload {
    /// Resource CRN
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crn: Option<String>,

    /// Classic infrastructure resource type
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,

    /// Classic infrastructure resource id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<f64>,

    /// Note about the resource
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl ResourcePayload {
    /// Reference a resource by CRN
    pub fn crn(crn: impl Into<String>) -> Self {
        Self {
            crn: Some(crn.into()),
            ..Self::default()
        }
    }
}

// ============================================================================
// Users and watchlists
// ============================================================================

/// A user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Full name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Identity realm
    pub realm: String,

    /// User id within the realm
    pub user_id: String,
}

impl User {
    /// Billing and subscription realm
    pub const REALM_BSS: &'static str = "BSS";
    /// IBMid realm
    pub const REALM_IBMID: &'static str = "IBMid";
    /// SoftLayer realm
    pub const REALM_SL: &'static str = "SL";

    /// Create a user reference
    pub fn new(realm: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            name: None,
            realm: realm.into(),
            user_id: user_id.into(),
        }
    }
}

/// Users watching a case
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Watchlist {
    /// The watchers
    #[serde(default)]
    pub watchlist: Vec<User>,
}

/// Outcome of adding users to a watchlist
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchlistAddResponse {
    /// Users added
    #[serde(default)]
    pub added: Vec<User>,

    /// Users that could not be added
    #[serde(default)]
    pub failed: Vec<User>,
}

// ============================================================================
// Uploads
// ============================================================================

/// A file to upload, with optional name and content type
#[derive(Debug, Clone)]
pub struct FileWithMetadata {
    /// File contents
    pub data: Bytes,
    /// File name
    pub filename: Option<String>,
    /// Content type
    pub content_type: Option<String>,
}

impl FileWithMetadata {
    /// Wrap file contents
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self {
            data: data.into(),
            filename: None,
            content_type: None,
        }
    }

    /// Set the file name
    #[must_use]
    pub fn filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Set the content type
    #[must_use]
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}
