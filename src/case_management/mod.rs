//! Case Management v1
//!
//! Client for the IBM Cloud support case API: open and list cases, comment,
//! manage watchlists, attach resources and files, and move cases through
//! their resolution workflow.
//!
//! ```rust,ignore
//! let service = CaseManagementV1::from_external_config(CaseManagementV1Options::default())?;
//! let open = GetCasesOptions::new().status([GetCasesOptions::STATUS_NEW]);
//! let cases = service.get_cases_pager(&open)?.get_all().await?;
//! ```

mod models;
mod options;
mod service;
mod status;

pub use models::{
    Attachment, AttachmentList, Case, CaseEu, CaseList, CasePayloadEu, Comment, FileWithMetadata,
    Offering, OfferingType, Resource, ResourcePayload, User, Watchlist, WatchlistAddResponse,
};
pub use options::{
    fields, AddCommentOptions, AddResourceOptions, AddWatchlistOptions, CreateCaseOptions,
    DeleteFileOptions, DownloadFileOptions, GetCaseOptions, GetCasesOptions,
    RemoveWatchlistOptions, UpdateCaseStatusOptions, UploadFileOptions,
};
pub use service::{
    CaseManagementV1, CaseManagementV1Options, DEFAULT_SERVICE_NAME, DEFAULT_SERVICE_URL,
};
pub use status::{ResolutionCode, StatusPayload, ACTION_PROPERTY};

#[cfg(test)]
mod tests;
