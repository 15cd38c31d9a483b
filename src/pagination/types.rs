//! Pagination types and traits
//!
//! List endpoints return one page at a time plus a `next` link whose `href`
//! carries the `offset` of the following page. These traits let a [`Pager`]
//! drive any such endpoint without knowing its concrete options or page types.
//!
//! [`Pager`]: super::Pager

use crate::error::{Error, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use url::Url;

/// Base used to resolve relative `href` values before reading their query
const PLACEHOLDER_BASE_URL: &str = "http://localhost/";

/// Query parameter carrying the cursor in `next` links
pub const OFFSET_PARAM: &str = "offset";

/// A link to another page of a list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationLink {
    /// URL of the linked page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

impl PaginationLink {
    /// Create a link to `href`
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: Some(href.into()),
        }
    }
}

/// Options for a list call that accepts an `offset` cursor
pub trait PagedOptions: Clone + Send + Sync {
    /// Current offset, if any
    fn offset(&self) -> Option<i64>;

    /// Replace the offset
    fn set_offset(&mut self, offset: Option<i64>);
}

/// One page returned by a list call
pub trait PagedResponse: Send {
    /// Element type of the page
    type Item: Send;

    /// Offset of the following page; `None` when this is the last page
    fn next_offset(&self) -> Result<Option<i64>>;

    /// Take the page's items, in server order
    fn into_items(self) -> Vec<Self::Item>;
}

/// Performs one list call for a [`Pager`](super::Pager)
#[async_trait]
pub trait PageFetcher<O: PagedOptions>: Send + Sync {
    /// Page type returned by the list call
    type Page: PagedResponse;

    /// Fetch the page selected by `options`
    async fn fetch_page(&self, options: &O) -> Result<Self::Page>;
}

/// Item type produced by a fetcher's pages
pub type PageItem<F, O> = <<F as PageFetcher<O>>::Page as PagedResponse>::Item;

// ============================================================================
// Cursor extraction
// ============================================================================

/// Read a query parameter from an absolute or relative URL.
///
/// Returns `Ok(None)` when the parameter is absent.
pub fn get_query_param(url: &str, name: &str) -> Result<Option<String>> {
    let base = Url::parse(PLACEHOLDER_BASE_URL)?;
    let parsed = Url::options()
        .base_url(Some(&base))
        .parse(url)
        .map_err(|e| Error::cursor_parse(name, url, e.to_string()))?;

    Ok(parsed
        .query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned()))
}

/// Read a query parameter and parse it as an integer.
///
/// Absent is `Ok(None)`; present but not an integer is [`Error::CursorParse`].
pub fn get_query_param_as_int(url: &str, name: &str) -> Result<Option<i64>> {
    match get_query_param(url, name)? {
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|e: std::num::ParseIntError| Error::cursor_parse(name, url, e.to_string())),
        None => Ok(None),
    }
}

/// Offset of the page a `next` link points at.
///
/// A missing link, a link without `href` and an `href` without an `offset`
/// all mean there is no further page.
pub fn next_offset_from_link(next: Option<&PaginationLink>) -> Result<Option<i64>> {
    match next.and_then(|link| link.href.as_deref()) {
        Some(href) => get_query_param_as_int(href, OFFSET_PARAM),
        None => Ok(None),
    }
}
