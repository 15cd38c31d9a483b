//! Tests for pagination module

use super::*;
use crate::error::{Error, Result};
use async_trait::async_trait;
use futures::TryStreamExt;
use std::collections::VecDeque;
use std::sync::Mutex;
use test_case::test_case;

// ============================================================================
// Fakes
// ============================================================================

#[derive(Debug, Clone, Default)]
struct ListOptions {
    offset: Option<i64>,
    limit: Option<i64>,
}

impl PagedOptions for ListOptions {
    fn offset(&self) -> Option<i64> {
        self.offset
    }

    fn set_offset(&mut self, offset: Option<i64>) {
        self.offset = offset;
    }
}

#[derive(Debug, Clone)]
struct Page {
    next: Option<PaginationLink>,
    items: Vec<&'static str>,
}

impl Page {
    fn last(items: Vec<&'static str>) -> Self {
        Self { next: None, items }
    }

    fn linked(href: &str, items: Vec<&'static str>) -> Self {
        Self {
            next: Some(PaginationLink::new(href)),
            items,
        }
    }
}

impl PagedResponse for Page {
    type Item = &'static str;

    fn next_offset(&self) -> Result<Option<i64>> {
        next_offset_from_link(self.next.as_ref())
    }

    fn into_items(self) -> Vec<Self::Item> {
        self.items
    }
}

/// Replays scripted responses and records the offset of every call
#[derive(Default)]
struct ScriptedFetcher {
    responses: Mutex<VecDeque<Result<Page>>>,
    offsets: Mutex<Vec<Option<i64>>>,
}

impl ScriptedFetcher {
    fn new(responses: Vec<Result<Page>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            offsets: Mutex::new(Vec::new()),
        }
    }

    fn offsets(&self) -> Vec<Option<i64>> {
        self.offsets.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher<ListOptions> for ScriptedFetcher {
    type Page = Page;

    async fn fetch_page(&self, options: &ListOptions) -> Result<Page> {
        self.offsets.lock().unwrap().push(options.offset);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Error::Other("no scripted response".to_string())))
    }
}

fn transport_error() -> Error {
    Error::http_status(503, "Service Unavailable", "")
}

// ============================================================================
// Cursor extraction
// ============================================================================

#[test_case("https://host/path?offset=1", Some(1) ; "absolute url")]
#[test_case("/case-management/v1/cases?limit=10&offset=20", Some(20) ; "relative path")]
#[test_case("?offset=5", Some(5) ; "query only")]
#[test_case("ibm.com", None ; "no query string")]
#[test_case("https://host/path?limit=10", None ; "offset absent")]
#[test_case("https://host/path?offset=-3", Some(-3) ; "negative offset")]
fn test_next_offset_from_href(href: &str, expected: Option<i64>) {
    let link = PaginationLink::new(href);
    assert_eq!(next_offset_from_link(Some(&link)).unwrap(), expected);
}

#[test]
fn test_next_offset_without_link() {
    assert_eq!(next_offset_from_link(None).unwrap(), None);
    assert_eq!(
        next_offset_from_link(Some(&PaginationLink::default())).unwrap(),
        None
    );
}

#[test]
fn test_next_offset_non_integer_is_error() {
    let link = PaginationLink::new("ibm.com?offset=tiger");
    let err = next_offset_from_link(Some(&link)).unwrap_err();

    match &err {
        Error::CursorParse { param, url, .. } => {
            assert_eq!(param, "offset");
            assert_eq!(url, "ibm.com?offset=tiger");
        }
        other => panic!("Expected CursorParse, got {other:?}"),
    }
    assert!(err
        .to_string()
        .starts_with("Error retrieving 'offset' query parameter from URL 'ibm.com?offset=tiger'"));
}

#[test]
fn test_get_query_param_decodes_values() {
    assert_eq!(
        get_query_param("https://host/p?search=a%20b&sort=~number", "search").unwrap(),
        Some("a b".to_string())
    );
    assert_eq!(
        get_query_param("https://host/p?search=x", "sort").unwrap(),
        None
    );
    assert_eq!(
        get_query_param_as_int("https://host/p?limit=25", "limit").unwrap(),
        Some(25)
    );
}

#[test]
fn test_pagination_link_serde() {
    let link: PaginationLink = serde_json::from_str(r#"{"href":"https://host/p?offset=3"}"#).unwrap();
    assert_eq!(link.href.as_deref(), Some("https://host/p?offset=3"));

    let empty: PaginationLink = serde_json::from_str("{}").unwrap();
    assert!(empty.href.is_none());
    assert_eq!(serde_json::to_string(&empty).unwrap(), "{}");
}

// ============================================================================
// Pager construction
// ============================================================================

#[test]
fn test_pager_rejects_preset_offset() {
    let fetcher = ScriptedFetcher::default();
    let options = ListOptions {
        offset: Some(10),
        limit: None,
    };

    let err = Pager::new(&fetcher, &options).unwrap_err();
    assert!(matches!(err, Error::Config { .. }));
    assert!(fetcher.offsets().is_empty());
}

#[test]
fn test_pager_accepts_zero_or_absent_offset() {
    let fetcher = ScriptedFetcher::default();

    let pager = Pager::new(&fetcher, &ListOptions::default()).unwrap();
    assert!(pager.has_next());

    let zero = ListOptions {
        offset: Some(0),
        limit: Some(5),
    };
    assert!(Pager::new(&fetcher, &zero).is_ok());
    assert!(fetcher.offsets().is_empty());
}

// ============================================================================
// Pager iteration
// ============================================================================

#[tokio::test]
async fn test_single_page_then_exhausted() {
    let fetcher = ScriptedFetcher::new(vec![Ok(Page::last(vec!["A"]))]);
    let mut pager = Pager::new(&fetcher, &ListOptions::default()).unwrap();

    let items = pager.get_next().await.unwrap();
    assert_eq!(items, vec!["A"]);
    assert!(!pager.has_next());

    let err = pager.get_next().await.unwrap_err();
    assert!(matches!(err, Error::NoMoreResults));
    assert_eq!(fetcher.offsets(), vec![None]);
}

#[tokio::test]
async fn test_cursor_advances_from_next_link() {
    let fetcher = ScriptedFetcher::new(vec![
        Ok(Page::linked("https://host/path?offset=1", vec!["A"])),
        Ok(Page::last(vec!["B"])),
    ]);
    let mut pager = Pager::new(&fetcher, &ListOptions::default()).unwrap();

    pager.get_next().await.unwrap();
    assert!(pager.has_next());
    pager.get_next().await.unwrap();

    assert_eq!(fetcher.offsets(), vec![None, Some(1)]);
    assert_eq!(pager.pages_fetched(), 2);
}

#[tokio::test]
async fn test_get_all_concatenates_in_order() {
    let fetcher = ScriptedFetcher::new(vec![
        Ok(Page::linked("https://host/path?offset=1", vec!["A"])),
        Ok(Page::linked("/path?offset=2", vec!["B", "C"])),
        Ok(Page::last(vec!["D"])),
    ]);
    let mut pager = Pager::new(&fetcher, &ListOptions::default()).unwrap();

    let all = pager.get_all().await.unwrap();
    assert_eq!(all, vec!["A", "B", "C", "D"]);
    assert!(!pager.has_next());
    assert_eq!(fetcher.offsets(), vec![None, Some(1), Some(2)]);
}

#[tokio::test]
async fn test_get_all_empty_list() {
    let fetcher = ScriptedFetcher::new(vec![Ok(Page::last(vec![]))]);
    let mut pager = Pager::new(&fetcher, &ListOptions::default()).unwrap();

    assert!(pager.get_all().await.unwrap().is_empty());
    assert!(!pager.has_next());
}

#[tokio::test]
async fn test_transport_failure_keeps_offset() {
    let fetcher = ScriptedFetcher::new(vec![
        Ok(Page::linked("https://host/path?offset=7", vec!["A"])),
        Err(transport_error()),
        Ok(Page::last(vec!["B"])),
    ]);
    let mut pager = Pager::new(&fetcher, &ListOptions::default()).unwrap();

    pager.get_next().await.unwrap();

    let err = pager.get_next().await.unwrap_err();
    assert_eq!(err.status_code(), Some(503));
    assert!(pager.has_next());

    let items = pager.get_next().await.unwrap();
    assert_eq!(items, vec!["B"]);
    assert_eq!(fetcher.offsets(), vec![None, Some(7), Some(7)]);
}

#[tokio::test]
async fn test_cursor_parse_failure_keeps_state() {
    let fetcher = ScriptedFetcher::new(vec![
        Ok(Page::linked("ibm.com?offset=tiger", vec!["A"])),
        Ok(Page::last(vec!["A"])),
    ]);
    let mut pager = Pager::new(&fetcher, &ListOptions::default()).unwrap();

    let err = pager.get_next().await.unwrap_err();
    assert!(matches!(err, Error::CursorParse { .. }));
    assert!(pager.has_next());
    assert_eq!(pager.pages_fetched(), 0);

    pager.get_next().await.unwrap();
    assert_eq!(fetcher.offsets(), vec![None, None]);
}

#[tokio::test]
async fn test_get_all_fails_on_first_error() {
    let fetcher = ScriptedFetcher::new(vec![
        Ok(Page::linked("https://host/path?offset=1", vec!["A"])),
        Err(transport_error()),
    ]);
    let mut pager = Pager::new(&fetcher, &ListOptions::default()).unwrap();

    let result = pager.get_all().await;
    assert!(matches!(result, Err(Error::HttpStatus { status: 503, .. })));
    assert!(pager.has_next());
}

#[tokio::test]
async fn test_caller_options_not_mutated() {
    let fetcher = ScriptedFetcher::new(vec![
        Ok(Page::linked("https://host/path?offset=1", vec!["A"])),
        Ok(Page::last(vec!["B"])),
    ]);
    let options = ListOptions {
        offset: None,
        limit: Some(1),
    };
    let mut pager = Pager::new(&fetcher, &options).unwrap();
    pager.get_all().await.unwrap();

    assert_eq!(options.offset, None);
    assert_eq!(options.limit, Some(1));
}

#[tokio::test]
async fn test_into_stream_yields_pages() {
    let fetcher = ScriptedFetcher::new(vec![
        Ok(Page::linked("https://host/path?offset=1", vec!["A"])),
        Ok(Page::last(vec!["B"])),
    ]);
    let pager = Pager::new(&fetcher, &ListOptions::default()).unwrap();

    let pages: Vec<Vec<&str>> = pager.into_stream().try_collect().await.unwrap();
    assert_eq!(pages, vec![vec!["A"], vec!["B"]]);
}

#[tokio::test]
async fn test_into_stream_stops_on_error() {
    let fetcher = ScriptedFetcher::new(vec![Err(transport_error())]);
    let pager = Pager::new(&fetcher, &ListOptions::default()).unwrap();

    let result: Result<Vec<Vec<&str>>> = pager.into_stream().try_collect().await;
    assert!(result.is_err());
}
