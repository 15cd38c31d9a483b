//! Offset-cursor pager
//!
//! A [`Pager`] walks a list endpoint page by page. It owns a copy of the
//! caller's options and rewrites their offset before every call, so the
//! caller's value is never mutated. Fetches are strictly sequential: each
//! request's offset comes from the previous response.

use super::types::{PageFetcher, PageItem, PagedOptions, PagedResponse};
use crate::error::{Error, Result};
use futures::Stream;
use tracing::debug;

/// Iterates over the pages of a list endpoint
pub struct Pager<'a, F, O> {
    fetcher: &'a F,
    options: O,
    has_next: bool,
    next: Option<i64>,
    pages_fetched: usize,
}

impl<'a, F, O> Pager<'a, F, O>
where
    O: PagedOptions,
    F: PageFetcher<O>,
{
    /// Create a pager that starts at the first page.
    ///
    /// Fails with [`Error::Config`] when `options` already carries a
    /// non-zero offset. No request is sent.
    pub fn new(fetcher: &'a F, options: &O) -> Result<Self> {
        if let Some(offset) = options.offset().filter(|offset| *offset != 0) {
            return Err(Error::config(format!(
                "the options 'offset' field should not be set (found {offset})"
            )));
        }

        Ok(Self {
            fetcher,
            options: options.clone(),
            has_next: true,
            next: None,
            pages_fetched: 0,
        })
    }

    /// Whether another call to [`get_next`](Self::get_next) can return results
    pub fn has_next(&self) -> bool {
        self.has_next
    }

    /// Number of pages successfully fetched so far
    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    /// Fetch the next page.
    ///
    /// On any error the pending offset is left untouched, so calling again
    /// re-requests the same page.
    pub async fn get_next(&mut self) -> Result<Vec<PageItem<F, O>>> {
        if !self.has_next {
            return Err(Error::NoMoreResults);
        }

        self.options.set_offset(self.next);
        debug!("Fetching page {} (offset {:?})", self.pages_fetched + 1, self.next);

        let page = self.fetcher.fetch_page(&self.options).await?;
        let next = page.next_offset()?;

        self.next = next;
        self.has_next = next.is_some();
        self.pages_fetched += 1;

        Ok(page.into_items())
    }

    /// Fetch every remaining page and concatenate the items in order.
    ///
    /// The first error aborts the whole call and discards the items gathered so far.
    pub async fn get_all(&mut self) -> Result<Vec<PageItem<F, O>>> {
        let mut all = Vec::new();
        while self.has_next {
            let items = self.get_next().await?;
            all.extend(items);
        }
        debug!("Fetched {} items over {} pages", all.len(), self.pages_fetched);
        Ok(all)
    }

    /// Turn the pager into a stream of pages.
    ///
    /// The stream ends after the last page or after the first error.
    pub fn into_stream(self) -> impl Stream<Item = Result<Vec<PageItem<F, O>>>> + 'a
    where
        F: 'a,
        O: 'a,
    {
        futures::stream::try_unfold(self, |mut pager| async move {
            if !pager.has_next() {
                return Ok::<_, Error>(None);
            }
            let items = pager.get_next().await?;
            Ok(Some((items, pager)))
        })
    }
}

impl<F, O: std::fmt::Debug> std::fmt::Debug for Pager<'_, F, O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pager")
            .field("options", &self.options)
            .field("has_next", &self.has_next)
            .field("next", &self.next)
            .field("pages_fetched", &self.pages_fetched)
            .finish_non_exhaustive()
    }
}
