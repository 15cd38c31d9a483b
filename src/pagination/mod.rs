//! Pagination module
//!
//! Offset-cursor pagination over list endpoints.
//!
//! # Overview
//!
//! Each page carries a `next` link. The `offset` query parameter of that
//! link's `href` is fed into the following list call until a page arrives
//! without one. [`Pager`] owns that loop; [`next_offset_from_link`] is the
//! cursor extraction every page type shares.
//!
//! ```rust,ignore
//! let mut pager = service.get_cases_pager(&GetCasesOptions::new().limit(50))?;
//! while pager.has_next() {
//!     for case in pager.get_next().await? {
//!         println!("{:?}", case.number);
//!     }
//! }
//! ```

mod pager;
mod types;

pub use pager::Pager;
pub use types::{
    get_query_param, get_query_param_as_int, next_offset_from_link, PageFetcher, PageItem,
    PagedOptions, PagedResponse, PaginationLink, OFFSET_PARAM,
};

#[cfg(test)]
mod tests;
