//! Pagination helpers for API requests
//!
//! Confluence list endpoints page results with `start`/`limit` query
//! parameters and echo the slice geometry back in the response body.
//! [`collect_all`] drives that cursor until the endpoint runs dry.

use std::future::Future;

use serde::Deserialize;

use crate::error::Result;

/// Page size requested by the client's list operations.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// One bounded slice of a list response.
#[derive(Debug, Clone, Deserialize)]
pub struct PageOf<T> {
    /// Items in this slice
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,

    /// Offset at which this slice starts
    #[serde(default)]
    pub start: u32,

    /// Slice capacity requested by the caller
    #[serde(default)]
    pub limit: u32,

    /// Number of items actually returned; `size < limit` marks the last page
    #[serde(default)]
    pub size: u32,
}

impl<T> PageOf<T> {
    /// Whether another page might follow this one.
    ///
    /// A full page (`size == limit`) is treated as "there might be more",
    /// which issues one extra empty fetch when the total is an exact
    /// multiple of the page size. Existing integrations depend on that call
    /// pattern, so it is kept as-is rather than tracking a running total.
    pub fn has_more(&self) -> bool {
        self.size == self.limit
    }

    /// Offset of the page after this one.
    pub fn next_start(&self) -> u32 {
        self.start + self.limit
    }
}

/// Materialize an entire paginated listing.
///
/// `fetch` maps a start offset to one page request; it is invoked strictly
/// sequentially, each offset derived from the previous page. A zero-result
/// first page yields an empty vector without error — "no results means not
/// found" is a call-site policy, not a collector one.
pub async fn collect_all<T, F, Fut>(mut fetch: F) -> Result<Vec<T>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<PageOf<T>>>,
{
    let mut start = 0;
    let mut all = Vec::new();

    loop {
        let page = fetch(start).await?;
        let has_more = page.has_more();
        let next_start = page.next_start();

        all.extend(page.results);

        if !has_more {
            return Ok(all);
        }
        start = next_start;
    }
}
