//! Shared types for the YouTube API client.

use serde::{Deserialize, Serialize};

/// Paging details for lists of resources.
///
/// See: <https://developers.google.com/youtube/v3/docs/pageInfo>
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageInfo {
    /// The total number of results in the result set.
    #[serde(rename = "totalResults", default)]
    pub total_results: u32,
}

/// One page of a list response.
///
/// Only supports forward pagination (no previous page support).
#[derive(Debug, Clone)]
pub struct Page<T> {
    /// The items on this page, in the order the API returned them.
    pub items: Vec<T>,
    /// Continuation cursor for the next page, as returned by the API.
    pub next_page_token: Option<String>,
}

impl<T> Page<T> {
    /// The cursor to pass to get the next page, or `None` if this is the last page.
    ///
    /// The API may signal the last page either by omitting `nextPageToken` or by sending it
    /// empty; both mean there is nothing more to fetch.
    pub fn next_cursor(&self) -> Option<&str> {
        self.next_page_token.as_deref().filter(|t| !t.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_token_is_last_page() {
        let page = Page::<()> {
            items: vec![],
            next_page_token: Some(String::new()),
        };
        assert_eq!(page.next_cursor(), None);

        let page = Page::<()> {
            items: vec![],
            next_page_token: None,
        };
        assert_eq!(page.next_cursor(), None);

        let page = Page::<()> {
            items: vec![],
            next_page_token: Some("CAoQAA".into()),
        };
        assert_eq!(page.next_cursor(), Some("CAoQAA"));
    }
}
