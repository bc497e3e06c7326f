use tracing::{debug, warn};

use crate::error::FetchError;
use crate::models::{ScanOutcome, SearchResultItem};

/// Fetches one page (1-based) of search results for a query.
pub trait PageFetcher {
    fn fetch_page(&self, keyword: &str, page: u32) -> Result<Vec<SearchResultItem>, FetchError>;
}

impl<F> PageFetcher for F
where
    F: Fn(&str, u32) -> Result<Vec<SearchResultItem>, FetchError>,
{
    fn fetch_page(&self, keyword: &str, page: u32) -> Result<Vec<SearchResultItem>, FetchError> {
        self(keyword, page)
    }
}

/// Scans pages 1..=page_limit in order and reports the first occurrence of `target_id`.
///
/// A failed page ends the scan as not found, keeping the count of items seen so far.
/// `items_checked` counts items up to and including the match.
pub fn find_position<P>(keyword: &str, target_id: &str, page_limit: u32, fetcher: &P) -> ScanOutcome
where
    P: PageFetcher + ?Sized,
{
    let mut items_checked: u32 = 0;

    for page in 1..=page_limit {
        let items = match fetcher.fetch_page(keyword, page) {
            Ok(items) => items,
            Err(e) => {
                warn!(keyword, page, error = %e, "search page failed, abandoning keyword");
                return ScanOutcome::not_found(items_checked);
            }
        };
        debug!(keyword, page, items = items.len(), "fetched search page");

        for (idx, item) in items.iter().enumerate() {
            items_checked += 1;
            if item.id == target_id {
                return ScanOutcome::found(page, idx as u32 + 1, items_checked);
            }
        }
    }

    ScanOutcome::not_found(items_checked)
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use super::*;

    type PageResult = Result<Vec<SearchResultItem>, FetchError>;

    fn page_of(ids: &[&str]) -> Vec<SearchResultItem> {
        ids.iter().map(|id| SearchResultItem::new(*id)).collect()
    }

    fn numbered_page(page: u32, len: u32) -> Vec<SearchResultItem> {
        (0..len)
            .map(|i| SearchResultItem::new(format!("{}", page * 1000 + i)))
            .collect()
    }

    #[test]
    fn match_on_first_page_stops_fetching() {
        let calls = Cell::new(0);
        let fetch = |_: &str, _: u32| -> PageResult {
            calls.set(calls.get() + 1);
            Ok(page_of(&["1", "2", "12345"]))
        };

        let outcome = find_position("чехол", "12345", 3, &fetch);

        assert_eq!(outcome, ScanOutcome::found(1, 3, 3));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn absent_target_counts_every_item() {
        let calls = Cell::new(0);
        let fetch = |_: &str, page: u32| -> PageResult {
            calls.set(calls.get() + 1);
            Ok(numbered_page(page, 10))
        };

        let outcome = find_position("чехол", "12345", 3, &fetch);

        assert_eq!(outcome, ScanOutcome::not_found(30));
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn fetch_error_aborts_remaining_pages() {
        let pages = RefCell::new(Vec::new());
        let fetch = |_: &str, page: u32| -> PageResult {
            pages.borrow_mut().push(page);
            if page == 2 {
                return Err(FetchError::Status {
                    status: 503,
                    url: "https://search.example/".to_string(),
                });
            }
            Ok(numbered_page(page, 10))
        };

        let outcome = find_position("чехол", "12345", 3, &fetch);

        assert_eq!(outcome, ScanOutcome::not_found(10));
        assert_eq!(*pages.borrow(), vec![1, 2]);
    }

    #[test]
    fn match_on_later_page_counts_previous_pages() {
        let fetch = |_: &str, page: u32| -> PageResult {
            if page == 2 {
                Ok(page_of(&["7", "8", "42", "42"]))
            } else {
                Ok(numbered_page(page, 5))
            }
        };

        let outcome = find_position("чехол", "42", 5, &fetch);

        assert_eq!(outcome, ScanOutcome::found(2, 3, 8));
    }

    #[test]
    fn zero_page_limit_never_fetches() {
        let calls = Cell::new(0);
        let fetch = |_: &str, _: u32| -> PageResult {
            calls.set(calls.get() + 1);
            Ok(page_of(&["1"]))
        };

        let outcome = find_position("чехол", "1", 0, &fetch);

        assert_eq!(outcome, ScanOutcome::not_found(0));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn empty_pages_are_skipped() {
        let pages = RefCell::new(Vec::new());
        let fetch = |_: &str, page: u32| -> PageResult {
            pages.borrow_mut().push(page);
            if page < 3 { Ok(Vec::new()) } else { Ok(page_of(&["9"])) }
        };

        let outcome = find_position("чехол", "9", 3, &fetch);

        assert_eq!(outcome, ScanOutcome::found(3, 1, 1));
        assert_eq!(*pages.borrow(), vec![1, 2, 3]);
    }

    #[test]
    fn keyword_is_passed_through() {
        let seen = RefCell::new(Vec::new());
        let fetch = |kw: &str, page: u32| -> PageResult {
            seen.borrow_mut().push((kw.to_string(), page));
            Ok(Vec::new())
        };

        find_position("смартфон", "1", 2, &fetch);

        assert_eq!(
            *seen.borrow(),
            vec![("смартфон".to_string(), 1), ("смартфон".to_string(), 2)]
        );
    }

    #[test]
    fn repeated_scans_agree() {
        let fetch = |_: &str, page: u32| -> PageResult { Ok(numbered_page(page, 4)) };
        let first = find_position("чехол", "3002", 4, &fetch);
        let second = find_position("чехол", "3002", 4, &fetch);
        assert_eq!(first, second);
        assert_eq!(first, ScanOutcome::found(3, 3, 11));
    }

    #[test]
    fn works_through_trait_object() {
        let fetch = |_: &str, _: u32| -> PageResult { Ok(page_of(&["a", "b"])) };
        let dyn_fetch: &dyn PageFetcher = &fetch;
        assert_eq!(find_position("чехол", "b", 1, dyn_fetch), ScanOutcome::found(1, 2, 2));
    }
}
