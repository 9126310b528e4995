//! # Collection View
//!
//! Derived state over the fetched items: the full collection, the filtered and
//! sorted `matched` collection, and the `displayed` prefix revealed so far.
//!
//! ## Invariants:
//! - `displayed()` is always a prefix of `matched()` (it is a slice of it)
//! - `has_more()` is computed from the lengths, never stored
//! - `loading()` is true only while a page extension token is outstanding

use shared::Item;

/// Items revealed per pagination step
pub const PAGE_SIZE: usize = 12;

#[derive(Debug, Clone)]
pub struct CollectionView {
    all: Vec<Item>,
    matched: Vec<Item>,
    displayed_len: usize,
    page: usize,
    page_size: usize,
    pending_load: Option<u64>,
}

impl Default for CollectionView {
    fn default() -> Self {
        Self::new()
    }
}

impl CollectionView {
    pub fn new() -> Self {
        Self::with_page_size(PAGE_SIZE)
    }

    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            all: Vec::new(),
            matched: Vec::new(),
            displayed_len: 0,
            page: 1,
            page_size: page_size.max(1),
            pending_load: None,
        }
    }

    pub fn all(&self) -> &[Item] {
        &self.all
    }

    pub fn matched(&self) -> &[Item] {
        &self.matched
    }

    pub fn displayed(&self) -> &[Item] {
        &self.matched[..self.displayed_len]
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn has_more(&self) -> bool {
        self.displayed_len < self.matched.len()
    }

    pub fn loading(&self) -> bool {
        self.pending_load.is_some()
    }

    /// Replace the fetched collection. The caller re-derives `matched` and
    /// calls `reset_to` afterwards.
    pub fn replace_all(&mut self, items: Vec<Item>) {
        self.all = items;
    }

    /// Adopt a new matched collection and show its first page
    pub fn reset_to(&mut self, matched: Vec<Item>) {
        self.matched = matched;
        self.page = 1;
        self.displayed_len = self.page_size.min(self.matched.len());
        if let Some(token) = self.pending_load.take() {
            log::debug!("🧹 Discarding in-flight page load {} after reset", token);
        }
    }

    /// Append the next page of `matched` to the displayed prefix.
    /// Returns true when the prefix grew.
    pub fn load_next_page(&mut self) -> bool {
        if self.displayed_len >= self.matched.len() {
            return false;
        }

        let next_page = self.page + 1;
        let start = (next_page - 1) * self.page_size;
        let end = start + self.page_size;

        if start >= self.matched.len() {
            // displayed_len lagging behind page would land here; clamp so
            // has_more() reports false.
            self.displayed_len = self.matched.len();
            return false;
        }

        self.displayed_len = end.min(self.matched.len());
        self.page = next_page;

        log::debug!(
            "📄 Page {} loaded: showing {} of {} items",
            self.page,
            self.displayed_len,
            self.matched.len()
        );
        true
    }

    /// Mark a page extension as in flight. Refused while another load is
    /// pending or when nothing is left to show.
    pub fn begin_page_load(&mut self, token: u64) -> bool {
        if self.pending_load.is_some() || !self.has_more() {
            return false;
        }
        self.pending_load = Some(token);
        true
    }

    /// Complete the page extension identified by `token`. Stale tokens (from a
    /// load superseded by a reset) are ignored.
    pub fn finish_page_load(&mut self, token: u64) -> bool {
        if self.pending_load != Some(token) {
            log::debug!("⏭️ Ignoring stale page load {}", token);
            return false;
        }
        self.pending_load = None;
        self.load_next_page()
    }

    pub fn cancel_page_load(&mut self) {
        self.pending_load = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::PricingCategory;

    fn items(count: usize) -> Vec<Item> {
        (0..count)
            .map(|i| Item {
                id: format!("content-{:03}", i),
                title: format!("Item {}", i),
                creator: format!("Creator {}", i),
                pricing_category: PricingCategory::Free,
                image_path: String::new(),
                price: 0.0,
            })
            .collect()
    }

    fn view_with(count: usize) -> CollectionView {
        let mut view = CollectionView::new();
        view.replace_all(items(count));
        view.reset_to(items(count));
        view
    }

    #[test]
    fn test_reset_shows_first_page() {
        let view = view_with(25);
        assert_eq!(view.displayed().len(), 12);
        assert_eq!(view.page(), 1);
        assert!(view.has_more());
        assert!(!view.loading());
    }

    #[test]
    fn test_small_collection_has_no_more() {
        let view = view_with(5);
        assert_eq!(view.displayed().len(), 5);
        assert!(!view.has_more());
    }

    #[test]
    fn test_pagination_growth() {
        let mut view = view_with(25);

        assert!(view.load_next_page());
        assert_eq!(view.displayed().len(), 24);
        assert_eq!(view.page(), 2);
        assert!(view.has_more());

        assert!(view.load_next_page());
        assert_eq!(view.displayed().len(), 25);
        assert_eq!(view.page(), 3);
        assert!(!view.has_more());
    }

    #[test]
    fn test_exact_page_multiple_boundary() {
        let mut view = view_with(12);
        assert!(!view.has_more());

        assert!(!view.load_next_page());
        assert_eq!(view.displayed().len(), 12);
        assert_eq!(view.page(), 1);
        assert!(!view.has_more());

        let mut view = view_with(24);
        assert!(view.load_next_page());
        assert_eq!(view.displayed().len(), 24);
        assert!(!view.has_more());
    }

    #[test]
    fn test_empty_collection() {
        let mut view = view_with(0);
        assert!(view.displayed().is_empty());
        assert!(!view.has_more());
        assert!(!view.load_next_page());
        assert!(!view.begin_page_load(1));
    }

    #[test]
    fn test_displayed_is_prefix_of_matched() {
        let mut view = view_with(30);
        view.load_next_page();
        assert_eq!(view.displayed(), &view.matched()[..24]);
    }

    #[test]
    fn test_page_load_token_lifecycle() {
        let mut view = view_with(25);

        assert!(view.begin_page_load(1));
        assert!(view.loading());
        assert!(!view.begin_page_load(2), "second concurrent load must be refused");

        assert!(view.finish_page_load(1));
        assert!(!view.loading());
        assert_eq!(view.displayed().len(), 24);
    }

    #[test]
    fn test_reset_supersedes_in_flight_load() {
        let mut view = view_with(25);
        assert!(view.begin_page_load(7));

        view.reset_to(items(40));
        assert!(!view.loading());

        assert!(!view.finish_page_load(7));
        assert_eq!(view.displayed().len(), 12);
        assert_eq!(view.page(), 1);
    }

    #[test]
    fn test_cancel_page_load() {
        let mut view = view_with(25);
        view.begin_page_load(3);
        view.cancel_page_load();
        assert!(!view.loading());
        assert!(!view.finish_page_load(3));
    }
}
