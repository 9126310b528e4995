//! # Catalog Store
//!
//! The single owner of catalog state: the filter spec, the collection view and
//! the fetch status. All changes arrive as `CatalogAction` messages through
//! `update`, so the UI layer can keep the store in a reducer without any
//! ambient global state.
//!
//! ## Data Flow:
//! 1. A fetch completes and fully replaces the item collection
//! 2. The current filter spec is applied, producing the matched collection
//! 3. Pagination resets to the first page of that collection
//! 4. Page extensions grow the displayed prefix until nothing is left
//!
//! Any real filter change repeats steps 2-3 and supersedes an in-flight page
//! extension.

use shared::{Item, PriceRange, PricingCategory, SortKey};

use super::collection_view::CollectionView;
use super::filter_pipeline::{apply_filters, PipelineOptions};
use super::filter_state::{FilterSpec, PartialFilterSpec};

/// Status of the (external) fetch of the full item collection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchState {
    pub in_flight: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CatalogAction {
    FetchStarted,
    FetchSucceeded(Vec<Item>),
    FetchFailed(String),
    ClearError,
    SetPricingCategory { category: PricingCategory, selected: bool },
    SetSearchKeyword(String),
    SetSortKey(SortKey),
    SetPriceRange(PriceRange),
    MergeFilters(PartialFilterSpec),
    ResetFilters,
    /// A page extension was requested; `token` identifies it until it finishes
    PageLoadStarted { token: u64 },
    PageLoadFinished { token: u64 },
}

#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    filters: FilterSpec,
    view: CollectionView,
    fetch: FetchState,
    options: PipelineOptions,
}

impl CatalogStore {
    pub fn new(options: PipelineOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn filters(&self) -> &FilterSpec {
        &self.filters
    }

    pub fn view(&self) -> &CollectionView {
        &self.view
    }

    pub fn fetch(&self) -> &FetchState {
        &self.fetch
    }

    pub fn displayed(&self) -> &[Item] {
        self.view.displayed()
    }

    pub fn has_more(&self) -> bool {
        self.view.has_more()
    }

    /// True while either the initial fetch or a page extension is in flight
    pub fn loading(&self) -> bool {
        self.fetch.in_flight || self.view.loading()
    }

    pub fn error(&self) -> Option<&str> {
        self.fetch.error.as_deref()
    }

    pub fn update(&mut self, action: CatalogAction) {
        match action {
            CatalogAction::FetchStarted => {
                self.fetch.in_flight = true;
                self.fetch.error = None;
            }
            CatalogAction::FetchSucceeded(items) => {
                log::info!("📦 Fetched {} catalog items", items.len());
                self.fetch.in_flight = false;
                self.view.replace_all(items);
                self.refresh_matched();
            }
            CatalogAction::FetchFailed(message) => {
                log::warn!("❌ Catalog fetch failed: {}", message);
                self.fetch.in_flight = false;
                self.fetch.error = Some(message);
            }
            CatalogAction::ClearError => {
                self.fetch.error = None;
            }
            CatalogAction::SetPricingCategory { category, selected } => {
                if self.filters.set_pricing_category(category, selected) {
                    self.refresh_matched();
                }
            }
            CatalogAction::SetSearchKeyword(keyword) => {
                if self.filters.set_search_keyword(keyword) {
                    self.refresh_matched();
                }
            }
            CatalogAction::SetSortKey(sort_key) => {
                if self.filters.set_sort_key(sort_key) {
                    self.refresh_matched();
                }
            }
            CatalogAction::SetPriceRange(price_range) => {
                if self.filters.set_price_range(price_range) {
                    self.refresh_matched();
                }
            }
            CatalogAction::MergeFilters(partial) => {
                if self.filters.merge(partial) {
                    self.refresh_matched();
                }
            }
            CatalogAction::ResetFilters => {
                if self.filters.reset() {
                    self.refresh_matched();
                }
            }
            CatalogAction::PageLoadStarted { token } => {
                if !self.view.begin_page_load(token) {
                    log::debug!("⏸️ Page load {} refused (loading or exhausted)", token);
                }
            }
            CatalogAction::PageLoadFinished { token } => {
                self.view.finish_page_load(token);
            }
        }
    }

    fn refresh_matched(&mut self) {
        let matched = apply_filters(self.view.all(), &self.filters, self.options);
        log::info!(
            "🔍 Filters applied: {} of {} items match",
            matched.len(),
            self.view.all().len()
        );
        self.view.reset_to(matched);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::filter_state::PricingSelection;

    fn item(id: &str, creator: &str, category: PricingCategory, price: f64) -> Item {
        Item {
            id: id.to_string(),
            title: format!("Title {}", id),
            creator: creator.to_string(),
            pricing_category: category,
            image_path: String::new(),
            price,
        }
    }

    fn catalog(count: usize) -> Vec<Item> {
        (0..count)
            .map(|i| {
                let category = PricingCategory::ALL[i % 3];
                item(&format!("{:03}", i), &format!("Creator {:03}", i), category, i as f64)
            })
            .collect()
    }

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn loaded_store(count: usize) -> CatalogStore {
        init_logging();
        let mut store = CatalogStore::default();
        store.update(CatalogAction::FetchStarted);
        store.update(CatalogAction::FetchSucceeded(catalog(count)));
        store
    }

    #[test]
    fn test_fetch_lifecycle() {
        let mut store = CatalogStore::default();
        store.update(CatalogAction::FetchStarted);
        assert!(store.loading());

        store.update(CatalogAction::FetchSucceeded(catalog(30)));
        assert!(!store.loading());
        assert_eq!(store.view().all().len(), 30);
        assert_eq!(store.displayed().len(), 12);
        assert!(store.has_more());
    }

    #[test]
    fn test_fetch_failure_keeps_previous_items() {
        let mut store = loaded_store(30);
        store.update(CatalogAction::FetchStarted);
        store.update(CatalogAction::FetchFailed("Network error".to_string()));

        assert_eq!(store.error(), Some("Network error"));
        assert!(!store.loading());
        assert_eq!(store.view().all().len(), 30);
        assert_eq!(store.displayed().len(), 12);

        store.update(CatalogAction::ClearError);
        assert_eq!(store.error(), None);
    }

    #[test]
    fn test_fetch_applies_current_filters() {
        let mut store = CatalogStore::default();
        store.update(CatalogAction::SetPricingCategory {
            category: PricingCategory::Free,
            selected: true,
        });
        store.update(CatalogAction::FetchSucceeded(catalog(30)));

        assert_eq!(store.view().matched().len(), 10);
        assert!(store.displayed().iter().all(|i| i.pricing_category == PricingCategory::Free));
    }

    #[test]
    fn test_filter_change_resets_pagination() {
        let mut store = loaded_store(40);
        store.update(CatalogAction::PageLoadStarted { token: 1 });
        store.update(CatalogAction::PageLoadFinished { token: 1 });
        assert_eq!(store.view().page(), 2);

        store.update(CatalogAction::SetSortKey(SortKey::PriceHigh));
        assert_eq!(store.view().page(), 1);
        assert_eq!(store.displayed().len(), 12);
        assert_eq!(store.displayed()[0].price, 39.0);
    }

    #[test]
    fn test_noop_filter_change_keeps_pagination() {
        let mut store = loaded_store(40);
        store.update(CatalogAction::PageLoadStarted { token: 1 });
        store.update(CatalogAction::PageLoadFinished { token: 1 });

        store.update(CatalogAction::SetSortKey(SortKey::Name));
        store.update(CatalogAction::ResetFilters);
        assert_eq!(store.view().page(), 2);
        assert_eq!(store.displayed().len(), 24);
    }

    #[test]
    fn test_filter_change_supersedes_in_flight_page_load() {
        let mut store = loaded_store(40);
        store.update(CatalogAction::PageLoadStarted { token: 5 });
        assert!(store.loading());

        store.update(CatalogAction::SetSearchKeyword("Creator 0".to_string()));
        assert!(!store.loading());

        store.update(CatalogAction::PageLoadFinished { token: 5 });
        assert_eq!(store.view().page(), 1);
    }

    #[test]
    fn test_concurrent_page_loads_are_refused() {
        let mut store = loaded_store(40);
        store.update(CatalogAction::PageLoadStarted { token: 1 });
        store.update(CatalogAction::PageLoadStarted { token: 2 });
        store.update(CatalogAction::PageLoadFinished { token: 2 });
        assert_eq!(store.displayed().len(), 12);

        store.update(CatalogAction::PageLoadFinished { token: 1 });
        assert_eq!(store.displayed().len(), 24);
    }

    #[test]
    fn test_merge_filters_from_url_seed() {
        let mut store = loaded_store(30);
        store.update(CatalogAction::MergeFilters(PartialFilterSpec {
            pricing: Some(PricingSelection::of(&[PricingCategory::Paid, PricingCategory::ViewOnly])),
            sort_key: Some(SortKey::PriceLow),
            ..Default::default()
        }));

        assert_eq!(store.view().matched().len(), 20);
        assert!(store.view().matched().iter().all(|i| i.pricing_category != PricingCategory::Free));
        assert_eq!(store.displayed()[0].price, 0.0);
    }

    #[test]
    fn test_reset_filters_restores_all_categories() {
        let mut store = loaded_store(30);
        store.update(CatalogAction::SetSearchKeyword("Creator 00".to_string()));
        store.update(CatalogAction::SetPricingCategory {
            category: PricingCategory::Paid,
            selected: true,
        });
        let narrowed = store.view().matched().len();

        store.update(CatalogAction::ResetFilters);
        assert!(store.view().matched().len() > narrowed);
        assert_eq!(store.filters().search_keyword, "Creator 00");
    }

    #[test]
    fn test_price_range_option() {
        let mut store = CatalogStore::new(PipelineOptions { apply_price_range: true });
        store.update(CatalogAction::FetchSucceeded(catalog(30)));
        store.update(CatalogAction::SetPriceRange(PriceRange::new(0.0, 10.0)));

        // Paid items are 0, 3, .., 27; only 0, 3, 6, 9 fall in range
        let paid = store
            .view()
            .matched()
            .iter()
            .filter(|i| i.pricing_category == PricingCategory::Paid)
            .count();
        assert_eq!(paid, 4);
    }
}
