//! # Filter State
//!
//! The user's filtering and sorting intent, plus the discrete operations that
//! mutate it.
//!
//! ## Business Rules
//!
//! - An empty pricing selection means "no pricing filter", not "match nothing"
//! - A bulk merge replaces the pricing selection wholesale when present
//! - `reset()` only clears the pricing selection; keyword, sort key and price
//!   range survive a reset
//!
//! Every mutation reports whether the filters actually changed so the caller can
//! skip recomputing the matched collection on no-op updates.

use serde::{Deserialize, Serialize};
use shared::{PriceRange, PricingCategory, SortKey};

/// Which pricing categories are selected
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingSelection {
    pub paid: bool,
    pub free: bool,
    pub view_only: bool,
}

impl PricingSelection {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn of(categories: &[PricingCategory]) -> Self {
        let mut selection = Self::default();
        for category in categories {
            selection.set(*category, true);
        }
        selection
    }

    pub fn is_empty(&self) -> bool {
        !(self.paid || self.free || self.view_only)
    }

    pub fn contains(&self, category: PricingCategory) -> bool {
        match category {
            PricingCategory::Paid => self.paid,
            PricingCategory::Free => self.free,
            PricingCategory::ViewOnly => self.view_only,
        }
    }

    pub fn set(&mut self, category: PricingCategory, selected: bool) {
        match category {
            PricingCategory::Paid => self.paid = selected,
            PricingCategory::Free => self.free = selected,
            PricingCategory::ViewOnly => self.view_only = selected,
        }
    }

    /// Selected categories in index order (Paid, Free, ViewOnly)
    pub fn selected(&self) -> impl Iterator<Item = PricingCategory> + '_ {
        PricingCategory::ALL
            .into_iter()
            .filter(move |category| self.contains(*category))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub pricing: PricingSelection,
    pub search_keyword: String,
    pub sort_key: SortKey,
    pub price_range: PriceRange,
}

/// A bulk update where absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialFilterSpec {
    pub pricing: Option<PricingSelection>,
    pub search_keyword: Option<String>,
    pub sort_key: Option<SortKey>,
    pub price_range: Option<PriceRange>,
}

impl PartialFilterSpec {
    pub fn is_empty(&self) -> bool {
        self.pricing.is_none()
            && self.search_keyword.is_none()
            && self.sort_key.is_none()
            && self.price_range.is_none()
    }
}

impl From<FilterSpec> for PartialFilterSpec {
    fn from(spec: FilterSpec) -> Self {
        Self {
            pricing: Some(spec.pricing),
            search_keyword: Some(spec.search_keyword),
            sort_key: Some(spec.sort_key),
            price_range: Some(spec.price_range),
        }
    }
}

impl FilterSpec {
    pub fn set_pricing_category(&mut self, category: PricingCategory, selected: bool) -> bool {
        let before = self.pricing;
        self.pricing.set(category, selected);
        before != self.pricing
    }

    pub fn set_search_keyword(&mut self, keyword: impl Into<String>) -> bool {
        let keyword = keyword.into();
        if self.search_keyword == keyword {
            return false;
        }
        self.search_keyword = keyword;
        true
    }

    pub fn set_sort_key(&mut self, sort_key: SortKey) -> bool {
        if self.sort_key == sort_key {
            return false;
        }
        self.sort_key = sort_key;
        true
    }

    pub fn set_price_range(&mut self, price_range: PriceRange) -> bool {
        if self.price_range == price_range {
            return false;
        }
        self.price_range = price_range;
        true
    }

    /// Shallow merge; a present `pricing` replaces the whole selection
    pub fn merge(&mut self, partial: PartialFilterSpec) -> bool {
        let before = self.clone();
        if let Some(pricing) = partial.pricing {
            self.pricing = pricing;
        }
        if let Some(keyword) = partial.search_keyword {
            self.search_keyword = keyword;
        }
        if let Some(sort_key) = partial.sort_key {
            self.sort_key = sort_key;
        }
        if let Some(price_range) = partial.price_range {
            self.price_range = price_range;
        }
        before != *self
    }

    /// Clears the pricing selection only
    pub fn reset(&mut self) -> bool {
        let before = self.pricing;
        self.pricing = PricingSelection::none();
        before != self.pricing
    }
}
