//! Filter pipeline: pricing filter, keyword filter, then a stable sort.
//!
//! `apply_filters` is pure; the input slice is never reordered and the same
//! inputs always produce the same output.

use shared::{Item, PricingCategory, SortKey};
use std::cmp::Ordering;

use super::filter_state::FilterSpec;

/// Behaviour switches that are not part of the user's filter intent
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Exclude Paid items priced outside `FilterSpec::price_range`
    pub apply_price_range: bool,
}

pub fn apply_filters(all: &[Item], spec: &FilterSpec, options: PipelineOptions) -> Vec<Item> {
    let keyword = normalized_keyword(&spec.search_keyword);

    let matched: Vec<Item> = all
        .iter()
        .filter(|item| matches_filters(item, spec, keyword.as_deref(), options))
        .cloned()
        .collect();

    log::debug!(
        "🔍 Filter pipeline matched {} of {} items (sort: {})",
        matched.len(),
        all.len(),
        spec.sort_key
    );

    sort_items(matched, spec.sort_key)
}

/// Lowercased, trimmed keyword; `None` when there is nothing to match
fn normalized_keyword(keyword: &str) -> Option<String> {
    let trimmed = keyword.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Single-item predicate. `keyword` must already be normalized.
pub fn matches_filters(
    item: &Item,
    spec: &FilterSpec,
    keyword: Option<&str>,
    options: PipelineOptions,
) -> bool {
    if !spec.pricing.is_empty() && !spec.pricing.contains(item.pricing_category) {
        return false;
    }

    if options.apply_price_range
        && item.pricing_category == PricingCategory::Paid
        && !spec.price_range.contains(item.effective_price())
    {
        return false;
    }

    match keyword {
        Some(keyword) => {
            item.title.to_lowercase().contains(keyword) || item.creator.to_lowercase().contains(keyword)
        }
        None => true,
    }
}

/// Stable sort; equal keys keep their relative order
pub fn sort_items(mut items: Vec<Item>, sort_key: SortKey) -> Vec<Item> {
    match sort_key {
        SortKey::Name => items.sort_by(compare_creator),
        SortKey::PriceHigh => {
            items.sort_by(|a, b| b.effective_price().total_cmp(&a.effective_price()))
        }
        SortKey::PriceLow => {
            items.sort_by(|a, b| a.effective_price().total_cmp(&b.effective_price()))
        }
    }
    items
}

fn compare_creator(a: &Item, b: &Item) -> Ordering {
    a.creator
        .to_lowercase()
        .cmp(&b.creator.to_lowercase())
        .then_with(|| a.creator.cmp(&b.creator))
}
