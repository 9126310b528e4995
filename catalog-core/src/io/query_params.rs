//! # Query Parameters
//!
//! Maps the filter spec to and from the flat string parameters of a shareable
//! URL.
//!
//! ## Parameter Format:
//! - `pricingOptions`: `+`-joined category indices, e.g. `0+2` for Paid and View Only
//! - `searchKeyword`: the trimmed keyword, percent-encoded
//! - `sortBy`: `name`, `price_high` or `price_low`
//! - `priceRange`: `min+max`, e.g. `0+999`
//!
//! Setting a parameter to an empty value removes the key instead of storing
//! an empty string. Decoding never fails: malformed values fall back to the
//! filter defaults.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use shared::{PriceRange, PricingCategory, SortKey};
use std::collections::BTreeMap;

use crate::domain::filter_state::{FilterSpec, PartialFilterSpec, PricingSelection};

pub const PRICING_KEY: &str = "pricingOptions";
pub const KEYWORD_KEY: &str = "searchKeyword";
pub const SORT_KEY: &str = "sortBy";
pub const PRICE_RANGE_KEY: &str = "priceRange";

/// Characters `encodeURIComponent` leaves as-is
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    params: BTreeMap<String, String>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Store `value` under `key`, or remove the key when `value` is empty
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if value.is_empty() {
            self.params.remove(&key);
        } else {
            self.params.insert(key, value);
        }
    }

    /// Apply several updates as one, with the same empty-removes rule as `set`
    pub fn set_many<K, V, I>(&mut self, updates: I)
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        for (key, value) in updates {
            self.set(key, value);
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.params.remove(key)
    }

    pub fn clear(&mut self) {
        self.params.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = QueryParams::new();
        params.set_many(iter);
        params
    }
}

/// Encode every field of `spec`
pub fn encode(spec: &FilterSpec) -> QueryParams {
    encode_partial(&PartialFilterSpec::from(spec.clone()))
        .into_iter()
        .collect()
}

/// Parameter updates for the fields present in `partial`. An empty value in
/// the result means "remove this key"; feed it to `QueryParams::set_many`.
pub fn encode_partial(partial: &PartialFilterSpec) -> Vec<(&'static str, String)> {
    let mut updates = Vec::new();

    if let Some(pricing) = &partial.pricing {
        updates.push((PRICING_KEY, encode_pricing(pricing)));
    }
    if let Some(keyword) = &partial.search_keyword {
        updates.push((KEYWORD_KEY, encode_keyword(keyword)));
    }
    if let Some(sort_key) = partial.sort_key {
        updates.push((SORT_KEY, sort_key.as_str().to_string()));
    }
    if let Some(range) = partial.price_range {
        updates.push((PRICE_RANGE_KEY, format!("{}+{}", range.min, range.max)));
    }

    updates
}

pub fn encode_pricing(pricing: &PricingSelection) -> String {
    pricing
        .selected()
        .map(|category| category.index().to_string())
        .collect::<Vec<_>>()
        .join("+")
}

pub fn encode_keyword(keyword: &str) -> String {
    utf8_percent_encode(keyword.trim(), COMPONENT).to_string()
}

/// Build a filter spec from `params`; absent or malformed keys take defaults
pub fn decode(params: &QueryParams) -> FilterSpec {
    FilterSpec {
        pricing: params.get(PRICING_KEY).map(decode_pricing).unwrap_or_default(),
        search_keyword: params.get(KEYWORD_KEY).map(percent_decode).unwrap_or_default(),
        sort_key: params
            .get(SORT_KEY)
            .map(|value| SortKey::parse_or_default(&percent_decode(value)))
            .unwrap_or_default(),
        price_range: params
            .get(PRICE_RANGE_KEY)
            .and_then(decode_price_range)
            .unwrap_or_default(),
    }
}

/// Only the keys present in `params`, for seeding filters without clobbering
/// fields the URL says nothing about
pub fn decode_partial(params: &QueryParams) -> PartialFilterSpec {
    let spec = decode(params);
    PartialFilterSpec {
        pricing: params.get(PRICING_KEY).map(|_| spec.pricing),
        search_keyword: params.get(KEYWORD_KEY).map(|_| spec.search_keyword.clone()),
        sort_key: params.get(SORT_KEY).map(|_| spec.sort_key),
        price_range: params.get(PRICE_RANGE_KEY).map(|_| spec.price_range),
    }
}

/// Unknown or out-of-range indices are skipped. Form decoding turns a literal
/// `+` into a space, so both separators are accepted.
fn decode_pricing(value: &str) -> PricingSelection {
    let categories: Vec<PricingCategory> = value
        .split(['+', ' '])
        .filter_map(|part| part.trim().parse::<u8>().ok())
        .filter_map(PricingCategory::from_index)
        .collect();
    PricingSelection::of(&categories)
}

fn decode_price_range(value: &str) -> Option<PriceRange> {
    let mut parts = value.split(['+', ' ']).filter(|part| !part.is_empty());
    let min = parts.next()?.parse::<f64>().ok()?;
    let max = parts.next()?.parse::<f64>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    let range = PriceRange::new(min, max);
    range.is_valid().then_some(range)
}

fn percent_decode(value: &str) -> String {
    percent_decode_str(value).decode_utf8_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> QueryParams {
        pairs.iter().map(|(k, v)| (*k, *v)).collect()
    }

    #[test]
    fn test_set_empty_removes_key() {
        let mut query = QueryParams::new();
        query.set(KEYWORD_KEY, "coat");
        assert_eq!(query.get(KEYWORD_KEY), Some("coat"));

        query.set(KEYWORD_KEY, "");
        assert_eq!(query.get(KEYWORD_KEY), None);
        assert!(query.is_empty());
    }

    #[test]
    fn test_set_many_applies_removal_rule() {
        let mut query = params(&[(PRICING_KEY, "0"), (SORT_KEY, "name")]);
        query.set_many([(PRICING_KEY, ""), (KEYWORD_KEY, "hat"), (SORT_KEY, "price_low")]);

        assert_eq!(query.get(PRICING_KEY), None);
        assert_eq!(query.get(KEYWORD_KEY), Some("hat"));
        assert_eq!(query.get(SORT_KEY), Some("price_low"));
        assert_eq!(query.len(), 2);
    }

    #[test]
    fn test_encode_pricing_in_index_order() {
        let selection = PricingSelection::of(&[PricingCategory::ViewOnly, PricingCategory::Paid]);
        assert_eq!(encode_pricing(&selection), "0+2");
        assert_eq!(encode_pricing(&PricingSelection::none()), "");
    }

    #[test]
    fn test_encode_keyword() {
        assert_eq!(encode_keyword("test search"), "test%20search");
        assert_eq!(
            encode_keyword("test@domain.com #special"),
            "test%40domain.com%20%23special"
        );
        assert_eq!(encode_keyword("  padded  "), "padded");
        assert_eq!(encode_keyword("it's (ok)!"), "it's%20(ok)!");
    }

    #[test]
    fn test_encode_full_spec_omits_empty_fields() {
        let query = encode(&FilterSpec::default());

        assert_eq!(query.get(PRICING_KEY), None);
        assert_eq!(query.get(KEYWORD_KEY), None);
        assert_eq!(query.get(SORT_KEY), Some("name"));
        assert_eq!(query.get(PRICE_RANGE_KEY), Some("0+999"));
    }

    #[test]
    fn test_encode_partial_only_present_fields() {
        let updates = encode_partial(&PartialFilterSpec {
            pricing: Some(PricingSelection::none()),
            sort_key: Some(SortKey::PriceHigh),
            ..Default::default()
        });

        assert_eq!(
            updates,
            vec![(PRICING_KEY, String::new()), (SORT_KEY, "price_high".to_string())]
        );
    }

    #[test]
    fn test_decode_defaults() {
        let spec = decode(&QueryParams::new());
        assert_eq!(spec, FilterSpec::default());
    }

    #[test]
    fn test_decode_pricing() {
        let spec = decode(&params(&[(PRICING_KEY, "0+1")]));
        assert!(spec.pricing.paid);
        assert!(spec.pricing.free);
        assert!(!spec.pricing.view_only);

        // "+" arrives as a space after form decoding
        let spec = decode(&params(&[(PRICING_KEY, "1 2")]));
        assert_eq!(spec.pricing, PricingSelection::of(&[PricingCategory::Free, PricingCategory::ViewOnly]));
    }

    #[test]
    fn test_decode_ignores_invalid_pricing_indices() {
        let spec = decode(&params(&[(PRICING_KEY, "0+7+abc+-1+2")]));
        assert_eq!(spec.pricing, PricingSelection::of(&[PricingCategory::Paid, PricingCategory::ViewOnly]));
    }

    #[test]
    fn test_decode_keyword_is_percent_decoded() {
        let spec = decode(&params(&[(KEYWORD_KEY, "test%40domain.com%20%23special")]));
        assert_eq!(spec.search_keyword, "test@domain.com #special");
    }

    #[test]
    fn test_decode_sort_key() {
        let spec = decode(&params(&[(SORT_KEY, "price%5Fhigh")]));
        assert_eq!(spec.sort_key, SortKey::PriceHigh);

        let spec = decode(&params(&[(SORT_KEY, "cheapest")]));
        assert_eq!(spec.sort_key, SortKey::Name);
    }

    #[test]
    fn test_decode_price_range() {
        let spec = decode(&params(&[(PRICE_RANGE_KEY, "10+250")]));
        assert_eq!(spec.price_range, PriceRange::new(10.0, 250.0));

        for bad in ["abc", "10", "300+20", "1+2+3", "-5+10"] {
            let spec = decode(&params(&[(PRICE_RANGE_KEY, bad)]));
            assert_eq!(spec.price_range, PriceRange::default(), "value {:?}", bad);
        }
    }

    #[test]
    fn test_decode_partial_leaves_absent_keys_unset() {
        let partial = decode_partial(&params(&[(SORT_KEY, "price_low")]));
        assert_eq!(partial.sort_key, Some(SortKey::PriceLow));
        assert_eq!(partial.pricing, None);
        assert_eq!(partial.search_keyword, None);
        assert_eq!(partial.price_range, None);
    }

    #[test]
    fn test_encoded_spec_decodes_to_same_filters() {
        let mut spec = FilterSpec::default();
        spec.set_pricing_category(PricingCategory::Free, true);
        spec.set_search_keyword("summer dress");
        spec.set_sort_key(SortKey::PriceLow);
        spec.set_price_range(PriceRange::new(5.0, 80.5));

        assert_eq!(decode(&encode(&spec)), spec);
    }
}
