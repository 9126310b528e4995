use catalog_core::io::query_params::{KEYWORD_KEY, PRICE_RANGE_KEY, PRICING_KEY, SORT_KEY};
use catalog_core::QueryParams;
use wasm_bindgen::JsValue;
use web_sys::UrlSearchParams;
use yew::prelude::*;

use crate::services::logging::Logger;

const KNOWN_KEYS: [&str; 4] = [PRICING_KEY, KEYWORD_KEY, SORT_KEY, PRICE_RANGE_KEY];

pub struct UseQueryParamsResult {
    /// Parameters present in the URL when the component mounted
    pub initial: QueryParams,
    /// Apply updates; an empty value removes its key
    pub set_params: Callback<Vec<(&'static str, String)>>,
}

/// Read the catalog parameters from the current location
pub fn read_query_params() -> QueryParams {
    let Some(window) = web_sys::window() else {
        return QueryParams::new();
    };
    let search = window.location().search().unwrap_or_default();
    let Ok(search_params) = UrlSearchParams::new_with_str(&search) else {
        return QueryParams::new();
    };

    KNOWN_KEYS
        .iter()
        .filter_map(|key| search_params.get(key).map(|value| (*key, value)))
        .collect()
}

/// Set or remove (empty value) each updated key, leaving every other key alone
pub fn apply_updates(search_params: &UrlSearchParams, updates: Vec<(&'static str, String)>) {
    for (key, value) in updates {
        if value.is_empty() {
            search_params.delete(key);
        } else {
            search_params.set(key, &value);
        }
    }
}

/// Merge `updates` into the URL without adding a history entry
pub fn write_query_params(updates: Vec<(&'static str, String)>) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let location = window.location();

    let search_params = UrlSearchParams::new_with_str(&location.search()?)?;
    apply_updates(&search_params, updates);

    let query: String = search_params.to_string().into();
    let path = location.pathname()?;
    let url = if query.is_empty() {
        path
    } else {
        format!("{}?{}", path, query)
    };

    window
        .history()?
        .replace_state_with_url(&JsValue::NULL, "", Some(&url))
}

#[hook]
pub fn use_query_params() -> UseQueryParamsResult {
    let initial = use_state(read_query_params);

    let set_params = use_callback((), |updates: Vec<(&'static str, String)>, _| {
        if let Err(e) = write_query_params(updates) {
            Logger::warn_with_component("query-params-hook", &format!("⚠️ Failed to update URL: {:?}", e));
        }
    });

    UseQueryParamsResult {
        initial: (*initial).clone(),
        set_params,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_updates_keep_unrelated_params() {
        let query = format!("?ref=newsletter&{}=name&{}=hat", SORT_KEY, KEYWORD_KEY);
        let search_params = UrlSearchParams::new_with_str(&query).unwrap();

        apply_updates(
            &search_params,
            vec![(SORT_KEY, "price_high".to_string()), (KEYWORD_KEY, String::new())],
        );

        assert_eq!(search_params.get("ref").as_deref(), Some("newsletter"));
        assert_eq!(search_params.get(SORT_KEY).as_deref(), Some("price_high"));
        assert_eq!(search_params.get(KEYWORD_KEY), None);
    }
}
