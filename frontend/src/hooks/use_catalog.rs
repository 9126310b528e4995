use std::rc::Rc;

use catalog_core::{CatalogAction, CatalogStore, PartialFilterSpec, PipelineOptions};
use gloo::timers::future::TimeoutFuture;
use shared::{PriceRange, PricingCategory, SortKey};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;

/// Reducer wrapper so the store can live in `use_reducer`
#[derive(Clone)]
pub struct CatalogState {
    pub store: CatalogStore,
}

impl Reducible for CatalogState {
    type Action = CatalogAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut state = Rc::unwrap_or_clone(self);
        state.store.update(action);
        Rc::new(state)
    }
}

pub struct UseCatalogResult {
    pub state: UseReducerHandle<CatalogState>,
    pub actions: UseCatalogActions,
}

#[derive(Clone, PartialEq)]
pub struct UseCatalogActions {
    pub refresh: Callback<()>,
    pub load_more: Callback<()>,
    pub set_pricing_category: Callback<(PricingCategory, bool)>,
    pub set_search_keyword: Callback<String>,
    pub set_sort_key: Callback<SortKey>,
    pub set_price_range: Callback<PriceRange>,
    pub merge_filters: Callback<PartialFilterSpec>,
    pub reset_filters: Callback<()>,
    pub clear_error: Callback<()>,
}

#[hook]
pub fn use_catalog(
    api_client: &ApiClient,
    options: PipelineOptions,
    page_load_delay_ms: u32,
) -> UseCatalogResult {
    let state = use_reducer(|| CatalogState {
        store: CatalogStore::new(options),
    });
    let next_token = use_mut_ref(|| 0u64);

    let refresh = {
        let api_client = api_client.clone();
        let dispatcher = state.dispatcher();

        use_callback((), move |_, _| {
            let api_client = api_client.clone();
            let dispatcher = dispatcher.clone();

            spawn_local(async move {
                dispatcher.dispatch(CatalogAction::FetchStarted);

                match api_client.get_content_list().await {
                    Ok(items) => dispatcher.dispatch(CatalogAction::FetchSucceeded(items)),
                    Err(e) => {
                        let message = e.to_string();
                        Logger::error_with_component("catalog-hook", &format!("❌ {}", message));
                        dispatcher.dispatch(CatalogAction::FetchFailed(message));
                    }
                }
            });
        })
    };

    // A refused start leaves the finish unmatched, so it is dropped by the store
    let load_more = {
        let dispatcher = state.dispatcher();
        let next_token = next_token.clone();

        use_callback(page_load_delay_ms, move |_, delay_ms| {
            let token = {
                let mut counter = next_token.borrow_mut();
                *counter += 1;
                *counter
            };
            let delay_ms = *delay_ms;
            let dispatcher = dispatcher.clone();

            dispatcher.dispatch(CatalogAction::PageLoadStarted { token });
            spawn_local(async move {
                if delay_ms > 0 {
                    TimeoutFuture::new(delay_ms).await;
                }
                dispatcher.dispatch(CatalogAction::PageLoadFinished { token });
            });
        })
    };

    let set_pricing_category = {
        let dispatcher = state.dispatcher();
        use_callback((), move |(category, selected): (PricingCategory, bool), _| {
            dispatcher.dispatch(CatalogAction::SetPricingCategory { category, selected });
        })
    };

    let set_search_keyword = {
        let dispatcher = state.dispatcher();
        use_callback((), move |keyword: String, _| {
            dispatcher.dispatch(CatalogAction::SetSearchKeyword(keyword));
        })
    };

    let set_sort_key = {
        let dispatcher = state.dispatcher();
        use_callback((), move |sort_key: SortKey, _| {
            dispatcher.dispatch(CatalogAction::SetSortKey(sort_key));
        })
    };

    let set_price_range = {
        let dispatcher = state.dispatcher();
        use_callback((), move |range: PriceRange, _| {
            dispatcher.dispatch(CatalogAction::SetPriceRange(range));
        })
    };

    let merge_filters = {
        let dispatcher = state.dispatcher();
        use_callback((), move |partial: PartialFilterSpec, _| {
            if !partial.is_empty() {
                dispatcher.dispatch(CatalogAction::MergeFilters(partial));
            }
        })
    };

    let reset_filters = {
        let dispatcher = state.dispatcher();
        use_callback((), move |_, _| dispatcher.dispatch(CatalogAction::ResetFilters))
    };

    let clear_error = {
        let dispatcher = state.dispatcher();
        use_callback((), move |_, _| dispatcher.dispatch(CatalogAction::ClearError))
    };

    // Initial fetch
    {
        let refresh = refresh.clone();
        use_effect_with((), move |_| {
            refresh.emit(());
            || ()
        });
    }

    UseCatalogResult {
        state,
        actions: UseCatalogActions {
            refresh,
            load_more,
            set_pricing_category,
            set_search_keyword,
            set_sort_key,
            set_price_range,
            merge_filters,
            reset_filters,
            clear_error,
        },
    }
}
