use catalog_core::io::query_params::{decode_partial, encode_partial};
use catalog_core::PartialFilterSpec;
use log::LevelFilter;
use shared::{PriceRange, PricingCategory, SortKey};
use yew::prelude::*;

mod components;
mod hooks;
mod services;

use components::content_list::ContentList;
use components::filter_section::FilterSection;
use components::sort_select::SortSelect;
use hooks::use_catalog::use_catalog;
use hooks::use_query_params::use_query_params;
use services::api::ApiClient;
use services::config::load_config;

#[function_component(App)]
fn app() -> Html {
    let config = use_memo((), |_| load_config());
    let api_client = use_memo((), {
        let api_url = config.api_url.clone();
        move |_| ApiClient::new(api_url)
    });

    let catalog = use_catalog(&api_client, config.pipeline_options(), config.page_load_delay_ms);
    let query = use_query_params();
    let store = &catalog.state.store;

    // Seed filters from the URL once; keys absent from the URL keep their defaults
    {
        let merge_filters = catalog.actions.merge_filters.clone();
        let initial = query.initial.clone();
        use_effect_with((), move |_| {
            merge_filters.emit(decode_partial(&initial));
            || ()
        });
    }

    let set_params = query.set_params.clone();

    let on_search = {
        let set_search_keyword = catalog.actions.set_search_keyword.clone();
        let set_params = set_params.clone();
        Callback::from(move |keyword: String| {
            set_params.emit(encode_partial(&PartialFilterSpec {
                search_keyword: Some(keyword.clone()),
                ..Default::default()
            }));
            set_search_keyword.emit(keyword);
        })
    };

    let on_pricing_change = {
        let set_pricing_category = catalog.actions.set_pricing_category.clone();
        let set_params = set_params.clone();
        let current = store.filters().pricing;
        Callback::from(move |(category, selected): (PricingCategory, bool)| {
            let mut pricing = current;
            pricing.set(category, selected);
            set_params.emit(encode_partial(&PartialFilterSpec {
                pricing: Some(pricing),
                ..Default::default()
            }));
            set_pricing_category.emit((category, selected));
        })
    };

    let on_sort_change = {
        let set_sort_key = catalog.actions.set_sort_key.clone();
        let set_params = set_params.clone();
        Callback::from(move |sort_key: SortKey| {
            set_params.emit(encode_partial(&PartialFilterSpec {
                sort_key: Some(sort_key),
                ..Default::default()
            }));
            set_sort_key.emit(sort_key);
        })
    };

    let on_price_range_change = {
        let set_price_range = catalog.actions.set_price_range.clone();
        let set_params = set_params.clone();
        Callback::from(move |range: PriceRange| {
            set_params.emit(encode_partial(&PartialFilterSpec {
                price_range: Some(range),
                ..Default::default()
            }));
            set_price_range.emit(range);
        })
    };

    // Reset clears the pricing selection only, so only that key leaves the URL
    let on_reset = {
        let reset_filters = catalog.actions.reset_filters.clone();
        let set_params = set_params.clone();
        Callback::from(move |_| {
            set_params.emit(encode_partial(&PartialFilterSpec {
                pricing: Some(Default::default()),
                ..Default::default()
            }));
            reset_filters.emit(());
        })
    };

    let on_retry = {
        let clear_error = catalog.actions.clear_error.clone();
        let refresh = catalog.actions.refresh.clone();
        Callback::from(move |_: MouseEvent| {
            clear_error.emit(());
            refresh.emit(());
        })
    };

    html! {
        <div class="app">
            <header class="header">
                <h1>{"Content Catalog"}</h1>
            </header>
            <main class="container">
                <FilterSection
                    filters={store.filters().clone()}
                    {on_search}
                    {on_pricing_change}
                    {on_price_range_change}
                    {on_reset}
                />
                <div class="content-header">
                    <span class="content-count">
                        {format!("{} items", store.view().matched().len())}
                    </span>
                    <SortSelect sort_key={store.filters().sort_key} on_change={on_sort_change} />
                </div>
                if let Some(error) = store.error() {
                    <div class="error-message">
                        <span>{format!("❌ {}", error)}</span>
                        <button class="retry-button" onclick={on_retry}>{"Retry"}</button>
                    </div>
                }
                <ContentList
                    items={store.displayed().to_vec()}
                    loading={store.loading()}
                    has_more={store.has_more()}
                    row_height={config.row_height}
                    resize_debounce_ms={config.resize_debounce_ms}
                    intersection_threshold={config.intersection_threshold}
                    skeleton_count={config.skeleton_count}
                    on_load_more={catalog.actions.load_more.clone()}
                />
            </main>
        </div>
    }
}

fn main() {
    services::logging::init(LevelFilter::Info);
    yew::Renderer::<App>::new().render();
}
