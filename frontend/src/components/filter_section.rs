use catalog_core::FilterSpec;
use shared::{PriceRange, PricingCategory};
use web_sys::{HtmlInputElement, KeyboardEvent};
use yew::prelude::*;

use crate::services::logging::Logger;

#[derive(Properties, PartialEq)]
pub struct FilterSectionProps {
    pub filters: FilterSpec,
    pub on_search: Callback<String>,
    pub on_pricing_change: Callback<(PricingCategory, bool)>,
    pub on_price_range_change: Callback<PriceRange>,
    pub on_reset: Callback<()>,
}

#[function_component(FilterSection)]
pub fn filter_section(props: &FilterSectionProps) -> Html {
    let on_reset = {
        let on_reset = props.on_reset.clone();
        Callback::from(move |_: MouseEvent| on_reset.emit(()))
    };

    html! {
        <section class="filter-section">
            <SearchInput keyword={props.filters.search_keyword.clone()} on_search={props.on_search.clone()} />
            <div class="filter-container">
                <div class="filter-row">
                    <PricingFilter filters={props.filters.clone()} on_change={props.on_pricing_change.clone()} />
                    <PriceRangeInputs
                        range={props.filters.price_range}
                        enabled={props.filters.pricing.paid}
                        on_change={props.on_price_range_change.clone()}
                    />
                    <button class="reset-button" onclick={on_reset}>{"RESET"}</button>
                </div>
            </div>
        </section>
    }
}

#[derive(Properties, PartialEq)]
pub struct SearchInputProps {
    pub keyword: String,
    pub on_search: Callback<String>,
}

/// Free-text search; the keyword is committed on Enter or button click
#[function_component(SearchInput)]
pub fn search_input(props: &SearchInputProps) -> Html {
    let input_value = use_state(|| props.keyword.clone());

    // Keywords can arrive after mount (seeded from the URL, or cleared elsewhere)
    {
        let input_value = input_value.clone();
        use_effect_with(props.keyword.clone(), move |keyword| {
            if *input_value != *keyword {
                input_value.set(keyword.clone());
            }
            || ()
        });
    }

    let on_input = {
        let input_value = input_value.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            input_value.set(input.value());
        })
    };

    let submit = {
        let input_value = input_value.clone();
        let on_search = props.on_search.clone();
        Callback::from(move |_: ()| on_search.emit(input_value.trim().to_string()))
    };

    let on_keydown = {
        let submit = submit.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" {
                submit.emit(());
            }
        })
    };

    let on_click = Callback::from(move |_: MouseEvent| submit.emit(()));

    html! {
        <div class="search-container">
            <input
                type="text"
                class="search-input"
                placeholder="Find the items you're looking for"
                value={(*input_value).clone()}
                oninput={on_input}
                onkeydown={on_keydown}
            />
            <button class="search-button" aria-label="Search" onclick={on_click}>{"🔍"}</button>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct PricingFilterProps {
    pub filters: FilterSpec,
    pub on_change: Callback<(PricingCategory, bool)>,
}

#[function_component(PricingFilter)]
pub fn pricing_filter(props: &PricingFilterProps) -> Html {
    html! {
        <div class="filter-group">
            <span class="filter-group-label">{"Pricing Option"}</span>
            {for PricingCategory::ALL.iter().map(|category| {
                let category = *category;
                let checked = props.filters.pricing.contains(category);
                let on_change = props.on_change.clone();
                let onchange = Callback::from(move |_: Event| on_change.emit((category, !checked)));

                html! {
                    <label class="filter-label">
                        <input type="checkbox" {checked} {onchange} />
                        {category.label()}
                    </label>
                }
            })}
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct PriceRangeInputsProps {
    pub range: PriceRange,
    pub enabled: bool,
    pub on_change: Callback<PriceRange>,
}

/// Parse the two bound inputs into a usable range
pub fn parse_price_range(min: &str, max: &str) -> Option<PriceRange> {
    let range = PriceRange::new(min.trim().parse().ok()?, max.trim().parse().ok()?);
    range.is_valid().then_some(range)
}

/// Min/max price inputs; only active while Paid is selected
#[function_component(PriceRangeInputs)]
pub fn price_range_inputs(props: &PriceRangeInputsProps) -> Html {
    let min_ref = use_node_ref();
    let max_ref = use_node_ref();

    let on_commit = {
        let min_ref = min_ref.clone();
        let max_ref = max_ref.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |_: Event| {
            let (Some(min), Some(max)) = (min_ref.cast::<HtmlInputElement>(), max_ref.cast::<HtmlInputElement>()) else {
                return;
            };
            match parse_price_range(&min.value(), &max.value()) {
                Some(range) => on_change.emit(range),
                None => Logger::warn_with_component(
                    "price-range",
                    &format!("⚠️ Ignoring invalid price range {}..{}", min.value(), max.value()),
                ),
            }
        })
    };

    html! {
        <div class={classes!("price-range", (!props.enabled).then_some("disabled"))}>
            <span class="price-value">{"$"}</span>
            <input
                ref={min_ref}
                type="number"
                min={PriceRange::DEFAULT_MIN.to_string()}
                max={PriceRange::DEFAULT_MAX.to_string()}
                value={props.range.min.to_string()}
                disabled={!props.enabled}
                onchange={on_commit.clone()}
            />
            <span class="price-separator">{"-"}</span>
            <span class="price-value">{"$"}</span>
            <input
                ref={max_ref}
                type="number"
                min={PriceRange::DEFAULT_MIN.to_string()}
                max={PriceRange::DEFAULT_MAX.to_string()}
                value={props.range.max.to_string()}
                disabled={!props.enabled}
                onchange={on_commit}
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gloo::timers::future::TimeoutFuture;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_parse_price_range() {
        assert_eq!(parse_price_range("10", " 250 "), Some(PriceRange::new(10.0, 250.0)));
        assert_eq!(parse_price_range("300", "20"), None);
        assert_eq!(parse_price_range("", "20"), None);
        assert_eq!(parse_price_range("-1", "20"), None);
    }

    #[wasm_bindgen_test]
    async fn test_search_input_follows_keyword_prop() {
        let document = web_sys::window().unwrap().document().unwrap();
        let root = document.create_element("div").unwrap();
        document.body().unwrap().append_child(&root).unwrap();

        let props = |keyword: &str| SearchInputProps {
            keyword: keyword.to_string(),
            on_search: Callback::noop(),
        };
        let input = || {
            root.query_selector("input")
                .unwrap()
                .unwrap()
                .dyn_into::<HtmlInputElement>()
                .unwrap()
        };

        let mut app = yew::Renderer::<SearchInput>::with_root_and_props(root.clone(), props("")).render();
        TimeoutFuture::new(10).await;
        assert_eq!(input().value(), "");

        app.update(props("summer coat"));
        TimeoutFuture::new(10).await;
        assert_eq!(input().value(), "summer coat");
    }
}
