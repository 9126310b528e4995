use shared::SortKey;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SortSelectProps {
    pub sort_key: SortKey,
    pub on_change: Callback<SortKey>,
}

#[function_component(SortSelect)]
pub fn sort_select(props: &SortSelectProps) -> Html {
    let on_change = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            on_change.emit(SortKey::parse_or_default(&select.value()));
        })
    };

    html! {
        <div class="sort-select">
            <label for="sort-by">{"Sort by"}</label>
            <select id="sort-by" onchange={on_change}>
                {for SortKey::ALL.iter().map(|key| html! {
                    <option value={key.as_str()} selected={*key == props.sort_key}>
                        {key.label()}
                    </option>
                })}
            </select>
        </div>
    }
}
