use shared::{Item, PricingCategory};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ContentItemProps {
    pub item: Item,
}

fn pricing_class(category: PricingCategory) -> &'static str {
    match category {
        PricingCategory::Paid => "pricing paid",
        PricingCategory::Free => "pricing free",
        PricingCategory::ViewOnly => "pricing view-only",
    }
}

#[function_component(ContentItem)]
pub fn content_item(props: &ContentItemProps) -> Html {
    let item = &props.item;

    html! {
        <div class="content-item">
            <div class="content-item-image">
                <img src={item.image_path.clone()} alt={item.title.clone()} loading="lazy" />
            </div>
            <div class="content-item-body">
                <div class="creator-info">
                    <div class="content-item-title">{&item.title}</div>
                    <div class="content-item-creator">{&item.creator}</div>
                </div>
                <div class={pricing_class(item.pricing_category)}>
                    {item.price_label()}
                </div>
            </div>
        </div>
    }
}
