use shared::Item;
use yew::prelude::*;

use super::content_item::ContentItem;
use super::skeleton_loader::SkeletonLoader;
use crate::hooks::use_infinite_scroll::use_infinite_scroll;
use crate::hooks::use_virtual_scroll::use_virtual_scroll;

#[derive(Properties, PartialEq)]
pub struct ContentListProps {
    pub items: Vec<Item>,
    pub loading: bool,
    pub has_more: bool,
    pub row_height: f64,
    pub resize_debounce_ms: u64,
    pub intersection_threshold: f64,
    pub skeleton_count: usize,
    pub on_load_more: Callback<()>,
}

/// Skeleton cards to show: at most three rows' worth
pub fn skeleton_count_for(column_count: usize, configured: usize) -> usize {
    configured.min(column_count.max(1) * 3)
}

/// Virtualized, infinitely scrolling grid of the displayed items
#[function_component(ContentList)]
pub fn content_list(props: &ContentListProps) -> Html {
    let scroll = use_virtual_scroll(props.items.len(), props.row_height, props.resize_debounce_ms);
    let sentinel = use_infinite_scroll(
        props.loading,
        props.has_more,
        props.intersection_threshold,
        props.on_load_more.clone(),
    );

    if props.items.is_empty() && !props.loading {
        return html! {
            <div class="empty-state">
                <h3>{"No items found"}</h3>
                <p>{"Try adjusting your filters or search terms."}</p>
            </div>
        };
    }

    let geometry = scroll.geometry;
    let end = scroll.window.last_index.min(props.items.len());
    let start = scroll.window.first_index.min(end);

    let grid_style = format!(
        "display: grid; grid-template-columns: repeat({}, 1fr); gap: {}px;",
        geometry.column_count, geometry.gap
    );
    let item_style = format!("height: {}px; min-height: {}px;", geometry.row_height, geometry.row_height);

    html! {
        <>
            <div class="scroll-container" ref={scroll.container}>
                <div class="virtual-container" style={format!("position: relative; min-height: {}px;", scroll.total_height)}>
                    if scroll.window.leading_filler_height > 0.0 {
                        <div class="placeholder" style={format!("height: {}px;", scroll.window.leading_filler_height)}></div>
                    }
                    <div class="content-grid" style={grid_style.clone()}>
                        {for props.items[start..end].iter().map(|item| html! {
                            <div class="grid-item" key={item.id.clone()} style={item_style.clone()}>
                                <ContentItem item={item.clone()} />
                            </div>
                        })}
                    </div>
                    if scroll.window.trailing_filler_height > 0.0 {
                        <div class="placeholder" style={format!("height: {}px;", scroll.window.trailing_filler_height)}></div>
                    }
                    <div class="observer-target" ref={sentinel}></div>
                </div>

                if props.loading && props.items.is_empty() {
                    <div class="content-grid" style={grid_style}>
                        {for (0..skeleton_count_for(geometry.column_count, props.skeleton_count)).map(|i| html! {
                            <div class="grid-item" key={i} style={item_style.clone()}>
                                <SkeletonLoader />
                            </div>
                        })}
                    </div>
                } else if props.loading {
                    <div class="loader-container">
                        <div class="loading-text">{"Loading more items..."}</div>
                    </div>
                }
            </div>

            if !props.has_more && !props.items.is_empty() {
                <div class="loader-container">
                    <div class="loading-text">{"No more items to load"}</div>
                </div>
            }
        </>
    }
}
