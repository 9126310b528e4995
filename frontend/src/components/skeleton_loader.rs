use yew::prelude::*;

/// Placeholder card shown while the catalog is loading
#[function_component(SkeletonLoader)]
pub fn skeleton_loader() -> Html {
    html! {
        <div class="skeleton-container">
            <div class="skeleton-image"></div>
            <div class="skeleton-content">
                <div class="skeleton-line" style="width: 60%; height: 14px;"></div>
                <div class="skeleton-pricing">
                    <div class="skeleton-line" style="width: 80px; height: 20px;"></div>
                    <div class="skeleton-line" style="width: 60px; height: 20px;"></div>
                </div>
            </div>
        </div>
    }
}
