use catalog_core::{LoadTrigger, VisibilityCallback, VisibilityObserver};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};
use yew::prelude::*;

use crate::services::logging::Logger;

type EntriesClosure = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

/// `VisibilityObserver` backed by the browser's `IntersectionObserver`
#[derive(Default)]
pub struct DomVisibilityObserver {
    observer: Option<IntersectionObserver>,
    // Must outlive the observer; JS holds a reference to it
    closure: Option<EntriesClosure>,
}

impl VisibilityObserver<Element> for DomVisibilityObserver {
    fn observe(&mut self, target: &Element, mut on_change: VisibilityCallback, threshold: f64) {
        self.disconnect();

        let closure: EntriesClosure = Closure::wrap(Box::new(
            move |entries: js_sys::Array, _observer: IntersectionObserver| {
                for entry in entries.iter() {
                    if let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() {
                        on_change(entry.is_intersecting());
                    }
                }
            },
        ) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(threshold));

        match IntersectionObserver::new_with_options(closure.as_ref().unchecked_ref(), &options) {
            Ok(observer) => {
                observer.observe(target);
                self.observer = Some(observer);
                self.closure = Some(closure);
            }
            Err(e) => {
                Logger::error_with_component(
                    "infinite-scroll-hook",
                    &format!("❌ Failed to create IntersectionObserver: {:?}", e),
                );
            }
        }
    }

    fn disconnect(&mut self) {
        if let Some(observer) = self.observer.take() {
            observer.disconnect();
        }
        self.closure = None;
    }
}

pub type DomLoadTrigger = LoadTrigger<Element, DomVisibilityObserver>;

/// Requests the next page when the returned sentinel scrolls into view.
///
/// Attach the returned `NodeRef` to an element rendered after the last
/// displayed item.
#[hook]
pub fn use_infinite_scroll(
    loading: bool,
    has_more: bool,
    threshold: f64,
    on_load: Callback<()>,
) -> NodeRef {
    let sentinel = use_node_ref();
    let latest_on_load = use_mut_ref(|| on_load.clone());
    *latest_on_load.borrow_mut() = on_load;

    let trigger = {
        let latest_on_load = latest_on_load.clone();
        use_memo((), move |_| {
            DomLoadTrigger::new(DomVisibilityObserver::default(), threshold, move || {
                let on_load = latest_on_load.borrow().clone();
                Logger::debug_with_component("infinite-scroll-hook", "📜 Sentinel visible, loading next page");
                on_load.emit(());
            })
        })
    };

    {
        let trigger = trigger.clone();
        use_effect_with((loading, has_more), move |(loading, has_more)| {
            trigger.set_flags(*loading, *has_more);
            || ()
        });
    }

    {
        let trigger = trigger.clone();
        use_effect_with(threshold.to_bits(), move |bits| {
            trigger.set_threshold(f64::from_bits(*bits));
            || ()
        });
    }

    // The sentinel comes and goes with the rendered list; re-register only
    // when the element itself changes
    {
        let trigger = trigger.clone();
        let sentinel = sentinel.clone();
        let registered = use_mut_ref(|| None::<Element>);
        use_effect(move || {
            let current = sentinel.cast::<Element>();
            if *registered.borrow() != current {
                *registered.borrow_mut() = current.clone();
                trigger.register_sentinel(current);
            }
            || ()
        });
    }

    {
        let trigger = trigger.clone();
        use_effect_with((), move |_| move || trigger.teardown());
    }

    sentinel
}
