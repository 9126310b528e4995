use std::cell::{Cell, RefCell};
use std::rc::Rc;

use catalog_core::domain::scheduler::Tick;
use catalog_core::domain::viewport::total_height;
use catalog_core::{GridGeometry, RepeatingTask, ScrollMetrics, ViewportWindow, VirtualScroller};
use gloo::events::EventListener;
use gloo::render::{request_animation_frame, AnimationFrame};
use web_sys::HtmlElement;
use yew::prelude::*;

use crate::services::logging::Logger;

/// `RepeatingTask` that ticks once per animation frame
#[derive(Default)]
pub struct AnimationFrameLoop {
    frame: Rc<RefCell<Option<AnimationFrame>>>,
    running: Option<Rc<Cell<bool>>>,
}

impl AnimationFrameLoop {
    fn schedule(frame: Rc<RefCell<Option<AnimationFrame>>>, running: Rc<Cell<bool>>, tick: Rc<RefCell<Tick>>) {
        let slot = frame.clone();
        let next = request_animation_frame(move |_timestamp| {
            if !running.get() {
                return;
            }
            (tick.borrow_mut())();
            // The tick may have stopped the loop
            if running.get() {
                Self::schedule(slot, running, tick);
            }
        });
        *frame.borrow_mut() = Some(next);
    }
}

impl RepeatingTask for AnimationFrameLoop {
    fn start(&mut self, tick: Tick) {
        self.stop();
        let running = Rc::new(Cell::new(true));
        self.running = Some(running.clone());
        Self::schedule(self.frame.clone(), running, Rc::new(RefCell::new(tick)));
    }

    fn stop(&mut self) {
        if let Some(running) = self.running.take() {
            running.set(false);
        }
        self.frame.borrow_mut().take();
    }

    fn is_running(&self) -> bool {
        self.running.as_ref().is_some_and(|running| running.get())
    }
}

impl Drop for AnimationFrameLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

#[derive(Clone, Copy, PartialEq)]
struct Layout {
    window: ViewportWindow,
    geometry: GridGeometry,
}

pub struct UseVirtualScrollResult {
    /// Attach to the scrolling container
    pub container: NodeRef,
    pub window: ViewportWindow,
    pub geometry: GridGeometry,
    pub total_height: f64,
}

fn viewport_width() -> f64 {
    web_sys::window()
        .and_then(|window| window.inner_width().ok())
        .and_then(|width| width.as_f64())
        .unwrap_or(1280.0)
}

fn now_ms() -> u64 {
    js_sys::Date::now() as u64
}

/// Windowed rendering for a grid of `item_count` rows of fixed height.
///
/// The window is re-evaluated once per animation frame; resizes are applied
/// after `resize_debounce_ms` of quiet.
#[hook]
pub fn use_virtual_scroll(item_count: usize, row_height: f64, resize_debounce_ms: u64) -> UseVirtualScrollResult {
    let container = use_node_ref();
    let scroller = use_mut_ref(|| VirtualScroller::new(row_height, viewport_width(), resize_debounce_ms));
    let layout = use_state(|| {
        let scroller = scroller.borrow();
        Layout {
            window: scroller.window(),
            geometry: scroller.geometry(),
        }
    });

    {
        let scroller = scroller.clone();
        use_effect_with(item_count, move |item_count| {
            scroller.borrow_mut().set_item_count(*item_count);
            || ()
        });
    }

    {
        let scroller = scroller.clone();
        let container = container.clone();
        let layout = layout.clone();

        use_effect_with((), move |_| {
            let resize_listener = web_sys::window().map(|window| {
                let scroller = scroller.clone();
                EventListener::new(&window, "resize", move |_event| {
                    scroller.borrow_mut().on_resize(viewport_width(), now_ms());
                })
            });

            let mut frame_loop = AnimationFrameLoop::default();
            let published = Rc::new(Cell::new(*layout));
            frame_loop.start(Box::new(move || {
                let Some(element) = container.cast::<HtmlElement>() else {
                    return;
                };
                let metrics = ScrollMetrics {
                    scroll_offset: element.scroll_top() as f64,
                    container_height: element.client_height() as f64,
                };

                let mut scroller = scroller.borrow_mut();
                scroller.on_frame(metrics, now_ms());
                let next = Layout {
                    window: scroller.window(),
                    geometry: scroller.geometry(),
                };
                if next != published.get() {
                    published.set(next);
                    layout.set(next);
                }
            }));
            Logger::debug_with_component("virtual-scroll-hook", "🎞️ Frame loop started");

            move || {
                frame_loop.stop();
                drop(resize_listener);
                Logger::debug_with_component("virtual-scroll-hook", "🧹 Frame loop stopped");
            }
        });
    }

    UseVirtualScrollResult {
        container,
        window: layout.window,
        geometry: layout.geometry,
        total_height: total_height(item_count, layout.geometry),
    }
}
