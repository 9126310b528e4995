//! # Viewport Windowing
//!
//! Decides which slice of the displayed items must actually be materialized
//! for the current scroll position, and how much filler space stands in for
//! the rows above and below it.
//!
//! ## Layout model:
//! Items sit in a fixed-column grid. A row occupies `row_height + gap`
//! pixels (the stride). One extra row is rendered above and below the
//! visible area as overscan.
//!
//! ## Recompute cadence:
//! `VirtualScroller` is driven once per animation frame. It only reports a
//! window when something changed, and handles container resizes through a
//! `Debouncer` polled on those same frames, so no work happens per raw scroll
//! or resize event.

use std::ops::Range;

use super::scheduler::Debouncer;

/// Grid geometry in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    pub row_height: f64,
    pub gap: f64,
    pub column_count: usize,
}

impl GridGeometry {
    /// Geometry matching the responsive breakpoints for a viewport width
    pub fn for_width(row_height: f64, viewport_width: f64) -> Self {
        let column_count = column_count_for_width(viewport_width);
        Self {
            row_height,
            gap: gap_for_columns(column_count),
            column_count,
        }
    }

    pub fn stride(&self) -> f64 {
        self.row_height + self.gap
    }
}

/// Scroll container measurements at one instant
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_offset: f64,
    pub container_height: f64,
}

/// The index range to render (`first_index..last_index`) and surrounding filler
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ViewportWindow {
    pub first_index: usize,
    pub last_index: usize,
    pub leading_filler_height: f64,
    pub trailing_filler_height: f64,
}

impl ViewportWindow {
    pub fn range(&self) -> Range<usize> {
        self.first_index..self.last_index
    }

    pub fn len(&self) -> usize {
        self.last_index.saturating_sub(self.first_index)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Responsive column count: ≤500px → 1, ≤768px → 2, ≤1200px → 3, wider → 4
pub fn column_count_for_width(viewport_width: f64) -> usize {
    if viewport_width <= 500.0 {
        1
    } else if viewport_width <= 768.0 {
        2
    } else if viewport_width <= 1200.0 {
        3
    } else {
        4
    }
}

/// Grid gap for a column count: 1 → 12px, 2 → 16px, otherwise 24px
pub fn gap_for_columns(column_count: usize) -> f64 {
    match column_count {
        1 => 12.0,
        2 => 16.0,
        _ => 24.0,
    }
}

/// Full scrollable height of `item_count` items (no trailing gap)
pub fn total_height(item_count: usize, geometry: GridGeometry) -> f64 {
    if item_count == 0 {
        return 0.0;
    }
    let rows = item_count.div_ceil(geometry.column_count.max(1));
    rows as f64 * geometry.stride() - geometry.gap
}

pub fn compute_window(metrics: ScrollMetrics, geometry: GridGeometry, item_count: usize) -> ViewportWindow {
    if item_count == 0 {
        return ViewportWindow::default();
    }

    let columns = geometry.column_count.max(1);
    let stride = geometry.stride();
    if !(stride.is_finite() && stride > 0.0) {
        // Without a usable stride every item is "visible".
        return ViewportWindow {
            first_index: 0,
            last_index: item_count,
            leading_filler_height: 0.0,
            trailing_filler_height: 0.0,
        };
    }

    let total_rows = item_count.div_ceil(columns);
    let last_row = (total_rows - 1) as f64;
    // `f64::max` drops NaN, so both measurements end up in [0, +inf].
    let offset = metrics.scroll_offset.max(0.0);
    let height = metrics.container_height.max(0.0);

    // Rows stay in f64 until clamped to [0, last_row]; only then are they cast.
    let end_row = (((offset + height) / stride).ceil() + 1.0).min(last_row) as usize;
    // Offsets past the end of the content still render the last rows.
    let start_row = ((offset / stride).floor() - 1.0).max(0.0).min(end_row as f64) as usize;

    let first_index = start_row * columns;
    let last_index = ((end_row + 1) * columns).min(item_count);

    ViewportWindow {
        first_index,
        last_index,
        leading_filler_height: start_row as f64 * stride,
        trailing_filler_height: (total_rows - end_row - 1) as f64 * stride,
    }
}

/// Frame-driven window tracker for one scroll container
#[derive(Debug, Clone)]
pub struct VirtualScroller {
    row_height: f64,
    geometry: GridGeometry,
    item_count: usize,
    resize: Debouncer,
    pending_width: Option<f64>,
    last_metrics: Option<ScrollMetrics>,
    window: ViewportWindow,
    dirty: bool,
}

impl VirtualScroller {
    pub fn new(row_height: f64, viewport_width: f64, resize_debounce_ms: u64) -> Self {
        Self {
            row_height,
            geometry: GridGeometry::for_width(row_height, viewport_width),
            item_count: 0,
            resize: Debouncer::new(resize_debounce_ms),
            pending_width: None,
            last_metrics: None,
            window: ViewportWindow::default(),
            dirty: true,
        }
    }

    pub fn geometry(&self) -> GridGeometry {
        self.geometry
    }

    pub fn window(&self) -> ViewportWindow {
        self.window
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn total_height(&self) -> f64 {
        total_height(self.item_count, self.geometry)
    }

    pub fn set_item_count(&mut self, item_count: usize) {
        if self.item_count != item_count {
            self.item_count = item_count;
            self.dirty = true;
        }
    }

    /// Note a container resize; applied on the first frame after the quiet period
    pub fn on_resize(&mut self, viewport_width: f64, now_ms: u64) {
        self.pending_width = Some(viewport_width);
        self.resize.schedule(now_ms);
    }

    /// Per-frame recompute. Returns the new window only when it changed.
    pub fn on_frame(&mut self, metrics: ScrollMetrics, now_ms: u64) -> Option<ViewportWindow> {
        if self.resize.fire_due(now_ms) {
            if let Some(width) = self.pending_width.take() {
                let geometry = GridGeometry::for_width(self.row_height, width);
                if geometry != self.geometry {
                    log::debug!(
                        "📐 Grid resized to {} columns ({}px gap)",
                        geometry.column_count,
                        geometry.gap
                    );
                    self.geometry = geometry;
                    self.dirty = true;
                }
            }
        }

        if !self.dirty && self.last_metrics == Some(metrics) {
            return None;
        }

        self.last_metrics = Some(metrics);
        self.dirty = false;

        let window = compute_window(metrics, self.geometry, self.item_count);
        if window == self.window {
            return None;
        }
        self.window = window;
        Some(window)
    }
}
