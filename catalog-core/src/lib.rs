//! # Catalog Core
//!
//! Client-side engine behind the content catalog browser: it turns a fetched,
//! unfiltered item collection into the filtered, sorted, paginated and
//! windowed views the UI renders.
//!
//! ## Modules:
//! - `domain` - filter spec, filter pipeline, pagination, viewport windowing,
//!   load trigger, scheduling and the coordinating `CatalogStore`
//! - `io` - query parameter codec for shareable URLs
//! - `config` - tunables loaded from YAML
//! - `error` - the crate error type
//!
//! Nothing in this crate performs network or DOM access. Platform capabilities
//! (visibility observation, animation frames) come in through the traits in
//! `domain::load_trigger` and `domain::scheduler`.

pub mod config;
pub mod domain;
pub mod error;
pub mod io;

pub use config::CatalogConfig;
pub use domain::catalog_store::{CatalogAction, CatalogStore, FetchState};
pub use domain::collection_view::{CollectionView, PAGE_SIZE};
pub use domain::filter_pipeline::{apply_filters, PipelineOptions};
pub use domain::filter_state::{FilterSpec, PartialFilterSpec, PricingSelection};
pub use domain::load_trigger::{LoadTrigger, TriggerState, VisibilityCallback, VisibilityObserver};
pub use domain::scheduler::{Debouncer, ManualTicker, RepeatingTask};
pub use domain::viewport::{compute_window, GridGeometry, ScrollMetrics, ViewportWindow, VirtualScroller};
pub use error::CatalogError;
pub use io::query_params::QueryParams;
