//! Domain logic for the catalog browser.
//!
//! Components are listed leaves first; `catalog_store` composes them.

pub mod catalog_store;
pub mod collection_view;
pub mod filter_pipeline;
pub mod filter_state;
pub mod load_trigger;
pub mod scheduler;
pub mod viewport;
