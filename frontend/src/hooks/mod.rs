pub mod use_catalog;
pub mod use_infinite_scroll;
pub mod use_query_params;
pub mod use_virtual_scroll;
