pub mod content_item;
pub mod content_list;
pub mod filter_section;
pub mod skeleton_loader;
pub mod sort_select;
