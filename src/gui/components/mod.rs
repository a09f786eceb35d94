// src/gui/components/mod.rs
pub mod add_bar;
pub mod author_table;
pub mod banner;
pub mod export_bar;
pub mod papers_panel;
pub mod summary;
