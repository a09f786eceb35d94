// src/gui/mod.rs
pub mod actions;
pub mod app;
mod components;
pub mod progress;

pub use app::run;
