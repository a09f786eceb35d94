// src/lib.rs
// #![allow(dead_code)]
// #![allow(unused)]

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod config;
pub mod core;
pub mod error;
pub mod profile_url;
pub mod specs;

pub mod clock;
pub mod data;
pub mod diff;
pub mod scrape;
pub mod store;
pub mod tracker;

pub mod csv;
pub mod export;
pub mod file;
pub mod notify;
pub mod progress;
pub mod schedule;

pub mod cli;
pub mod gui;

pub use error::{Error, Result};
pub use tracker::Tracker;
