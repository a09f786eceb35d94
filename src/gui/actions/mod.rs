// src/gui/actions/mod.rs
//
// Folder module facade: re-export public entrypoints.
// Submodules stay private; consumers only see actions::{add, refresh_all, ...}.

mod copy;    // src/gui/actions/copy.rs
mod export;  // src/gui/actions/export.rs
mod manage;  // src/gui/actions/manage.rs
mod refresh; // src/gui/actions/refresh.rs

pub use copy::{copy_authors, copy_papers};
pub use export::{export_authors, export_papers};
pub use manage::{mark_all_read, mark_read, remove};
pub use refresh::{add, refresh_all, refresh_one};
