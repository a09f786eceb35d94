// src/gui/actions/export.rs
use std::path::PathBuf;

use crate::{
    export::{self, Table},
    file::{resolve_out_path, sanitize_filename},
    gui::app::App,
};

fn write(app: &mut App, table: Table, default_name: &str) {
    let target = match resolve_out_path(app.out_path_text.trim(), default_name) {
        Ok(p) => p,
        Err(e) => {
            loge!("Export: bad path {:?}: {e}", app.out_path_text);
            app.set_status(format!("Error: {e}"));
            return;
        }
    };
    let msg = match table.write(&target, &app.state.options.export) {
        Ok(path) => format!("Exported {}: {}", plural!(table.rows.len(), "row"), path.display()),
        Err(e) => {
            loge!("Export: {e}");
            format!("Error: {e}")
        }
    };
    app.set_status(msg);
}

pub fn export_authors(app: &mut App) {
    if app.authors.is_empty() {
        app.set_status("Nothing to export");
        return;
    }
    let table = export::authors_table(&app.authors, app.tracker.now());
    let name = file_name(app, crate::config::consts::DEFAULT_AUTHORS_FILE);
    write(app, table, &name);
}

/// Papers of the selected author, written next to the authors file.
pub fn export_papers(app: &mut App) {
    let Some(author) = app.selected_author() else {
        app.set_status("Select an author first");
        return;
    };
    let table = export::papers_table(author);
    let name = file_name(app, &format!("papers_{}", sanitize_filename(&author.user_id)));

    let dir = PathBuf::from(app.out_path_text.trim());
    let dir = if dir.is_dir() { dir } else { dir.parent().map(PathBuf::from).unwrap_or_default() };
    let target = dir.join(&name);
    let msg = match table.write(&target, &app.state.options.export) {
        Ok(path) => format!("Exported {}: {}", plural!(table.rows.len(), "paper"), path.display()),
        Err(e) => format!("Error: {e}"),
    };
    app.set_status(msg);
}

fn file_name(app: &App, stem: &str) -> String {
    format!("{stem}.{}", app.state.options.export.format.ext())
}
