// src/gui/actions/copy.rs
use eframe::egui;

use crate::{export, gui::app::App};

pub fn copy_authors(app: &mut App, ui_ctx: &egui::Context) {
    if app.authors.is_empty() {
        app.set_status("Nothing to copy");
        logd!("Copy: Clicked, but there's nothing to copy");
        return;
    }
    let table = export::authors_table(&app.authors, app.tracker.now());
    logf!("Copy: authors, rows={}", table.rows.len());
    ui_ctx.copy_text(table.render(&app.state.options.export));
    app.set_status("Copied to clipboard");
}

pub fn copy_papers(app: &mut App, ui_ctx: &egui::Context) {
    let Some(author) = app.selected_author() else {
        app.set_status("Nothing to copy");
        return;
    };
    let table = export::papers_table(author);
    logf!("Copy: papers of {}, rows={}", author.user_id, table.rows.len());
    ui_ctx.copy_text(table.render(&app.state.options.export));
    app.set_status("Copied to clipboard");
}
