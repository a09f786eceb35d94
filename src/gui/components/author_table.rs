// src/gui/components/author_table.rs
//
// One row per tracked author. Buttons only record what was clicked;
// the action runs after the table is drawn so nothing holds `app` mid-frame.

use eframe::egui::{self, Color32, RichText};
use egui_extras::{Column, TableBuilder};

use crate::gui::{actions, app::App};

enum RowAction {
    Select(String),
    MarkRead(String),
    Refresh(String),
    Remove(String),
}

const NEW_BG: Color32 = Color32::from_rgb(0x2e, 0x9e, 0x4f);

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    if app.authors.is_empty() {
        ui.add_space(12.0);
        ui.weak("No scholars tracked yet. Paste a profile URL above and press Add.");
        return;
    }

    let now = app.tracker.now();
    let selected = app.state.gui.selected_user.clone();
    let mut action: Option<RowAction> = None;

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .min_scrolled_height(0.0)
        .column(Column::initial(200.0).at_least(80.0).clip(true)) // name
        .column(Column::initial(200.0).at_least(60.0).clip(true)) // affiliation
        .column(Column::initial(110.0).at_least(60.0))            // citations
        .column(Column::initial(40.0).at_least(30.0))             // h
        .column(Column::initial(40.0).at_least(30.0))             // i10
        .column(Column::initial(130.0).at_least(60.0).clip(true)) // mirror
        .column(Column::initial(110.0).at_least(60.0))            // updated
        .column(Column::remainder().at_least(190.0))              // actions
        .header(22.0, |mut header| {
            for title in ["Name", "Affiliation", "Citations", "h", "i10", "Mirror", "Updated", ""] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for a in &app.authors {
                let is_new = a.is_new(now);
                body.row(22.0, |mut row| {
                    row.col(|ui| {
                        let text = if selected.as_deref() == Some(a.user_id.as_str()) {
                            RichText::new(&a.name).strong()
                        } else {
                            RichText::new(&a.name)
                        };
                        if ui.link(text).on_hover_text(&a.url).clicked() {
                            action = Some(RowAction::Select(a.user_id.clone()));
                        }
                        if is_new {
                            ui.label(RichText::new(" NEW ").small().strong().color(Color32::WHITE).background_color(NEW_BG));
                        }
                    });
                    row.col(|ui| {
                        ui.label(&a.affiliation);
                    });
                    row.col(|ui| {
                        ui.label(a.metrics.total_citations.to_string());
                        if is_new {
                            let d = a.citation_delta();
                            let c = if d >= 0 { NEW_BG } else { Color32::from_rgb(0xc0, 0x39, 0x2b) };
                            ui.label(RichText::new(format!("{d:+}")).color(c));
                        }
                    });
                    row.col(|ui| {
                        ui.label(a.metrics.h_index.to_string());
                    });
                    row.col(|ui| {
                        ui.label(a.metrics.i10_index.to_string());
                    });
                    row.col(|ui| {
                        ui.weak(a.working_domain.as_deref().unwrap_or("-"));
                    });
                    row.col(|ui| {
                        let when = a
                            .last_updated
                            .map(|t| t.with_timezone(&chrono::Local).format("%m-%d %H:%M").to_string())
                            .unwrap_or_else(|| s!("never"));
                        let label = ui.label(when);
                        if let Some(e) = &a.last_error {
                            label.on_hover_text(format!("Last attempt failed: {e}"));
                            ui.colored_label(Color32::from_rgb(0xc0, 0x39, 0x2b), "⚠");
                        }
                    });
                    row.col(|ui| {
                        if is_new && ui.small_button("Mark read").clicked() {
                            action = Some(RowAction::MarkRead(a.user_id.clone()));
                        }
                        if ui.add_enabled(!app.running, egui::Button::new("Refresh").small()).clicked() {
                            action = Some(RowAction::Refresh(a.user_id.clone()));
                        }
                        if ui.small_button("Remove").clicked() {
                            action = Some(RowAction::Remove(a.user_id.clone()));
                        }
                    });
                });
            }
        });

    match action {
        Some(RowAction::Select(id)) => {
            logd!("UI: select {id}");
            app.state.gui.selected_user = Some(id);
        }
        Some(RowAction::MarkRead(id)) => actions::mark_read(app, &id),
        Some(RowAction::Refresh(id)) => actions::refresh_one(app, id),
        Some(RowAction::Remove(id)) => actions::remove(app, &id),
        None => {}
    }
}
