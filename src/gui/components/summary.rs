// src/gui/components/summary.rs
use eframe::egui::{self, Color32, RichText};

use crate::gui::app::App;

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    let s = app.summary;
    ui.horizontal(|ui| {
        ui.label(format!(
            "{} · {} citations",
            plural!(s.authors, "scholar"),
            s.total_citations
        ));
        if s.with_changes > 0 {
            ui.label(
                RichText::new(format!("{} with new citations", s.with_changes))
                    .color(Color32::from_rgb(0x2e, 0x9e, 0x4f))
                    .strong(),
            );
        }
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let when = app
                .last_update
                .map(|t| t.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| s!("never"));
            ui.weak(format!("Last update: {when}"));
        });
    });
}
