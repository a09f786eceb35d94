// src/gui/components/banner.rs
use eframe::egui::{self, Color32, RichText};

use crate::gui::{app::App, progress};

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    let Some(n) = progress::get(&app.banner) else { return };

    let mut dismissed = false;
    egui::Frame::new()
        .fill(Color32::from_rgb(0x1e, 0x5a, 0x32))
        .inner_margin(egui::Margin::same(8))
        .corner_radius(4.0)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.label(RichText::new(&n.title).strong().color(Color32::WHITE));
                    for line in n.message.lines() {
                        ui.label(RichText::new(line).color(Color32::WHITE));
                    }
                });
                ui.with_layout(egui::Layout::right_to_left(egui::Align::TOP), |ui| {
                    if ui.button("Dismiss").clicked() {
                        dismissed = true;
                    }
                });
            });
        });

    if dismissed {
        progress::set(&app.banner, None);
    }
    ui.add_space(4.0);
}
