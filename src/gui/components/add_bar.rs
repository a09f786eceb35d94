// src/gui/components/add_bar.rs
use eframe::egui::{self, widgets::Spinner};

use crate::gui::{actions, app::App};

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    ui.horizontal(|ui| {
        let field = ui.add(
            egui::TextEdit::singleline(&mut app.state.gui.url_input)
                .hint_text("https://scholar.google.com/citations?user=…")
                .desired_width(420.0),
        );
        let enter = field.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

        let add = ui.add_enabled(!app.running, egui::Button::new("Add")).clicked();
        if (add || enter) && !app.running {
            actions::add(app);
        }

        ui.separator();

        if ui.add_enabled(!app.running, egui::Button::new("Refresh all")).clicked() {
            actions::refresh_all(app);
        }
        if ui.add_enabled(app.summary.with_changes > 0, egui::Button::new("Mark all read")).clicked() {
            actions::mark_all_read(app);
        }
        if app.running {
            ui.add(Spinner::new());
        }
    });
}
