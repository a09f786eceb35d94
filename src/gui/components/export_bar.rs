// src/gui/components/export_bar.rs
use eframe::egui;

use crate::{config::ExportFormat, gui::{actions, app::App}};

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    let ctx = ui.ctx().clone();

    ui.horizontal(|ui| {
        let export = &mut app.state.options.export;
        let before = export.format;
        ui.label("Format:");
        ui.selectable_value(&mut export.format, ExportFormat::Tsv, "TSV");
        ui.selectable_value(&mut export.format, ExportFormat::Csv, "CSV");
        if export.format != before {
            logf!("UI: Export format → {:?}", export.format);
            // Keep the suggested file name's extension in step.
            let swapped = app
                .out_path_text
                .strip_suffix(before.ext())
                .map(|stem| format!("{stem}{}", export.format.ext()));
            if let Some(p) = swapped {
                app.out_path_text = p;
            }
        }
        let export = &mut app.state.options.export;
        if ui.checkbox(&mut export.include_headers, "Include headers").changed() {
            logf!("UI: Include_headers → {}", export.include_headers);
        }

        ui.separator();
        ui.label("Output:");
        ui.add(egui::TextEdit::singleline(&mut app.out_path_text).desired_width(260.0));

        if ui.button("Export").clicked() {
            actions::export_authors(app);
        }
        if ui.button("Copy").clicked() {
            actions::copy_authors(app, &ctx);
        }
    });
}
