// src/gui/components/papers_panel.rs
//
// Papers of the selected author, in profile order.

use eframe::egui::{self, Color32, RichText};
use egui_extras::{Column, TableBuilder};

use crate::{
    core::sanitize::title_key,
    gui::{actions, app::App},
};

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    let ctx = ui.ctx().clone();
    let Some(author) = app.selected_author().cloned() else {
        app.state.gui.selected_user = None;
        return;
    };

    ui.horizontal(|ui| {
        ui.heading(&author.name);
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("✕").clicked() {
                app.state.gui.selected_user = None;
            }
        });
    });
    ui.label(&author.affiliation);
    if !author.interests.is_empty() {
        ui.weak(author.interests.join(" · "));
    }
    ui.hyperlink_to("Open profile", &author.url);

    let m = &author.metrics;
    egui::Grid::new("metrics").striped(true).show(ui, |ui| {
        ui.label("");
        ui.strong("All");
        ui.strong("Recent");
        ui.end_row();
        for (name, all, recent) in [
            ("Citations", m.total_citations, m.recent_citations),
            ("h-index", m.h_index, m.recent_h_index),
            ("i10-index", m.i10_index, m.recent_i10_index),
        ] {
            ui.label(name);
            ui.label(all.to_string());
            ui.label(recent.to_string());
            ui.end_row();
        }
    });

    ui.separator();
    ui.horizontal(|ui| {
        ui.checkbox(&mut app.state.gui.papers_changed_only, "Changed only");
        if ui.button("Copy").clicked() {
            actions::copy_papers(app, &ctx);
        }
        if ui.button("Export").clicked() {
            actions::export_papers(app);
        }
    });

    let changed_only = app.state.gui.papers_changed_only;
    let rows: Vec<(&crate::data::Paper, Option<i64>)> = author
        .papers
        .iter()
        .map(|p| {
            let key = title_key(&p.title);
            let delta = author.paper_changes.iter().find(|c| title_key(&c.title) == key).map(|c| c.delta());
            (p, delta)
        })
        .filter(|(_, d)| !changed_only || d.is_some())
        .collect();

    ui.weak(format!("{} shown of {}", rows.len(), author.papers.len()));

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .min_scrolled_height(0.0)
        .column(Column::remainder().at_least(160.0).clip(true))
        .column(Column::exact(40.0))
        .column(Column::exact(56.0))
        .column(Column::exact(44.0))
        .header(20.0, |mut header| {
            for title in ["Title", "Year", "Cited", "Δ"] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(20.0, rows.len(), |mut row| {
                let (p, delta) = rows[row.index()];
                row.col(|ui| {
                    match &p.link {
                        Some(link) => ui.hyperlink_to(&p.title, link),
                        None => ui.label(&p.title),
                    }
                    .on_hover_text(format!("{}\n{}", p.authors, p.venue));
                });
                row.col(|ui| {
                    ui.label(p.year.map(|y| y.to_string()).unwrap_or_default());
                });
                row.col(|ui| {
                    ui.label(p.citations.to_string());
                });
                row.col(|ui| {
                    if let Some(d) = delta {
                        let c = if d > 0 { Color32::from_rgb(0x2e, 0x9e, 0x4f) } else { Color32::from_rgb(0xc0, 0x39, 0x2b) };
                        ui.label(RichText::new(format!("{d:+}")).color(c));
                    }
                });
            });
        });
}
