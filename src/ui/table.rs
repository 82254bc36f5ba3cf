use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::data::loader::{AUTHORS, CITED_BY, INDEX_KEYWORDS, TITLE, YEAR};
use crate::state::AppState;

const ROW_HEIGHT: f32 = 18.0;
const MAX_TABLE_HEIGHT: f32 = 260.0;

/// Raw view of the publications inside the selected range.
pub fn publications_table(ui: &mut Ui, state: &AppState) {
    let rows = &state.filtered.publications;

    TableBuilder::new(ui)
        .id_salt("publications_table")
        .striped(true)
        .resizable(true)
        .max_scroll_height(MAX_TABLE_HEIGHT)
        .column(Column::initial(160.0).clip(true))
        .column(Column::initial(320.0).clip(true))
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::remainder().clip(true))
        .header(20.0, |mut header| {
            for name in [AUTHORS, TITLE, YEAR, CITED_BY, INDEX_KEYWORDS] {
                header.col(|ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                let p = &rows[row.index()];
                row.col(|ui| {
                    ui.label(p.authors.join(", "));
                });
                row.col(|ui| {
                    ui.label(&p.title);
                });
                row.col(|ui| {
                    ui.label(p.year.to_string());
                });
                row.col(|ui| {
                    ui.label(p.cited_by.to_string());
                });
                row.col(|ui| {
                    ui.label(p.index_keywords.join("; "));
                });
            });
        });
}
