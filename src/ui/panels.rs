use eframe::egui::{self, Color32, RichText, ScrollArea, Slider, Ui};

use crate::data::model::YearRange;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – dataset, range and top-N controls
// ---------------------------------------------------------------------------

/// Render the left control panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("About");
            ui.label(
                "Publications per year, most cited papers and most popular \
                 index keywords for a citation dataset.",
            );
            ui.separator();

            dataset_selector(ui, state);
            ui.separator();

            // ---- Year range ----
            ui.heading("Date Range");
            let (min_year, max_year) = {
                let limits = &state.config().limits;
                (limits.min_year, limits.max_year)
            };
            let mut from = state.range.from;
            let mut to = state.range.to;
            let from_changed = ui
                .add(Slider::new(&mut from, min_year..=max_year).text("From"))
                .changed();
            let to_changed = ui
                .add(Slider::new(&mut to, min_year..=max_year).text("To"))
                .changed();
            if from_changed || to_changed {
                state.set_range(YearRange::new(from, to));
            }
            if from > to {
                ui.label(RichText::new("'From' is after 'To'").color(Color32::YELLOW));
            }
            ui.separator();

            // ---- Top-N limits ----
            let (max_papers, max_keywords) = {
                let limits = &state.config().limits;
                (limits.max_papers, limits.max_keywords)
            };
            ui.heading("Most Cited Papers");
            let mut papers = state.top_papers;
            let papers_changed = ui
                .add(Slider::new(&mut papers, 1..=max_papers).text("Papers"))
                .changed();

            ui.heading("Most Popular Keywords");
            let mut keywords = state.top_keywords;
            let keywords_changed = ui
                .add(Slider::new(&mut keywords, 1..=max_keywords).text("Top"))
                .changed();
            if papers_changed || keywords_changed {
                state.set_top_n(papers, keywords);
            }
            ui.separator();

            // ---- Export ----
            ui.heading("Export");
            ui.label(format!("Folder: {}", state.export_dir.display()));
            ui.horizontal(|ui: &mut Ui| {
                if ui.button("Choose…").clicked() {
                    if let Some(dir) = rfd::FileDialog::new()
                        .set_title("Export folder")
                        .pick_folder()
                    {
                        state.export_dir = dir;
                    }
                }
                if ui.button("Export charts").clicked() {
                    state.export();
                }
            });
        });
}

/// Combo box over the discovered datasets.
fn dataset_selector(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Dataset");
    if state.datasets.is_empty() {
        ui.label(format!(
            "No datasets in {}",
            state.config().data.datasets_dir.display()
        ));
        return;
    }

    let current = state
        .current_dataset
        .as_deref()
        .and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut chosen = None;
    egui::ComboBox::from_id_salt("dataset_choice")
        .selected_text(&current)
        .show_ui(ui, |ui: &mut Ui| {
            for path in &state.datasets {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                let selected = state.current_dataset.as_ref() == Some(path);
                if ui.selectable_label(selected, name).clicked() && !selected {
                    chosen = Some(path.clone());
                }
            }
        });
    if let Some(path) = chosen {
        state.open_dataset(&path);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload datasets").clicked() {
                state.refresh_datasets();
                ui.close_menu();
            }
            if ui.button("Export charts").clicked() {
                state.export();
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(table) = &state.table {
            ui.label(format!(
                "{} publications loaded, {} in {}",
                table.len(),
                state.filtered.len(),
                state.range
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            let color = if state.status_is_error {
                Color32::RED
            } else {
                Color32::GREEN
            };
            ui.label(RichText::new(msg).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open publication dataset")
        .set_directory(&state.config().data.datasets_dir)
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open_dataset(&path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn run_frame(ctx: &egui::Context, state: &mut AppState) {
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| side_panel(ui, state));
        });
    }

    #[test]
    fn test_idle_frames_leave_controls_untouched() {
        let ctx = egui::Context::default();
        let mut state = AppState::new(Config::default());
        state.set_top_n(7, 3);
        let range = state.range;

        for _ in 0..3 {
            run_frame(&ctx, &mut state);
        }

        assert_eq!(state.top_papers, 7);
        assert_eq!(state.top_keywords, 3);
        assert_eq!(state.range, range);
        assert!(state.status_message.is_none());
    }
}
