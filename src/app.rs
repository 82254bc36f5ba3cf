use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct CiteScopeApp {
    pub state: AppState,
}

impl CiteScopeApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for CiteScopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: dataset and range controls ----
        egui::SidePanel::left("control_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: table and charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.table.is_none() {
                ui.centered_and_justified(|ui| {
                    ui.heading("Open a dataset to begin  (File → Open…)");
                });
                return;
            }
            if self.state.views.is_empty() {
                ui.centered_and_justified(|ui| {
                    ui.heading("No publications in the selected range");
                });
                return;
            }
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    table::publications_table(ui, &self.state);
                    ui.separator();
                    plot::publications_per_year(ui, &self.state);
                    ui.separator();
                    plot::most_cited(ui, &self.state);
                    ui.separator();
                    plot::top_keywords(ui, &self.state);
                });
        });
    }
}
