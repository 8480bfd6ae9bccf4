use std::path::PathBuf;

use eframe::egui;
use schema_scope::state::AppState;

use crate::ui::{charts, panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SchemaScopeApp {
    pub state: AppState,
    /// Text in the search box; pushed into the state when it changes.
    pub search_input: String,
}

impl SchemaScopeApp {
    pub fn new(startup_file: Option<PathBuf>) -> Self {
        let mut app = Self {
            state: AppState::default(),
            search_input: String::new(),
        };
        if let Some(path) = startup_file {
            panels::load_path(&mut app.state, &path);
        }
        app
    }
}

impl eframe::App for SchemaScopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar and summary ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            if panels::top_bar(ui, &mut self.state) {
                self.search_input.clear();
            }
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state, &mut self.search_input);
            });

        // ---- Central panel: charts and records ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.dataset().is_none() {
                ui.centered_and_justified(|ui| {
                    ui.heading("Open an audit file to begin  (File → Open…)");
                });
                return;
            }
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    charts::frequency_charts(ui, &self.state);
                    ui.separator();
                    charts::priority_chart(ui, &mut self.state);
                    ui.separator();
                    table::records_table(ui, &mut self.state);
                });
        });
    }
}
