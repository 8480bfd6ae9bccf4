use std::path::Path;

use eframe::egui::{self, Color32, RichText, Ui};

use schema_scope::data::loader::load_file;
use schema_scope::state::AppState;

use crate::color::priority_color;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState, search_input: &mut String) {
    ui.heading("Filters");
    ui.separator();

    if state.dataset().is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    // ---- URL search ----
    ui.strong("Search URL");
    if ui.text_edit_singleline(search_input).changed() {
        state.set_search_term(search_input);
    }
    ui.add_space(6.0);

    // ---- Schema type selector ----
    ui.strong("Schema type");
    let current = state.filters().schema_type.clone();
    let catalog = state.schema_catalog().to_vec();
    egui::ComboBox::from_id_salt("schema_type")
        .selected_text(&current)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for name in &catalog {
                if ui.selectable_label(current == *name, name).clicked() {
                    state.set_schema_type_filter(name);
                }
            }
        });
    ui.add_space(6.0);

    // ---- Active cross-filter ----
    ui.strong("Recommendation");
    match state.filters().recommendation.clone() {
        Some(active) => {
            ui.horizontal(|ui: &mut Ui| {
                ui.label(
                    RichText::new(format!("{} ({})", active.schema, active.priority))
                        .color(priority_color(active.priority)),
                );
                if ui.small_button("Clear").clicked() {
                    state.clear_recommendation_filter();
                }
            });
        }
        None => {
            ui.label(RichText::new("Click a priority bar to filter").weak());
        }
    }

    ui.separator();
    ui.label(format!("{} matching pages", state.visible_count()));
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar. Returns `true` when a new dataset was loaded.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) -> bool {
    let mut reloaded = false;
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                reloaded = open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if state.dataset().is_some() {
            let stats = state.summary_stats();
            let average = stats
                .average_score
                .map(|avg| format!("{avg:.1}%"))
                .unwrap_or_else(|| "No data".to_string());
            ui.label(format!("Pages: {}", stats.total_count));
            ui.separator();
            ui.label(format!("Avg. completeness: {average}"));
            ui.separator();
            ui.label(format!("With reviews: {}", stats.review_count));
            ui.separator();
            ui.label(format!("With FAQ: {}", stats.faq_count));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
    reloaded
}

// ---------------------------------------------------------------------------
// File loading
// ---------------------------------------------------------------------------

/// Ask for a dataset file and load it. Returns `true` on success.
pub fn open_file_dialog(state: &mut AppState) -> bool {
    let file = rfd::FileDialog::new()
        .set_title("Open schema audit")
        .add_filter("Supported files", &["json", "csv", "parquet", "pq"])
        .add_filter("JSON", &["json"])
        .add_filter("CSV", &["csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    match file {
        Some(path) => load_path(state, &path),
        None => false,
    }
}

/// Load a dataset into the state, reporting failures in the status line.
pub fn load_path(state: &mut AppState, path: &Path) -> bool {
    match load_file(path) {
        Ok(dataset) => {
            state.set_dataset(dataset);
            true
        }
        Err(e) => {
            log::error!("Failed to load {}: {e:#}", path.display());
            state.status_message = Some(format!("Error: {e:#}"));
            false
        }
    }
}
