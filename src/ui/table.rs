use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use schema_scope::state::AppState;

use crate::color::score_color;

const ROW_HEIGHT: f32 = 22.0;

// ---------------------------------------------------------------------------
// Paginated records table
// ---------------------------------------------------------------------------

pub fn records_table(ui: &mut Ui, state: &mut AppState) {
    pager(ui, state);
    ui.add_space(4.0);

    let page = state.current_page();
    if page.items.is_empty() {
        ui.label(RichText::new("No pages match the current filters").weak());
        return;
    }

    TableBuilder::new(ui)
        .id_salt("records")
        .striped(true)
        .vscroll(false)
        .column(Column::remainder().at_least(260.0).clip(true))
        .column(Column::initial(110.0))
        .column(Column::initial(180.0).clip(true))
        .column(Column::initial(130.0))
        .column(Column::initial(80.0))
        .column(Column::initial(60.0))
        .column(Column::initial(50.0))
        .header(ROW_HEIGHT, |mut header| {
            for title in ["URL", "Page type", "Schemas found", "Completeness", "Status", "Reviews", "FAQ"] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for record in &page.items {
                body.row(ROW_HEIGHT, |mut row| {
                    row.col(|ui| {
                        ui.label(&record.url).on_hover_text(&record.recommended_schemas);
                    });
                    row.col(|ui| {
                        ui.label(record.page_type.as_deref().unwrap_or("Uncategorized"));
                    });
                    row.col(|ui| {
                        ui.label(&record.schema_types_found);
                    });
                    row.col(|ui| {
                        let score = record.schema_completeness_score;
                        ui.add(
                            egui::ProgressBar::new((score.clamp(0.0, 100.0) / 100.0) as f32)
                                .fill(score_color(score))
                                .text(format!("{score:.0}%")),
                        );
                    });
                    row.col(|ui| {
                        let color = if record.is_valid() { Color32::DARK_GREEN } else { Color32::RED };
                        ui.label(RichText::new(record.validation_label()).color(color));
                    });
                    row.col(|ui| {
                        ui.label(if record.has_reviews { "✔" } else { "–" });
                    });
                    row.col(|ui| {
                        ui.label(if record.has_faq { "✔" } else { "–" });
                    });
                });
            }
        });
}

fn pager(ui: &mut Ui, state: &mut AppState) {
    let (current, total_pages, total_count) = {
        let page = state.current_page();
        (page.current_page, page.total_pages, page.total_count)
    };

    ui.horizontal(|ui: &mut Ui| {
        if ui.add_enabled(current > 1, egui::Button::new("‹ Prev")).clicked() {
            state.previous_page();
        }
        ui.label(format!("Page {current} of {total_pages}"));
        if ui
            .add_enabled(current < total_pages, egui::Button::new("Next ›"))
            .clicked()
        {
            state.next_page();
        }
        ui.separator();
        ui.label(format!("{total_count} pages"));
    });
}
