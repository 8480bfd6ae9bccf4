use eframe::egui::{self, RichText, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot};

use schema_scope::data::aggregate::FrequencyTable;
use schema_scope::data::model::Priority;
use schema_scope::state::AppState;

use crate::color::{generate_palette, priority_color};

/// Bars shown per frequency chart; the rest are summarized in the heading.
const MAX_BARS: usize = 15;

const BAR_WIDTH: f64 = 0.7;

// ---------------------------------------------------------------------------
// Frequency charts
// ---------------------------------------------------------------------------

/// Schema-type and page-type distributions, side by side.
pub fn frequency_charts(ui: &mut Ui, state: &AppState) {
    ui.columns(2, |cols| {
        frequency_chart(&mut cols[0], "schema_frequency", "Schema types found", state.schema_frequency());
        frequency_chart(&mut cols[1], "page_type_frequency", "Page types", state.page_type_frequency());
    });
}

fn frequency_chart(ui: &mut Ui, id: &str, title: &str, table: &FrequencyTable) {
    if table.len() > MAX_BARS {
        ui.strong(format!("{title}  (top {MAX_BARS} of {})", table.len()));
    } else {
        ui.strong(title);
    }

    if table.is_empty() {
        ui.label(RichText::new("No data").weak());
        return;
    }

    let shown = &table[..table.len().min(MAX_BARS)];
    let colors = generate_palette(shown.len());
    let bars: Vec<Bar> = shown
        .iter()
        .zip(colors)
        .enumerate()
        .map(|(i, ((name, count), color))| {
            Bar::new(i as f64, *count as f64)
                .name(name)
                .fill(color)
                .width(BAR_WIDTH)
        })
        .collect();

    Plot::new(id)
        .height(220.0)
        .allow_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name(title));
        });
}

// ---------------------------------------------------------------------------
// Recommendation priority chart (cross-filter source)
// ---------------------------------------------------------------------------

/// Stacked High/Medium/Low bars per recommended schema plus a count grid.
/// Clicking a bar segment or a grid cell sets the recommendation filter.
pub fn priority_chart(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Recommended schemas by priority");

    let rows = state.priority_matrix().clone();
    if rows.is_empty() {
        ui.label(RichText::new("No recommendations").weak());
        return;
    }

    let series = |priority: Priority| -> Vec<Bar> {
        rows.iter()
            .enumerate()
            .map(|(i, row)| {
                Bar::new(i as f64, row.counts.get(priority) as f64)
                    .name(format!("{} ({priority})", row.schema))
                    .width(BAR_WIDTH)
            })
            .collect()
    };

    let high = BarChart::new(series(Priority::High))
        .name(Priority::High.as_str())
        .color(priority_color(Priority::High));
    let medium = BarChart::new(series(Priority::Medium))
        .name(Priority::Medium.as_str())
        .color(priority_color(Priority::Medium))
        .stack_on(&[&high]);
    let low = BarChart::new(series(Priority::Low))
        .name(Priority::Low.as_str())
        .color(priority_color(Priority::Low))
        .stack_on(&[&high, &medium]);

    let response = Plot::new("priority_matrix")
        .height(240.0)
        .legend(Legend::default())
        .allow_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(high);
            plot_ui.bar_chart(medium);
            plot_ui.bar_chart(low);
            plot_ui.pointer_coordinate()
        });

    if response.response.clicked() {
        if let Some(point) = response.inner {
            let slot = point.x.round();
            let inside_bar = (point.x - slot).abs() <= BAR_WIDTH / 2.0;
            if inside_bar && slot >= 0.0 {
                if let Some(row) = rows.get(slot as usize) {
                    if let Some(priority) = row.segment_at(point.y) {
                        state.set_recommendation_filter(&row.schema, priority);
                    }
                }
            }
        }
    }

    ui.add_space(6.0);
    egui::CollapsingHeader::new("Priority matrix")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            egui::Grid::new("priority_grid")
                .striped(true)
                .num_columns(5)
                .show(ui, |ui: &mut Ui| {
                    ui.strong("Schema");
                    for priority in Priority::ALL {
                        ui.strong(priority.as_str());
                    }
                    ui.strong("Total");
                    ui.end_row();

                    for row in &rows {
                        ui.label(&row.schema);
                        for priority in Priority::ALL {
                            let count = row.counts.get(priority);
                            let text = RichText::new(count.to_string()).color(priority_color(priority));
                            if ui.add_enabled(count > 0, egui::Button::new(text)).clicked() {
                                state.set_recommendation_filter(&row.schema, priority);
                            }
                        }
                        ui.label(row.counts.total().to_string());
                        ui.end_row();
                    }
                });
        });
}
