mod app;
mod color;
mod ui;

use std::path::PathBuf;

use app::SchemaScopeApp;
use clap::Parser;
use eframe::egui;

/// Desktop dashboard for structured-data schema audits.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Dataset to open at start-up (.json, .csv or .parquet)
    file: Option<PathBuf>,
}

fn main() -> eframe::Result {
    env_logger::init();
    let args = Args::parse();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Schema Scope – Structured Data Audit",
        options,
        Box::new(move |_cc| Ok(Box::new(SchemaScopeApp::new(args.file)))),
    )
}
