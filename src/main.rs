mod app;
mod theory;
mod util;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use theory::{ALL_CATEGORIES, CategoryFilter, DEFAULT_DATA_PATH, DataSource};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// CSV file path or http(s) URL with the theory benchmark results.
    #[arg(long, default_value = DEFAULT_DATA_PATH)]
    data: String,

    /// Category shown on start.
    #[arg(long, default_value = ALL_CATEGORIES)]
    category: String,

    #[arg(long, default_value_t = 1440.0)]
    width: f32,

    #[arg(long, default_value_t = 920.0)]
    height: f32,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let source = DataSource::parse(&args.data);
    let category = CategoryFilter::from_label(&args.category);
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([args.width, args.height])
            .with_title("Theory Network"),
        ..Default::default()
    };

    eframe::run_native(
        "theory-network",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::TheoryNetworkApp::new(
                cc,
                source.clone(),
                category.clone(),
            )))
        }),
    )
}
