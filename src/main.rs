use anyhow::Result;
use eframe::egui;

use pitch_arsenal::app::PitchArsenalApp;
use pitch_arsenal::config::{FilterConfig, SeasonConfig};
use pitch_arsenal::data::loader::load_season;
use pitch_arsenal::state::AppState;
use pitch_arsenal::ui::panels::TITLE;

fn main() -> Result<()> {
    env_logger::init();

    // Loading and aggregation happen once, before the window opens. A bad
    // partition aborts startup.
    let season = SeasonConfig::default();
    let dataset = load_season(&season)
        .inspect_err(|e| log::error!("Failed to load season: {e:#}"))?;
    let state = AppState::new(season, FilterConfig::default(), &dataset)
        .inspect_err(|e| log::error!("Failed to summarise season: {e:#}"))?;
    drop(dataset);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        TITLE,
        options,
        Box::new(|_cc| Ok(Box::new(PitchArsenalApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
