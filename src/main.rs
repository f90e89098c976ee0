//! Alliance Rules - Alliance & NAP rule board
//!
//! Desktop viewer for the alliance rules published in a shared Google Sheet.

use alliance_rules::config::AppConfig;
use alliance_rules::gui::RulesApp;
use alliance_rules::logging::init_logging;
use eframe::egui;
use tracing::{info, warn};

fn main() -> eframe::Result<()> {
    // Config is read before logging so it can pick the level and format.
    let loaded = AppConfig::from_env();
    let log_config = match &loaded {
        Ok(config) => config.log_config(),
        Err(_) => AppConfig::default().log_config(),
    };
    if let Err(e) = init_logging(&log_config) {
        eprintln!("logging disabled: {e}");
    }

    let config = loaded.unwrap_or_else(|e| {
        warn!(error = %e, "Falling back to default configuration");
        AppConfig::default()
    });
    info!(url = %config.sheet_url, "Starting Alliance Rules");

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([800.0, 500.0])
            .with_title("Alliance & NAP Rules"),
        ..Default::default()
    };

    eframe::run_native(
        "Alliance & NAP Rules",
        options,
        Box::new(move |cc| Ok(Box::new(RulesApp::new(cc, config)?))),
    )
}
