//! COVID-19 India Dashboard - native viewer
//!
//! Runs the data pipeline once, then opens the dashboard window. Any load
//! failure aborts before the window appears.

use anyhow::{anyhow, Context, Result};
use covid_dashboard::config::AppConfig;
use covid_dashboard::data::build_dashboard_data;
use covid_dashboard::gui::{DashboardApp, SourceSummary};
use covid_dashboard::logging::init_logging;
use covid_dashboard::report::ReportGenerator;
use covid_dashboard::stats::StatsCalculator;
use eframe::egui;
use std::sync::Arc;

fn main() -> Result<()> {
    let (config, source) = AppConfig::load();
    init_logging(&config.log_filter);
    source.log();

    let data = build_dashboard_data(&config.data)
        .inspect_err(|e| tracing::error!("{e}"))
        .context("Failed to prepare dashboard data")?;
    let stats = Arc::new(StatsCalculator::dashboard_stats(&data, &config.dashboard));
    let sources = SourceSummary::new(&config.data, &data);
    drop(data);

    if config.dashboard.open_browser_on_start {
        match ReportGenerator::open_in_browser(&stats) {
            Ok(path) => tracing::info!("Opened dashboard page {:?}", path),
            Err(e) => tracing::warn!("Could not open the dashboard in the browser: {e}"),
        }
    }

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([1000.0, 700.0])
            .with_title("COVID-19 India Dashboard"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "COVID-19 India Dashboard",
        options,
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, stats, sources)))),
    )
    .map_err(|e| anyhow!("Dashboard window failed: {e}"))
}
