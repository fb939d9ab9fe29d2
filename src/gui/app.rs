//! Dashboard Main Application
//! Main window with the metrics panel and chart viewer.

use crate::charts::dashboard_charts;
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction, SourceSummary};
use crate::report::ReportGenerator;
use crate::stats::DashboardStats;
use egui::SidePanel;
use std::sync::Arc;

/// Main application window. Holds only read-only, already-derived data.
pub struct DashboardApp {
    stats: Arc<DashboardStats>,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
}

impl DashboardApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        stats: Arc<DashboardStats>,
        sources: SourceSummary,
    ) -> Self {
        Self {
            control_panel: ControlPanel::new(&stats.metrics, sources),
            chart_viewer: ChartViewer::new(dashboard_charts(&stats)),
            stats,
        }
    }

    fn handle_open_in_browser(&mut self) {
        match ReportGenerator::open_in_browser(&self.stats) {
            Ok(path) => self
                .control_panel
                .set_status(format!("Opened {}", path.display())),
            Err(e) => {
                tracing::error!("{e}");
                self.control_panel.set_error(e);
            }
        }
    }

    fn handle_save_html(&mut self) {
        // Ask user for output location
        let output_path = match rfd::FileDialog::new()
            .add_filter("HTML", &["html"])
            .set_file_name("covid_india_dashboard.html")
            .save_file()
        {
            Some(path) => path,
            None => return, // User cancelled
        };

        match ReportGenerator::write_html(&self.stats, &output_path) {
            Ok(()) => self
                .control_panel
                .set_status(format!("Saved {}", output_path.display())),
            Err(e) => {
                tracing::error!("{e}");
                self.control_panel.set_error(e);
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - metrics and actions
        SidePanel::left("control_panel")
            .min_width(280.0)
            .max_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| match self.control_panel.show(ui) {
                    ControlPanelAction::OpenInBrowser => self.handle_open_in_browser(),
                    ControlPanelAction::SaveHtml => self.handle_save_html(),
                    ControlPanelAction::None => {}
                });
            });

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui);
        });
    }
}
