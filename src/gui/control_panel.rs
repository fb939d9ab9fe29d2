//! Control Panel Widget
//! Left side panel with the headline metrics, data source details and export
//! actions.

use crate::config::DataConfig;
use crate::data::DashboardData;
use crate::stats::{format_count, HeadlineMetrics};
use egui::{Color32, RichText};
use std::path::Path;

/// Row counts and file names shown under "Data Sources".
#[derive(Debug, Clone, Default)]
pub struct SourceSummary {
    pub cases_file: String,
    pub vaccinations_file: String,
    pub case_records: usize,
    pub states: usize,
    pub vaccination_records: usize,
}

impl SourceSummary {
    pub fn new(config: &DataConfig, data: &DashboardData) -> Self {
        Self {
            cases_file: file_name(&config.cases_path),
            vaccinations_file: file_name(&config.vaccinations_path),
            case_records: data.cases.len(),
            states: data.statewise.len(),
            vaccination_records: data.vaccinations.len(),
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Left side panel with metrics and export controls.
pub struct ControlPanel {
    metrics: [(&'static str, String); 5],
    sources: SourceSummary,
    pub status: String,
    pub is_error: bool,
}

impl ControlPanel {
    pub fn new(metrics: &HeadlineMetrics, sources: SourceSummary) -> Self {
        Self {
            metrics: metrics.cards(),
            sources,
            status: "Ready".to_string(),
            is_error: false,
        }
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🦠 COVID-19 India")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(RichText::new("Cases & Vaccination Dashboard").size(11.0).color(Color32::GRAY));
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Nationwide Overview =====
        ui.label(RichText::new("📈 Nationwide Overview").size(14.0).strong());
        ui.add_space(5.0);

        for (label, value) in &self.metrics {
            egui::Frame::none()
                .fill(ui.visuals().widgets.noninteractive.bg_fill)
                .rounding(5.0)
                .inner_margin(8.0)
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.label(RichText::new(*label).size(12.0).color(Color32::GRAY));
                    ui.label(RichText::new(value).size(22.0).strong());
                });
            ui.add_space(4.0);
        }

        ui.add_space(10.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Data Sources =====
        ui.label(RichText::new("📁 Data Sources").size(14.0).strong());
        ui.add_space(5.0);

        egui::Grid::new("data_sources")
            .num_columns(2)
            .spacing([12.0, 4.0])
            .show(ui, |ui| {
                ui.label("Cases:");
                ui.label(RichText::new(&self.sources.cases_file).size(12.0));
                ui.end_row();
                ui.label("Vaccinations:");
                ui.label(RichText::new(&self.sources.vaccinations_file).size(12.0));
                ui.end_row();
                ui.label("Case records:");
                ui.label(format_count(self.sources.case_records as f64));
                ui.end_row();
                ui.label("States:");
                ui.label(self.sources.states.to_string());
                ui.end_row();
                ui.label("Vaccination records:");
                ui.label(format_count(self.sources.vaccination_records as f64));
                ui.end_row();
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Action Buttons =====
        ui.vertical_centered(|ui| {
            let open_button = egui::Button::new(RichText::new("🌐 Open in Browser").size(16.0))
                .min_size(egui::vec2(200.0, 35.0));
            if ui.add(open_button).clicked() {
                action = ControlPanelAction::OpenInBrowser;
            }

            ui.add_space(8.0);

            let save_button = egui::Button::new(RichText::new("💾 Save HTML…").size(14.0))
                .min_size(egui::vec2(150.0, 30.0));
            if ui.add(save_button).clicked() {
                action = ControlPanelAction::SaveHtml;
            }
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(5.0);

        let status_color = if self.is_error {
            Color32::from_rgb(220, 53, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
        self.is_error = false;
    }

    pub fn set_error(&mut self, error: impl std::fmt::Display) {
        self.status = format!("Error: {error}");
        self.is_error = true;
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    OpenInBrowser,
    SaveHtml,
}
