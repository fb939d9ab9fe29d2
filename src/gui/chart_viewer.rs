//! Deep-dive panel: the six dashboard charts as fixed-width cards that wrap
//! into as many columns as the window allows.

use crate::charts::{ChartPlotter, ChartSpec};
use egui::{Color32, RichText, ScrollArea};

const CHART_SPACING: f32 = 15.0;
const CARD_HEIGHT: f32 = 420.0;
const CHART_WIDTH: f32 = 640.0;
const PLOT_HEIGHT: f32 = 340.0;

/// Central panel of the dashboard window.
pub struct ChartViewer {
    charts: Vec<ChartSpec>,
}

impl ChartViewer {
    pub fn new(charts: Vec<ChartSpec>) -> Self {
        Self { charts }
    }

    pub fn show(&self, ui: &mut egui::Ui) {
        if self.charts.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        }

        let columns = (ui.available_width() / (CHART_WIDTH + CHART_SPACING)).floor() as usize;
        let num_columns = columns.max(1);

        let total_rows = self.charts.len().div_ceil(num_columns);
        let row_height = CARD_HEIGHT + CHART_SPACING;

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show_rows(ui, row_height, total_rows, |ui, row_range| {
                for row in row_range {
                    ui.horizontal(|ui| {
                        let start = row * num_columns;
                        let end = (start + num_columns).min(self.charts.len());
                        for spec in &self.charts[start..end] {
                            Self::draw_chart_card(ui, spec);
                            ui.add_space(CHART_SPACING);
                        }
                    });
                    ui.add_space(CHART_SPACING);
                }
            });
    }

    fn draw_chart_card(ui: &mut egui::Ui, spec: &ChartSpec) {
        let border_color = Color32::from_rgb(100, 149, 237);
        let card_width = CHART_WIDTH - 20.0;

        egui::Frame::none()
            .rounding(8.0)
            .stroke(egui::Stroke::new(1.5, border_color))
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_width(card_width);
                ui.set_height(CARD_HEIGHT - 24.0);

                ui.vertical(|ui| {
                    ui.label(RichText::new(&spec.title).size(18.0).strong());
                    ui.add_space(8.0);
                    ChartPlotter::draw(ui, spec, PLOT_HEIGHT);
                });
            });
    }
}
