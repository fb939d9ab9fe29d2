//! Chart Plotter Module
//! Draws interactive dashboard charts using egui_plot.

use crate::charts::spec::{date_label, day_number, palette, ChartKind, ChartSpec, LabeledValue};
use crate::stats::{format_count, TrendSeries};
use egui::{Color32, RichText, Stroke};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints};
use std::f32::consts::{FRAC_PI_2, TAU};

/// Color for the bar, line or slice at `index`.
pub fn series_color(index: usize) -> Color32 {
    let (r, g, b) = palette(index);
    Color32::from_rgb(r, g, b)
}

/// Label for a category axis mark. Only whole positions carry a label.
fn category_label(labels: &[String], position: f64) -> String {
    if (position - position.round()).abs() > 1e-6 || position < -0.5 {
        return String::new();
    }
    labels
        .get(position.round() as usize)
        .cloned()
        .unwrap_or_default()
}

/// Draws [`ChartSpec`]s with egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    pub fn draw(ui: &mut egui::Ui, spec: &ChartSpec, height: f32) {
        if spec.is_empty() {
            ui.allocate_ui(egui::vec2(ui.available_width(), height), |ui| {
                ui.centered_and_justified(|ui| {
                    ui.label(RichText::new("No Data").size(16.0).color(Color32::GRAY));
                });
            });
            return;
        }

        match &spec.kind {
            ChartKind::Bar(values) => Self::draw_bar_chart(ui, spec, values, height),
            ChartKind::Line(series) => Self::draw_line_chart(ui, spec, series, height),
            ChartKind::Pie(values) => Self::draw_pie_chart(ui, values, height),
        }
    }

    /// One colored bar per state; X-axis: state names, Y-axis: counts
    fn draw_bar_chart(ui: &mut egui::Ui, spec: &ChartSpec, values: &[LabeledValue], height: f32) {
        let labels: Vec<String> = values.iter().map(|v| v.label.clone()).collect();

        let bars: Vec<Bar> = values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                Bar::new(i as f64, v.value)
                    .name(&v.label)
                    .fill(series_color(i))
                    .width(0.7)
            })
            .collect();

        Plot::new(spec.key)
            .height(height)
            .allow_scroll(false)
            .x_axis_label(spec.x_label.clone())
            .y_axis_label(spec.y_label.clone())
            .x_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
            .y_axis_formatter(|mark, _range| format_count(mark.value))
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(
                    BarChart::new(bars).element_formatter(Box::new(|bar, _chart| {
                        format!("{}\n{}", bar.name, format_count(bar.value))
                    })),
                );
            });
    }

    /// Active cases over time, one line per state
    fn draw_line_chart(ui: &mut egui::Ui, spec: &ChartSpec, series: &[TrendSeries], height: f32) {
        Plot::new(spec.key)
            .height(height)
            .allow_scroll(false)
            .legend(Legend::default())
            .x_axis_label(spec.x_label.clone())
            .y_axis_label(spec.y_label.clone())
            .x_axis_formatter(|mark, _range| date_label(mark.value))
            .y_axis_formatter(|mark, _range| format_count(mark.value))
            .label_formatter(|name, value| {
                let point = format!("{}: {}", date_label(value.x), format_count(value.y));
                if name.is_empty() {
                    point
                } else {
                    format!("{name}\n{point}")
                }
            })
            .show(ui, |plot_ui| {
                for (i, s) in series.iter().enumerate() {
                    let points: Vec<[f64; 2]> = s
                        .points
                        .iter()
                        .map(|(date, active)| [day_number(*date) as f64, *active as f64])
                        .collect();
                    plot_ui.line(
                        Line::new(PlotPoints::from(points))
                            .name(&s.state)
                            .color(series_color(i))
                            .width(2.0),
                    );
                }
            });
    }

    /// egui_plot has no pie, so slices are painted as triangle fans
    fn draw_pie_chart(ui: &mut egui::Ui, values: &[LabeledValue], height: f32) {
        let total: f64 = values.iter().map(|v| v.value.max(0.0)).sum();

        ui.horizontal(|ui| {
            let (rect, _) = ui.allocate_exact_size(egui::vec2(height, height), egui::Sense::hover());
            let painter = ui.painter_at(rect);
            let center = rect.center();
            let radius = rect.width().min(rect.height()) * 0.45;

            let mut start = -FRAC_PI_2;
            for (i, v) in values.iter().enumerate() {
                let sweep = (v.value.max(0.0) / total) as f32 * TAU;
                let steps = ((sweep / 0.05).ceil() as usize).max(1);
                for step in 0..steps {
                    let a0 = start + sweep * step as f32 / steps as f32;
                    let a1 = start + sweep * (step + 1) as f32 / steps as f32;
                    painter.add(egui::Shape::convex_polygon(
                        vec![
                            center,
                            center + radius * egui::vec2(a0.cos(), a0.sin()),
                            center + radius * egui::vec2(a1.cos(), a1.sin()),
                        ],
                        series_color(i),
                        Stroke::NONE,
                    ));
                }
                start += sweep;
            }

            ui.add_space(20.0);

            ui.vertical(|ui| {
                ui.add_space(height * 0.3);
                for (i, v) in values.iter().enumerate() {
                    ui.horizontal(|ui| {
                        let (swatch, _) =
                            ui.allocate_exact_size(egui::vec2(16.0, 16.0), egui::Sense::hover());
                        ui.painter().rect_filled(swatch, 3.0, series_color(i));
                        ui.label(
                            RichText::new(format!(
                                "{}: {} ({:.1}%)",
                                v.label,
                                format_count(v.value),
                                v.value.max(0.0) * 100.0 / total
                            ))
                            .size(14.0),
                        );
                    });
                    ui.add_space(6.0);
                }
            });
        });
    }
}
