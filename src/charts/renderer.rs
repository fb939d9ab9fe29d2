//! Static Chart Renderer
//! Renders dashboard charts to SVG markup with plotters, for embedding in the
//! browser page.
//!
//! Layout per chart:
//! 1. Caption centered at the top
//! 2. Bars / lines / pie filling the rest
//! 3. Legend in the upper right for line charts

use crate::charts::spec::{date_label, day_number, palette, ChartKind, ChartSpec, LabeledValue};
use crate::stats::{format_count, TrendSeries};
use plotters::element::Pie;
use plotters::prelude::*;
use thiserror::Error;

const FONT: &str = "sans-serif";
const CAPTION_SIZE: u32 = 22;
const LABEL_SIZE: u32 = 13;

#[derive(Error, Debug)]
#[error("Failed to draw chart `{chart}`: {message}")]
pub struct RenderError {
    pub chart: &'static str,
    pub message: String,
}

fn rgb(index: usize) -> RGBColor {
    let (r, g, b) = palette(index);
    RGBColor(r, g, b)
}

/// Y range padded above the data and always including zero.
fn value_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (min, max) = values.fold((0.0f64, 0.0f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if min == max {
        return (0.0, 1.0);
    }
    let pad = (max - min) * 0.1;
    (if min < 0.0 { min - pad } else { 0.0 }, max + pad)
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render one chart to a standalone `<svg>` document.
    pub fn render_svg(spec: &ChartSpec, width: u32, height: u32) -> Result<String, RenderError> {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (width, height)).into_drawing_area();
            let fail = |e: &dyn std::fmt::Display| RenderError {
                chart: spec.key,
                message: e.to_string(),
            };

            root.fill(&WHITE).map_err(|e| fail(&e))?;

            let drawn = if spec.is_empty() {
                Self::draw_placeholder(&root, spec)
            } else {
                match &spec.kind {
                    ChartKind::Bar(values) => Self::draw_bars(&root, spec, values),
                    ChartKind::Line(series) => Self::draw_lines(&root, spec, series),
                    ChartKind::Pie(values) => Self::draw_pie(&root, spec, values),
                }
            };
            drawn.map_err(|e| fail(&e))?;
            root.present().map_err(|e| fail(&e))?;
        }
        Ok(svg)
    }

    fn draw_placeholder<DB: DrawingBackend>(
        root: &DrawingArea<DB, plotters::coord::Shift>,
        spec: &ChartSpec,
    ) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
        let area = root.titled(&spec.title, (FONT, CAPTION_SIZE))?;
        let (w, h) = area.dim_in_pixel();
        area.draw(&Text::new(
            "No Data",
            (w as i32 / 2 - 30, h as i32 / 2),
            (FONT, 18).into_font().color(&BLACK.mix(0.5)),
        ))
    }

    fn draw_bars<DB: DrawingBackend>(
        root: &DrawingArea<DB, plotters::coord::Shift>,
        spec: &ChartSpec,
        values: &[LabeledValue],
    ) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
        let (y_min, y_max) = value_range(values.iter().map(|v| v.value));
        let labels: Vec<String> = values.iter().map(|v| v.label.clone()).collect();

        let mut chart = ChartBuilder::on(root)
            .caption(&spec.title, (FONT, CAPTION_SIZE))
            .margin(15)
            .x_label_area_size(50)
            .y_label_area_size(90)
            .build_cartesian_2d((0..values.len()).into_segmented(), y_min..y_max)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(values.len())
            .x_label_style((FONT, 11))
            .x_label_formatter(&|position| match position {
                SegmentValue::CenterOf(i) => labels.get(*i).cloned().unwrap_or_default(),
                _ => String::new(),
            })
            .y_label_formatter(&|v| format_count(*v))
            .x_desc(spec.x_label.as_str())
            .y_desc(spec.y_label.as_str())
            .axis_desc_style((FONT, LABEL_SIZE))
            .draw()?;

        chart.draw_series(values.iter().enumerate().map(|(i, v)| {
            let mut bar = Rectangle::new(
                [
                    (SegmentValue::Exact(i), 0.0),
                    (SegmentValue::Exact(i + 1), v.value),
                ],
                rgb(i).filled(),
            );
            bar.set_margin(0, 0, 6, 6);
            bar
        }))?;

        Ok(())
    }

    fn draw_lines<DB: DrawingBackend>(
        root: &DrawingArea<DB, plotters::coord::Shift>,
        spec: &ChartSpec,
        series: &[TrendSeries],
    ) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
        let days = series
            .iter()
            .flat_map(|s| s.points.iter().map(|(date, _)| day_number(*date)));
        let first = days.clone().min().unwrap_or(0);
        let last = days.max().unwrap_or(0).max(first + 1);
        let (y_min, y_max) = value_range(
            series
                .iter()
                .flat_map(|s| s.points.iter().map(|(_, active)| *active as f64)),
        );

        let mut chart = ChartBuilder::on(root)
            .caption(&spec.title, (FONT, CAPTION_SIZE))
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(90)
            .build_cartesian_2d(first..last, y_min..y_max)?;

        chart
            .configure_mesh()
            .x_labels(6)
            .x_label_formatter(&|day| date_label(*day as f64))
            .y_label_formatter(&|v| format_count(*v))
            .x_desc(spec.x_label.as_str())
            .y_desc(spec.y_label.as_str())
            .axis_desc_style((FONT, LABEL_SIZE))
            .draw()?;

        for (i, s) in series.iter().enumerate() {
            let color = rgb(i);
            chart
                .draw_series(LineSeries::new(
                    s.points
                        .iter()
                        .map(|(date, active)| (day_number(*date), *active as f64)),
                    color.stroke_width(2),
                ))?
                .label(s.state.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(&WHITE.mix(0.85))
            .border_style(&BLACK)
            .label_font((FONT, LABEL_SIZE))
            .draw()?;

        Ok(())
    }

    fn draw_pie<DB: DrawingBackend>(
        root: &DrawingArea<DB, plotters::coord::Shift>,
        spec: &ChartSpec,
        values: &[LabeledValue],
    ) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
        let area = root.titled(&spec.title, (FONT, CAPTION_SIZE))?;
        let (w, h) = area.dim_in_pixel();
        let center = (w as i32 / 2, h as i32 / 2);
        let radius = f64::from(w.min(h)) * 0.35;

        let sizes: Vec<f64> = values.iter().map(|v| v.value.max(0.0)).collect();
        let colors: Vec<RGBColor> = (0..values.len()).map(rgb).collect();
        let labels: Vec<String> = values
            .iter()
            .map(|v| format!("{} ({})", v.label, format_count(v.value)))
            .collect();

        let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
        pie.start_angle(-90.0);
        pie.label_style((FONT, 16).into_font().color(&BLACK));
        pie.percentages((FONT, 14).into_font().color(&WHITE));
        area.draw(&pie)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn bar_spec(values: Vec<LabeledValue>) -> ChartSpec {
        ChartSpec {
            key: "top_active",
            title: "Top 2 States with Most Active Cases".into(),
            x_label: "State".into(),
            y_label: "Total Active Cases".into(),
            kind: ChartKind::Bar(values),
        }
    }

    #[test]
    fn bar_chart_svg_carries_title_and_states() {
        let spec = bar_spec(vec![
            LabeledValue {
                label: "Maharashtra".into(),
                value: 701_614.0,
            },
            LabeledValue {
                label: "Karnataka".into(),
                value: 605_515.0,
            },
        ]);
        let svg = StaticChartRenderer::render_svg(&spec, 640, 400).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Top 2 States with Most Active Cases"));
        assert!(svg.contains("Maharashtra"));
        assert!(svg.contains("Karnataka"));
    }

    #[test]
    fn empty_chart_renders_placeholder() {
        let svg = StaticChartRenderer::render_svg(&bar_spec(vec![]), 640, 400).unwrap();
        assert!(svg.contains("No Data"));
    }

    #[test]
    fn line_chart_lists_each_state_in_legend() {
        let day = |d| NaiveDate::from_ymd_opt(2021, 5, d).unwrap();
        let spec = ChartSpec {
            key: "growth_trend",
            title: "Growth Trend in Top 2 Affected States".into(),
            x_label: "Date".into(),
            y_label: "Active Cases".into(),
            kind: ChartKind::Line(vec![
                TrendSeries {
                    state: "Kerala".into(),
                    points: vec![(day(1), 10), (day(2), 30)],
                },
                TrendSeries {
                    state: "Goa".into(),
                    points: vec![(day(1), 5)],
                },
            ]),
        };
        let svg = StaticChartRenderer::render_svg(&spec, 640, 400).unwrap();
        assert!(svg.contains("Kerala"));
        assert!(svg.contains("Goa"));
    }

    #[test]
    fn pie_chart_labels_slices() {
        let spec = ChartSpec {
            key: "gender_split",
            title: "Male vs Female Vaccination".into(),
            x_label: String::new(),
            y_label: String::new(),
            kind: ChartKind::Pie(vec![
                LabeledValue {
                    label: "Male".into(),
                    value: 3000.0,
                },
                LabeledValue {
                    label: "Female".into(),
                    value: 1000.0,
                },
            ]),
        };
        let svg = StaticChartRenderer::render_svg(&spec, 480, 400).unwrap();
        assert!(svg.contains("Male (3,000)"));
        assert!(svg.contains("Female (1,000)"));
    }

    #[test]
    fn value_range_includes_zero_and_negatives() {
        assert_eq!(value_range([].into_iter()), (0.0, 1.0));
        let (lo, hi) = value_range([10.0, 20.0].into_iter());
        assert_eq!(lo, 0.0);
        assert!(hi > 20.0);
        let (lo, _) = value_range([-10.0, 20.0].into_iter());
        assert!(lo < -10.0);
    }
}
