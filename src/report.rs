//! HTML Report Generator Module
//! Builds a self-contained dashboard page (metric cards plus inline SVG
//! charts) and hands it to the system browser.

use crate::charts::{dashboard_charts, RenderError, StaticChartRenderer};
use crate::stats::DashboardStats;
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const PAGE_TITLE: &str = "COVID-19 India Dashboard";
const CHART_WIDTH: u32 = 640;
const CHART_HEIGHT: u32 = 420;
const TEMP_FILENAME: &str = "covid_india_dashboard.html";

#[derive(Error, Debug)]
pub enum ReportError {
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("Failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to open {path:?} in the browser: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

const STYLE: &str = r#"
body { font-family: sans-serif; margin: 24px 40px; background: #fafafa; color: #222; }
h1 { margin-bottom: 4px; }
.subtitle { color: #666; margin-top: 0; }
.metrics { display: flex; gap: 16px; flex-wrap: wrap; }
.metric { background: #fff; border: 1px solid #ddd; border-radius: 8px; padding: 12px 20px; min-width: 160px; }
.metric .label { color: #666; font-size: 14px; }
.metric .value { font-size: 28px; font-weight: bold; }
.charts { display: flex; flex-wrap: wrap; gap: 16px; }
.chart { background: #fff; border: 1px solid #ddd; border-radius: 8px; padding: 8px; }
.info { background: #e8f1fb; border-radius: 6px; padding: 12px 16px; margin-top: 24px; }
hr { border: none; border-top: 1px solid #ddd; margin: 24px 0; }
"#;

/// HTML page generator for the dashboard
pub struct ReportGenerator;

impl ReportGenerator {
    pub fn render_html(stats: &DashboardStats) -> Result<String, ReportError> {
        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
        html.push_str(&format!("<title>{PAGE_TITLE}</title>\n<style>{STYLE}</style>\n"));
        html.push_str("</head>\n<body>\n");

        html.push_str(&format!("<h1>{PAGE_TITLE}</h1>\n"));
        html.push_str(
            "<p class=\"subtitle\">An interactive dashboard to analyze COVID-19 case and \
             vaccination trends across India.</p>\n",
        );

        html.push_str("<h2>Nationwide Overview</h2>\n<div class=\"metrics\">\n");
        for (label, value) in stats.metrics.cards() {
            html.push_str(&format!(
                "<div class=\"metric\"><div class=\"label\">{}</div>\
                 <div class=\"value\">{}</div></div>\n",
                encode_text(label),
                encode_text(&value)
            ));
        }
        html.push_str("</div>\n<hr>\n<h2>Deep Dive Analysis</h2>\n<div class=\"charts\">\n");

        for spec in dashboard_charts(stats) {
            let svg = StaticChartRenderer::render_svg(&spec, CHART_WIDTH, CHART_HEIGHT)?;
            html.push_str(&format!(
                "<section class=\"chart\" id=\"{}\" aria-label=\"{}\">\n{svg}\n</section>\n",
                spec.key,
                encode_double_quoted_attribute(&spec.title)
            ));
        }

        html.push_str("</div>\n<hr>\n");
        html.push_str(
            "<div class=\"info\">This dashboard provides a high-level analysis based on the \
             provided datasets.</div>\n",
        );
        html.push_str("</body>\n</html>\n");
        Ok(html)
    }

    pub fn write_html(stats: &DashboardStats, path: &Path) -> Result<(), ReportError> {
        let html = Self::render_html(stats)?;
        fs::write(path, html).map_err(|source| ReportError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!("Wrote dashboard page to {:?}", path);
        Ok(())
    }

    /// Write the page to the temp directory and open it with the default
    /// browser. Returns the written path.
    pub fn open_in_browser(stats: &DashboardStats) -> Result<PathBuf, ReportError> {
        let path = std::env::temp_dir().join(TEMP_FILENAME);
        Self::write_html(stats, &path)?;
        open::that(&path).map_err(|source| ReportError::Open {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardSettings;
    use crate::data::StateVaccinationTotal;
    use crate::stats::{HeadlineMetrics, StateCount};

    fn stats() -> DashboardStats {
        DashboardStats {
            metrics: HeadlineMetrics {
                confirmed: 1_234_567,
                cured: 1_000_000,
                deaths: 34_567,
                active: 200_000,
                vaccinated: 9_876_543.0,
            },
            top_active: vec![StateCount {
                state: "Jammu & Kashmir".into(),
                value: 120,
            }],
            top_deaths: vec![],
            trend: vec![],
            male_vaccinated: 60.0,
            female_vaccinated: 40.0,
            most_vaccinated: vec![StateVaccinationTotal {
                state: "Uttar Pradesh".into(),
                total: 500.0,
            }],
            least_vaccinated: vec![],
            settings: DashboardSettings::default(),
        }
    }

    #[test]
    fn page_shows_metrics_and_all_charts() {
        let html = ReportGenerator::render_html(&stats()).unwrap();

        assert!(html.contains("<h1>COVID-19 India Dashboard</h1>"));
        assert!(html.contains("1,234,567"));
        assert!(html.contains("200,000"));
        assert!(html.contains("34,567"));
        assert!(html.contains("9,876,543"));
        assert_eq!(html.matches("<section class=\"chart\"").count(), 6);
        assert!(html.contains("id=\"least_vaccinated\""));
        assert!(html.contains("Uttar Pradesh"));
    }

    #[test]
    fn write_html_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dashboard.html");
        ReportGenerator::write_html(&stats(), &path).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("<!DOCTYPE html>"));
    }

    #[test]
    fn write_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("dashboard.html");
        let err = ReportGenerator::write_html(&stats(), &path).unwrap_err();
        assert!(matches!(err, ReportError::Write { .. }));
    }

    #[test]
    fn state_names_reach_the_page_escaped() {
        let html = ReportGenerator::render_html(&stats()).unwrap();
        assert!(html.contains("Jammu &amp; Kashmir"));
        assert!(!html.contains("Jammu & Kashmir"));
    }
}
