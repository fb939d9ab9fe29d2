//! Chart descriptions shared by the native viewer and the HTML renderer.

use crate::stats::{DashboardStats, StateCount, TrendSeries};
use crate::data::StateVaccinationTotal;
use chrono::{Datelike, NaiveDate};

/// Category palette, cycled by bar/line/slice index.
pub const PALETTE: [(u8, u8, u8); 10] = [
    (231, 76, 60),   // Red
    (52, 152, 219),  // Blue
    (46, 204, 113),  // Green
    (155, 89, 182),  // Purple
    (243, 156, 18),  // Orange
    (26, 188, 156),  // Teal
    (233, 30, 99),   // Pink
    (0, 188, 212),   // Cyan
    (121, 85, 72),   // Brown
    (96, 125, 139),  // Blue Grey
];

pub fn palette(index: usize) -> (u8, u8, u8) {
    PALETTE[index % PALETTE.len()]
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabeledValue {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartKind {
    Bar(Vec<LabeledValue>),
    Line(Vec<TrendSeries>),
    Pie(Vec<LabeledValue>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    /// Stable id, used for egui widget ids and HTML anchors.
    pub key: &'static str,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub kind: ChartKind,
}

impl ChartSpec {
    pub fn is_empty(&self) -> bool {
        match &self.kind {
            ChartKind::Bar(values) => values.is_empty(),
            ChartKind::Pie(values) => values.iter().all(|v| v.value <= 0.0),
            ChartKind::Line(series) => series.iter().all(|s| s.points.is_empty()),
        }
    }
}

fn case_bars(counts: &[StateCount]) -> Vec<LabeledValue> {
    counts
        .iter()
        .map(|c| LabeledValue {
            label: c.state.clone(),
            value: c.value as f64,
        })
        .collect()
}

fn vaccination_bars(totals: &[StateVaccinationTotal]) -> Vec<LabeledValue> {
    totals
        .iter()
        .map(|t| LabeledValue {
            label: t.state.clone(),
            value: t.total,
        })
        .collect()
}

/// The six dashboard charts, in display order.
pub fn dashboard_charts(stats: &DashboardStats) -> Vec<ChartSpec> {
    let settings = &stats.settings;
    vec![
        ChartSpec {
            key: "top_active",
            title: format!("Top {} States with Most Active Cases", settings.top_states),
            x_label: "State".into(),
            y_label: "Total Active Cases".into(),
            kind: ChartKind::Bar(case_bars(&stats.top_active)),
        },
        ChartSpec {
            key: "top_deaths",
            title: format!("Top {} States with Highest Deaths", settings.top_states),
            x_label: "State".into(),
            y_label: "Total Deaths".into(),
            kind: ChartKind::Bar(case_bars(&stats.top_deaths)),
        },
        ChartSpec {
            key: "growth_trend",
            title: format!("Growth Trend in Top {} Affected States", settings.trend_states),
            x_label: "Date".into(),
            y_label: "Active Cases".into(),
            kind: ChartKind::Line(stats.trend.clone()),
        },
        ChartSpec {
            key: "gender_split",
            title: "Male vs Female Vaccination".into(),
            x_label: String::new(),
            y_label: String::new(),
            kind: ChartKind::Pie(vec![
                LabeledValue {
                    label: "Male".into(),
                    value: stats.male_vaccinated,
                },
                LabeledValue {
                    label: "Female".into(),
                    value: stats.female_vaccinated,
                },
            ]),
        },
        ChartSpec {
            key: "most_vaccinated",
            title: format!("Top {} Most Vaccinated States", settings.vaccination_states),
            x_label: "State".into(),
            y_label: "Total Individuals Vaccinated".into(),
            kind: ChartKind::Bar(vaccination_bars(&stats.most_vaccinated)),
        },
        ChartSpec {
            key: "least_vaccinated",
            title: format!("Top {} Least Vaccinated States", settings.vaccination_states),
            x_label: "State".into(),
            y_label: "Total Individuals Vaccinated".into(),
            kind: ChartKind::Bar(vaccination_bars(&stats.least_vaccinated)),
        },
    ]
}

/// Dates are plotted as days since the common era.
pub fn day_number(date: NaiveDate) -> i32 {
    date.num_days_from_ce()
}

pub fn date_label(day: f64) -> String {
    NaiveDate::from_num_days_from_ce_opt(day.round() as i32)
        .map(|d| d.format("%d %b %Y").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardSettings;
    use crate::stats::HeadlineMetrics;

    fn stats() -> DashboardStats {
        DashboardStats {
            metrics: HeadlineMetrics {
                confirmed: 0,
                cured: 0,
                deaths: 0,
                active: 0,
                vaccinated: 0.0,
            },
            top_active: vec![StateCount {
                state: "Kerala".into(),
                value: 42,
            }],
            top_deaths: vec![],
            trend: vec![],
            male_vaccinated: 3.0,
            female_vaccinated: 0.0,
            most_vaccinated: vec![],
            least_vaccinated: vec![],
            settings: DashboardSettings::default(),
        }
    }

    #[test]
    fn six_charts_in_display_order() {
        let charts = dashboard_charts(&stats());
        let keys: Vec<&str> = charts.iter().map(|c| c.key).collect();
        assert_eq!(
            keys,
            vec![
                "top_active",
                "top_deaths",
                "growth_trend",
                "gender_split",
                "most_vaccinated",
                "least_vaccinated"
            ]
        );
        assert_eq!(charts[0].title, "Top 10 States with Most Active Cases");
        assert_eq!(charts[2].title, "Growth Trend in Top 5 Affected States");
        assert_eq!(
            charts[0].kind,
            ChartKind::Bar(vec![LabeledValue {
                label: "Kerala".into(),
                value: 42.0
            }])
        );
    }

    #[test]
    fn emptiness_follows_chart_kind() {
        let charts = dashboard_charts(&stats());
        assert!(!charts[0].is_empty());
        assert!(charts[1].is_empty());
        assert!(charts[2].is_empty());
        assert!(!charts[3].is_empty());
    }

    #[test]
    fn day_numbers_round_trip_to_labels() {
        let date = NaiveDate::from_ymd_opt(2020, 3, 14).unwrap();
        assert_eq!(date_label(day_number(date) as f64), "14 Mar 2020");
    }
}
