//! Statistics Calculator Module
//! Derives the headline metrics and the chart series from prepared data.

use crate::config::DashboardSettings;
use crate::data::{CaseRecord, DashboardData, StateSummary, StateVaccinationTotal};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// The five nationwide figures shown above the charts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadlineMetrics {
    pub confirmed: i64,
    pub cured: i64,
    pub deaths: i64,
    pub active: i64,
    pub vaccinated: f64,
}

impl HeadlineMetrics {
    /// (label, formatted value) pairs in display order.
    pub fn cards(&self) -> [(&'static str, String); 5] {
        [
            ("Confirmed Cases", format_count(self.confirmed as f64)),
            ("Active Cases", format_count(self.active as f64)),
            ("Cured", format_count(self.cured as f64)),
            ("Deaths", format_count(self.deaths as f64)),
            ("Total Vaccinated", format_count(self.vaccinated)),
        ]
    }
}

/// A per-state figure used by the case bar charts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateCount {
    pub state: String,
    pub value: i64,
}

/// Date-ordered active cases for one state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendSeries {
    pub state: String,
    pub points: Vec<(NaiveDate, i64)>,
}

/// Everything the dashboard draws, computed once from [`DashboardData`].
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardStats {
    pub metrics: HeadlineMetrics,
    pub top_active: Vec<StateCount>,
    pub top_deaths: Vec<StateCount>,
    pub trend: Vec<TrendSeries>,
    pub male_vaccinated: f64,
    pub female_vaccinated: f64,
    pub most_vaccinated: Vec<StateVaccinationTotal>,
    pub least_vaccinated: Vec<StateVaccinationTotal>,
    pub settings: DashboardSettings,
}

pub struct StatsCalculator;

impl StatsCalculator {
    /// Confirmed, cured and deaths are summed over the statewise summary, so
    /// each state contributes its latest cumulative total once.
    pub fn headline_metrics(data: &DashboardData) -> HeadlineMetrics {
        let confirmed: i64 = data.statewise.iter().map(|s| s.confirmed).sum();
        let cured: i64 = data.statewise.iter().map(|s| s.cured).sum();
        let deaths: i64 = data.statewise.iter().map(|s| s.deaths).sum();
        let vaccinated = data.vaccinations.iter().filter_map(|v| v.total).sum();

        HeadlineMetrics {
            confirmed,
            cured,
            deaths,
            active: confirmed - (cured + deaths),
            vaccinated,
        }
    }

    /// States with the highest peak active count.
    pub fn top_by_active(cases: &[CaseRecord], n: usize) -> Vec<StateCount> {
        Self::top_by_state_max(cases, n, |r| r.active)
    }

    pub fn top_by_deaths(cases: &[CaseRecord], n: usize) -> Vec<StateCount> {
        Self::top_by_state_max(cases, n, |r| r.deaths)
    }

    fn top_by_state_max(
        cases: &[CaseRecord],
        n: usize,
        value: impl Fn(&CaseRecord) -> i64,
    ) -> Vec<StateCount> {
        let mut peaks: BTreeMap<&str, i64> = BTreeMap::new();
        for record in cases {
            let v = value(record);
            peaks
                .entry(record.state.as_str())
                .and_modify(|peak| *peak = (*peak).max(v))
                .or_insert(v);
        }

        let mut ranked: Vec<StateCount> = peaks
            .into_iter()
            .map(|(state, value)| StateCount {
                state: state.to_string(),
                value,
            })
            .collect();
        ranked.sort_by(|a, b| b.value.cmp(&a.value));
        ranked.truncate(n);
        ranked
    }

    /// The `k` most affected states, in statewise order.
    pub fn trend_states(statewise: &[StateSummary], k: usize) -> Vec<String> {
        statewise.iter().take(k).map(|s| s.state.clone()).collect()
    }

    pub fn growth_trend(data: &DashboardData, k: usize) -> Vec<TrendSeries> {
        Self::trend_states(&data.statewise, k)
            .into_iter()
            .map(|state| {
                let mut points: Vec<(NaiveDate, i64)> = data
                    .cases
                    .iter()
                    .filter(|r| r.state == state)
                    .map(|r| (r.date, r.active))
                    .collect();
                points.sort_by_key(|(date, _)| *date);
                TrendSeries { state, points }
            })
            .collect()
    }

    pub fn dashboard_stats(data: &DashboardData, settings: &DashboardSettings) -> DashboardStats {
        let take = |ranking: &[StateVaccinationTotal]| {
            ranking
                .iter()
                .take(settings.vaccination_states)
                .cloned()
                .collect::<Vec<_>>()
        };

        DashboardStats {
            metrics: Self::headline_metrics(data),
            top_active: Self::top_by_active(&data.cases, settings.top_states),
            top_deaths: Self::top_by_deaths(&data.cases, settings.top_states),
            trend: Self::growth_trend(data, settings.trend_states),
            male_vaccinated: data.male_vaccinated,
            female_vaccinated: data.female_vaccinated,
            most_vaccinated: take(&data.most_vaccinated),
            least_vaccinated: take(&data.least_vaccinated),
            settings: settings.clone(),
        }
    }
}

/// Round to a whole number and group thousands with commas.
pub fn format_count(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0.0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}
