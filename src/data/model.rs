//! Record types for both datasets.
//!
//! `*Row` types are what the loader hands over: typed, but still carrying
//! nulls. `*Record` types are what the processor keeps after cleaning.

use chrono::NaiveDate;

/// One line of the case report after unused columns are dropped.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CaseRow {
    pub state: Option<String>,
    pub date: Option<NaiveDate>,
    pub cured: Option<i64>,
    pub deaths: Option<i64>,
    pub confirmed: Option<i64>,
}

/// A complete (state, date) observation with its derived active count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseRecord {
    pub state: String,
    pub date: NaiveDate,
    pub confirmed: i64,
    pub cured: i64,
    pub deaths: i64,
    /// `confirmed - (cured + deaths)`. Not clamped.
    pub active: i64,
}

impl CaseRecord {
    pub fn new(state: String, date: NaiveDate, confirmed: i64, cured: i64, deaths: i64) -> Self {
        Self {
            state,
            date,
            confirmed,
            cured,
            deaths,
            active: confirmed - (cured + deaths),
        }
    }
}

/// Latest cumulative totals for one state.
#[derive(Debug, Clone, PartialEq)]
pub struct StateSummary {
    pub state: String,
    pub confirmed: i64,
    pub cured: i64,
    pub deaths: i64,
    /// `cured * 100 / confirmed`, `None` when nothing was confirmed.
    pub recovery_rate: Option<f64>,
    /// `deaths * 100 / confirmed`, `None` when nothing was confirmed.
    pub death_rate: Option<f64>,
    /// Number of day-over-day drops in the confirmed series. A non-zero value
    /// means the per-state maximum may not be the latest figure.
    pub rollbacks: usize,
}

/// One line of the vaccination report after renaming.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VaccinationRow {
    pub state: Option<String>,
    pub vaccine_date: Option<NaiveDate>,
    pub male: Option<f64>,
    pub female: Option<f64>,
    pub total: Option<f64>,
}

/// A vaccination snapshot. Counts stay optional: empty cells are skipped by
/// the sums rather than dropping the row. Rows without a state still count
/// towards the gender totals but are left out of the state rankings.
#[derive(Debug, Clone, PartialEq)]
pub struct VaccinationRecord {
    pub state: Option<String>,
    pub vaccine_date: Option<NaiveDate>,
    pub male: Option<f64>,
    pub female: Option<f64>,
    pub total: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StateVaccinationTotal {
    pub state: String,
    pub total: f64,
}

/// Everything the presentation layer consumes. Built once per session and
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardData {
    pub cases: Vec<CaseRecord>,
    /// Ordered by confirmed, descending.
    pub statewise: Vec<StateSummary>,
    /// Nationwide aggregate rows already removed.
    pub vaccinations: Vec<VaccinationRecord>,
    pub male_vaccinated: f64,
    pub female_vaccinated: f64,
    /// Ordered by total, descending.
    pub most_vaccinated: Vec<StateVaccinationTotal>,
    /// Exact reverse of `most_vaccinated`.
    pub least_vaccinated: Vec<StateVaccinationTotal>,
}
