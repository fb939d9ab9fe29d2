//! Data Processor Module
//! Cleans the loaded rows and derives the statewise and vaccination
//! aggregates.

use crate::data::loader::SourceTables;
use crate::data::model::{
    CaseRecord, CaseRow, DashboardData, StateSummary, StateVaccinationTotal, VaccinationRecord,
    VaccinationRow,
};
use std::collections::BTreeMap;

/// Turns [`SourceTables`] into [`DashboardData`]. Pure: same input, same
/// output.
pub struct DataProcessor;

impl DataProcessor {
    pub fn prepare(tables: SourceTables, nationwide_label: &str) -> DashboardData {
        let cases = Self::clean_cases(tables.cases);
        let statewise = Self::statewise_summary(&cases);

        let vaccinations = Self::filter_vaccinations(tables.vaccinations, nationwide_label);
        let (male_vaccinated, female_vaccinated) = Self::gender_totals(&vaccinations);
        let (most_vaccinated, least_vaccinated) = Self::vaccination_rankings(&vaccinations);

        tracing::info!(
            cases = cases.len(),
            states = statewise.len(),
            vaccinations = vaccinations.len(),
            "Prepared dashboard data"
        );

        DashboardData {
            cases,
            statewise,
            vaccinations,
            male_vaccinated,
            female_vaccinated,
            most_vaccinated,
            least_vaccinated,
        }
    }

    /// Drop rows with any null and derive active cases.
    pub fn clean_cases(rows: Vec<CaseRow>) -> Vec<CaseRecord> {
        let total = rows.len();
        let records: Vec<CaseRecord> = rows
            .into_iter()
            .filter_map(|row| {
                Some(CaseRecord::new(
                    row.state?,
                    row.date?,
                    row.confirmed?,
                    row.cured?,
                    row.deaths?,
                ))
            })
            .collect();

        let dropped = total - records.len();
        if dropped > 0 {
            tracing::debug!(dropped, "Dropped incomplete case rows");
        }

        let negative = records.iter().filter(|r| r.active < 0).count();
        if negative > 0 {
            tracing::warn!(
                rows = negative,
                "Case rows report more cured and deaths than confirmed; active count is negative"
            );
        }

        records
    }

    /// Per-state maxima of confirmed, cured and deaths, ordered by confirmed
    /// descending. Ties keep alphabetical order.
    pub fn statewise_summary(cases: &[CaseRecord]) -> Vec<StateSummary> {
        let mut by_state: BTreeMap<&str, Vec<&CaseRecord>> = BTreeMap::new();
        for record in cases {
            by_state.entry(record.state.as_str()).or_default().push(record);
        }

        let mut summary: Vec<StateSummary> = by_state
            .into_iter()
            .map(|(state, mut records)| {
                let confirmed = records.iter().map(|r| r.confirmed).max().unwrap_or(0);
                let cured = records.iter().map(|r| r.cured).max().unwrap_or(0);
                let deaths = records.iter().map(|r| r.deaths).max().unwrap_or(0);

                records.sort_by_key(|r| r.date);
                let rollbacks = records
                    .windows(2)
                    .filter(|pair| pair[1].confirmed < pair[0].confirmed)
                    .count();
                if rollbacks > 0 {
                    tracing::warn!(
                        state,
                        rollbacks,
                        "Confirmed series is not cumulative; maximum may not be the latest total"
                    );
                }

                let (recovery_rate, death_rate) = if confirmed > 0 {
                    (
                        Some(cured as f64 * 100.0 / confirmed as f64),
                        Some(deaths as f64 * 100.0 / confirmed as f64),
                    )
                } else {
                    tracing::warn!(state, "No confirmed cases; rates left undefined");
                    (None, None)
                };

                StateSummary {
                    state: state.to_string(),
                    confirmed,
                    cured,
                    deaths,
                    recovery_rate,
                    death_rate,
                    rollbacks,
                }
            })
            .collect();

        summary.sort_by(|a, b| b.confirmed.cmp(&a.confirmed));
        summary
    }

    /// Remove the nationwide aggregate rows. Rows without a state are kept.
    pub fn filter_vaccinations(rows: Vec<VaccinationRow>, nationwide_label: &str) -> Vec<VaccinationRecord> {
        let total = rows.len();
        let records: Vec<VaccinationRecord> = rows
            .into_iter()
            .filter(|row| row.state.as_deref() != Some(nationwide_label))
            .map(|row| VaccinationRecord {
                state: row.state,
                vaccine_date: row.vaccine_date,
                male: row.male,
                female: row.female,
                total: row.total,
            })
            .collect();

        tracing::debug!(
            nationwide = total - records.len(),
            unlabelled = records.iter().filter(|r| r.state.is_none()).count(),
            "Filtered vaccination rows"
        );
        records
    }

    /// Sum of male and female vaccinated counts. Empty cells are skipped.
    pub fn gender_totals(records: &[VaccinationRecord]) -> (f64, f64) {
        let male = records.iter().filter_map(|r| r.male).sum();
        let female = records.iter().filter_map(|r| r.female).sum();
        (male, female)
    }

    /// Per-state sum of totals as (most vaccinated first, least vaccinated
    /// first). The second ranking is the exact reverse of the first. Rows
    /// without a state have no group and are skipped.
    pub fn vaccination_rankings(
        records: &[VaccinationRecord],
    ) -> (Vec<StateVaccinationTotal>, Vec<StateVaccinationTotal>) {
        let mut by_state: BTreeMap<&str, f64> = BTreeMap::new();
        for record in records {
            if let Some(state) = record.state.as_deref() {
                *by_state.entry(state).or_default() += record.total.unwrap_or(0.0);
            }
        }

        let mut most: Vec<StateVaccinationTotal> = by_state
            .into_iter()
            .map(|(state, total)| StateVaccinationTotal {
                state: state.to_string(),
                total,
            })
            .collect();
        most.sort_by(|a, b| b.total.total_cmp(&a.total));

        let least = most.iter().rev().cloned().collect();
        (most, least)
    }
}
