//! Data module - CSV loading and the preparation pipeline

mod loader;
mod model;
mod processor;

pub use loader::{case_columns, vaccine_columns, DataLoader, ErrorKind, LoaderError, SourceTables};
pub use model::{
    CaseRecord, CaseRow, DashboardData, StateSummary, StateVaccinationTotal, VaccinationRecord,
    VaccinationRow,
};
pub use processor::DataProcessor;

use crate::config::DataConfig;

/// Load both reports and derive everything the dashboard shows.
pub fn build_dashboard_data(config: &DataConfig) -> Result<DashboardData, LoaderError> {
    let tables = DataLoader::new(config).load()?;
    Ok(DataProcessor::prepare(tables, &config.nationwide_label))
}
