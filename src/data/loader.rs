//! CSV Data Loader Module
//! Reads the case and vaccination reports with Polars and converts them into
//! typed rows.

use crate::config::DataConfig;
use crate::data::model::{CaseRow, VaccinationRow};
use chrono::NaiveDate;
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Column names of the case report.
pub mod case_columns {
    pub const SNO: &str = "Sno";
    pub const DATE: &str = "Date";
    pub const TIME: &str = "Time";
    pub const STATE: &str = "State/UnionTerritory";
    pub const INDIAN_NATIONAL: &str = "ConfirmedIndianNational";
    pub const FOREIGN_NATIONAL: &str = "ConfirmedForeignNational";
    pub const CURED: &str = "Cured";
    pub const DEATHS: &str = "Deaths";
    pub const CONFIRMED: &str = "Confirmed";

    /// Present in the file but not used past loading.
    pub const DROPPED: [&str; 4] = [SNO, TIME, INDIAN_NATIONAL, FOREIGN_NATIONAL];
}

/// Column names of the vaccination report.
pub mod vaccine_columns {
    pub const UPDATED_ON: &str = "Updated On";
    pub const STATE: &str = "State";
    pub const MALE: &str = "Male(Individuals Vaccinated)";
    pub const FEMALE: &str = "Female(Individuals Vaccinated)";
    pub const TOTAL: &str = "Total Individuals Vaccinated";
}

const CASES: &str = "case report";
const VACCINATIONS: &str = "vaccination report";

/// Broad class of a loader failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Load,
    Schema,
    Parse,
}

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Cannot open {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to load CSV {path:?}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },
    #[error("{dataset}: missing column `{column}`")]
    MissingColumn {
        dataset: &'static str,
        column: &'static str,
    },
    #[error("{dataset}: column `{column}` is not text-typed: {source}")]
    ColumnType {
        dataset: &'static str,
        column: &'static str,
        #[source]
        source: PolarsError,
    },
    #[error("{dataset}, line {line}: cannot parse {value:?} in `{column}` as {expected}")]
    Parse {
        dataset: &'static str,
        column: &'static str,
        line: usize,
        value: String,
        expected: &'static str,
    },
}

impl LoaderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LoaderError::Io { .. } | LoaderError::Csv { .. } => ErrorKind::Load,
            LoaderError::MissingColumn { .. } | LoaderError::ColumnType { .. } => {
                ErrorKind::Schema
            }
            LoaderError::Parse { .. } => ErrorKind::Parse,
        }
    }
}

/// Both datasets as typed rows, before cleaning.
#[derive(Debug, Clone, Default)]
pub struct SourceTables {
    pub cases: Vec<CaseRow>,
    pub vaccinations: Vec<VaccinationRow>,
}

/// Reads the two reports named in a [`DataConfig`].
pub struct DataLoader<'a> {
    config: &'a DataConfig,
}

impl<'a> DataLoader<'a> {
    pub fn new(config: &'a DataConfig) -> Self {
        Self { config }
    }

    /// Read both files. Any failure aborts the whole load.
    pub fn load(&self) -> Result<SourceTables, LoaderError> {
        let cases = self.load_cases()?;
        let vaccinations = self.load_vaccinations()?;
        Ok(SourceTables {
            cases,
            vaccinations,
        })
    }

    pub fn load_cases(&self) -> Result<Vec<CaseRow>, LoaderError> {
        let df = read_csv(&self.config.cases_path)?;
        let rows = Self::cases_from_frame(&df, &self.config.case_date_format)?;
        tracing::info!(
            path = ?self.config.cases_path,
            rows = rows.len(),
            "Loaded case report"
        );
        Ok(rows)
    }

    pub fn load_vaccinations(&self) -> Result<Vec<VaccinationRow>, LoaderError> {
        let df = read_csv(&self.config.vaccinations_path)?;
        let rows = Self::vaccinations_from_frame(&df, &self.config.vaccine_date_format)?;
        tracing::info!(
            path = ?self.config.vaccinations_path,
            rows = rows.len(),
            "Loaded vaccination report"
        );
        Ok(rows)
    }

    /// Convert a string-typed case frame into rows, dropping the identifier,
    /// time and nationality columns.
    pub fn cases_from_frame(df: &DataFrame, date_format: &str) -> Result<Vec<CaseRow>, LoaderError> {
        use self::case_columns::*;

        for column in DROPPED {
            text_column(df, CASES, column)?;
        }
        tracing::debug!(columns = ?DROPPED, "Dropping unused case columns");

        let states = text_column(df, CASES, STATE)?;
        let dates = text_column(df, CASES, DATE)?;
        let cured = text_column(df, CASES, CURED)?;
        let deaths = text_column(df, CASES, DEATHS)?;
        let confirmed = text_column(df, CASES, CONFIRMED)?;

        let mut rows = Vec::with_capacity(df.height());
        for idx in 0..df.height() {
            let line = idx + 2;
            rows.push(CaseRow {
                state: label(states.get(idx)),
                date: parse_date(CASES, DATE, line, dates.get(idx), date_format)?,
                cured: parse_count(CASES, CURED, line, cured.get(idx))?,
                deaths: parse_count(CASES, DEATHS, line, deaths.get(idx))?,
                confirmed: parse_count(CASES, CONFIRMED, line, confirmed.get(idx))?,
            });
        }
        Ok(rows)
    }

    /// Convert a string-typed vaccination frame into rows. `Updated On`
    /// becomes the vaccine date and `Total Individuals Vaccinated` the total.
    /// The vaccine date feeds no aggregate, so a value in another format is
    /// kept as `None` instead of failing the load.
    pub fn vaccinations_from_frame(
        df: &DataFrame,
        date_format: &str,
    ) -> Result<Vec<VaccinationRow>, LoaderError> {
        use self::vaccine_columns::*;

        let dates = text_column(df, VACCINATIONS, UPDATED_ON)?;
        let states = text_column(df, VACCINATIONS, STATE)?;
        let male = text_column(df, VACCINATIONS, MALE)?;
        let female = text_column(df, VACCINATIONS, FEMALE)?;
        let total = text_column(df, VACCINATIONS, TOTAL)?;

        let mut rows = Vec::with_capacity(df.height());
        let mut unreadable_dates = 0usize;
        for idx in 0..df.height() {
            let line = idx + 2;
            let vaccine_date = cell(dates.get(idx))
                .and_then(|raw| match NaiveDate::parse_from_str(raw, date_format) {
                    Ok(date) => Some(date),
                    Err(_) => {
                        unreadable_dates += 1;
                        None
                    }
                });
            rows.push(VaccinationRow {
                state: label(states.get(idx)),
                vaccine_date,
                male: parse_amount(VACCINATIONS, MALE, line, male.get(idx))?,
                female: parse_amount(VACCINATIONS, FEMALE, line, female.get(idx))?,
                total: parse_amount(VACCINATIONS, TOTAL, line, total.get(idx))?,
            });
        }
        if unreadable_dates > 0 {
            tracing::warn!(
                rows = unreadable_dates,
                format = date_format,
                "`Updated On` values do not match the configured format; left empty"
            );
        }
        Ok(rows)
    }
}

/// Read a CSV with every column as text so typing errors surface with the
/// offending cell instead of being coerced to null.
fn read_csv(path: &Path) -> Result<DataFrame, LoaderError> {
    std::fs::metadata(path).map_err(|source| LoaderError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    LazyCsvReader::new(path)
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .finish()
        .and_then(|lazy| lazy.collect())
        .map_err(|source| LoaderError::Csv {
            path: path.to_path_buf(),
            source,
        })
}

fn text_column<'df>(
    df: &'df DataFrame,
    dataset: &'static str,
    column: &'static str,
) -> Result<&'df StringChunked, LoaderError> {
    let col = df
        .column(column)
        .map_err(|_| LoaderError::MissingColumn { dataset, column })?;
    col.as_materialized_series()
        .str()
        .map_err(|source| LoaderError::ColumnType {
            dataset,
            column,
            source,
        })
}

/// State labels are kept verbatim; only an empty cell is null.
fn label(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

/// Empty and whitespace-only cells count as null.
fn cell(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_error(
    dataset: &'static str,
    column: &'static str,
    line: usize,
    value: &str,
    expected: &'static str,
) -> LoaderError {
    LoaderError::Parse {
        dataset,
        column,
        line,
        value: value.to_string(),
        expected,
    }
}

fn parse_date(
    dataset: &'static str,
    column: &'static str,
    line: usize,
    value: Option<&str>,
    format: &str,
) -> Result<Option<NaiveDate>, LoaderError> {
    let Some(raw) = cell(value) else {
        return Ok(None);
    };
    NaiveDate::parse_from_str(raw, format)
        .map(Some)
        .map_err(|_| parse_error(dataset, column, line, raw, "a date"))
}

/// Whole counts. Float-formatted integers such as `12.0` are accepted.
fn parse_count(
    dataset: &'static str,
    column: &'static str,
    line: usize,
    value: Option<&str>,
) -> Result<Option<i64>, LoaderError> {
    let Some(raw) = cell(value) else {
        return Ok(None);
    };
    if let Ok(count) = raw.parse::<i64>() {
        return Ok(Some(count));
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v.fract() == 0.0 => Ok(Some(v as i64)),
        _ => Err(parse_error(dataset, column, line, raw, "a whole number")),
    }
}

fn parse_amount(
    dataset: &'static str,
    column: &'static str,
    line: usize,
    value: Option<&str>,
) -> Result<Option<f64>, LoaderError> {
    let Some(raw) = cell(value) else {
        return Ok(None);
    };
    match raw.parse::<f64>() {
        Ok(v) if v.is_nan() => Ok(None),
        Ok(v) => Ok(Some(v)),
        Err(_) => Err(parse_error(dataset, column, line, raw, "a number")),
    }
}
