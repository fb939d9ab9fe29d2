//! Dashboard configuration.
//!
//! Read from `dashboard.toml` in the working directory, or from the file named
//! by `COVID_DASHBOARD_CONFIG`. Every field has a default, so a partial file
//! (or no file at all) is fine.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

pub const CONFIG_ENV_VAR: &str = "COVID_DASHBOARD_CONFIG";
const CONFIG_FILENAME: &str = "dashboard.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub log_filter: String,
    pub data: DataConfig,
    pub dashboard: DashboardSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_filter: "info".to_string(),
            data: DataConfig::default(),
            dashboard: DashboardSettings::default(),
        }
    }
}

/// Where the two datasets live and how to read them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub cases_path: PathBuf,
    pub vaccinations_path: PathBuf,
    pub case_date_format: String,
    pub vaccine_date_format: String,
    /// State label of the all-India rows in the vaccination file.
    pub nationwide_label: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            cases_path: PathBuf::from("Datasets/covid_19_india.csv"),
            vaccinations_path: PathBuf::from("Datasets/covid_vaccine_statewise.csv"),
            case_date_format: "%Y-%m-%d".to_string(),
            vaccine_date_format: "%d/%m/%Y".to_string(),
            nationwide_label: "India".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardSettings {
    /// Bars in the active-cases and deaths charts.
    pub top_states: usize,
    /// Lines in the growth-trend chart.
    pub trend_states: usize,
    /// Bars in each vaccination ranking chart.
    pub vaccination_states: usize,
    pub open_browser_on_start: bool,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            top_states: 10,
            trend_states: 5,
            vaccination_states: 5,
            open_browser_on_start: false,
        }
    }
}

/// Where the active configuration came from. Kept so `main` can log it once
/// the subscriber is installed.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    File(PathBuf),
    Defaults(PathBuf),
    Fallback { path: PathBuf, reason: String },
}

impl AppConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Get the path to the configuration file.
    pub fn path() -> PathBuf {
        std::env::var_os(CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME))
    }

    /// Load configuration from disk.
    ///
    /// Returns default settings if the file doesn't exist, cannot be read, or
    /// cannot be parsed.
    pub fn load() -> (Self, ConfigSource) {
        Self::load_from(Self::path())
    }

    pub fn load_from(path: PathBuf) -> (Self, ConfigSource) {
        match fs::read_to_string(&path) {
            Ok(content) => match Self::from_toml_str(&content) {
                Ok(config) => (config, ConfigSource::File(path)),
                Err(e) => (
                    Self::default(),
                    ConfigSource::Fallback {
                        path,
                        reason: e.to_string(),
                    },
                ),
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                (Self::default(), ConfigSource::Defaults(path))
            }
            Err(e) => (
                Self::default(),
                ConfigSource::Fallback {
                    path,
                    reason: e.to_string(),
                },
            ),
        }
    }
}

impl ConfigSource {
    pub fn log(&self) {
        match self {
            ConfigSource::File(path) => tracing::info!("Loaded configuration from {:?}", path),
            ConfigSource::Defaults(path) => {
                tracing::info!("No configuration file at {:?}, using defaults", path)
            }
            ConfigSource::Fallback { path, reason } => {
                tracing::warn!("Failed to load {:?}: {}, using defaults", path, reason)
            }
        }
    }
}
