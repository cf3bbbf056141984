use std::path::PathBuf;

use crate::data::filter::ConditionSelector;

/// Dataset location when nothing else is configured.
pub const DEFAULT_DATA_PATH: &str = "data_input/loan_clean.parquet";

pub const DATA_PATH_VAR: &str = "LOAN_DASHBOARD_DATA";
pub const CONDITION_VAR: &str = "LOAN_DASHBOARD_CONDITION";

/// Startup settings, read once in `main`.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub initial_condition: ConditionSelector,
    pub window_title: String,
    pub inner_size: [f32; 2],
    pub min_inner_size: [f32; 2],
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            initial_condition: ConditionSelector::default(),
            window_title: "Loan Insights – Demo Dashboard".to_string(),
            inner_size: [1400.0, 900.0],
            min_inner_size: [800.0, 500.0],
        }
    }
}

impl DashboardConfig {
    /// Defaults, overridden by `.env` and the process environment.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(path) = var(DATA_PATH_VAR).filter(|p| !p.trim().is_empty()) {
            config.data_path = PathBuf::from(path.trim());
        }

        if let Some(value) = var(CONDITION_VAR) {
            match ConditionSelector::parse(value.trim()) {
                Ok(selector) => config.initial_condition = selector,
                Err(e) => log::warn!("Ignoring {CONDITION_VAR}: {e}"),
            }
        }

        config
    }
}
