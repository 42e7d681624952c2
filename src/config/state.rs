// Application state module
// Holds the configuration and the endpoints built from it

use super::types::Config;
use crate::handler::{CsvEndpoint, ReportsEndpoint};

/// Application state, immutable after startup
pub struct AppState {
    pub config: Config,
    pub csv: CsvEndpoint,
    pub reports: ReportsEndpoint,
}

impl AppState {
    /// Build the endpoints with their base directories injected from `config`
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
            csv: CsvEndpoint::new(&config.csv.base_dir),
            reports: ReportsEndpoint::new(&config.reports.base_dir, &config.reports.title),
        }
    }
}
