// Configuration module entry point
// Loads layered settings (file, environment, defaults) and validates them

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{
    Config, CsvConfig, HealthConfig, HttpConfig, LoggingConfig, PerformanceConfig,
    ReportsConfig, ServerConfig,
};

/// Prefix for environment overrides, e.g. `REPORTS__SERVER__PORT=9000`
pub const ENV_PREFIX: &str = "REPORTS";

impl Config {
    /// Load configuration from specified file path (without extension)
    /// The file is optional; environment variables override it
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.server_name", "report-server")?
            .set_default("health.enabled", true)?
            .set_default("health.path", "/healthz")?
            .set_default("csv.route", "/serve-csv")?
            .set_default("csv.base_dir", "data/csv")?
            .set_default("reports.route", "/serve-reports")?
            .set_default("reports.base_dir", "data/reports")?
            .set_default("reports.title", "Reports")?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }

    /// Reject route layouts the router cannot dispatch unambiguously
    pub fn validate(&self) -> Result<(), String> {
        let mut routes = vec![("csv.route", &self.csv.route), ("reports.route", &self.reports.route)];
        if self.health.enabled {
            routes.push(("health.path", &self.health.path));
        }

        for (key, route) in &routes {
            if !route.starts_with('/') {
                return Err(format!("{key} must start with '/': {route}"));
            }
        }
        for (i, (key, route)) in routes.iter().enumerate() {
            if let Some((other, _)) = routes[i + 1..].iter().find(|(_, r)| r == route) {
                return Err(format!("{key} and {other} both use route {route}"));
            }
        }
        Ok(())
    }
}
