use std::net::SocketAddr;

use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use crate::error::{ApiError, Result};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub dashboard: DashboardSection,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
            dashboard: DashboardSection::default(),
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(ApiError::Config(format!(
                "unsupported config version: {}",
                self.version
            )));
        }

        self.server.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default)]
    pub log_format: LogFormat,

    /// Default filter directive; `RUST_LOG` takes precedence when set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr()?;
        EnvFilter::try_new(&self.log_level).map_err(|e| {
            ApiError::Config(format!("server.log_level is not a valid filter: {e}"))
        })?;
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|_| {
            ApiError::Config(format!(
                "server.listen must be a valid SocketAddr, got {:?}",
                self.listen
            ))
        })
    }
}

fn default_listen() -> String {
    "0.0.0.0:5000".into()
}
fn default_log_level() -> String {
    "info".into()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DashboardSection {
    #[serde(default = "default_dashboard_enabled")]
    pub enabled: bool,
}

impl Default for DashboardSection {
    fn default() -> Self {
        Self {
            enabled: default_dashboard_enabled(),
        }
    }
}

fn default_dashboard_enabled() -> bool {
    true
}
