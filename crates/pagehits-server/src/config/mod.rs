//! Server config loader (strict parsing).

pub mod schema;

use std::fs;
use std::path::Path;

use crate::error::{ApiError, Result};

pub use schema::{AppConfig, DashboardSection, LogFormat, ServerSection};

/// Env var naming the config file.
pub const CONFIG_PATH_ENV: &str = "PAGEHITS_CONFIG";
/// Env var overriding `server.listen`.
pub const LISTEN_ENV: &str = "PAGEHITS_LISTEN";

const DEFAULT_CONFIG_PATH: &str = "pagehits.yaml";

pub fn load_from_file(path: impl AsRef<Path>) -> Result<AppConfig> {
    let path = path.as_ref();
    let s = fs::read_to_string(path)
        .map_err(|e| ApiError::Config(format!("read {} failed: {e}", path.display())))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<AppConfig> {
    let cfg: AppConfig =
        serde_yaml::from_str(s).map_err(|e| ApiError::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Resolve config for the binary.
///
/// Reads `$PAGEHITS_CONFIG` (or `./pagehits.yaml`); a missing file at the
/// default path means built-in defaults. `$PAGEHITS_LISTEN` wins over the
/// file's `server.listen`.
pub fn load() -> Result<AppConfig> {
    let explicit = std::env::var(CONFIG_PATH_ENV).ok();
    let path = explicit.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);

    let mut cfg = if explicit.is_none() && !Path::new(path).exists() {
        AppConfig::default()
    } else {
        load_from_file(path)?
    };

    if let Ok(listen) = std::env::var(LISTEN_ENV) {
        cfg.server.listen = listen;
        cfg.validate()?;
    }
    Ok(cfg)
}
