//! Config loader (strict parsing).

pub mod schema;

use std::fs;
use std::io::ErrorKind;

use crate::error::{AppError, Result};

pub use schema::{ActivitySection, PulseConfig, RelaySection, ServerSection, SessionSection};

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "PULSEBOARD_CONFIG";
/// Environment variable overriding `server.listen`.
pub const LISTEN_ENV: &str = "PULSEBOARD_LISTEN";
pub const DEFAULT_CONFIG_PATH: &str = "pulseboard.yaml";

pub fn load_from_file(path: &str) -> Result<PulseConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| AppError::Config(format!("read config failed ({path}): {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<PulseConfig> {
    let cfg: PulseConfig =
        serde_yaml::from_str(s).map_err(|e| AppError::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Load the file named by `PULSEBOARD_CONFIG` (or `pulseboard.yaml`).
///
/// A missing file yields the defaults; an unreadable or invalid one is an error.
pub fn load_from_env() -> Result<PulseConfig> {
    let path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let mut cfg = match fs::read_to_string(&path) {
        Ok(s) => load_from_str(&s)?,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!(%path, "config file not found, using defaults");
            PulseConfig::default()
        }
        Err(e) => return Err(AppError::Config(format!("read config failed ({path}): {e}"))),
    };

    if let Ok(listen) = std::env::var(LISTEN_ENV) {
        cfg.server.listen = listen;
        cfg.validate()?;
    }
    Ok(cfg)
}
