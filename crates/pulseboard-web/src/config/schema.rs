use std::time::Duration;

use serde::Deserialize;

use crate::error::{AppError, Result};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PulseConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub relay: RelaySection,

    #[serde(default)]
    pub activity: ActivitySection,

    #[serde(default)]
    pub session: SessionSection,
}

impl Default for PulseConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
            relay: RelaySection::default(),
            activity: ActivitySection::default(),
            session: SessionSection::default(),
        }
    }
}

impl PulseConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(AppError::Config(format!("unsupported config version: {}", self.version)));
        }
        self.server.validate()?;
        self.relay.validate()?;
        self.activity.validate()?;
        self.session.validate()?;
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default = "default_static_dir")]
    pub static_dir: String,

    #[serde(default = "default_static_max_age_secs")]
    pub static_max_age_secs: u64,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            static_dir: default_static_dir(),
            static_max_age_secs: default_static_max_age_secs(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        if self.listen.trim().is_empty() {
            return Err(AppError::Config("server.listen must not be empty".into()));
        }
        if self.static_dir.trim().is_empty() {
            return Err(AppError::Config("server.static_dir must not be empty".into()));
        }
        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0:5050".into()
}
fn default_static_dir() -> String {
    "static".into()
}
fn default_static_max_age_secs() -> u64 {
    31_536_000
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RelaySection {
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default = "default_excerpt_chars")]
    pub excerpt_chars: usize,
}

impl Default for RelaySection {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            user_agent: default_user_agent(),
            excerpt_chars: default_excerpt_chars(),
        }
    }
}

impl RelaySection {
    pub fn validate(&self) -> Result<()> {
        if !(100..=60_000).contains(&self.timeout_ms) {
            return Err(AppError::Config(
                "relay.timeout_ms must be between 100 and 60000".into(),
            ));
        }
        if self.excerpt_chars == 0 {
            return Err(AppError::Config("relay.excerpt_chars must be greater than 0".into()));
        }
        if self.user_agent.trim().is_empty() {
            return Err(AppError::Config("relay.user_agent must not be empty".into()));
        }
        Ok(())
    }
}

fn default_timeout_ms() -> u64 {
    5000
}
fn default_user_agent() -> String {
    "Pulseboard/1.0".into()
}
fn default_excerpt_chars() -> usize {
    pulseboard_core::relay::DEFAULT_EXCERPT_CHARS
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ActivitySection {
    #[serde(default = "default_excluded_fragments")]
    pub excluded_fragments: Vec<String>,

    #[serde(default = "default_static_prefix")]
    pub static_prefix: String,

    /// Exact paths that get neither a session stamp nor an activity record.
    #[serde(default = "default_untracked_paths")]
    pub untracked_paths: Vec<String>,
}

impl Default for ActivitySection {
    fn default() -> Self {
        Self {
            excluded_fragments: default_excluded_fragments(),
            static_prefix: default_static_prefix(),
            untracked_paths: default_untracked_paths(),
        }
    }
}

impl ActivitySection {
    pub fn validate(&self) -> Result<()> {
        let p = &self.static_prefix;
        if p.len() < 2 || !p.starts_with('/') || !p.ends_with('/') {
            return Err(AppError::Config(
                "activity.static_prefix must start and end with '/'".into(),
            ));
        }
        if self.excluded_fragments.iter().any(|f| f.is_empty()) {
            return Err(AppError::Config(
                "activity.excluded_fragments must not contain empty entries".into(),
            ));
        }
        if let Some(p) = self.untracked_paths.iter().find(|p| !p.starts_with('/')) {
            return Err(AppError::Config(format!(
                "activity.untracked_paths entry must start with '/': {p}"
            )));
        }
        Ok(())
    }
}

fn default_excluded_fragments() -> Vec<String> {
    vec!["clear-session".into(), "clear-log".into()]
}
fn default_static_prefix() -> String {
    "/static/".into()
}
fn default_untracked_paths() -> Vec<String> {
    vec!["/healthz".into(), "/metrics".into()]
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionSection {
    #[serde(default = "default_idle_timeout_secs")]
    pub idle_timeout_secs: u64,
}

impl Default for SessionSection {
    fn default() -> Self {
        Self { idle_timeout_secs: default_idle_timeout_secs() }
    }
}

impl SessionSection {
    pub fn validate(&self) -> Result<()> {
        if !(1..=604_800).contains(&self.idle_timeout_secs) {
            return Err(AppError::Config(
                "session.idle_timeout_secs must be between 1 and 604800".into(),
            ));
        }
        Ok(())
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }
}

fn default_idle_timeout_secs() -> u64 {
    300
}
