//! Shared application state.
//!
//! Owns the activity log, the session store, the relay service and the
//! process probes. Built once at startup; cloned per request (cheap `Arc`).

use std::sync::Arc;
use std::time::{Duration, Instant};

use pulseboard_core::activity::{ActivityLog, ExclusionSet};
use pulseboard_core::metrics::MemoryProbe;
use pulseboard_core::relay::{RelayService, Upstream};

use crate::config::PulseConfig;
use crate::error::Result;
use crate::obs::{HttpMetrics, SysinfoProbe};
use crate::session::{MemorySessionStore, SessionStore};
use crate::upstream::HttpUpstream;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: PulseConfig,
    activity: ActivityLog,
    exclusions: ExclusionSet,
    sessions: Arc<dyn SessionStore>,
    relay: RelayService,
    memory: Arc<dyn MemoryProbe>,
    metrics: HttpMetrics,
    started_at: Instant,
}

impl AppState {
    /// Build state with the production collaborators.
    pub fn new(cfg: PulseConfig) -> Result<Self> {
        Self::builder(cfg).build()
    }

    pub fn builder(cfg: PulseConfig) -> AppStateBuilder {
        AppStateBuilder {
            cfg,
            upstream: None,
            memory: None,
            sessions: None,
        }
    }

    pub fn cfg(&self) -> &PulseConfig {
        &self.inner.cfg
    }

    pub fn activity(&self) -> &ActivityLog {
        &self.inner.activity
    }

    pub fn exclusions(&self) -> &ExclusionSet {
        &self.inner.exclusions
    }

    pub fn sessions(&self) -> Arc<dyn SessionStore> {
        Arc::clone(&self.inner.sessions)
    }

    pub fn relay(&self) -> &RelayService {
        &self.inner.relay
    }

    pub fn memory_probe(&self) -> &dyn MemoryProbe {
        self.inner.memory.as_ref()
    }

    pub fn metrics(&self) -> &HttpMetrics {
        &self.inner.metrics
    }

    pub fn uptime(&self) -> Duration {
        self.inner.started_at.elapsed()
    }
}

/// Swap collaborators before building (tests, alternative deployments).
pub struct AppStateBuilder {
    cfg: PulseConfig,
    upstream: Option<Arc<dyn Upstream>>,
    memory: Option<Arc<dyn MemoryProbe>>,
    sessions: Option<Arc<dyn SessionStore>>,
}

impl AppStateBuilder {
    pub fn upstream(mut self, upstream: Arc<dyn Upstream>) -> Self {
        self.upstream = Some(upstream);
        self
    }

    pub fn memory_probe(mut self, probe: Arc<dyn MemoryProbe>) -> Self {
        self.memory = Some(probe);
        self
    }

    pub fn session_store(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.sessions = Some(store);
        self
    }

    pub fn build(self) -> Result<AppState> {
        let cfg = self.cfg;
        cfg.validate()?;

        let upstream: Arc<dyn Upstream> = match self.upstream {
            Some(u) => u,
            None => Arc::new(HttpUpstream::new(&cfg.relay)?),
        };
        let memory: Arc<dyn MemoryProbe> = match self.memory {
            Some(m) => m,
            None => Arc::new(SysinfoProbe::new()?),
        };
        let sessions: Arc<dyn SessionStore> = match self.sessions {
            Some(s) => s,
            None => Arc::new(MemorySessionStore::with_idle_timeout(cfg.session.idle_timeout())),
        };

        let relay = RelayService::new(upstream).with_excerpt_chars(cfg.relay.excerpt_chars);
        let exclusions = ExclusionSet::new(
            cfg.activity.excluded_fragments.clone(),
            cfg.activity.static_prefix.clone(),
        )
        .with_untracked(cfg.activity.untracked_paths.clone());

        tracing::debug!(
            timeout_ms = cfg.relay.timeout_ms,
            static_prefix = %exclusions.static_prefix(),
            "application state ready"
        );

        Ok(AppState {
            inner: Arc::new(AppStateInner {
                cfg,
                activity: ActivityLog::new(),
                exclusions,
                sessions,
                relay,
                memory,
                metrics: HttpMetrics::default(),
                started_at: Instant::now(),
            }),
        })
    }
}
