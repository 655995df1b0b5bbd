use std::collections::HashMap;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use serde_json::Value;

/// Server-side session storage keyed by session id.
pub trait SessionStore: Send + Sync {
    fn get(&self, sid: &str, key: &str) -> Option<Value>;
    fn set(&self, sid: &str, key: &str, value: Value);
    /// Drop every key of one session.
    fn clear(&self, sid: &str);
    /// Number of keys held by one session.
    fn entries(&self, sid: &str) -> usize;
    /// Number of sessions currently holding data.
    fn active_sessions(&self) -> usize;
}

/// Idle lifetime used when none is configured.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(300);

struct SessionEntry {
    values: HashMap<String, Value>,
    touched: Instant,
}

/// In-process session store:
/// - `session_id -> {key -> value}`
/// - a session untouched for longer than the idle timeout is dropped
pub struct MemorySessionStore {
    sessions: DashMap<String, SessionEntry>,
    idle_timeout: Duration,
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        Self::with_idle_timeout(DEFAULT_IDLE_TIMEOUT)
    }
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_idle_timeout(idle_timeout: Duration) -> Self {
        Self { sessions: DashMap::new(), idle_timeout }
    }

    fn is_idle(&self, entry: &SessionEntry) -> bool {
        entry.touched.elapsed() >= self.idle_timeout
    }

    fn expire(&self, sid: &str) {
        self.sessions.remove_if(sid, |_, e| self.is_idle(e));
    }

    fn prune(&self) {
        let before = self.sessions.len();
        self.sessions.retain(|_, e| !self.is_idle(e));
        let dropped = before.saturating_sub(self.sessions.len());
        if dropped > 0 {
            tracing::debug!(dropped, "idle sessions expired");
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, sid: &str, key: &str) -> Option<Value> {
        self.expire(sid);
        let mut entry = self.sessions.get_mut(sid)?;
        entry.touched = Instant::now();
        entry.values.get(key).cloned()
    }

    fn set(&self, sid: &str, key: &str, value: Value) {
        self.prune();
        let mut entry = self.sessions.entry(sid.to_string()).or_insert_with(|| SessionEntry {
            values: HashMap::new(),
            touched: Instant::now(),
        });
        entry.touched = Instant::now();
        entry.values.insert(key.to_string(), value);
    }

    fn clear(&self, sid: &str) {
        self.sessions.remove(sid);
    }

    fn entries(&self, sid: &str) -> usize {
        self.expire(sid);
        self.sessions.get(sid).map_or(0, |e| e.values.len())
    }

    fn active_sessions(&self) -> usize {
        self.prune();
        self.sessions.len()
    }
}
