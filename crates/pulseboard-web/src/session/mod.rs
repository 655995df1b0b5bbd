//! Per-client server-side sessions.
//!
//! A cookie carries an opaque id; data lives in a [`SessionStore`]. Handlers
//! receive a [`Session`] handle through request extensions.

pub mod layer;
pub mod store;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde_json::Value;

pub use layer::attach_session;
pub use store::{MemorySessionStore, SessionStore};

pub const SESSION_COOKIE: &str = "pulseboard_session";
/// Key stamped by the interceptor on the first tracked request.
pub const START_TIME_KEY: &str = "start_time";

/// Handle to the caller's session for the duration of one request.
#[derive(Clone)]
pub struct Session {
    id: Arc<str>,
    store: Arc<dyn SessionStore>,
    cleared: Arc<AtomicBool>,
}

impl Session {
    pub fn new(id: impl Into<Arc<str>>, store: Arc<dyn SessionStore>) -> Self {
        Self {
            id: id.into(),
            store,
            cleared: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.store.get(&self.id, key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn insert(&self, key: &str, value: impl Into<Value>) {
        self.store.set(&self.id, key, value.into());
    }

    pub fn len(&self) -> usize {
        self.store.entries(&self.id)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.store.clear(&self.id);
        self.cleared.store(true, Ordering::Relaxed);
    }

    pub(crate) fn was_cleared(&self) -> bool {
        self.cleared.load(Ordering::Relaxed)
    }
}
