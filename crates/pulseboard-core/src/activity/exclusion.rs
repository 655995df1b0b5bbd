//! Paths left out of the activity log.

/// Exclusion rules applied by the request interceptor.
///
/// Untracked paths (static assets plus exact ops paths) get neither a session
/// stamp nor a record. Excluded fragments still get the stamp but no record.
#[derive(Debug, Clone)]
pub struct ExclusionSet {
    fragments: Vec<String>,
    static_prefix: String,
    untracked: Vec<String>,
}

impl Default for ExclusionSet {
    fn default() -> Self {
        Self::new(
            vec!["clear-session".to_string(), "clear-log".to_string()],
            "/static/",
        )
        .with_untracked(vec!["/healthz".to_string(), "/metrics".to_string()])
    }
}

impl ExclusionSet {
    pub fn new(fragments: Vec<String>, static_prefix: impl Into<String>) -> Self {
        Self {
            fragments,
            static_prefix: static_prefix.into(),
            untracked: Vec::new(),
        }
    }

    /// Exact paths to treat like static assets.
    pub fn with_untracked(mut self, paths: Vec<String>) -> Self {
        self.untracked = paths;
        self
    }

    pub fn static_prefix(&self) -> &str {
        &self.static_prefix
    }

    pub fn is_static(&self, path: &str) -> bool {
        path.starts_with(&self.static_prefix)
    }

    /// Static assets and ops paths: no session stamp, no record.
    pub fn is_untracked(&self, path: &str) -> bool {
        self.is_static(path) || self.untracked.iter().any(|p| p == path)
    }

    /// True when a completed request on `path` must not be recorded.
    pub fn is_excluded(&self, path: &str) -> bool {
        self.is_untracked(path) || self.fragments.iter().any(|f| path.contains(f.as_str()))
    }
}
