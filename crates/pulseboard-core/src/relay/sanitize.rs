//! Tag stripping for relay input.
//!
//! This is a best-effort filter, not an HTML sanitizer: it drops anything that
//! looks like a tag, plus the bodies of `<script>` and `<style>` elements.

use std::sync::OnceLock;

use regex::Regex;

fn element_bodies() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?is)<(script|style)\b[^>]*>.*?</(script|style)\s*>")
            .unwrap_or_else(|e| unreachable!("static pattern: {e}"))
    })
}

fn tags() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<.*?>").unwrap_or_else(|e| unreachable!("static pattern: {e}")))
}

/// Strip tag-like substrings from `input`.
pub fn sanitize(input: &str) -> String {
    let without_bodies = element_bodies().replace_all(input, "");
    tags().replace_all(&without_bodies, "").into_owned()
}
