//! Presentation helpers for the activity view.

use chrono::{Local, TimeZone};
use serde::Serialize;

use super::log::ActivityRecord;

/// Label shown for the root path.
pub const HOME_LABEL: &str = "Home Page";

/// One row of the activity table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityRow {
    pub page: String,
    pub timestamp: String,
    pub response_code: u16,
    pub response_time: String,
}

impl From<&ActivityRecord> for ActivityRow {
    fn from(r: &ActivityRecord) -> Self {
        Self {
            page: humanize_page(&r.page),
            timestamp: format_timestamp(r.timestamp),
            response_code: r.response_code,
            response_time: format!("{} ms", r.response_time_ms),
        }
    }
}

/// `/app-performance` -> `App Performance`, `/` -> `Home Page`.
pub fn humanize_page(path: &str) -> String {
    let spaced = path.replace(['/', '-'], " ");
    let words: Vec<String> = spaced.split_whitespace().map(title_word).collect();
    if words.is_empty() {
        HOME_LABEL.to_string()
    } else {
        words.join(" ")
    }
}

fn title_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Local `DD-MM HH:MM`; out-of-range timestamps render as `--`.
pub fn format_timestamp(epoch_secs: f64) -> String {
    let secs = epoch_secs.trunc() as i64;
    let nanos = (epoch_secs.fract().abs() * 1e9) as u32;
    match Local.timestamp_opt(secs, nanos).single() {
        Some(t) => t.format("%d-%m %H:%M").to_string(),
        None => "--".to_string(),
    }
}
