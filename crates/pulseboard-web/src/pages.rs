//! Askama page templates.
//!
//! Each struct binds to a file under `templates/`; fields are HTML-escaped on
//! render.

use askama::Template;
use axum::response::Html;
use pulseboard_core::activity::ActivityRow;

use crate::error::Result;

#[derive(Template, Debug)]
#[template(path = "index.html")]
pub struct IndexPage;

#[derive(Template, Debug)]
#[template(path = "performance.html")]
pub struct PerformancePage<'a> {
    /// Label/value pairs in display order.
    pub rows: &'a [(&'static str, String)],
}

#[derive(Template, Debug)]
#[template(path = "user_activity.html")]
pub struct UserActivityPage<'a> {
    pub rows: &'a [ActivityRow],
}

#[derive(Template, Debug)]
#[template(path = "request_analysis.html")]
pub struct RequestAnalysisPage;

#[derive(Template, Debug)]
#[template(path = "not_found.html")]
pub struct NotFoundPage;

#[derive(Template, Debug)]
#[template(path = "error.html")]
pub struct ErrorPage<'a> {
    pub message: &'a str,
}

/// Render a page for a handler.
pub fn render(page: &impl Template) -> Result<Html<String>> {
    Ok(Html(page.render()?))
}

/// Render a page on the error path, where a template failure cannot be
/// reported any further.
pub fn render_or(page: &impl Template, fallback: &'static str) -> Html<String> {
    match page.render() {
        Ok(html) => Html(html),
        Err(e) => {
            tracing::error!("template render failed: {e}");
            Html(fallback.to_string())
        }
    }
}
