//! Session cookie middleware.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};

use super::{Session, SESSION_COOKIE};
use crate::app_state::AppState;

fn session_id_from(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

fn cookie(value: &str, max_age: Option<u64>) -> Option<HeaderValue> {
    let mut s = format!("{SESSION_COOKIE}={value}; Path=/; HttpOnly; SameSite=Lax");
    if let Some(age) = max_age {
        s.push_str(&format!("; Max-Age={age}"));
    }
    HeaderValue::from_str(&s).ok()
}

/// Resolve (or mint) the caller's session and expose it to handlers.
///
/// A fresh id is only sent back once something was stored under it; a
/// cleared session gets an expiring cookie.
pub async fn attach_session(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let (sid, fresh) = match session_id_from(req.headers()) {
        Some(sid) => (sid, false),
        None => (uuid::Uuid::new_v4().simple().to_string(), true),
    };

    let session = Session::new(sid, state.sessions());
    req.extensions_mut().insert(session.clone());

    let mut resp = next.run(req).await;

    let set_cookie = if session.was_cleared() {
        cookie("", Some(0))
    } else if fresh && !session.is_empty() {
        cookie(session.id(), None)
    } else {
        None
    };
    if let Some(v) = set_cookie {
        resp.headers_mut().append(header::SET_COOKIE, v);
    }
    resp
}
