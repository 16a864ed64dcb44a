use super::dto::LoginForm;
use super::AppState;
use crate::domain::SessionUser;
use axum::extract::{Form, FromRequestParts, State};
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderValue};
use axum::response::{IntoResponse, Redirect, Response};
use std::convert::Infallible;

pub const SESSION_COOKIE: &str = "taskboard_session";

/// Pull the session token out of the request's cookie header, if any.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE).then(|| value.to_string())
    })
}

async fn resolve_session(parts: &Parts, state: &AppState) -> Option<SessionUser> {
    let token = session_token(&parts.headers)?;
    state.sessions.resolve_session(&token).await
}

/// Session gate for protected pages: an absent session short-circuits
/// rendering with a temporary redirect to the home page. Being signed
/// out is the normal case here, not a fault.
pub struct RequireSession(pub SessionUser);

impl FromRequestParts<AppState> for RequireSession {
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Redirect> {
        match resolve_session(parts, state).await {
            Some(user) => Ok(Self(user)),
            None => Err(Redirect::temporary("/")),
        }
    }
}

/// Optional flavor of the gate for pages that render for visitors too.
pub struct MaybeSession(pub Option<SessionUser>);

impl FromRequestParts<AppState> for MaybeSession {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Infallible> {
        Ok(Self(resolve_session(parts, state).await))
    }
}

fn session_cookie_header(token: &str) -> Option<HeaderValue> {
    HeaderValue::from_str(&format!(
        "{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax"
    ))
    .ok()
}

const CLEARED_COOKIE: &str = "taskboard_session=; Path=/; HttpOnly; Max-Age=0";

pub async fn login(State(state): State<AppState>, Form(form): Form<LoginForm>) -> Response {
    let email = form.email.trim();
    let name = form.name.trim();
    if email.is_empty() || name.is_empty() {
        return Redirect::to("/").into_response();
    }

    let token = state
        .sessions
        .create_session(SessionUser {
            email: email.to_string(),
            name: name.to_string(),
        })
        .await;
    tracing::info!(email, "session started");

    let mut response = Redirect::to("/dashboard").into_response();
    match session_cookie_header(&token) {
        Some(cookie) => {
            response.headers_mut().insert(SET_COOKIE, cookie);
            response
        }
        // A uuid token always forms a valid header value; if it somehow
        // does not, fail closed without a session.
        None => Redirect::to("/").into_response(),
    }
}

pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(token) = session_token(&headers) {
        state.sessions.revoke_session(&token).await;
    }

    let mut response = Redirect::to("/").into_response();
    if let Ok(cookie) = HeaderValue::from_str(CLEARED_COOKIE) {
        response.headers_mut().insert(SET_COOKIE, cookie);
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with_cookie(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn extracts_the_session_cookie_among_others() {
        let headers = headers_with_cookie("theme=dark; taskboard_session=tok-1; lang=en");
        assert_eq!(session_token(&headers), Some("tok-1".to_string()));
    }

    #[test]
    fn no_cookie_header_means_no_token() {
        assert_eq!(session_token(&HeaderMap::new()), None);
    }

    #[test]
    fn other_cookies_do_not_match() {
        let headers = headers_with_cookie("taskboard_session_old=tok-1");
        assert_eq!(session_token(&headers), None);
    }
}
