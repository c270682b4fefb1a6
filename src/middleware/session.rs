use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap, StatusCode},
    Json,
};
use serde_json::{json, Value};

use crate::{models::user::User, services::users::UserService, AppState};

/// Name of the cookie carrying the opaque session token.
pub const SESSION_COOKIE: &str = "sessionId";

/// Extract a named cookie value from request headers.
pub fn get_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    let prefix = format!("{name}=");
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .find_map(|part| part.trim().strip_prefix(&prefix).map(str::to_string))
        .filter(|value| !value.is_empty())
}

/// Build the `Set-Cookie` value handed out on registration.
pub fn session_cookie(session_id: &str, max_age_secs: i64, secure: bool) -> String {
    let mut cookie =
        format!("{SESSION_COOKIE}={session_id}; Path=/; Max-Age={max_age_secs}; HttpOnly; SameSite=Lax");
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// The user owning the request's `sessionId` cookie.
#[derive(Debug, Clone)]
pub struct SessionUser(pub User);

impl FromRequestParts<AppState> for SessionUser {
    type Rejection = (StatusCode, Json<Value>);

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let session_id = get_cookie(&parts.headers, SESSION_COOKIE)
            .ok_or((StatusCode::UNAUTHORIZED, Json(json!({ "error": "Unauthorized." }))))?;

        let user = UserService::find_by_session(&state.db, &session_id)
            .await
            .map_err(|e| {
                tracing::error!("Session lookup failed: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": "Database error" })))
            })?;

        match user {
            Some(user) => Ok(SessionUser(user)),
            None => Err((
                StatusCode::NOT_FOUND,
                Json(json!({
                    "error": format!("User with this session ID [{session_id}] not found.")
                })),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(cookie: &str) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(header::COOKIE, HeaderValue::from_str(cookie).unwrap());
        map
    }

    #[test]
    fn finds_cookie_among_others() {
        let map = headers("theme=dark; sessionId=abc-123; lang=pt");
        assert_eq!(get_cookie(&map, SESSION_COOKIE).as_deref(), Some("abc-123"));
    }

    #[test]
    fn does_not_match_on_name_suffix() {
        let map = headers("oldsessionId=nope");
        assert_eq!(get_cookie(&map, SESSION_COOKIE), None);
    }

    #[test]
    fn empty_value_counts_as_missing() {
        let map = headers("sessionId=");
        assert_eq!(get_cookie(&map, SESSION_COOKIE), None);
    }

    #[test]
    fn missing_header() {
        assert_eq!(get_cookie(&HeaderMap::new(), SESSION_COOKIE), None);
    }

    #[test]
    fn secure_flag_is_optional() {
        let plain = session_cookie("abc", 604_800, false);
        assert_eq!(plain, "sessionId=abc; Path=/; Max-Age=604800; HttpOnly; SameSite=Lax");
        assert!(session_cookie("abc", 60, true).ends_with("; Secure"));
    }
}
