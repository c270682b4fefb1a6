use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{AppendHeaders, IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{
    middleware::session::{get_cookie, session_cookie, SESSION_COOKIE},
    models::user::CreateUserRequest,
    services::{metrics::USERS_REGISTERED_COUNTER, users::UserService},
    AppState,
};

use super::internal_error;

/// POST /users — register a user and bind it to a session.
///
/// A request that already carries a `sessionId` cookie reuses it unless another
/// user owns it. Otherwise a fresh session id is issued through `Set-Cookie`.
pub async fn create_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<CreateUserRequest>,
) -> Result<Response, (StatusCode, Json<Value>)> {
    let existing = get_cookie(&headers, SESSION_COOKIE);

    let (session_id, issue_cookie) = match existing {
        Some(session_id) => {
            let owner = UserService::find_by_session(&state.db, &session_id)
                .await
                .map_err(internal_error)?;
            if owner.is_some() {
                return Err((
                    StatusCode::FORBIDDEN,
                    Json(json!({
                        "error": "User with this session ID already exists and is connected."
                    })),
                ));
            }
            (session_id, false)
        }
        None => (Uuid::new_v4().to_string(), true),
    };

    let user = UserService::register(&state.db, &body.name, &session_id)
        .await
        .map_err(internal_error)?;
    USERS_REGISTERED_COUNTER.inc();

    let body = Json(json!({ "id": user.id, "name": user.name }));
    let cookie = issue_cookie.then(|| {
        (
            header::SET_COOKIE,
            session_cookie(
                &session_id,
                state.config.session_max_age_secs(),
                state.config.cookie_secure,
            ),
        )
    });

    Ok((StatusCode::CREATED, AppendHeaders(cookie), body).into_response())
}
