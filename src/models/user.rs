use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// DB row struct. The session id is the only credential and never leaves the cookie.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing)]
    pub session_id: String,
    pub created_at: DateTime<Utc>,
}

/// Body for POST /users.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
}
