use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::user::User;

pub struct UserService;

impl UserService {
    pub async fn find_by_session(pool: &PgPool, session_id: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, session_id, created_at FROM users WHERE session_id = $1",
        )
        .bind(session_id)
        .fetch_optional(pool)
        .await?;
        Ok(user)
    }

    /// Insert a user bound to `session_id`. The caller checks that the session is free.
    pub async fn register(pool: &PgPool, name: &str, session_id: &str) -> anyhow::Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"INSERT INTO users (id, name, session_id)
               VALUES ($1, $2, $3)
               RETURNING id, name, session_id, created_at"#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(session_id)
        .fetch_one(pool)
        .await?;

        tracing::info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Delete users registered before `cutoff`; their meals go with them.
    /// Returns the number of users removed.
    pub async fn purge_stale(pool: &PgPool, cutoff: DateTime<Utc>) -> anyhow::Result<u64> {
        let result = sqlx::query("DELETE FROM users WHERE created_at < $1")
            .bind(cutoff)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
