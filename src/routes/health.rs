use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::AppState;

/// GET /health — liveness plus a round trip to Postgres.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let ping: Result<i32, _> = sqlx::query_scalar("SELECT 1").fetch_one(&state.db).await;
    let pool = json!({ "size": state.db.size(), "idle": state.db.num_idle() });

    if let Err(e) = ping {
        tracing::warn!("Health check: database unreachable: {e}");
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "error", "db": e.to_string(), "pool": pool })),
        );
    }

    (StatusCode::OK, Json(json!({ "status": "ok", "db": "connected", "pool": pool })))
}
