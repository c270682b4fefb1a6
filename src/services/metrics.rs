use lazy_static::lazy_static;
use prometheus::{
    register_counter, register_counter_vec, register_gauge, Counter, CounterVec, Gauge,
};
use sqlx::PgPool;
use tracing::{info, warn};

lazy_static! {
    // ── Event counters ──────────────────────────────────────────────────────
    pub static ref USERS_REGISTERED_COUNTER: Counter = register_counter!(
        "dietlog_users_registered_total",
        "Users registered through POST /users"
    ).unwrap();

    pub static ref MEALS_WRITTEN_COUNTER: CounterVec = register_counter_vec!(
        "dietlog_meals_written_total",
        "Meal writes by operation",
        &["op"]
    ).unwrap();

    pub static ref SUMMARIES_COUNTER: Counter = register_counter!(
        "dietlog_summaries_total",
        "Summaries computed"
    ).unwrap();

    pub static ref LAST_BEST_STREAK_GAUGE: Gauge = register_gauge!(
        "dietlog_last_best_streak",
        "Best on-diet streak of the most recent summary"
    ).unwrap();

    // ── Store totals (refreshed by the collector) ───────────────────────────
    pub static ref USERS_GAUGE: Gauge = register_gauge!(
        "dietlog_users",
        "Registered users"
    ).unwrap();

    pub static ref MEALS_GAUGE: Gauge = register_gauge!(
        "dietlog_meals",
        "Stored meals"
    ).unwrap();
}

/// Spawn the background collector for store totals (refreshes every 5 minutes).
pub fn start(pool: PgPool) {
    tokio::spawn(async move {
        loop {
            if let Err(e) = collect(&pool).await {
                warn!("Metrics: collection failed: {}", e);
            }
            tokio::time::sleep(tokio::time::Duration::from_secs(300)).await;
        }
    });
}

async fn collect(pool: &PgPool) -> anyhow::Result<()> {
    let users: i64 = sqlx::query_scalar("SELECT COUNT(*)::BIGINT FROM users")
        .fetch_one(pool)
        .await?;
    USERS_GAUGE.set(users as f64);

    let meals: i64 = sqlx::query_scalar("SELECT COUNT(*)::BIGINT FROM meals")
        .fetch_one(pool)
        .await?;
    MEALS_GAUGE.set(meals as f64);

    info!("Metrics: {} user(s), {} meal(s)", users, meals);
    Ok(())
}
