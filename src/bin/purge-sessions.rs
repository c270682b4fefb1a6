//! Delete users whose session is past its retention window, with their meals.
//! Run daily (e.g., via cron job: 0 3 * * * /app/purge-sessions)
//!
//! Usage: purge-sessions [--older-than-days N] [--dry-run]

use chrono::{Duration, Utc};
use clap::Parser;
use dietlog_api::{
    config::{parse_session_days, Config},
    db,
    services::users::UserService,
};

#[derive(Parser)]
#[command(name = "purge-sessions", about = "Purge users with expired sessions from the dietlog database")]
struct Args {
    /// Retention in days (defaults to SESSION_MAX_AGE_DAYS)
    #[arg(long)]
    older_than_days: Option<String>,

    /// Only report how many users would be removed
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args = Args::parse();
    let config = Config::from_env()?;

    let days = match args.older_than_days.as_deref() {
        Some(raw) => parse_session_days(raw)?,
        None => config.session_max_age_days,
    };
    let cutoff = Utc::now() - Duration::days(days);

    let pool = db::create_pool(&config.database_url, 2).await?;

    if args.dry_run {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*)::BIGINT FROM users WHERE created_at < $1")
            .bind(cutoff)
            .fetch_one(&pool)
            .await?;
        tracing::info!("Dry run: {} user(s) registered before {} would be purged", count, cutoff);
        return Ok(());
    }

    tracing::info!("Purging users registered before {}...", cutoff);
    let removed = UserService::purge_stale(&pool, cutoff).await?;
    tracing::info!("Purge completed: {} user(s) removed", removed);

    Ok(())
}
