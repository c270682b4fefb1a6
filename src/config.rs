use std::env;

/// Upper bound for session lifetimes and purge retention (about a century).
pub const MAX_SESSION_DAYS: i64 = 36_500;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub db_max_connections: u32,
    pub host: String,
    pub port: u16,
    /// Lifetime of the `sessionId` cookie, also the default purge retention.
    pub session_max_age_days: i64,
    pub cookie_secure: bool,
    /// Extra origin allowed by CORS; localhost is always allowed.
    pub cors_origin: Option<String>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: required("DATABASE_URL")?,
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".into())
                .parse()?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3333".into())
                .parse()?,
            session_max_age_days: parse_session_days(
                &env::var("SESSION_MAX_AGE_DAYS").unwrap_or_else(|_| "7".into()),
            )?,
            cookie_secure: env::var("COOKIE_SECURE")
                .map(|v| matches!(v.as_str(), "1" | "true" | "TRUE" | "yes"))
                .unwrap_or(false),
            cors_origin: env::var("CORS_ORIGIN").ok().filter(|s| !s.is_empty()),
        })
    }

    /// Settings used when only a database URL is known (tests, maintenance tools).
    pub fn with_database_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            db_max_connections: 10,
            host: "127.0.0.1".into(),
            port: 3333,
            session_max_age_days: 7,
            cookie_secure: false,
            cors_origin: None,
        }
    }

    pub fn session_max_age_secs(&self) -> i64 {
        self.session_max_age_days.saturating_mul(24 * 60 * 60)
    }
}

/// Parse a day count for session lifetime or retention; must be within 1..=MAX_SESSION_DAYS.
pub fn parse_session_days(raw: &str) -> anyhow::Result<i64> {
    let days: i64 = raw
        .trim()
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid session day count '{raw}': {e}"))?;
    anyhow::ensure!(
        (1..=MAX_SESSION_DAYS).contains(&days),
        "Session day count must be between 1 and {MAX_SESSION_DAYS}, got {days}"
    );
    Ok(days)
}

fn required(key: &str) -> anyhow::Result<String> {
    env::var(key).map_err(|_| anyhow::anyhow!("Missing required env var: {}", key))
}
