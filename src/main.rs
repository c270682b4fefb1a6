use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use dietlog_api::{build_router, config::Config, db, services, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Arc::new(Config::from_env()?);

    let pool = db::create_pool(&config.database_url, config.db_max_connections).await?;
    db::run_migrations(&pool).await?;
    info!("Database connected and migrations applied");

    services::metrics::start(pool.clone());

    let state = AppState {
        db: pool,
        config: config.clone(),
    };
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    info!("dietlog API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
