// src/main.rs

use std::{net::SocketAddr, time::Duration};

use dotenvy::dotenv;
use sqlx::{PgPool, postgres::PgPoolOptions};
use stream_advisor::{
    config::Config,
    routes,
    seed::seed,
    state::AppState,
    store::{MemoryStore, PgStore},
};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const DB_CONNECT_ATTEMPTS: u32 = 5;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file (if present)
    dotenv().ok();

    // Load configuration from environment
    let config = Config::from_env()?;

    let file_appender = tracing_appender::rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    let state = match &config.database_url {
        Some(database_url) => {
            let store = PgStore::new(connect(database_url).await?);

            tracing::info!("Running migrations...");
            store.migrate().await?;
            tracing::info!("Migrations applied successfully.");

            AppState::from_store(store, config.clone())
        }
        None => {
            tracing::warn!("DATABASE_URL not set; results are kept in memory only.");
            AppState::from_store(MemoryStore::new(), config.clone())
        }
    };

    if let Err(e) = seed(&state, &config).await {
        tracing::error!("Failed to seed initial data: {}", e);
    }

    // Create the Axum application router
    let app = routes::create_router(state);

    // Bind to the listening address
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Start the server
    axum::serve(listener, app).await?;
    Ok(())
}

/// Connects to Postgres, retrying while the database comes up.
async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    let mut attempt = 0;
    loop {
        match PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(database_url)
            .await
        {
            Ok(pool) => {
                tracing::info!("Database connected...");
                return Ok(pool);
            }
            Err(e) if attempt + 1 < DB_CONNECT_ATTEMPTS => {
                attempt += 1;
                tracing::warn!("Database not ready, retrying in 2s... (Attempt {}): {}", attempt, e);
                tokio::time::sleep(Duration::from_secs(2)).await;
            }
            Err(e) => return Err(e),
        }
    }
}
