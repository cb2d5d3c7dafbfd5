//! High Scores API server entry point.

use std::sync::Arc;

use highscores_core::clock::SystemClock;
use highscores_store::pg_score_repository::PgScoreRepository;
use highscores_store::schema::MIGRATOR;
use sqlx::postgres::PgPoolOptions;
use tower_http::trace::TraceLayer;

use highscores_api::config::Config;
use highscores_api::error::AppError;
use highscores_api::state::AppState;
use highscores_api::{routes, seed, telemetry};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Read configuration from environment.
    let config = Config::from_env()?;

    let _telemetry = telemetry::init(config.otlp_endpoint.as_deref())?;

    tracing::info!("Starting High Scores API server");

    // Create database connection pool.
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await?;

    MIGRATOR.run(&pool).await?;
    tracing::info!("database migrations applied");

    // Build application state.
    let clock = Arc::new(SystemClock);
    let score_repository = Arc::new(PgScoreRepository::new(pool));

    if config.seed_sample_data {
        if let Err(e) = seed::seed_sample_scores(clock.as_ref(), score_repository.as_ref()).await {
            tracing::warn!(error = %e, "failed to seed sample scores");
        }
    }

    let app_state = AppState::new(clock, score_repository);

    // Build router.
    let app = routes::app(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(config.cors_layer()?);

    // Start server.
    let addr = config.socket_addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

/// Resolves on Ctrl+C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
