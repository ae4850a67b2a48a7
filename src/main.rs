//! Movie API - REST backend over a relational movie catalogue
//!
//! Exposes movies, genres, users and reviews as JSON resources. Every handler
//! validates its input, issues exactly one parameterized query against
//! PostgreSQL through a shared connection pool, and answers with the
//! `{status, data|message}` envelope.

mod config;
mod db;
mod error;
mod extract;
mod models;
mod routes;
mod state;

use crate::config::Settings;
use crate::db::PgStore;
use crate::routes::create_router;
use crate::state::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber for structured logging
    init_tracing();

    info!("🚀 Starting Movie API...");

    // Load configuration
    let settings = Settings::load()?;
    info!("📋 Configuration loaded successfully");

    // The pool is built once here and injected into every handler
    let store = match PgStore::connect(&settings.database).await {
        Ok(store) => store,
        Err(e) => {
            error!("❌ FATAL: Failed to initialize database pool: {}", e);
            error!("Set DATABASE_URL or SQL_HOSTNAME/SQL_USERNAME/SQL_PASSWORD/SQL_DBNAME");
            return Err(e.into());
        }
    };
    let state = Arc::new(AppState::new(Arc::new(store)));

    // Build the router
    let app = create_router(state, &settings);

    // Create socket address
    let addr = SocketAddr::from((settings.server.host, settings.server.port));

    info!("🌐 App running on http://{}. Control+C to exit.", addr);
    info!("");
    info!("📚 API Endpoints:");
    info!("   ─── Movies ───");
    info!("   GET    /api/movies?page=&limit=        - List movies");
    info!("   GET    /api/movies/:id                 - Get movie");
    info!("   GET    /api/movies/:id/with-genres     - Get movie with genres");
    info!("   GET    /api/movies/search?title=       - Search by title");
    info!("   GET    /api/movies/genre/:genreId      - Movies in a genre");
    info!("   POST   /api/movies                     - Create movie");
    info!("   PUT    /api/movies/:id                 - Update movie");
    info!("   DELETE /api/movies/:id                 - Delete movie");
    info!("");
    info!("   ─── Genres ───");
    info!("   GET    /api/genres                     - List genres");
    info!("   GET    /api/genres/:id                 - Get genre");
    info!("   POST   /api/genres                     - Create genre");
    info!("");
    info!("   ─── Users & Reviews ───");
    info!("   GET    /api/users                      - List users");
    info!("   GET    /api/users/:id                  - Get user");
    info!("   GET    /api/users/:id/reviews          - Reviews by user");
    info!("   GET    /api/reviews                    - List reviews");
    info!("   GET    /api/reviews/movie/:movieId     - Reviews of a movie");
    info!("   POST   /api/reviews                    - Create review");
    info!("");

    // Create TCP listener and serve
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Server shutdown complete");
    Ok(())
}

/// Initialize tracing with structured logging
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,movie_api=debug,tower_http=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .compact(),
        )
        .init();
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
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
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("📴 Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            info!("📴 Received terminate signal, initiating graceful shutdown...");
        },
    }
}
