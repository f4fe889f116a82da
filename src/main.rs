use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use commish::shared::{AppState, Config};
use commish::sleeper::SleeperClient;
use commish::store::PostgresLeagueStore;
use commish::{routes, LeagueStore, UpstreamClient};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "commish=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting league commissioner service");

    let config = Config::from_env().expect("invalid configuration");

    let pool = sqlx::PgPool::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");
    let store: Arc<dyn LeagueStore> = Arc::new(PostgresLeagueStore::new(pool));
    let upstream: Arc<dyn UpstreamClient> = Arc::new(SleeperClient::new());

    let app_state = AppState::new(store, upstream);

    let app = Router::new()
        .route("/health", get(routes::health))
        .route("/standings/:year", get(routes::get_standings))
        .route("/summary/:year", get(routes::get_summary))
        .route("/sync/:year", post(routes::post_sync))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port))
        .await
        .expect("Failed to bind port");
    info!("Server running on http://localhost:{}", config.port);
    axum::serve(listener, app).await.expect("Server error");
}
