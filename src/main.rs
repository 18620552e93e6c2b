use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use asesorias_backend::{
    AppState,
    config::Config,
    database::{
        self,
        repositories::{PgAdvisoryRepository, PgUserRepository},
    },
    routes,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().expect("Failed to load configuration");

    let pool = database::connect(&config)
        .await
        .expect("Failed to connect to Postgres");

    // Schema is brought up explicitly at startup; a failure here aborts
    // instead of being rediscovered request by request.
    database::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    let state = AppState {
        users: Arc::new(PgUserRepository::new(pool.clone())),
        advisories: Arc::new(PgAdvisoryRepository::new(pool)),
        config: config.clone(),
    };

    let router = routes::create_router(state);

    #[cfg(debug_assertions)]
    let router = {
        tracing::debug!("Adding CORS layer for development mode");
        router.layer(tower_http::cors::CorsLayer::permissive())
    };

    let addr = SocketAddr::new(
        config.server_host.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid server_host, falling back to dual-stack default");
            IpAddr::V6(std::net::Ipv6Addr::UNSPECIFIED)
        }),
        config.server_port,
    );
    tracing::info!("Server listening on {}", addr);
    axum::serve(
        tokio::net::TcpListener::bind(&addr)
            .await
            .expect("Failed to bind"),
        router,
    )
    .await
    .expect("Failed to start server");
}
