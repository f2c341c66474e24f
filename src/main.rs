use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use people_api::{
    config::Config, middleware::rate_limit::create_public_governor, routes,
    services::PeopleService, upstream::HttpPeopleSource, AppState,
};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "people_api=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().expect("Invalid configuration");
    tracing::info!(
        cities = ?config.cities.names(),
        upstream = %config.people_base_url,
        default_distance = config.default_distance,
        "Starting server at {}",
        config.server_addr()
    );

    // Upstream client, shared by every request
    let source = HttpPeopleSource::new(
        config.people_base_url.clone(),
        config.upstream_connect_timeout,
    )
    .expect("Failed to build upstream HTTP client");
    let service = PeopleService::new(Arc::new(source), config.cities.clone());

    let state = AppState {
        service,
        config: config.clone(),
    };

    let mut app = routes::create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any));

    match create_public_governor(&config) {
        Some(governor) => app = app.layer(governor),
        None => tracing::warn!("Rate limiting disabled"),
    }

    // Start server with socket address for rate limiting
    let addr: SocketAddr = config.server_addr().parse().expect("Invalid address");
    let listener = TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .expect("Failed to start server");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received");
}
