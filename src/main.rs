// Main entry point - Dependency injection and server setup
use std::{net::SocketAddr, sync::Arc, time::Duration};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use femimed_dashboard::application::home_route_service::{FallbackReason, HomeRouteService};
use femimed_dashboard::application::navigation_guard::NavigationGuard;
use femimed_dashboard::infrastructure::config::load_config;
use femimed_dashboard::infrastructure::http_preferences_repository::HttpPreferencesRepository;
use femimed_dashboard::infrastructure::memory_route_cache::InMemoryRouteCache;
use femimed_dashboard::presentation::app_state::AppState;
use femimed_dashboard::presentation::handlers::{
    check_guard, get_home, get_home_options, health_check, put_home, render_chart_geometry,
    render_chart_svg,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("femimed_dashboard=info,tower_http=info")),
        )
        .init();

    // Load configuration
    let config = load_config()?;

    // Create repository and cache (infrastructure layer)
    let repository = Arc::new(HttpPreferencesRepository::new(
        &config.preferences.base_url,
        config.preferences.timeout_secs.map(Duration::from_secs),
    )?);
    let cache = Arc::new(InMemoryRouteCache::new());

    // Create services (application layer)
    let home_route_service =
        HomeRouteService::new(repository, cache, config.home, config.preferences.key)
            .with_observer(Arc::new(|user_id: Option<i64>, reason: &FallbackReason| {
                tracing::info!(?user_id, ?reason, "home route fell back to role default");
            }));
    let navigation_guard = NavigationGuard::new(home_route_service.clone(), config.navigation);

    // Create application state
    let state = Arc::new(AppState {
        home_route_service,
        navigation_guard,
    });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/home", get(get_home).put(put_home))
        .route("/home/options", get(get_home_options))
        .route("/guard", get(check_guard))
        .route("/charts/render", post(render_chart_svg))
        .route("/charts/geometry", post(render_chart_geometry))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = config.server.bind_address.parse()?;
    tracing::info!("Starting femimed-dashboard service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
