pub mod error;
pub mod routes;
pub mod state;

use axum::routing::get;
use axum::Router;
use guardias_core::SharedStore;
use tower_http::trace::TraceLayer;

/// Build the axum Router with the health probe and the shift API.
/// Used by `serve_on()` and available for integration testing.
pub fn build_router(store: SharedStore) -> Router {
    let app_state = state::AppState::new(store);

    Router::new()
        .route("/", get(routes::health::health))
        .route("/health", get(routes::health::health))
        .route("/api/shifts", get(routes::shifts::list_month))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

/// Serve on a pre-bound listener.
///
/// Lets the caller bind port 0 and read the OS-assigned port before the
/// server starts.
pub async fn serve_on(store: SharedStore, listener: tokio::net::TcpListener) -> anyhow::Result<()> {
    let actual_port = listener.local_addr()?.port();
    let app = build_router(store);

    tracing::info!("health server listening on http://0.0.0.0:{actual_port}");

    axum::serve(listener, app).await?;
    Ok(())
}
