use crate::db::BirdStore;
use axum::{
    Router,
    routing::{get, put},
};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Shared application state for the web server.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn BirdStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn BirdStore>) -> Self {
        AppState { store }
    }
}

mod errors;
mod handlers;

/// Build the axum router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/pajaros",
            get(handlers::list_birds).post(handlers::create_bird),
        )
        .route(
            "/pajaros/hembras",
            get(handlers::list_female_birds).put(handlers::update_listing_path),
        )
        .route("/pajaros/{id}", put(handlers::update_bird))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `addr` and serve until `shutdown` resolves, then close the store.
///
/// The store is closed even when binding fails.
pub async fn serve(
    state: AppState,
    addr: &str,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), String> {
    match TcpListener::bind(addr).await {
        Ok(listener) => serve_on(listener, state, shutdown).await,
        Err(e) => {
            if let Err(close_err) = close_store(&state) {
                warn!(error = %close_err, "store close after bind failure");
            }
            Err(format!("failed to bind to {addr}: {e}"))
        }
    }
}

/// Serve on an already bound listener until `shutdown` resolves, then close the store.
pub async fn serve_on(
    listener: TcpListener,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), String> {
    let served = run(listener, state.clone(), shutdown).await;
    let closed = close_store(&state);
    info!("server stopped");
    served.and(closed)
}

async fn run(
    listener: TcpListener,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), String> {
    let local = listener
        .local_addr()
        .map_err(|e| format!("failed to read local address: {e}"))?;
    info!(%local, "pajaros listening");
    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| format!("server error: {e}"))
}

fn close_store(state: &AppState) -> Result<(), String> {
    state
        .store
        .close()
        .map_err(|e| format!("failed to close store: {e}"))
}
