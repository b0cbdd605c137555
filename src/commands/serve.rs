use std::path::Path;
use std::sync::Arc;

use pajaros::db::{BirdStore, MemoryStore, SqliteStore};
use pajaros::web::{self, AppState};
use tokio::signal;
use tracing::{error, info, warn};

pub fn run(db_path: &Path, host: &str, port: u16, in_memory: bool) -> Result<(), String> {
    let store: Arc<dyn BirdStore> = if in_memory {
        info!("using in-memory store");
        Arc::new(MemoryStore::new())
    } else {
        info!(db = %db_path.display(), "using sqlite store");
        Arc::new(SqliteStore::open(db_path).map_err(|e| e.to_string())?)
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to start runtime: {e}"))?;

    let addr = format!("{host}:{port}");
    runtime.block_on(web::serve(AppState::new(store), &addr, shutdown_signal()))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received Ctrl+C, shutting down"),
        _ = terminate => info!("received SIGTERM, shutting down"),
    }
}
