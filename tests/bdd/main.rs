
use std::collections::HashMap;
use std::path::PathBuf;

use cucumber::World;

/// Shared state carried through each scenario.
#[derive(Debug, Default, World)]
pub struct PajarosWorld {
    /// Temporary directory that owns the database file.
    pub db_dir: Option<tempfile::TempDir>,
    /// Path to the SQLite database file inside `db_dir`.
    pub db_path: Option<PathBuf>,
    /// Port of the in-process server, once started.
    pub server_port: Option<u16>,
    /// Task running the in-process server.
    pub server_handle: Option<tokio::task::JoinHandle<()>>,
    pub http_client: reqwest::Client,
    /// Status code of the most recent HTTP response.
    pub last_response_status: Option<u16>,
    /// Raw body of the most recent HTTP response.
    pub last_response_body: Option<String>,
    /// Alias to store-assigned id, populated by create steps.
    pub bird_ids: HashMap<String, i64>,
}

#[tokio::main]
async fn main() {
    PajarosWorld::run("tests/features").await;
}
