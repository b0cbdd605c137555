use std::path::Path;

use pajaros::db::{BirdStore, SqliteStore};

pub fn run(db_path: &Path) -> Result<(), String> {
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| format!("failed to create directory: {e}"))?;
    }

    let store = SqliteStore::open(db_path).map_err(|e| e.to_string())?;
    store.close().map_err(|e| e.to_string())?;

    println!("Initialized pajaros database at {}", db_path.display());
    Ok(())
}
