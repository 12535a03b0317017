pub mod queries;

use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::info;

use crate::core::config::SchedulerConfig;

pub type DbConn = Arc<Mutex<Connection>>;

/// Get the database file path.
/// Uses TOASTLINE_DATA_DIR env var, then the platform data dir, then ./data/
pub fn db_path() -> PathBuf {
    if let Ok(dir) = std::env::var("TOASTLINE_DATA_DIR") {
        return PathBuf::from(dir).join("toastline.db");
    }

    dirs::data_dir()
        .map(|dir| dir.join("toastline"))
        .unwrap_or_else(|| PathBuf::from("data"))
        .join("toastline.db")
}

/// Open (or create) the database and run initialization.
pub fn open_database(path: &Path) -> Result<DbConn, rusqlite::Error> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).ok();
    }

    let conn = Connection::open(path)?;
    conn.execute_batch("PRAGMA journal_mode = WAL;")?;

    initialize_database(&conn)?;

    info!("Database opened at {}", path.display());
    Ok(Arc::new(Mutex::new(conn)))
}

/// In-memory store, used when the on-disk database cannot be opened.
pub fn open_in_memory() -> Result<DbConn, rusqlite::Error> {
    let conn = Connection::open_in_memory()?;
    initialize_database(&conn)?;
    Ok(Arc::new(Mutex::new(conn)))
}

/// Create the settings table and seed scheduler defaults.
fn initialize_database(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS settings (
            key             TEXT PRIMARY KEY,
            value           TEXT NOT NULL
        );",
    )?;

    // ── Default settings ──
    let mut stmt = conn.prepare("INSERT OR IGNORE INTO settings (key, value) VALUES (?1, ?2)")?;
    for (key, value) in SchedulerConfig::default().to_settings() {
        stmt.execute(rusqlite::params![key, value])?;
    }

    info!("Database initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{KEY_MAX_VISIBLE, KEY_NOTIFICATIONS_DISABLED};

    #[test]
    fn test_initialize_seeds_defaults() {
        let conn = open_in_memory().unwrap();
        let settings = queries::load_settings(&conn).unwrap();
        assert_eq!(SchedulerConfig::from_settings(&settings), SchedulerConfig::default());
        assert_eq!(settings.get(KEY_MAX_VISIBLE).map(String::as_str), Some("5"));
    }

    #[test]
    fn test_initialize_keeps_existing_values() {
        let conn = open_in_memory().unwrap();
        queries::set_setting(&conn, KEY_NOTIFICATIONS_DISABLED, "true").unwrap();

        initialize_database(&conn.lock().unwrap()).unwrap();

        let settings = queries::load_settings(&conn).unwrap();
        assert_eq!(
            settings.get(KEY_NOTIFICATIONS_DISABLED).map(String::as_str),
            Some("true")
        );
    }

    #[test]
    fn test_open_database_creates_file() {
        let dir = std::env::temp_dir().join(format!("toastline-test-{}", std::process::id()));
        let path = dir.join("nested").join("toastline.db");

        let conn = open_database(&path).unwrap();
        assert!(path.exists());
        drop(conn);

        std::fs::remove_dir_all(&dir).ok();
    }
}
