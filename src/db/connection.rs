use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::BaseDirs;
use rusqlite::Connection;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".card-studio";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "card.sqlite";

/// Open (or create) the store at `path` and make sure the key/value table
/// exists. Parent directories are created on demand.
pub fn open_store(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).context("failed to create data directory")?;
        }
    }

    let conn = Connection::open(path).context("failed to open SQLite database")?;
    ensure_schema(&conn)?;
    Ok(conn)
}

/// Throwaway store used by tests and `--db :memory:`.
pub fn open_store_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory().context("failed to open in-memory database")?;
    ensure_schema(&conn)?;
    Ok(conn)
}

fn ensure_schema(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS card_store (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
        [],
    )
    .context("failed to create card_store table")?;
    Ok(())
}

/// Directory holding the database and log file, inside the user's home.
pub fn data_dir() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME))
}

/// Resolve the absolute path to the SQLite database inside the user's home.
pub fn default_db_path() -> Result<PathBuf> {
    Ok(data_dir()?.join(DB_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_store_creates_parent_directories_and_table() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("card.sqlite");
        let conn = open_store(&path).expect("open");
        assert!(path.exists());

        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'card_store'",
                [],
                |row| row.get(0),
            )
            .expect("query");
        assert_eq!(count, 1);
    }

    #[test]
    fn reopening_existing_store_is_harmless() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("card.sqlite");
        drop(open_store(&path).expect("first open"));
        open_store(&path).expect("second open");
    }
}
