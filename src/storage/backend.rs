//! Key-value substrates the store persists through.
//!
//! Each storage key maps to one whole serialized collection; a write fully
//! replaces the previous value. The store stays substrate-agnostic behind
//! [`StorageBackend`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use rusqlite::{params, Connection};
use thiserror::Error;

/// Substrate errors.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Sqlite error: {0}")]
    Sqlite(String),
}

/// A string-keyed, string-valued persistence substrate.
pub trait StorageBackend {
    /// Read the raw value stored at `key`, or `None` when the key is absent.
    fn read(&self, key: &str) -> Result<Option<String>, BackendError>;

    /// Persist `value` at `key`, replacing any previous content.
    fn write(&self, key: &str, value: &str) -> Result<(), BackendError>;
}

/// In-memory substrate. Nothing survives the process; used for ephemeral
/// stores and as the test double.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self, key: &str) -> Result<Option<String>, BackendError> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| BackendError::Io("memory backend lock poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), BackendError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| BackendError::Io("memory backend lock poisoned".to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One JSON document per key inside a data directory.
///
/// Writes go through a temporary file and rename so a document is never left
/// half-written.
#[derive(Debug)]
pub struct JsonFileBackend {
    dir: PathBuf,
}

impl JsonFileBackend {
    /// Open the backend, creating the directory if needed.
    pub fn open(dir: &Path) -> Result<Self, BackendError> {
        std::fs::create_dir_all(dir).map_err(|e| BackendError::Io(e.to_string()))?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    fn document_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl StorageBackend for JsonFileBackend {
    fn read(&self, key: &str) -> Result<Option<String>, BackendError> {
        match std::fs::read_to_string(self.document_path(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(BackendError::Io(e.to_string())),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), BackendError> {
        let path = self.document_path(key);
        let tmp = self.dir.join(format!("{}.json.tmp", key));
        std::fs::write(&tmp, value).map_err(|e| BackendError::Io(e.to_string()))?;
        std::fs::rename(&tmp, &path).map_err(|e| BackendError::Io(e.to_string()))?;
        Ok(())
    }
}

/// Single-table sqlite substrate.
///
/// Values live in `kv(key TEXT PRIMARY KEY, value TEXT)` inside one database
/// file.
#[derive(Debug)]
pub struct SqliteBackend {
    conn: Connection,
}

impl SqliteBackend {
    /// Open or create the database at the given path.
    pub fn open(path: &Path) -> Result<Self, BackendError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| BackendError::Io(e.to_string()))?;
        }
        let conn = Connection::open(path).map_err(|e| BackendError::Sqlite(e.to_string()))?;
        Self::init(conn)
    }

    /// Create an in-memory database (used in tests).
    pub fn open_in_memory() -> Result<Self, BackendError> {
        let conn = Connection::open_in_memory().map_err(|e| BackendError::Sqlite(e.to_string()))?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self, BackendError> {
        conn.execute_batch("CREATE TABLE IF NOT EXISTS kv (key TEXT PRIMARY KEY, value TEXT NOT NULL)")
            .map_err(|e| BackendError::Sqlite(e.to_string()))?;
        Ok(Self { conn })
    }
}

impl StorageBackend for SqliteBackend {
    fn read(&self, key: &str) -> Result<Option<String>, BackendError> {
        let result = self.conn.query_row(
            "SELECT value FROM kv WHERE key = ?1",
            params![key],
            |row| row.get(0),
        );
        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(BackendError::Sqlite(e.to_string())),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), BackendError> {
        self.conn
            .execute(
                "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
                params![key, value],
            )
            .map_err(|e| BackendError::Sqlite(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise_backend(backend: &dyn StorageBackend) {
        assert_eq!(backend.read("workouts").unwrap(), None);

        backend.write("workouts", "[1,2,3]").unwrap();
        assert_eq!(backend.read("workouts").unwrap(), Some("[1,2,3]".to_string()));

        backend.write("workouts", "[]").unwrap();
        assert_eq!(backend.read("workouts").unwrap(), Some("[]".to_string()));

        assert_eq!(backend.read("user").unwrap(), None);
    }

    #[test]
    fn test_memory_backend_contract() {
        let backend = MemoryBackend::new();
        exercise_backend(&backend);
    }

    #[test]
    fn test_sqlite_backend_contract() {
        let backend = SqliteBackend::open_in_memory().unwrap();
        exercise_backend(&backend);
    }

    #[test]
    fn test_json_file_backend_contract() {
        let dir = tempfile::tempdir().unwrap();
        let backend = JsonFileBackend::open(dir.path()).unwrap();
        exercise_backend(&backend);

        // Documents land as one file per key.
        assert!(dir.path().join("workouts.json").exists());
        assert!(!dir.path().join("workouts.json.tmp").exists());
    }

    #[test]
    fn test_json_file_backend_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let backend = JsonFileBackend::open(dir.path()).unwrap();
            backend.write("user", "{\"name\":\"User\"}").unwrap();
        }
        let backend = JsonFileBackend::open(dir.path()).unwrap();
        assert_eq!(
            backend.read("user").unwrap(),
            Some("{\"name\":\"User\"}".to_string())
        );
    }

    #[test]
    fn test_sqlite_backend_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("fittrack.db");
        {
            let backend = SqliteBackend::open(&db_path).unwrap();
            backend.write("challenges", "[]").unwrap();
        }
        let backend = SqliteBackend::open(&db_path).unwrap();
        assert_eq!(backend.read("challenges").unwrap(), Some("[]".to_string()));
    }
}
