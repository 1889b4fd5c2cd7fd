//! Persisting the signed-in session across launches.
//!
//! The session lives in one JSON record under the fixed key
//! `mindspace-auth`; on disk the key becomes the file name. A missing
//! record is a clean signed-out start. A corrupt or mismatched record is
//! an error for the caller to log and discard, never a crash.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::auth::AuthState;

/// Fixed key the session record is stored under.
pub const STORAGE_KEY: &str = "mindspace-auth";

/// Version number for the stored record (increment when the shape changes)
const STORE_VERSION: u32 = 0;

/// Errors that can occur reading or writing the session record
#[derive(Debug)]
pub enum StorageError {
    Io(io::Error),
    Json(serde_json::Error),
    VersionMismatch { expected: u32, found: u32 },
}

impl From<io::Error> for StorageError {
    fn from(e: io::Error) -> Self {
        StorageError::Io(e)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::Json(e)
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Io(e) => write!(f, "IO error: {}", e),
            StorageError::Json(e) => write!(f, "Serialization error: {}", e),
            StorageError::VersionMismatch { expected, found } => {
                write!(
                    f,
                    "Session record version mismatch: expected {}, found {}",
                    expected, found
                )
            }
        }
    }
}

impl std::error::Error for StorageError {}

/// On-disk envelope around the auth state.
#[derive(Serialize, Deserialize)]
struct StoredRecord {
    version: u32,
    state: AuthState,
}

/// Where the session record lives. Implementations only move bytes; what
/// a missing or unreadable record means is the auth store's call.
pub trait SessionStore {
    /// `Ok(None)` when no record exists.
    fn load(&self) -> Result<Option<AuthState>, StorageError>;
    fn save(&mut self, state: &AuthState) -> Result<(), StorageError>;
    fn clear(&mut self) -> Result<(), StorageError>;
}

/// Stores the record as `<dir>/mindspace-auth.json`.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{}.json", STORAGE_KEY)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<AuthState>, StorageError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StorageError::Io(e)),
        };
        let record: StoredRecord = serde_json::from_str(&text)?;
        if record.version != STORE_VERSION {
            return Err(StorageError::VersionMismatch {
                expected: STORE_VERSION,
                found: record.version,
            });
        }
        Ok(Some(record.state))
    }

    fn save(&mut self, state: &AuthState) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let record = StoredRecord {
            version: STORE_VERSION,
            state: state.clone(),
        };
        fs::write(&self.path, serde_json::to_string(&record)?)?;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Io(e)),
        }
    }
}

/// Keeps the record in memory: the store for tests and for hosts with no
/// writable data directory.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    record: Option<AuthState>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start pre-seeded, as if a previous run had saved `state`.
    pub fn seeded(state: AuthState) -> Self {
        Self {
            record: Some(state),
        }
    }

    pub fn record(&self) -> Option<&AuthState> {
        self.record.as_ref()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<AuthState>, StorageError> {
        Ok(self.record.clone())
    }

    fn save(&mut self, state: &AuthState) -> Result<(), StorageError> {
        self.record = Some(state.clone());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        self.record = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::demo_user;

    fn signed_in() -> AuthState {
        AuthState {
            user: Some(demo_user("maya@example.com")),
            is_authenticated: true,
        }
    }

    fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "mindspace-storage-{}-{}",
            tag,
            std::process::id()
        ));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = temp_dir("roundtrip");
        let mut store = FileSessionStore::new(&dir);

        assert!(store.load().unwrap().is_none(), "fresh dir has no record");

        let state = signed_in();
        store.save(&state).unwrap();
        assert_eq!(store.path().file_name().unwrap(), "mindspace-auth.json");
        assert_eq!(store.load().unwrap(), Some(state));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_corrupt_record_is_an_error_not_a_panic() {
        let dir = temp_dir("corrupt");
        let store = FileSessionStore::new(&dir);
        fs::write(store.path(), "{not json").unwrap();

        match store.load() {
            Err(StorageError::Json(_)) => {}
            other => panic!("expected Json error, got {:?}", other),
        }

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_version_mismatch_is_reported() {
        let dir = temp_dir("version");
        let store = FileSessionStore::new(&dir);
        let record = serde_json::json!({
            "version": 99,
            "state": { "user": null, "isAuthenticated": false }
        });
        fs::write(store.path(), record.to_string()).unwrap();

        match store.load() {
            Err(StorageError::VersionMismatch { expected, found }) => {
                assert_eq!(expected, STORE_VERSION);
                assert_eq!(found, 99);
            }
            other => panic!("expected version mismatch, got {:?}", other),
        }

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_clear_removes_the_record_and_is_idempotent() {
        let dir = temp_dir("clear");
        let mut store = FileSessionStore::new(&dir);
        store.save(&signed_in()).unwrap();

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
        store.clear().unwrap();

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemorySessionStore::new();
        assert!(store.load().unwrap().is_none());

        let state = signed_in();
        store.save(&state).unwrap();
        assert_eq!(store.record(), Some(&state));

        store.clear().unwrap();
        assert!(store.record().is_none());

        let seeded = MemorySessionStore::seeded(state.clone());
        assert_eq!(seeded.load().unwrap(), Some(state));
    }
}
