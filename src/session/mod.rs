//! Session persistence
//!
//! The session store owns the durable slot holding the full, ordered list of
//! chat sessions. The slot is a single JSON file; every save rewrites the
//! whole list. Read and write failures fail soft: callers only ever observe
//! an empty or stale list, never a persistence error.

use crate::error::{GenbiError, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Mutex;

pub mod types;
pub use types::{new_id, Message, Role, Session, TablePayload};

/// Current persisted-format version
const FORMAT_VERSION: u32 = 1;

/// Durable ordered collection of chat sessions
///
/// Implementations must treat the slot as single-writer: every `save`
/// receives the full, current session list. `load` never raises; absent or
/// malformed data yields an empty list. `save` failures are logged and
/// swallowed, so in-memory state may silently diverge from durable state
/// until the next successful write.
pub trait SessionStore {
    /// Read the full session list from the durable slot
    fn load(&self) -> Vec<Session>;

    /// Overwrite the durable slot with the full session list
    fn save(&self, sessions: &[Session]);
}

/// On-disk envelope around the session list
///
/// The version tag lets future format changes migrate old data instead of
/// discarding it. A bare legacy array (no envelope) is still accepted.
#[derive(Debug, Serialize, Deserialize)]
struct PersistedState {
    version: u32,
    sessions: Vec<Session>,
}

/// File-backed session store
///
/// Persists the session list as JSON in the user's data directory, with
/// timestamps in RFC-3339 form. The file is replaced via write-to-temp and
/// rename, so a save is atomic from the caller's point of view.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store backed by the default platform data directory
    ///
    /// The path can be overridden with the `GENBI_SESSIONS_FILE` environment
    /// variable, which makes it easy to point the binary at a test file or
    /// alternate slot without changing the user's application data dir.
    ///
    /// # Errors
    ///
    /// Returns `GenbiError::Storage` if the data directory cannot be
    /// resolved or created.
    pub fn new() -> Result<Self> {
        if let Ok(override_path) = std::env::var("GENBI_SESSIONS_FILE") {
            return Self::new_with_path(override_path);
        }

        let proj_dirs = ProjectDirs::from("io", "genbi", "genbi")
            .ok_or_else(|| GenbiError::Storage("Could not determine data directory".into()))?;

        let data_dir = proj_dirs.data_dir();
        std::fs::create_dir_all(data_dir)
            .map_err(|e| GenbiError::Storage(format!("Failed to create data directory: {}", e)))?;

        Ok(Self {
            path: data_dir.join("sessions.json"),
        })
    }

    /// Create a store backed by the specified file path
    ///
    /// Primarily useful for tests where the default application data
    /// directory is not desirable (for example, a temporary directory).
    ///
    /// # Examples
    ///
    /// ```
    /// use genbi::session::JsonFileStore;
    ///
    /// let store = JsonFileStore::new_with_path("/tmp/genbi_sessions.json").unwrap();
    /// ```
    pub fn new_with_path<P: Into<PathBuf>>(path: P) -> Result<Self> {
        let path = path.into();

        // Ensure parent directory exists so the rename during save succeeds.
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                GenbiError::Storage(format!("Failed to create parent directory: {}", e))
            })?;
        }

        Ok(Self { path })
    }

    /// Path of the underlying slot file
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn try_load(&self) -> Result<Vec<Session>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let raw = std::fs::read_to_string(&self.path)?;

        // Versioned envelope first, bare legacy array second.
        if let Ok(state) = serde_json::from_str::<PersistedState>(&raw) {
            if state.version != FORMAT_VERSION {
                tracing::warn!(
                    version = state.version,
                    "Unknown session file version, treating as no prior sessions"
                );
                return Ok(Vec::new());
            }
            return Ok(state.sessions);
        }

        let sessions: Vec<Session> = serde_json::from_str(&raw)?;
        Ok(sessions)
    }

    fn try_save(&self, sessions: &[Session]) -> Result<()> {
        let state = PersistedState {
            version: FORMAT_VERSION,
            sessions: sessions.to_vec(),
        };
        let json = serde_json::to_string_pretty(&state)?;

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl SessionStore for JsonFileStore {
    fn load(&self) -> Vec<Session> {
        match self.try_load() {
            Ok(sessions) => sessions,
            Err(e) => {
                tracing::warn!("Failed to load sessions, starting empty: {}", e);
                Vec::new()
            }
        }
    }

    fn save(&self, sessions: &[Session]) {
        if let Err(e) = self.try_save(sessions) {
            tracing::warn!("Failed to persist sessions: {}", e);
        }
    }
}

impl<S: SessionStore + ?Sized> SessionStore for std::sync::Arc<S> {
    fn load(&self) -> Vec<Session> {
        (**self).load()
    }

    fn save(&self, sessions: &[Session]) {
        (**self).save(sessions)
    }
}

/// In-memory session store
///
/// Holds the session list behind a mutex with no durable backing. Used as
/// the injectable fake in controller tests and for ephemeral chats.
#[derive(Default)]
pub struct MemoryStore {
    sessions: Mutex<Vec<Session>>,
}

impl MemoryStore {
    /// Create an empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn load(&self) -> Vec<Session> {
        self.sessions.lock().map(|s| s.clone()).unwrap_or_default()
    }

    fn save(&self, sessions: &[Session]) {
        if let Ok(mut slot) = self.sessions.lock() {
            *slot = sessions.to_vec();
        }
    }
}
