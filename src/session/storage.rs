use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Persisted half of a session: the raw token and the JSON-encoded profile.
///
/// The profile stays a string at this layer so a corrupt persisted payload
/// surfaces at restore time instead of failing the whole load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedSession {
    pub token: String,
    pub user_json: String,
}

/// Durable storage for the session pair.
///
/// The token and the profile are always written and cleared together; the
/// trait offers no way to touch one half without the other.
pub trait SessionStorage: Send + Sync {
    fn store(&self, session: &PersistedSession) -> Result<()>;
    fn load(&self) -> Result<Option<PersistedSession>>;
    fn clear(&self) -> Result<()>;
}

/// On-disk document layout for [`JsonFileStorage`].
#[derive(Debug, Serialize, Deserialize)]
struct SessionDocument {
    token: String,
    user: String,
    updated_at: DateTime<Utc>,
}

/// Session storage backed by a single JSON document on disk.
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    /// Create a storage rooted at `data_dir`, ensuring the directory exists.
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self> {
        let data_dir = data_dir.as_ref();
        fs::create_dir_all(data_dir)
            .with_context(|| format!("failed to create data directory {}", data_dir.display()))?;

        Ok(Self {
            path: data_dir.join("session.json"),
        })
    }

    /// Path of the backing document.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStorage for JsonFileStorage {
    fn store(&self, session: &PersistedSession) -> Result<()> {
        let document = SessionDocument {
            token: session.token.clone(),
            user: session.user_json.clone(),
            updated_at: Utc::now(),
        };

        let payload = serde_json::to_string_pretty(&document)
            .context("failed to serialize session document")?;
        fs::write(&self.path, payload)
            .with_context(|| format!("failed to write session file {}", self.path.display()))?;
        debug!(path = %self.path.display(), "session persisted");

        Ok(())
    }

    fn load(&self) -> Result<Option<PersistedSession>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let payload = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read session file {}", self.path.display()))?;

        // An unreadable document counts as no session at all.
        let document: SessionDocument = match serde_json::from_str(&payload) {
            Ok(document) => document,
            Err(e) => {
                warn!(error = %e, "persisted session document is corrupt, ignoring");
                return Ok(None);
            }
        };

        Ok(Some(PersistedSession {
            token: document.token,
            user_json: document.user,
        }))
    }

    fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)
                .with_context(|| format!("failed to remove session file {}", self.path.display()))?;
        }
        Ok(())
    }
}

/// In-memory storage for tests and ephemeral shells.
#[derive(Default)]
pub struct MemoryStorage {
    slot: Mutex<Option<PersistedSession>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self) -> MutexGuard<'_, Option<PersistedSession>> {
        self.slot.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Preload a stored pair, as if a previous run had persisted it.
    pub fn preload(&self, token: &str, user_json: &str) {
        *self.slot() = Some(PersistedSession {
            token: token.to_string(),
            user_json: user_json.to_string(),
        });
    }

    /// Current stored pair, if any.
    pub fn snapshot(&self) -> Option<PersistedSession> {
        self.slot().clone()
    }
}

impl SessionStorage for MemoryStorage {
    fn store(&self, session: &PersistedSession) -> Result<()> {
        *self.slot() = Some(session.clone());
        Ok(())
    }

    fn load(&self) -> Result<Option<PersistedSession>> {
        Ok(self.slot().clone())
    }

    fn clear(&self) -> Result<()> {
        *self.slot() = None;
        Ok(())
    }
}
