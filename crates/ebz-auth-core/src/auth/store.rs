use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::models::SessionRecord;

/// Session file name in cache directory
const SESSION_FILE: &str = "session.json";

/// Holder for the single active session on this device.
pub trait SessionStore: Send + Sync {
    /// Replace the stored session with `session`.
    fn save(&self, session: SessionRecord);

    /// The stored session, expired or not.
    fn load(&self) -> Option<SessionRecord>;

    fn clear(&self) -> Result<()>;
}

fn lock_slot(slot: &Mutex<Option<SessionRecord>>) -> MutexGuard<'_, Option<SessionRecord>> {
    // A panic while holding the lock cannot leave a half-written record behind
    slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// In-process store. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    slot: Mutex<Option<SessionRecord>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn save(&self, session: SessionRecord) {
        *lock_slot(&self.slot) = Some(session);
    }

    fn load(&self) -> Option<SessionRecord> {
        lock_slot(&self.slot).clone()
    }

    fn clear(&self) -> Result<()> {
        *lock_slot(&self.slot) = None;
        Ok(())
    }
}

/// Store backed by `session.json` in the cache directory.
///
/// The in-memory slot is authoritative for the running process; the file is
/// what the next process starts from.
#[derive(Debug)]
pub struct FileSessionStore {
    cache_dir: PathBuf,
    slot: Mutex<Option<SessionRecord>>,
}

impl FileSessionStore {
    pub fn new(cache_dir: PathBuf) -> Self {
        Self {
            cache_dir,
            slot: Mutex::new(None),
        }
    }

    /// Create the store and load any session already on disk.
    pub fn open(cache_dir: PathBuf) -> Result<Self> {
        let store = Self::new(cache_dir);
        store.reload()?;
        Ok(store)
    }

    /// Load session from disk. Returns whether a record was found.
    pub fn reload(&self) -> Result<bool> {
        let path = self.session_path();
        if !path.exists() {
            *lock_slot(&self.slot) = None;
            return Ok(false);
        }

        let contents = std::fs::read_to_string(&path).context("Failed to read session file")?;
        let record: SessionRecord =
            serde_json::from_str(&contents).context("Failed to parse session file")?;
        debug!(username = %record.username, valid_until = %record.valid_until, "Session loaded");
        *lock_slot(&self.slot) = Some(record);
        Ok(true)
    }

    /// Write `record` to disk
    fn persist(&self, record: &SessionRecord) -> Result<()> {
        let path = self.session_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create cache directory")?;
        }
        let contents = serde_json::to_string_pretty(record)?;
        std::fs::write(&path, contents).context("Failed to write session file")?;
        Ok(())
    }

    pub fn session_path(&self) -> PathBuf {
        self.cache_dir.join(SESSION_FILE)
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }
}

impl SessionStore for FileSessionStore {
    fn save(&self, session: SessionRecord) {
        let mut slot = lock_slot(&self.slot);
        let record = slot.insert(session);
        if let Err(e) = self.persist(record) {
            warn!(error = %e, "Failed to save session");
        }
    }

    fn load(&self) -> Option<SessionRecord> {
        lock_slot(&self.slot).clone()
    }

    fn clear(&self) -> Result<()> {
        let mut slot = lock_slot(&self.slot);
        *slot = None;
        let path = self.session_path();
        if path.exists() {
            std::fs::remove_file(&path).context("Failed to remove session file")?;
        }
        Ok(())
    }
}
