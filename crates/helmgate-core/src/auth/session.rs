//! Session persistence with two durability tiers.
//!
//! A successful login produces an `AuthSession` that is written to exactly
//! one of two stores: the disk store (survives restarts) when the user asked
//! to be remembered, or the in-memory store (dies with the process) when not.
//! Token and user record travel as one document, so a store either holds the
//! complete session or nothing.

use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::UserRecord;

/// Session file name inside the session directory
const SESSION_FILE: &str = "session.json";

/// The locally persisted result of a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub token: String,
    pub user: UserRecord,
    pub remember_me: bool,
    pub created_at: DateTime<Utc>,
}

impl AuthSession {
    pub fn new(token: String, user: UserRecord, remember_me: bool) -> Self {
        Self {
            token,
            user,
            remember_me,
            created_at: Utc::now(),
        }
    }
}

/// Storage capability for one durability tier.
pub trait SessionStore {
    /// Persist the whole session in a single write
    fn save(&self, session: &AuthSession) -> Result<()>;

    fn load(&self) -> Result<Option<AuthSession>>;

    fn clear(&self) -> Result<()>;
}

/// Long-lived tier: a JSON file that survives process restarts.
pub struct DiskSessionStore {
    dir: PathBuf,
}

impl DiskSessionStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn session_path(&self) -> PathBuf {
        self.dir.join(SESSION_FILE)
    }
}

impl SessionStore for DiskSessionStore {
    fn save(&self, session: &AuthSession) -> Result<()> {
        let path = self.session_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(session)?;
        std::fs::write(path, contents).context("Failed to write session file")?;
        Ok(())
    }

    fn load(&self) -> Result<Option<AuthSession>> {
        let path = self.session_path();
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&path).context("Failed to read session file")?;
        let session = serde_json::from_str(&contents).context("Failed to parse session file")?;
        Ok(Some(session))
    }

    fn clear(&self) -> Result<()> {
        let path = self.session_path();
        if path.exists() {
            std::fs::remove_file(path).context("Failed to remove session file")?;
        }
        Ok(())
    }
}

/// Session-scoped tier: held in memory, gone when the process exits.
#[derive(Default)]
pub struct MemorySessionStore {
    slot: Mutex<Option<AuthSession>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Option<AuthSession>>> {
        self.slot
            .lock()
            .map_err(|_| anyhow::anyhow!("Session store lock poisoned"))
    }
}

impl SessionStore for MemorySessionStore {
    fn save(&self, session: &AuthSession) -> Result<()> {
        *self.lock()? = Some(session.clone());
        Ok(())
    }

    fn load(&self) -> Result<Option<AuthSession>> {
        Ok(self.lock()?.clone())
    }

    fn clear(&self) -> Result<()> {
        *self.lock()? = None;
        Ok(())
    }
}

/// Both tiers behind one handle; the remember-me flag picks the tier.
pub struct SessionVault {
    disk: DiskSessionStore,
    memory: MemorySessionStore,
}

impl SessionVault {
    pub fn new(session_dir: PathBuf) -> Self {
        Self {
            disk: DiskSessionStore::new(session_dir),
            memory: MemorySessionStore::new(),
        }
    }

    /// Write the session to the tier its remember-me flag selects
    pub fn save(&self, session: &AuthSession) -> Result<()> {
        if session.remember_me {
            self.disk.save(session)
        } else {
            self.memory.save(session)
        }
    }

    /// Current session, preferring the in-process tier
    pub fn load(&self) -> Result<Option<AuthSession>> {
        if let Some(session) = self.memory.load()? {
            return Ok(Some(session));
        }
        self.disk.load()
    }

    /// Logout: drop both tiers
    pub fn clear(&self) -> Result<()> {
        self.memory.clear()?;
        self.disk.clear()
    }

    #[cfg(test)]
    pub(crate) fn disk(&self) -> &DiskSessionStore {
        &self.disk
    }

    #[cfg(test)]
    pub(crate) fn memory(&self) -> &MemorySessionStore {
        &self.memory
    }
}
