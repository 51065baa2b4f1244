//! Session store and its persisted key-value storage.
//!
//! The session is the single process-wide answer to "is someone logged in".
//! An empty display name means logged out; nothing else is used for gating.
//!
//! Storage is a flat key-value map persisted to `<base>/session.json` with
//! restricted permissions (0600). It is the source of truth across restarts:
//! `SessionStore::load` seeds the in-memory state from it once, and
//! `logout` clears it wholesale. Tokens are never logged in full.

use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use anyhow::{Context, Result};
use tokio::sync::watch;
use tracing::{info, warn};

use crate::config::paths;

/// Storage key for the auth token.
pub const TOKEN_KEY: &str = "token";
/// Storage key for the display name.
pub const NAME_KEY: &str = "userFullName";

/// Key-value storage backing the session.
pub trait SessionStorage: Send + Sync {
    /// Reads a value.
    ///
    /// # Errors
    /// Returns an error if the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes a value.
    ///
    /// # Errors
    /// Returns an error if the backing store cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes every key.
    ///
    /// # Errors
    /// Returns an error if the backing store cannot be cleared.
    fn clear(&self) -> Result<()>;
}

/// JSON file storage.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Storage at the default session path under `POSTDESK_HOME`.
    pub fn default_location() -> Self {
        Self::new(paths::session_path())
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read session from {}", self.path.display()))?;
        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse session from {}", self.path.display()))
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let contents = serde_json::to_string_pretty(map).context("Failed to serialize session")?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(&self.path)
                .with_context(|| format!("Failed to open {} for writing", self.path.display()))?;
            file.write_all(contents.as_bytes())
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        #[cfg(not(unix))]
        {
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&self.path)
                .with_context(|| format!("Failed to open {} for writing", self.path.display()))?;
            file.write_all(contents.as_bytes())
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        Ok(())
    }
}

impl SessionStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_map()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut map = self.read_map()?;
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map)
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e)
                .with_context(|| format!("Failed to remove session {}", self.path.display())),
        }
    }
}

/// In-memory storage (tests and throwaway sessions).
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        Ok(())
    }
}

/// Snapshot of the current session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    /// Display name; empty when logged out.
    pub display_name: String,
    /// Auth token, if one is stored.
    pub token: Option<String>,
}

impl Session {
    pub fn is_logged_in(&self) -> bool {
        !self.display_name.trim().is_empty()
    }
}

struct Inner {
    storage: Arc<dyn SessionStorage>,
    state: watch::Sender<Session>,
}

/// Shared session context.
///
/// Cheap to clone; all clones observe the same state. Reads are synchronous,
/// changes are broadcast to `subscribe()` receivers.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("logged_in", &self.is_logged_in())
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Seeds the session from storage. Called once at startup.
    ///
    /// # Errors
    /// Returns an error if storage cannot be read.
    pub fn load(storage: Arc<dyn SessionStorage>) -> Result<Self> {
        let session = Session {
            display_name: storage.get(NAME_KEY)?.unwrap_or_default(),
            token: storage.get(TOKEN_KEY)?,
        };
        let (state, _) = watch::channel(session);
        Ok(Self {
            inner: Arc::new(Inner { storage, state }),
        })
    }

    /// Store backed by fresh in-memory storage.
    pub fn in_memory() -> Self {
        let (state, _) = watch::channel(Session::default());
        Self {
            inner: Arc::new(Inner {
                storage: Arc::new(MemoryStorage::new()),
                state,
            }),
        }
    }

    /// Current session snapshot.
    pub fn session(&self) -> Session {
        self.inner.state.borrow().clone()
    }

    pub fn display_name(&self) -> String {
        self.inner.state.borrow().display_name.clone()
    }

    pub fn token(&self) -> Option<String> {
        self.inner.state.borrow().token.clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.inner.state.borrow().is_logged_in()
    }

    /// Receiver notified on every login/logout.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.inner.state.subscribe()
    }

    /// Writes token and display name to storage without touching the
    /// in-memory session. The login flow calls this before `login`.
    ///
    /// # Errors
    /// Returns an error if storage cannot be written.
    pub fn persist_credentials(&self, token: &str, display_name: &str) -> Result<()> {
        self.inner.storage.set(TOKEN_KEY, token)?;
        self.inner.storage.set(NAME_KEY, display_name)?;
        Ok(())
    }

    /// Sets the active display name and picks up the stored token.
    ///
    /// Does not fetch or validate anything.
    ///
    /// # Errors
    /// Returns an error if storage cannot be read.
    pub fn login(&self, display_name: &str) -> Result<()> {
        let token = self.inner.storage.get(TOKEN_KEY)?;
        info!(name = display_name, "session started");
        self.inner.state.send_replace(Session {
            display_name: display_name.trim().to_string(),
            token,
        });
        Ok(())
    }

    /// Clears the display name, the token, and persisted storage.
    ///
    /// Idempotent. The in-memory session is cleared even when storage
    /// fails, so the gate always sees the logout.
    ///
    /// # Errors
    /// Returns an error if storage cannot be cleared.
    pub fn logout(&self) -> Result<()> {
        let cleared = self.inner.storage.clear();
        let changed = self.inner.state.send_if_modified(|session| {
            if *session == Session::default() {
                false
            } else {
                *session = Session::default();
                true
            }
        });
        if changed {
            info!("session cleared");
        }
        if let Err(ref e) = cleared {
            warn!("failed to clear persisted session: {e:#}");
        }
        cleared
    }
}

/// Masks a token for display (first and last 4 characters).
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 12 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}
