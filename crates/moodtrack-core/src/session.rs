//! Local persistence of the bearer token and user profile.
//!
//! The store mirrors a device key-value store with two keys: `token` (an
//! opaque string) and `user` (the JSON-serialised profile). Both are written
//! together at login and removed together at logout.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::config::MoodConfig;
use crate::error::{MoodError, Result};
use crate::model::{User, DEFAULT_DISPLAY_NAME};

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";

/// The current token and user, each possibly absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<User>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Name to greet the user with. Falls back when the profile is missing.
    pub fn display_name(&self) -> &str {
        self.user
            .as_ref()
            .map(User::display_name)
            .unwrap_or(DEFAULT_DISPLAY_NAME)
    }
}

/// Narrow get/set/clear interface injected into whatever makes authenticated calls.
pub trait SessionStore: Send + Sync {
    fn get(&self) -> Result<Session>;

    /// Persist token and user together.
    fn set(&self, token: &str, user: &User) -> Result<()>;

    /// Remove both token and user.
    fn clear(&self) -> Result<()>;

    fn token(&self) -> Result<Option<String>> {
        Ok(self.get()?.token.filter(|t| !t.is_empty()))
    }
}

type Entries = BTreeMap<String, String>;

fn session_from_entries(entries: &Entries) -> Session {
    let token = entries.get(TOKEN_KEY).cloned();
    let user = entries.get(USER_KEY).and_then(|raw| {
        serde_json::from_str::<User>(raw)
            .map_err(|e| tracing::warn!("ignoring unreadable stored user: {e}"))
            .ok()
    });
    Session { token, user }
}

fn entries_for(token: &str, user: &User) -> Result<Entries> {
    let mut entries = Entries::new();
    entries.insert(TOKEN_KEY.to_string(), token.to_string());
    entries.insert(USER_KEY.to_string(), serde_json::to_string(user)?);
    Ok(entries)
}

/// Session store backed by a small JSON file.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `session.path` from config, or the default under the config dir.
    pub fn from_config(config: &MoodConfig) -> Result<Self> {
        let path = config
            .session
            .resolve_path()
            .ok_or_else(|| MoodError::Config("cannot determine config directory".to_string()))?;
        Ok(Self::new(path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<Entries> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) if contents.trim().is_empty() => Ok(Entries::new()),
            Ok(contents) => serde_json::from_str(&contents).map_err(|e| {
                MoodError::Session(format!(
                    "corrupt session file {}: {e}",
                    self.path.display()
                ))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Entries::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Write the whole map to a temp file, then rename over the old one.
    fn write_entries(&self, entries: &Entries) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, serde_json::to_string_pretty(entries)?)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self) -> Result<Session> {
        Ok(session_from_entries(&self.read_entries()?))
    }

    fn set(&self, token: &str, user: &User) -> Result<()> {
        self.write_entries(&entries_for(token, user)?)?;
        tracing::debug!(path = %self.path.display(), "session saved");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        tracing::debug!(path = %self.path.display(), "session cleared");
        Ok(())
    }
}

/// In-process session store.
#[derive(Default)]
pub struct MemorySessionStore {
    entries: Mutex<Entries>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(token: &str, user: &User) -> Self {
        let store = Self::new();
        // Serialising a `User` cannot fail.
        let _ = store.set(token, user);
        store
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Entries>> {
        self.entries
            .lock()
            .map_err(|_| MoodError::Session("session lock poisoned".to_string()))
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> Result<Session> {
        Ok(session_from_entries(&*self.lock()?))
    }

    fn set(&self, token: &str, user: &User) -> Result<()> {
        let entries = entries_for(token, user)?;
        *self.lock()? = entries;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.lock()?.clear();
        Ok(())
    }
}
