//! Durable client-side session storage.
//!
//! The session is kept as a flat string key/value record:
//! `isAuthenticated`, `userRole`, `userName` and `usuario` (the matched user
//! as JSON). Backends only move that record around.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use planes_core::model::{Role, Session, UserRecord};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const KEY_IS_AUTHENTICATED: &str = "isAuthenticated";
pub const KEY_USER_ROLE: &str = "userRole";
pub const KEY_USER_NAME: &str = "userName";
pub const KEY_USUARIO: &str = "usuario";

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionStoreError {
    #[error("session storage I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("session storage is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("stored session is inconsistent: {0}")]
    Corrupt(String),
    #[error("session storage lock poisoned")]
    Poisoned,
}

/// Load/save/clear for the persisted session.
pub trait SessionStore: Send + Sync {
    /// The persisted session, `None` when logged out or never saved.
    ///
    /// # Errors
    ///
    /// Returns `SessionStoreError` when the record cannot be read or claims an
    /// authenticated session without a user name.
    fn load(&self) -> Result<Option<Session>, SessionStoreError>;

    /// Persist the session of `user`.
    ///
    /// # Errors
    ///
    /// Returns `SessionStoreError` when the record cannot be written.
    fn save(&self, user: &UserRecord) -> Result<(), SessionStoreError>;

    /// Forget the session. Clearing an empty store succeeds.
    ///
    /// # Errors
    ///
    /// Returns `SessionStoreError` when existing data cannot be removed.
    fn clear(&self) -> Result<(), SessionStoreError>;
}

type Record = BTreeMap<String, String>;

#[derive(Serialize, Deserialize)]
struct Usuario {
    name: String,
    role: Role,
    pin: u32,
}

fn encode(user: &UserRecord) -> Result<Record, SessionStoreError> {
    let usuario = serde_json::to_string(&Usuario {
        name: user.name.clone(),
        role: user.role,
        pin: user.pin,
    })?;
    Ok(Record::from([
        (KEY_IS_AUTHENTICATED.to_string(), "true".to_string()),
        (KEY_USER_ROLE.to_string(), user.role.as_str().to_string()),
        (KEY_USER_NAME.to_string(), user.name.clone()),
        (KEY_USUARIO.to_string(), usuario),
    ]))
}

fn decode(record: &Record) -> Result<Option<Session>, SessionStoreError> {
    if record.get(KEY_IS_AUTHENTICATED).map(String::as_str) != Some("true") {
        return Ok(None);
    }

    let name = record
        .get(KEY_USER_NAME)
        .cloned()
        .unwrap_or_default();
    let role: Role = record
        .get(KEY_USER_ROLE)
        .ok_or_else(|| SessionStoreError::Corrupt("missing userRole".into()))?
        .parse()
        .map_err(|e| SessionStoreError::Corrupt(format!("{e}")))?;

    Session::authenticated(name, role)
        .map(Some)
        .map_err(|e| SessionStoreError::Corrupt(e.to_string()))
}

/// Session store kept in memory; lost when the process exits.
#[derive(Default)]
pub struct InMemorySessionStore {
    record: Mutex<Record>,
}

impl InMemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw value for `key`, as another client reading the storage would see it.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.record.lock().ok()?.get(key).cloned()
    }
}

impl SessionStore for InMemorySessionStore {
    fn load(&self) -> Result<Option<Session>, SessionStoreError> {
        let guard = self.record.lock().map_err(|_| SessionStoreError::Poisoned)?;
        decode(&guard)
    }

    fn save(&self, user: &UserRecord) -> Result<(), SessionStoreError> {
        let record = encode(user)?;
        let mut guard = self.record.lock().map_err(|_| SessionStoreError::Poisoned)?;
        *guard = record;
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionStoreError> {
        let mut guard = self.record.lock().map_err(|_| SessionStoreError::Poisoned)?;
        guard.clear();
        Ok(())
    }
}

/// Session store backed by a JSON object file.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_record(&self) -> Result<Record, SessionStoreError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(Record::new()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Record::new()),
            Err(err) => Err(err.into()),
        }
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<Session>, SessionStoreError> {
        decode(&self.read_record()?)
    }

    fn save(&self, user: &UserRecord) -> Result<(), SessionStoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let body = serde_json::to_string_pretty(&encode(user)?)?;
        fs::write(&self.path, body)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionStoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
