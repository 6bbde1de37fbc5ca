//! Persisted-session abstraction. The browser original keeps the token in
//! origin-scoped localStorage; here the same contract is an injectable trait
//! so the client and the navigation guard depend on an interface rather than
//! ambient global storage.
//!
//! Reads and writes are single synchronous operations, which is all the
//! interleaving model needs: a route transition and an in-flight request may
//! both touch the token, but never observe a torn value.

use crate::session::types::Session;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::warn;

pub trait SessionStore: Send + Sync {
    /// Returns the persisted session, if any.
    fn session(&self) -> Option<Session>;

    /// Replaces the persisted session; both fields change together.
    fn store(&self, session: Session);

    /// Removes the persisted session. Returns whether an access token was
    /// actually present, so forced-logout side effects stay idempotent.
    fn clear(&self) -> bool;

    fn access_token(&self) -> Option<String> {
        self.session().map(|session| session.access_token)
    }
}

/// In-memory store; the default for library use and the test double.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Option<Session>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn session(&self) -> Option<Session> {
        self.inner.lock().map_or(None, |guard| guard.clone())
    }

    fn store(&self, session: Session) {
        if let Ok(mut guard) = self.inner.lock() {
            *guard = Some(session);
        }
    }

    fn clear(&self) -> bool {
        self.inner
            .lock()
            .map_or(false, |mut guard| guard.take().is_some())
    }
}

/// JSON document on disk, surviving restarts the way localStorage survives
/// reloads. Corrupt or missing files read as "no session"; writes replace the
/// whole file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }
}

impl SessionStore for FileStore {
    fn session(&self) -> Option<Session> {
        let _guard = self.lock.lock().ok()?;
        let bytes = fs::read(&self.path).ok()?;
        serde_json::from_slice(&bytes).ok()
    }

    fn store(&self, session: Session) {
        let Ok(_guard) = self.lock.lock() else {
            return;
        };
        let result = serde_json::to_vec_pretty(&session)
            .map_err(|err| format!("encode: {err}"))
            .and_then(|bytes| {
                if let Some(parent) = self.path.parent() {
                    if !parent.as_os_str().is_empty() {
                        fs::create_dir_all(parent).map_err(|err| format!("mkdir: {err}"))?;
                    }
                }
                fs::write(&self.path, bytes).map_err(|err| format!("write: {err}"))
            });
        if let Err(err) = result {
            warn!("failed to persist session to {}: {err}", self.path.display());
        }
    }

    fn clear(&self) -> bool {
        let Ok(_guard) = self.lock.lock() else {
            return false;
        };
        let had_session = fs::read(&self.path)
            .ok()
            .and_then(|bytes| serde_json::from_slice::<Session>(&bytes).ok())
            .is_some();
        if let Err(err) = fs::remove_file(&self.path) {
            if err.kind() != std::io::ErrorKind::NotFound {
                warn!("failed to remove session file {}: {err}", self.path.display());
            }
        }
        had_session
    }
}
