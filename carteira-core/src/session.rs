use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use carteira_types::CarteiraError;
use serde::{Deserialize, Serialize};

/// Persisted session token slot.
///
/// The dispatcher only reads the auth token. Writes come from the login, refresh,
/// and logout flows. Tokens are returned as stored; expiry is not checked here.
pub trait TokenStore: Send + Sync {
    /// Current bearer token, if any.
    fn get_auth_token(&self) -> Option<String>;

    /// Replace the bearer token.
    ///
    /// # Errors
    /// Returns `Storage` if the token cannot be persisted.
    fn set_auth_token(&self, token: &str) -> Result<(), CarteiraError>;

    /// Current refresh token, if the store keeps one.
    fn get_refresh_token(&self) -> Option<String> {
        None
    }

    /// Replace the refresh token. Stores without a refresh slot ignore it.
    ///
    /// # Errors
    /// Returns `Storage` if the token cannot be persisted.
    fn set_refresh_token(&self, token: &str) -> Result<(), CarteiraError> {
        let _ = token;
        Ok(())
    }

    /// Drop every stored token.
    ///
    /// # Errors
    /// Returns `Storage` if the cleared state cannot be persisted.
    fn clear(&self) -> Result<(), CarteiraError>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct StoredSession {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    auth_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    refresh_token: Option<String>,
}

/// Process-local token store.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    slot: RwLock<StoredSession>,
}

impl MemoryTokenStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with a bearer token.
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            slot: RwLock::new(StoredSession {
                auth_token: Some(token.into()),
                refresh_token: None,
            }),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn get_auth_token(&self) -> Option<String> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .auth_token
            .clone()
    }

    fn set_auth_token(&self, token: &str) -> Result<(), CarteiraError> {
        self.slot
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .auth_token = Some(token.to_string());
        Ok(())
    }

    fn get_refresh_token(&self) -> Option<String> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .refresh_token
            .clone()
    }

    fn set_refresh_token(&self, token: &str) -> Result<(), CarteiraError> {
        self.slot
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .refresh_token = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), CarteiraError> {
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = StoredSession::default();
        Ok(())
    }
}

/// Token store persisted as a small JSON document on disk.
///
/// The file is read once on open and rewritten on every change. A missing file is an
/// empty session; an unreadable or corrupt file is treated the same way, with a warning.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    slot: RwLock<StoredSession>,
}

impl FileTokenStore {
    /// Open (or lazily create) the session file at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let session = Self::load(&path);
        Self {
            path,
            slot: RwLock::new(session),
        }
    }

    /// Location of the session file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(path: &Path) -> StoredSession {
        let bytes = match std::fs::read(path) {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return StoredSession::default(),
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(target: "carteira::session", path = %path.display(), error = %_e, "failed to read session file");
                return StoredSession::default();
            }
        };
        serde_json::from_slice(&bytes).unwrap_or_else(|_e| {
            #[cfg(feature = "tracing")]
            tracing::warn!(target: "carteira::session", path = %path.display(), error = %_e, "corrupt session file ignored");
            StoredSession::default()
        })
    }

    fn persist(&self, session: &StoredSession) -> Result<(), CarteiraError> {
        if let Some(dir) = self.path.parent()
            && !dir.as_os_str().is_empty()
        {
            std::fs::create_dir_all(dir).map_err(|e| CarteiraError::storage(e.to_string()))?;
        }
        let json =
            serde_json::to_vec_pretty(session).map_err(|e| CarteiraError::storage(e.to_string()))?;
        std::fs::write(&self.path, json).map_err(|e| CarteiraError::storage(e.to_string()))
    }

    fn update<F>(&self, f: F) -> Result<(), CarteiraError>
    where
        F: FnOnce(&mut StoredSession),
    {
        let mut guard = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        let mut next = guard.clone();
        f(&mut next);
        self.persist(&next)?;
        *guard = next;
        Ok(())
    }
}

impl TokenStore for FileTokenStore {
    fn get_auth_token(&self) -> Option<String> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .auth_token
            .clone()
    }

    fn set_auth_token(&self, token: &str) -> Result<(), CarteiraError> {
        self.update(|s| s.auth_token = Some(token.to_string()))
    }

    fn get_refresh_token(&self) -> Option<String> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .refresh_token
            .clone()
    }

    fn set_refresh_token(&self, token: &str) -> Result<(), CarteiraError> {
        self.update(|s| s.refresh_token = Some(token.to_string()))
    }

    fn clear(&self) -> Result<(), CarteiraError> {
        self.update(|s| *s = StoredSession::default())
    }
}
