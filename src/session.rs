//! Signed-in identity, persisted between invocations.
//!
//! The session file lives in the data directory and holds the user id that
//! every stored row is keyed by. Signing out removes the file but leaves the
//! rows in place; the next sign-in starts a fresh identity.

use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use uuid::Uuid;

/// The identity every storage operation acts on behalf of.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: Uuid,
    #[serde(default)]
    pub nickname: Option<String>,
}

/// Reads and writes the session file.
///
/// # Example
///
/// ```no_run
/// use moodwell::session::SessionStore;
/// use std::path::Path;
///
/// let store = SessionStore::new(Path::new("/tmp/moodwell/session.json"));
/// let session = store.sign_in(Some("river"))?;
/// assert_eq!(store.current()?.user_id, session.user_id);
///
/// store.sign_out()?;
/// assert!(store.current().is_err());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Signs in, reusing the current identity if there is one.
    ///
    /// A given `nickname` replaces the stored one; a blank nickname is ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the session file cannot be read or written.
    pub fn sign_in(&self, nickname: Option<&str>) -> AppResult<Session> {
        let nickname = nickname
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string);

        let session = match self.load()? {
            Some(mut existing) => {
                debug!("Reusing identity {}", existing.user_id);
                if nickname.is_some() {
                    existing.nickname = nickname;
                }
                existing
            }
            None => Session {
                user_id: Uuid::new_v4(),
                nickname,
            },
        };

        self.save(&session)?;
        info!("Signed in as {}", session.user_id);
        Ok(session)
    }

    /// Removes the session file. Signing out twice is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be removed.
    pub fn sign_out(&self) -> AppResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!("Signed out");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Returns the signed-in session.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotAuthenticated` if nobody is signed in.
    pub fn current(&self) -> AppResult<Session> {
        self.load()?.ok_or(AppError::NotAuthenticated)
    }

    fn load(&self) -> AppResult<Option<Session>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }

    fn save(&self, session: &Session) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(session)?)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> SessionStore {
        SessionStore::new(&dir.path().join("nested").join("session.json"))
    }

    #[test]
    fn test_current_without_sign_in_is_not_authenticated() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            store(&dir).current(),
            Err(AppError::NotAuthenticated)
        ));
    }

    #[test]
    fn test_sign_in_persists_and_reuses_identity() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        let first = store.sign_in(Some("  river ")).unwrap();
        assert_eq!(first.nickname.as_deref(), Some("river"));

        let second = store.sign_in(None).unwrap();
        assert_eq!(second.user_id, first.user_id);
        assert_eq!(second.nickname.as_deref(), Some("river"));

        let renamed = store.sign_in(Some("sky")).unwrap();
        assert_eq!(renamed.user_id, first.user_id);
        assert_eq!(store.current().unwrap(), renamed);
    }

    #[test]
    fn test_sign_out_forgets_identity() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        let before = store.sign_in(None).unwrap();
        store.sign_out().unwrap();
        store.sign_out().unwrap();
        assert!(store.current().is_err());

        let after = store.sign_in(None).unwrap();
        assert_ne!(before.user_id, after.user_id);
    }

    #[test]
    fn test_corrupt_session_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "not json").unwrap();

        let result = SessionStore::new(&path).current();
        assert!(matches!(result, Err(AppError::Serialization(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_session_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        SessionStore::new(&path).sign_in(None).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
