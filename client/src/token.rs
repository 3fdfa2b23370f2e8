//! Bearer token persistence.
//!
//! One opaque token in one file under the platform data directory. The token
//! has no client-side expiry; validity is whatever the server's next 401
//! says. Storage failures are surfaced unmodified as `io::Error`.

use std::io;
use std::path::{Path, PathBuf};

use appcenter_utils::fs::atomic_write_sensitive;

const APP_DIR: &str = "appcenter";
const TOKEN_FILE: &str = "token";

#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    /// Store rooted at the platform-local data directory, or `None` when the
    /// platform has no such directory.
    #[must_use]
    pub fn new() -> Option<Self> {
        dirs::data_local_dir().map(|dir| Self::at(dir.join(APP_DIR).join(TOKEN_FILE)))
    }

    #[must_use]
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The stored token, or an empty string when none has been saved.
    pub fn get(&self) -> io::Result<String> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => Ok(raw.trim_end_matches(['\r', '\n']).to_string()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(String::new()),
            Err(err) => Err(err),
        }
    }

    pub fn set(&self, token: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        atomic_write_sensitive(&self.path, token.as_bytes())
    }

    /// Remove the stored token. Absence is not an error.
    pub fn clear(&self) -> io::Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TokenStore;

    fn scratch_store() -> (tempfile::TempDir, TokenStore) {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = TokenStore::at(dir.path().join("nested").join("token"));
        (dir, store)
    }

    #[test]
    fn absent_token_reads_as_empty_string() {
        let (_dir, store) = scratch_store();
        assert_eq!(store.get().unwrap(), "");
    }

    #[test]
    fn set_then_get_round_trips() {
        let (_dir, store) = scratch_store();
        store.set("sekrit-token").unwrap();
        assert_eq!(store.get().unwrap(), "sekrit-token");
    }

    #[test]
    fn set_creates_parent_directories() {
        let (_dir, store) = scratch_store();
        store.set("abc").unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn trailing_newline_is_trimmed() {
        let (_dir, store) = scratch_store();
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(store.path(), "edited-by-hand\n").unwrap();
        assert_eq!(store.get().unwrap(), "edited-by-hand");
    }

    #[test]
    fn clear_is_idempotent() {
        let (_dir, store) = scratch_store();
        store.clear().unwrap();
        store.set("abc").unwrap();
        store.clear().unwrap();
        store.clear().unwrap();
        assert_eq!(store.get().unwrap(), "");
    }
}
