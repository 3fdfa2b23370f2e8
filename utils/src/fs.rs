//! Atomic persistence for small credential files.
//!
//! Temp file + rename in the destination directory. Files are created
//! owner-only on Unix before any bytes are written; the token store relies
//! on that ordering.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

pub fn atomic_write_sensitive(path: impl AsRef<Path>, bytes: &[u8]) -> io::Result<()> {
    let path = path.as_ref();
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(parent)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(tmp.path(), fs::Permissions::from_mode(0o600))?;
    }

    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;

    if let Err(err) = tmp.persist(path) {
        // Windows refuses rename-over-existing; replace and retry once.
        if path.exists() {
            fs::remove_file(path)?;
            if let Err(retry_err) = err.file.persist(path) {
                return Err(retry_err.error);
            }
        } else {
            return Err(err.error);
        }
    }

    Ok(())
}
