//! Run lock preventing overlapping syncs against the same index
//!
//! The lock is an advisory OS lock on `<index>.lock`. The operating system
//! drops it when the holding process exits for any reason, so a killed or
//! crashed run never blocks later ones. The file itself stays on disk and only
//! records the pid of the last holder.

use crate::ingest::error::IngestError;
use std::fs::{self, File, OpenOptions, TryLockError};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Held for the duration of a run, released on drop
#[derive(Debug)]
pub struct RunLock {
    path: PathBuf,
    file: File,
}

impl RunLock {
    /// Take the lock, failing if another run holds it
    pub fn acquire(path: &Path) -> Result<Self, IngestError> {
        let io_error = |source| IngestError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| IngestError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(path)
            .map_err(io_error)?;

        match file.try_lock() {
            Ok(()) => {}
            Err(TryLockError::WouldBlock) => return Err(IngestError::Locked(path.to_path_buf())),
            Err(TryLockError::Error(source)) => return Err(io_error(source)),
        }

        // pid is informational only
        if let Err(err) = file.set_len(0).and_then(|()| writeln!(file, "{}", std::process::id())) {
            warn!("Failed to record pid in {}: {}", path.display(), err);
        }
        debug!("Acquired run lock {}", path.display());

        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }
}

impl Drop for RunLock {
    fn drop(&mut self) {
        if let Err(err) = self.file.unlock() {
            warn!("Failed to release run lock {}: {}", self.path.display(), err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_second_acquire_fails_until_released() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("articles.md.lock");

        let lock = RunLock::acquire(&path).unwrap();
        assert!(path.exists());
        assert!(matches!(
            RunLock::acquire(&path),
            Err(IngestError::Locked(_))
        ));

        drop(lock);
        assert!(RunLock::acquire(&path).is_ok());
    }

    #[test]
    fn test_leftover_lock_file_is_not_held() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("articles.md.lock");
        // What a killed run leaves behind
        std::fs::write(&path, "999999\n").unwrap();

        let _lock = RunLock::acquire(&path).unwrap();

        let pid = std::fs::read_to_string(&path).unwrap();
        assert_eq!(pid.trim(), std::process::id().to_string());
    }
}
