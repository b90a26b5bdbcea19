//! Advisory run lock
//!
//! One pipeline run per project at a time. The lock is an `fs2` exclusive
//! lock on a file in the project root and is released when the guard drops.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tracing::debug;

use crate::error::{BridgeError, BridgeResult};

/// Name of the lock file in the project root
pub const LOCK_FILE_NAME: &str = ".bridgewright.lock";

/// Held exclusive lock
#[derive(Debug)]
pub struct RunLock {
    file: File,
    path: PathBuf,
}

impl RunLock {
    /// Try to take the lock without blocking
    pub fn acquire(project_root: &Path) -> BridgeResult<Self> {
        fs::create_dir_all(project_root)?;
        let path = project_root.join(LOCK_FILE_NAME);
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)?;
        file.try_lock_exclusive()
            .map_err(|_| BridgeError::PipelineBusy { lock: path.clone() })?;
        debug!(lock = %path.display(), "acquired run lock");
        Ok(Self { file, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for RunLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn second_lock_is_busy() {
        let dir = tempdir().unwrap();
        let held = RunLock::acquire(dir.path()).unwrap();
        let err = RunLock::acquire(dir.path()).unwrap_err();
        assert!(matches!(err, BridgeError::PipelineBusy { .. }));
        drop(held);
        assert!(RunLock::acquire(dir.path()).is_ok());
    }

    #[test]
    fn lock_file_lives_in_project_root() {
        let dir = tempdir().unwrap();
        let lock = RunLock::acquire(dir.path()).unwrap();
        assert_eq!(lock.path(), dir.path().join(LOCK_FILE_NAME));
    }
}
