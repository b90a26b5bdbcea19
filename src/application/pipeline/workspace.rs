//! Run workspace
//!
//! Scopes one pipeline run: holds the project run lock for its lifetime.

use std::path::{Path, PathBuf};

use crate::error::BridgeResult;
use crate::infrastructure::fs::RunLock;

pub struct Workspace {
    root: PathBuf,
    lock: RunLock,
}

impl Workspace {
    /// Acquire the project lock; fails fast with `PipelineBusy`
    pub fn open(root: &Path) -> BridgeResult<Self> {
        let lock = RunLock::acquire(root)?;
        Ok(Self {
            root: root.to_path_buf(),
            lock,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn lock_path(&self) -> &Path {
        self.lock.path()
    }
}
