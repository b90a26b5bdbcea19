//! Atomic file placement
//!
//! Content goes to a temp file in the target directory first and is then
//! persisted over the target, so readers only ever see the old or the new file.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::domain::value_objects::ContentHash;

fn target_dir(path: &Path) -> io::Result<&Path> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent)?;
    Ok(parent)
}

/// Atomically write `content` to `path`, creating parent directories
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let mut tmp = NamedTempFile::new_in(target_dir(path)?)?;
    tmp.write_all(content)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Atomically copy `source` over `target`; returns the hash of the copied bytes
pub fn atomic_copy(source: &Path, target: &Path) -> io::Result<ContentHash> {
    let bytes = fs::read(source)?;
    atomic_write(target, &bytes)?;
    Ok(ContentHash::from_bytes(&bytes))
}
