//! Header Generator
//!
//! Turns a declaration set into JNI headers on disk. The output directory is
//! treated as owned: every `*.h` in it is replaced by the freshly rendered set.
//!
//! ## Flow
//!
//! 1. Render every header in memory
//! 2. Write the set into a staging directory beside the output directory
//! 3. Delete the previous `*.h` files
//! 4. Move the staged headers into place (rolled back on failure)

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::domain::entities::{DeclarationSet, GeneratedHeader};
use crate::domain::ports::{PipelineEvent, PipelineEventSink};
use crate::domain::services::render_headers;
use crate::error::{BridgeError, BridgeResult};

/// Handle to the header output directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderDir {
    path: PathBuf,
}

/// Outcome of one generation run
#[derive(Debug, Clone, Default)]
pub struct HeaderGeneration {
    /// Headers now on disk, with absolute target paths
    pub headers: Vec<GeneratedHeader>,
    /// Previous headers removed by the clean-slate step
    pub deleted: Vec<PathBuf>,
}

impl HeaderDir {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `*.h` files currently in the directory, sorted; empty if it does not exist
    pub fn existing_headers(&self) -> io::Result<Vec<PathBuf>> {
        let entries = match fs::read_dir(&self.path) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };
        let mut headers = Vec::new();
        for entry in entries {
            let entry = entry?;
            let path = entry.path();
            if entry.file_type()?.is_file() && path.extension().map(|e| e == "h").unwrap_or(false)
            {
                headers.push(path);
            }
        }
        headers.sort();
        Ok(headers)
    }

    /// Existing header contents keyed by file name
    pub fn read_existing(&self) -> io::Result<BTreeMap<String, String>> {
        let mut contents = BTreeMap::new();
        for path in self.existing_headers()? {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            contents.insert(name, fs::read_to_string(&path)?);
        }
        Ok(contents)
    }

    fn staging_parent(&self) -> &Path {
        self.path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(&self.path)
    }
}

fn write_failure(path: &Path) -> impl FnOnce(io::Error) -> BridgeError + '_ {
    move |source| BridgeError::HeaderWriteFailure {
        path: path.to_path_buf(),
        source,
    }
}

/// Regenerate the header directory from `declarations`
pub fn generate_headers(
    dir: &HeaderDir,
    declarations: &DeclarationSet,
    events: &dyn PipelineEventSink,
) -> BridgeResult<HeaderGeneration> {
    let rendered = render_headers(declarations);

    fs::create_dir_all(dir.path()).map_err(write_failure(dir.path()))?;
    let staging = tempfile::Builder::new()
        .prefix(".bridgewright-headers-")
        .tempdir_in(dir.staging_parent())
        .map_err(write_failure(dir.staging_parent()))?;

    for header in &rendered {
        let staged = staging.path().join(header.target_path());
        fs::write(&staged, header.content()).map_err(write_failure(&staged))?;
    }

    let mut deleted = Vec::new();
    for old in dir.existing_headers().map_err(write_failure(dir.path()))? {
        fs::remove_file(&old).map_err(write_failure(&old))?;
        info!(header = %old.display(), "deleted header");
        events.on_event(PipelineEvent::HeaderDeleted { path: old.clone() });
        deleted.push(old);
    }

    let mut placed: Vec<PathBuf> = Vec::new();
    for header in &rendered {
        let staged = staging.path().join(header.target_path());
        let target = dir.path().join(header.target_path());
        if let Err(source) = place(&staged, &target) {
            rollback(&placed);
            return Err(BridgeError::HeaderWriteFailure {
                path: target,
                source,
            });
        }
        placed.push(target);
    }

    let headers: Vec<GeneratedHeader> = rendered
        .into_iter()
        .map(|h| h.placed_in(dir.path()))
        .collect();
    for header in &headers {
        info!(
            header = %header.target_path().display(),
            hash = header.content_hash().short(),
            "generated header"
        );
        events.on_event(PipelineEvent::HeaderGenerated {
            path: header.target_path().to_path_buf(),
            hash: header.content_hash().clone(),
        });
    }

    Ok(HeaderGeneration { headers, deleted })
}

fn place(staged: &Path, target: &Path) -> io::Result<()> {
    match fs::rename(staged, target) {
        Ok(()) => Ok(()),
        // staging on another device
        Err(_) => fs::copy(staged, target).map(|_| ()),
    }
}

fn rollback(placed: &[PathBuf]) {
    for path in placed {
        if let Err(e) = fs::remove_file(path) {
            debug!(header = %path.display(), error = %e, "rollback could not remove header");
        }
    }
}
