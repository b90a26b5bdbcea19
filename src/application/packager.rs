//! Artifact Packager
//!
//! Places the built native library (and any configured extra resources) into
//! the host's resource bundle at the path the runtime loader looks up.

use std::io;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, info};

use crate::domain::entities::{BuildArtifact, PackagedResource};
use crate::domain::policies::{PackagingConflictPolicy, ResourceSlots, SlotOutcome};
use crate::domain::ports::{PipelineEvent, PipelineEventSink};
use crate::error::{BridgeError, BridgeResult};
use crate::infrastructure::fs::atomic_copy;

/// Handle to the host resource bundle root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceBundle {
    root: PathBuf,
}

impl ResourceBundle {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute location of a bundle-relative file path.
    ///
    /// Paths that are absolute, climb out with `..` or name no file are a
    /// `PackagingFailure`: nothing outside the bundle root is ever written.
    pub fn slot_path(&self, relative: &Path) -> BridgeResult<PathBuf> {
        let names_file = relative.components().any(|c| matches!(c, Component::Normal(_)));
        if !names_file || !stays_inside(relative) {
            return Err(BridgeError::PackagingFailure {
                path: self.root.join(relative),
                source: io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("'{}' escapes the resource bundle", relative.display()),
                ),
            });
        }
        Ok(self.root.join(relative))
    }
}

/// True when joining `relative` onto a directory cannot leave that directory
pub fn stays_inside(relative: &Path) -> bool {
    relative
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

/// Result of packaging
#[derive(Debug, Clone, Default)]
pub struct PackagingOutcome {
    /// Winners written to the bundle, sorted by relative path
    pub packaged: Vec<PackagedResource>,
    /// Candidates that lost their slot to the policy
    pub dropped: Vec<PackagedResource>,
}

/// Bundle candidate for the freshly built library under `resource_dir`
pub fn artifact_candidate(artifact: &BuildArtifact, resource_dir: &Path) -> PackagedResource {
    let file_name = artifact
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_default();
    PackagedResource::new(resource_dir.join(file_name), artifact.clone())
}

/// Resolve candidates by `policy` and copy every winner into the bundle.
///
/// Candidates are staged in order, so with `LastWins` later entries take
/// precedence. Whatever already sits at a winner's path is overwritten.
pub fn package_artifact(
    bundle: &ResourceBundle,
    candidates: Vec<PackagedResource>,
    policy: PackagingConflictPolicy,
    events: &dyn PipelineEventSink,
) -> BridgeResult<PackagingOutcome> {
    let mut slots = ResourceSlots::new(policy);
    for candidate in candidates {
        let source = candidate.source_file().to_path_buf();
        let path = candidate.relative_path().to_path_buf();
        match slots.stage(candidate) {
            SlotOutcome::Claimed => {}
            SlotOutcome::Replaced { dropped } => {
                debug!(
                    path = %path.display(),
                    dropped = %dropped.source_file().display(),
                    policy = %policy,
                    "duplicate resource replaced"
                );
                events.on_event(PipelineEvent::ResourceDropped {
                    path,
                    source: dropped.source_file().to_path_buf(),
                });
            }
            SlotOutcome::Dropped => {
                debug!(
                    path = %path.display(),
                    dropped = %source.display(),
                    policy = %policy,
                    "duplicate resource ignored"
                );
                events.on_event(PipelineEvent::ResourceDropped { path, source });
            }
        }
    }

    let (packaged, dropped) = slots.into_parts();
    let targets = packaged
        .iter()
        .map(|resource| bundle.slot_path(resource.relative_path()))
        .collect::<BridgeResult<Vec<_>>>()?;
    for (resource, target) in packaged.iter().zip(targets) {
        let hash = atomic_copy(resource.source_file(), &target).map_err(|source| {
            BridgeError::PackagingFailure {
                path: target.clone(),
                source,
            }
        })?;
        info!(
            resource = %resource.relative_path().display(),
            hash = hash.short(),
            "packaged resource"
        );
        events.on_event(PipelineEvent::ResourcePackaged {
            path: target,
            hash,
        });
    }

    Ok(PackagingOutcome { packaged, dropped })
}
