//! Build artifact and packaged resource entities

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::value_objects::PlatformTag;

/// A native binary produced by the compiler/linker stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildArtifact {
    /// Native source directory the binary was built from
    pub source_path: PathBuf,
    /// Location of the produced binary
    pub built_binary_path: PathBuf,
    pub target_platform_tag: PlatformTag,
}

impl BuildArtifact {
    pub fn new(source_path: PathBuf, built_binary_path: PathBuf, platform: PlatformTag) -> Self {
        Self {
            source_path,
            built_binary_path,
            target_platform_tag: platform,
        }
    }

    pub fn file_name(&self) -> Option<&std::ffi::OsStr> {
        self.built_binary_path.file_name()
    }
}

/// Final placement of an artifact inside the resource bundle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackagedResource {
    /// Path relative to the bundle root; the host loader's lookup key
    pub resource_relative_path: PathBuf,
    pub source_artifact: BuildArtifact,
}

impl PackagedResource {
    pub fn new(resource_relative_path: impl Into<PathBuf>, source_artifact: BuildArtifact) -> Self {
        Self {
            resource_relative_path: resource_relative_path.into(),
            source_artifact,
        }
    }

    pub fn relative_path(&self) -> &Path {
        &self.resource_relative_path
    }

    pub fn source_file(&self) -> &Path {
        &self.source_artifact.built_binary_path
    }
}
