//! Generated header entity

use std::path::{Path, PathBuf};

use crate::domain::value_objects::ContentHash;

use super::EntryPointDeclaration;

/// One JNI header aggregating every native declaration of one owning class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedHeader {
    target_path: PathBuf,
    owning_class: String,
    declarations: Vec<EntryPointDeclaration>,
    content: String,
    content_hash: ContentHash,
}

impl GeneratedHeader {
    /// `declarations` must already be in render order
    pub fn new(
        target_path: PathBuf,
        owning_class: impl Into<String>,
        declarations: Vec<EntryPointDeclaration>,
        content: String,
    ) -> Self {
        let content_hash = ContentHash::from_content(&content);
        Self {
            target_path,
            owning_class: owning_class.into(),
            declarations,
            content,
            content_hash,
        }
    }

    /// Path relative to the header output directory (just the file name)
    pub fn target_path(&self) -> &Path {
        &self.target_path
    }

    pub fn file_name(&self) -> String {
        self.target_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn owning_class(&self) -> &str {
        &self.owning_class
    }

    pub fn declarations(&self) -> &[EntryPointDeclaration] {
        &self.declarations
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn content_hash(&self) -> &ContentHash {
        &self.content_hash
    }

    /// Move the header to its final location under `dir`
    pub fn placed_in(mut self, dir: &Path) -> Self {
        self.target_path = dir.join(self.file_name());
        self
    }
}
