//! Declaration Scanner
//!
//! Discovers native-bound entry points in the managed source tree.
//! Pure read: nothing outside `root/<prefix>` is opened and nothing is written.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use tracing::{debug, warn};

use crate::domain::entities::{DeclarationSet, EntryPointDeclaration};
use crate::domain::services::assign_symbols;
use crate::domain::value_objects::{throwable_classes, PackagePrefix};
use crate::error::{BridgeError, BridgeResult};
use crate::parser::read_java_file;

/// Declarations found under one package prefix
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    pub declarations: DeclarationSet,
    /// Java files read, in traversal order
    pub files: Vec<PathBuf>,
}

/// Scan `root` for native declarations under `prefix`.
///
/// A prefix selecting no `.java` file is an error; files without any native
/// method yield an empty set.
pub fn scan_declarations(root: &Path, prefix: &PackagePrefix) -> BridgeResult<ScanResult> {
    let subtree = root.join(prefix.relative_dir());
    let files = java_files(&subtree)?;
    if files.is_empty() {
        return Err(BridgeError::NoSourcesMatched {
            root: root.to_path_buf(),
            prefix: prefix.to_string(),
        });
    }

    // every unit is read before any is resolved: a simple name may refer to
    // a package member declared in another file
    let mut units = Vec::with_capacity(files.len());
    for file in &files {
        let unit = read_java_file(file)?;
        if !prefix.contains_package(unit.package()) {
            warn!(
                file = %file.display(),
                package = %unit.package(),
                "declared package is outside the scanned prefix"
            );
        }
        units.push(unit);
    }
    let project_types: BTreeSet<String> = units
        .iter()
        .flat_map(|unit| unit.types().iter().cloned())
        .collect();

    let mut declarations = DeclarationSet::new();
    let mut superclasses = BTreeMap::new();
    for (file, unit) in files.iter().zip(units) {
        let unit = unit.resolve(&project_types);
        debug!(file = %file.display(), natives = unit.methods.len(), "parsed");
        superclasses.extend(unit.supertypes);
        for (method, symbol) in assign_symbols(unit.methods) {
            declarations.insert(EntryPointDeclaration::new(method, symbol, file.clone()))?;
        }
    }

    Ok(ScanResult {
        declarations: declarations.with_throwables(throwable_classes(&superclasses)),
        files,
    })
}

fn java_files(subtree: &Path) -> BridgeResult<Vec<PathBuf>> {
    if !subtree.is_dir() {
        return Ok(Vec::new());
    }

    let walker = WalkBuilder::new(subtree)
        .hidden(false)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .ignore(false)
        .parents(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| {
            BridgeError::Io(std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))
        })?;
        let path = entry.path();
        let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
        if is_file && path.extension().map(|ext| ext == "java").unwrap_or(false) {
            files.push(path.to_path_buf());
        }
    }
    Ok(files)
}
