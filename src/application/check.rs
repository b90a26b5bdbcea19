//! Check Use Case
//!
//! Header staleness report: renders headers in memory from the current
//! declarations and compares them with the header directory. Writes nothing.

use std::path::Path;

use tracing::debug;

use crate::domain::services::{compare_headers, render_headers, HeaderDrift};
use crate::domain::value_objects::PackagePrefix;
use crate::error::{BridgeError, BridgeResult};

use super::header_generator::HeaderDir;
use super::scanner::scan_declarations;

/// Result of the check operation
#[derive(Debug, Clone, Default)]
pub struct HeaderCheck {
    /// One entry per header file name, sorted
    pub drift: Vec<HeaderDrift>,
    /// Number of native declarations scanned
    pub declarations: usize,
}

impl HeaderCheck {
    /// Every expected header is present and current, and nothing is orphaned
    pub fn is_clean(&self) -> bool {
        self.drift.iter().all(HeaderDrift::is_current)
    }

    /// Entries needing regeneration
    pub fn out_of_date(&self) -> impl Iterator<Item = &HeaderDrift> {
        self.drift.iter().filter(|d| !d.is_current())
    }
}

/// Compare the headers the scanned declarations would produce with `dir`
pub fn check_headers(
    source_root: &Path,
    prefix: &PackagePrefix,
    dir: &HeaderDir,
) -> BridgeResult<HeaderCheck> {
    let scan = scan_declarations(source_root, prefix)?;
    let rendered = render_headers(&scan.declarations);
    let on_disk = dir.read_existing().map_err(BridgeError::Io)?;
    debug!(
        rendered = rendered.len(),
        on_disk = on_disk.len(),
        "comparing headers"
    );

    Ok(HeaderCheck {
        drift: compare_headers(&rendered, &on_disk),
        declarations: scan.declarations.len(),
    })
}
