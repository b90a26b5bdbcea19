//! Header staleness detection
//!
//! Compares freshly rendered headers against what is on disk without writing
//! anything. Used by `check` to tell whether the native build would compile
//! against headers that no longer match the declarations.

use std::collections::BTreeMap;

use serde::Serialize;
use similar::{ChangeTag, TextDiff};

use crate::domain::entities::GeneratedHeader;

/// State of one header file name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum HeaderStatus {
    UpToDate,
    /// Expected but absent on disk
    Missing,
    /// Present with different content
    Stale {
        additions: usize,
        deletions: usize,
        diff: String,
    },
    /// On disk but no longer backed by any declaration
    Orphan,
}

/// Drift report entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderDrift {
    pub file_name: String,
    #[serde(flatten)]
    pub status: HeaderStatus,
}

impl HeaderDrift {
    pub fn is_current(&self) -> bool {
        matches!(self.status, HeaderStatus::UpToDate)
    }
}

/// Compare rendered headers with on-disk contents keyed by file name.
///
/// Result is sorted by file name.
pub fn compare_headers(
    rendered: &[GeneratedHeader],
    on_disk: &BTreeMap<String, String>,
) -> Vec<HeaderDrift> {
    let mut report: BTreeMap<String, HeaderStatus> = BTreeMap::new();

    for header in rendered {
        let name = header.file_name();
        let status = match on_disk.get(&name) {
            None => HeaderStatus::Missing,
            Some(existing) if existing == header.content() => HeaderStatus::UpToDate,
            Some(existing) => stale(&name, existing, header.content()),
        };
        report.insert(name, status);
    }

    for name in on_disk.keys() {
        report
            .entry(name.clone())
            .or_insert(HeaderStatus::Orphan);
    }

    report
        .into_iter()
        .map(|(file_name, status)| HeaderDrift { file_name, status })
        .collect()
}

fn stale(name: &str, old: &str, new: &str) -> HeaderStatus {
    let diff = TextDiff::from_lines(old, new);
    let mut additions = 0;
    let mut deletions = 0;
    for change in diff.iter_all_changes() {
        match change.tag() {
            ChangeTag::Insert => additions += 1,
            ChangeTag::Delete => deletions += 1,
            ChangeTag::Equal => {}
        }
    }
    let unified = diff
        .unified_diff()
        .context_radius(2)
        .header(&format!("a/{}", name), &format!("b/{}", name))
        .to_string();
    HeaderStatus::Stale {
        additions,
        deletions,
        diff: unified,
    }
}
