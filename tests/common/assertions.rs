//! Custom assertion macros for bridgewright tests.

use std::path::Path;

/// Assert that command output (stdout or stderr) contains a string
#[macro_export]
macro_rules! assert_output_contains {
    ($result:expr, $needle:expr) => {
        let combined = $result.combined_output();
        assert!(
            combined.contains($needle),
            "Expected output to contain {:?}\n\nstdout:\n{}\n\nstderr:\n{}",
            $needle,
            $result.stdout,
            $result.stderr
        );
    };
}

/// Assert that a project file exists and contains a string
#[macro_export]
macro_rules! assert_file_contains {
    ($project:expr, $path:expr, $needle:expr) => {
        let full = $project.path($path);
        assert!(full.exists(), "Expected file to exist: {}", full.display());
        let content = std::fs::read_to_string(&full).unwrap();
        assert!(
            content.contains($needle),
            "Expected {} to contain {:?}\n\nActual:\n{}",
            $path,
            $needle,
            content
        );
    };
}

/// Sorted file names directly under `dir`
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(|e| e.ok())
                .filter(|e| e.path().is_file())
                .map(|e| e.file_name().to_string_lossy().to_string())
                .collect()
        })
        .unwrap_or_default();
    names.sort();
    names
}
