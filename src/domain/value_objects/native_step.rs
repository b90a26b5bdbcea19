//! Native toolchain step value object

use std::fmt;

use serde::Serialize;

/// The two strictly ordered native toolchain steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NativeStep {
    /// Generate the native build graph (e.g. `cmake . -B build`)
    Configure,
    /// Build the graph (e.g. `cmake --build build`)
    Build,
}

impl NativeStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            NativeStep::Configure => "configure",
            NativeStep::Build => "build",
        }
    }
}

impl fmt::Display for NativeStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
