//! Domain Services
//!
//! Stateless operations over domain entities.

pub mod header_renderer;
pub mod mangler;
pub mod stage_graph;
mod staleness;

pub use header_renderer::{render_header, render_headers};
pub use mangler::{assign_symbols, header_file_name, jni_symbol, mangle, MangleMode};
pub use staleness::{compare_headers, HeaderDrift, HeaderStatus};
pub use stage_graph::{Stage, StageArtifact, StageGraph, StageSpec};
