//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `events/` - Event sinks (console, NDJSON)
//! - `fs/` - Atomic writes and the run lock
//! - `toolchain/` - Subprocess command runner and native toolchain
//! - `logging` - tracing subscriber setup

pub mod events;
pub mod fs;
pub mod logging;
pub mod toolchain;

// Re-export for convenience
pub use events::{ConsoleEventSink, JsonEventSink};
pub use fs::{atomic_copy, atomic_write, RunLock};
pub use toolchain::{ProcessCommandRunner, ProcessToolchain};
