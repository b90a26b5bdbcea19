//! File System Helpers
//!
//! Atomic placement and the advisory run lock.

mod atomic;
mod lock;

pub use atomic::{atomic_copy, atomic_write};
pub use lock::{RunLock, LOCK_FILE_NAME};
